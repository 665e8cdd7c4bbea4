//! HTTP server settings and configuration object.

use std::net::{IpAddr, SocketAddr};

use actix_web::web;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use identity_admin::inbound::http::state::HttpState;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Listener settings loaded from `ADMIN_SERVER_*` variables or CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN_SERVER")]
pub struct ServerSettings {
    /// Interface to bind, defaults to all IPv4 interfaces.
    pub host: Option<String>,
    /// Port to bind, defaults to 8080.
    pub port: Option<u16>,
}

/// The configured host is not an IP address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ADMIN_SERVER_HOST is not an IP address: {host:?}")]
pub struct InvalidHost {
    host: String,
}

impl ServerSettings {
    /// Resolve the socket address to listen on.
    ///
    /// # Errors
    /// Returns [`InvalidHost`] when the host does not parse as an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidHost> {
        let host = self.host.as_deref().map_or(DEFAULT_HOST, str::trim);
        let ip = host.parse::<IpAddr>().map_err(|_| InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }
}

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
}

impl ServerConfig {
    /// Bundle the listener address with the handler state.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
        }
    }
}
