//! Service entry-point: loads configuration, wires the Supabase adapters and
//! serves the admin functions.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use identity_admin::inbound::http::health::HealthState;
use identity_admin::outbound::supabase::SupabaseSettings;

use server::{ServerConfig, ServerSettings, build_http_state, create_server};

/// Settings come from the environment only; both settings structs share argv.
fn program_name() -> impl Iterator<Item = OsString> {
    std::env::args_os().take(1)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let supabase = SupabaseSettings::load_from_iter(program_name())
        .map_err(|e| std::io::Error::other(format!("failed to load Supabase settings: {e}")))?
        .into_config()
        .map_err(|e| {
            error!(error = %e, "Supabase configuration rejected");
            std::io::Error::other(e)
        })?;
    let server_settings = ServerSettings::load_from_iter(program_name())
        .map_err(|e| std::io::Error::other(format!("failed to load server settings: {e}")))?;
    let bind_addr = server_settings.bind_addr().map_err(std::io::Error::other)?;

    let http_state = build_http_state(&supabase)?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, http_state))?;

    info!(%bind_addr, "listening");
    server.await
}
