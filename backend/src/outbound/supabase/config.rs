//! Supabase connection settings loaded via OrthoConfig.
//!
//! Raw settings are read once at start-up and validated into a
//! [`SupabaseConfig`] that the adapters borrow. Missing or invalid values are
//! reported as [`SupabaseConfigError`] and stop the process.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_PROFILE_TABLE: &str = "users";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const FINGERPRINT_LEN: usize = 12;

/// Raw Supabase settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUPABASE")]
pub struct SupabaseSettings {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub url: Option<String>,
    /// Service-role key used for administrative calls.
    pub service_role_key: Option<String>,
    /// Table holding application profiles.
    pub profile_table: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl fmt::Debug for SupabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseSettings")
            .field("url", &self.url)
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "<redacted>"),
            )
            .field("profile_table", &self.profile_table)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Reasons the Supabase settings cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupabaseConfigError {
    /// `SUPABASE_URL` was not provided.
    #[error("SUPABASE_URL must be set")]
    MissingUrl,
    /// `SUPABASE_URL` did not parse as an http(s) base URL.
    #[error("SUPABASE_URL is not a usable http(s) URL: {reason}")]
    InvalidUrl {
        /// Parser or scheme complaint.
        reason: String,
    },
    /// `SUPABASE_SERVICE_ROLE_KEY` was not provided.
    #[error("SUPABASE_SERVICE_ROLE_KEY must be set")]
    MissingServiceKey,
    /// The profile table name was blank or contained a path separator.
    #[error("SUPABASE_PROFILE_TABLE is not a valid table name: {name:?}")]
    InvalidProfileTable {
        /// Rejected value.
        name: String,
    },
    /// The request timeout was zero.
    #[error("SUPABASE_REQUEST_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

/// Service-role key held in a zeroizing buffer.
///
/// `Debug` never prints the key. [`ServiceRoleKey::fingerprint`] gives a
/// short SHA-256 prefix that is safe to log.
#[derive(Clone)]
pub struct ServiceRoleKey(Zeroizing<String>);

impl ServiceRoleKey {
    /// Wrap a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Borrow the key for request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Leading hex digits of the key's SHA-256 digest.
    ///
    /// # Examples
    /// ```
    /// use identity_admin::outbound::supabase::ServiceRoleKey;
    ///
    /// let key = ServiceRoleKey::new("service-role");
    /// assert_eq!(key.fingerprint().len(), 12);
    /// assert_eq!(key.fingerprint(), ServiceRoleKey::new("service-role").fingerprint());
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_LEN);
        encoded
    }
}

impl fmt::Debug for ServiceRoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceRoleKey(sha256:{})", self.fingerprint())
    }
}

/// Validated connection details shared by the Supabase adapters.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL with a trailing slash.
    pub base_url: Url,
    /// Service-role key.
    pub service_key: ServiceRoleKey,
    /// Table holding application profiles.
    pub profile_table: String,
    /// Per-request timeout applied by the HTTP client.
    pub request_timeout: Duration,
}

impl SupabaseSettings {
    /// Validate the raw settings.
    ///
    /// # Errors
    /// Returns [`SupabaseConfigError`] for missing or unusable values.
    pub fn into_config(self) -> Result<SupabaseConfig, SupabaseConfigError> {
        let raw_url = non_blank(self.url).ok_or(SupabaseConfigError::MissingUrl)?;
        let base_url = parse_base_url(&raw_url)?;
        let service_key =
            non_blank(self.service_role_key).ok_or(SupabaseConfigError::MissingServiceKey)?;

        let profile_table = self
            .profile_table
            .map(|name| name.trim().to_owned())
            .unwrap_or_else(|| DEFAULT_PROFILE_TABLE.to_owned());
        if profile_table.is_empty() || profile_table.contains('/') {
            return Err(SupabaseConfigError::InvalidProfileTable {
                name: profile_table,
            });
        }

        let timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(SupabaseConfigError::ZeroTimeout);
        }

        Ok(SupabaseConfig {
            base_url,
            service_key: ServiceRoleKey::new(service_key),
            profile_table,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url, SupabaseConfigError> {
    let mut url = Url::parse(raw).map_err(|err| SupabaseConfigError::InvalidUrl {
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(SupabaseConfigError::InvalidUrl {
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
