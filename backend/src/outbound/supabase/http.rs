//! Shared reqwest plumbing for the Supabase adapters.

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};

use super::config::{ServiceRoleKey, SupabaseConfig};

const API_KEY_HEADER: &str = "apikey";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Client bound to one Supabase project and authenticated with the
/// service-role key.
#[derive(Clone)]
pub(super) struct SupabaseHttp {
    client: Client,
    base_url: Url,
    service_key: ServiceRoleKey,
}

impl SupabaseHttp {
    pub(super) fn new(config: &SupabaseConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
        })
    }

    /// Base URL extended with percent-encoded path segments.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Config validation guarantees a base URL, so segments are always
        // available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Request carrying the `apikey` and bearer headers.
    pub(super) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let key = self.service_key.expose();
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, key)
            .bearer_auth(key)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }
}

/// Human-readable status summary with a compact body preview.
pub(super) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn http(base: &str) -> SupabaseHttp {
        let config = SupabaseConfig {
            base_url: Url::parse(base).expect("url"),
            service_key: ServiceRoleKey::new("k"),
            profile_table: "users".into(),
            request_timeout: Duration::from_secs(1),
        };
        SupabaseHttp::new(&config).expect("client")
    }

    #[test]
    fn endpoint_appends_encoded_segments() {
        let url = http("https://abc.supabase.co/").endpoint(&["auth", "v1", "admin", "users", "a b"]);
        assert_eq!(url.as_str(), "https://abc.supabase.co/auth/v1/admin/users/a%20b");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = http("https://gw.example.com/supabase/").endpoint(&["rest", "v1", "users"]);
        assert_eq!(url.as_str(), "https://gw.example.com/supabase/rest/v1/users");
    }

    #[test]
    fn status_message_compacts_and_truncates_body() {
        let long = "x ".repeat(200);
        let message = status_message(StatusCode::BAD_GATEWAY, long.as_bytes());
        assert!(message.starts_with("status 502: x x"));
        assert!(message.ends_with("..."));
        assert_eq!(status_message(StatusCode::NOT_FOUND, b""), "status 404");
    }
}
