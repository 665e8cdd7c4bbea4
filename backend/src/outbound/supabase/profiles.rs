//! PostgREST adapter for the [`ProfileStore`] port.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::config::SupabaseConfig;
use super::dto::{ErrorDto, ProfileRowDto};
use super::http::{SupabaseHttp, status_message};
use crate::domain::ProfileRecord;
use crate::domain::ports::{ProfileStore, ProfileStoreError};

/// SQLSTATE codes for unique, foreign-key and check violations.
const CONSTRAINT_SQLSTATES: [&str; 3] = ["23505", "23503", "23514"];

/// Profile adapter inserting rows through `/rest/v1/<table>`.
#[derive(Clone)]
pub struct PostgrestProfileStore {
    http: SupabaseHttp,
    table: String,
}

impl PostgrestProfileStore {
    /// Build an adapter writing to the configured profile table.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &SupabaseConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: SupabaseHttp::new(config)?,
            table: config.profile_table.clone(),
        })
    }
}

#[async_trait]
impl ProfileStore for PostgrestProfileStore {
    async fn insert_profile(&self, profile: &ProfileRecord) -> Result<(), ProfileStoreError> {
        let url = self.http.endpoint(&["rest", "v1", self.table.as_str()]);
        let response = self
            .http
            .request(Method::POST, url)
            .header("Prefer", "return=minimal")
            .json(&ProfileRowDto::from(profile))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> ProfileStoreError {
    if error.is_timeout() {
        ProfileStoreError::timeout(error.to_string())
    } else {
        ProfileStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ProfileStoreError {
    let message = status_message(status, body);
    let sqlstate = ErrorDto::parse(body).code_text();
    if status == StatusCode::CONFLICT
        || sqlstate
            .as_deref()
            .is_some_and(|code| CONSTRAINT_SQLSTATES.contains(&code))
    {
        return ProfileStoreError::constraint(message);
    }
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProfileStoreError::timeout(message)
        }
        _ if status.is_client_error() => ProfileStoreError::rejected(message),
        _ => ProfileStoreError::transport(message),
    }
}
