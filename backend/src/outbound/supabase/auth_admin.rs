//! GoTrue admin API adapter for the [`IdentityAdmin`] port.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::debug;

use super::config::SupabaseConfig;
use super::dto::{CreateUserDto, ErrorDto, UpdatePasswordDto, UserResponseDto};
use super::http::{SupabaseHttp, status_message};
use crate::domain::ports::{IdentityAdmin, IdentityAdminError};
use crate::domain::{IdentityId, IdentityRecord, NewIdentity, Password};

const USERS_PATH: [&str; 4] = ["auth", "v1", "admin", "users"];
const DUPLICATE_ERROR_CODES: [&str; 2] = ["email_exists", "user_already_exists"];

/// Identity adapter calling `/auth/v1/admin/users` with the service-role key.
#[derive(Clone)]
pub struct SupabaseAuthAdmin {
    http: SupabaseHttp,
}

impl SupabaseAuthAdmin {
    /// Build an adapter with a client that enforces the configured timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &SupabaseConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: SupabaseHttp::new(config)?,
        })
    }

    fn user_endpoint(&self, id: &IdentityId) -> reqwest::Url {
        let [auth, version, admin, users] = USERS_PATH;
        self.http.endpoint(&[auth, version, admin, users, id.as_ref()])
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<impl AsRef<[u8]>, IdentityAdminError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body)
    }
}

#[async_trait]
impl IdentityAdmin for SupabaseAuthAdmin {
    async fn create_identity(
        &self,
        identity: &NewIdentity,
    ) -> Result<IdentityRecord, IdentityAdminError> {
        let payload = CreateUserDto {
            email: identity.email.as_str(),
            password: identity.password.expose(),
            email_confirm: identity.email_confirmed,
        };
        let request = self
            .http
            .request(Method::POST, self.http.endpoint(&USERS_PATH))
            .json(&payload);
        let body = self.send(request).await?;
        parse_identity(body.as_ref())
    }

    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityAdminError> {
        let request = self.http.request(Method::DELETE, self.user_endpoint(id));
        self.send(request).await?;
        debug!(identity_id = %id, "identity deleted");
        Ok(())
    }

    async fn update_password(
        &self,
        id: &IdentityId,
        password: &Password,
    ) -> Result<(), IdentityAdminError> {
        let request = self
            .http
            .request(Method::PUT, self.user_endpoint(id))
            .json(&UpdatePasswordDto {
                password: password.expose(),
            });
        self.send(request).await?;
        Ok(())
    }
}

fn parse_identity(body: &[u8]) -> Result<IdentityRecord, IdentityAdminError> {
    let decoded: UserResponseDto = serde_json::from_slice(body).map_err(|error| {
        IdentityAdminError::decode(format!("invalid admin user payload: {error}"))
    })?;
    let user = decoded.into_user();
    let id = IdentityId::new(user.id)
        .map_err(|error| IdentityAdminError::decode(format!("invalid user id: {error}")))?;
    Ok(IdentityRecord {
        id,
        email: user.email,
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityAdminError {
    if error.is_timeout() {
        IdentityAdminError::timeout(error.to_string())
    } else {
        IdentityAdminError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityAdminError {
    let message = status_message(status, body);
    match status {
        StatusCode::NOT_FOUND => IdentityAdminError::not_found(message),
        StatusCode::CONFLICT => IdentityAdminError::conflict(message),
        StatusCode::UNPROCESSABLE_ENTITY if is_duplicate(body) => {
            IdentityAdminError::conflict(message)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityAdminError::timeout(message)
        }
        _ if status.is_client_error() => IdentityAdminError::rejected(message),
        _ => IdentityAdminError::transport(message),
    }
}

fn is_duplicate(body: &[u8]) -> bool {
    let envelope = ErrorDto::parse(body);
    if envelope
        .error_code
        .as_deref()
        .is_some_and(|code| DUPLICATE_ERROR_CODES.contains(&code))
    {
        return true;
    }
    envelope.description().is_some_and(|text| {
        let lowered = text.to_ascii_lowercase();
        lowered.contains("already been registered") || lowered.contains("already registered")
    })
}
