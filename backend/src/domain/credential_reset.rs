//! Administrative password reset.
//!
//! A reset is one call into the identity subsystem, so there is nothing to
//! compensate. The identifier is only trimmed; the identity subsystem
//! decides whether it exists.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{CredentialReset, IdentityAdmin, IdentityAdminError};
use crate::domain::{
    CallTimeout, Error, IdentityId, JsonObject, Password, RequiredFields, ValidationError,
};

/// Client-facing message for reset requests lacking a field.
pub const RESET_MISSING_FIELDS_MESSAGE: &str = "Missing fields";
/// Client-facing message for any failed reset.
pub const RESET_FAILURE_MESSAGE: &str = "Failed to reset password";

/// Unvalidated reset input as decoded from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialResetRequest {
    /// Identifier of the identity whose password changes.
    pub user_id: Option<String>,
    /// Replacement password.
    pub new_password: Option<Password>,
}

impl CredentialResetRequest {
    /// Read the request fields from a decoded JSON object.
    #[must_use]
    pub fn from_json(object: &JsonObject) -> Self {
        Self {
            user_id: object.text("user_id"),
            new_password: object
                .text("new_password")
                .and_then(|value| Password::new(value).ok()),
        }
    }
}

/// Failures of a password reset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResetError {
    /// The request failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The identity subsystem has no identity with this id.
    #[error("identity not found: {0}")]
    IdentityNotFound(IdentityAdminError),
    /// The identity subsystem refused or failed the update.
    #[error("password update failed: {0}")]
    UpdateFailed(IdentityAdminError),
}

/// Reset service implementing [`CredentialReset`].
pub struct CredentialResetService<I: ?Sized> {
    identities: Arc<I>,
    timeout: CallTimeout,
}

impl<I: ?Sized> CredentialResetService<I> {
    /// Create a service over the identity port.
    pub fn new(identities: Arc<I>, timeout: CallTimeout) -> Self {
        Self {
            identities,
            timeout,
        }
    }
}

impl<I> CredentialResetService<I>
where
    I: IdentityAdmin + ?Sized + 'static,
{
    fn validate(request: CredentialResetRequest) -> Result<(IdentityId, Password), ValidationError> {
        let mut fields = RequiredFields::default();
        let user_id = fields
            .take("user_id", request.user_id.map(|raw| raw.trim().to_owned()))
            .and_then(|id| IdentityId::new(id).ok());
        let new_password = fields.take("new_password", request.new_password);
        match (user_id, new_password) {
            (Some(user_id), Some(new_password)) => Ok((user_id, new_password)),
            _ => Err(fields.into_error()),
        }
    }

    /// Validate the request and replace the password.
    ///
    /// # Errors
    /// Returns [`ResetError`] when validation or the update fails.
    pub async fn reset(&self, request: CredentialResetRequest) -> Result<(), ResetError> {
        let (user_id, new_password) = Self::validate(request)?;
        self.timeout
            .bound(
                self.identities.update_password(&user_id, &new_password),
                |limit| {
                    IdentityAdminError::timeout(format!(
                        "update password exceeded {}ms",
                        limit.as_millis()
                    ))
                },
            )
            .await
            .map_err(|err| match err {
                IdentityAdminError::NotFound { .. } => ResetError::IdentityNotFound(err),
                other => ResetError::UpdateFailed(other),
            })?;
        info!(%user_id, "password reset");
        Ok(())
    }

    fn map_error(error: &ResetError) -> Error {
        match error {
            ResetError::Validation(cause) => {
                info!(error = %cause, "reset request rejected");
                cause.to_client_error(RESET_MISSING_FIELDS_MESSAGE)
            }
            ResetError::IdentityNotFound(cause) | ResetError::UpdateFailed(cause) => {
                warn!(error = %cause, "password reset failed");
                Error::internal(RESET_FAILURE_MESSAGE)
            }
        }
    }
}

#[async_trait]
impl<I> CredentialReset for CredentialResetService<I>
where
    I: IdentityAdmin + ?Sized + 'static,
{
    async fn reset(&self, request: CredentialResetRequest) -> Result<(), Error> {
        CredentialResetService::reset(self, request)
            .await
            .map_err(|err| Self::map_error(&err))
    }
}
