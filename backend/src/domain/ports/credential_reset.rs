//! Driving port for administrative password resets.

use async_trait::async_trait;

use crate::domain::{CredentialResetRequest, Error};

/// Domain use-case port for replacing a user's password.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialReset: Send + Sync {
    /// Validate the request and update the stored credential.
    async fn reset(&self, request: CredentialResetRequest) -> Result<(), Error>;
}
