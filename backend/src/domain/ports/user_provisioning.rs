//! Driving port for provisioning users.
//!
//! Inbound adapters use this port so handlers stay independent of the saga
//! and of the two backing subsystems.

use async_trait::async_trait;

use crate::domain::{Error, ProvisionedUser, UserProvisioningRequest};

/// Domain use-case port for creating a user in both subsystems.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProvisioning: Send + Sync {
    /// Validate the request and create the identity and profile.
    async fn provision(&self, request: UserProvisioningRequest) -> Result<ProvisionedUser, Error>;
}
