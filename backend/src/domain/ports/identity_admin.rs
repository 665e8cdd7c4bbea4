//! Driven port for the identity subsystem's administrative API.
//!
//! Calls through this port require the service-role credential. Adapters map
//! transport failures into [`IdentityAdminError`] so the domain can decide
//! what is reported and what is compensated.

use async_trait::async_trait;

use crate::domain::{IdentityId, IdentityRecord, NewIdentity, Password};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity subsystem adapters.
    pub enum IdentityAdminError {
        /// An identity with the same email already exists.
        Conflict => "identity already exists",
        /// The referenced identity does not exist.
        NotFound => "identity not found",
        /// The subsystem rejected the request as invalid.
        Rejected => "identity request rejected",
        /// The call did not complete in time.
        Timeout => "identity subsystem timed out",
        /// Connection failures and unexpected statuses.
        Transport => "identity subsystem transport failure",
        /// A success response could not be decoded.
        Decode => "identity subsystem response could not be decoded",
    }
}

/// Administrative operations on identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityAdmin: Send + Sync {
    /// Create an identity and return its generated identifier.
    async fn create_identity(
        &self,
        identity: &NewIdentity,
    ) -> Result<IdentityRecord, IdentityAdminError>;

    /// Delete an identity by identifier.
    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityAdminError>;

    /// Replace the password of an existing identity.
    async fn update_password(
        &self,
        id: &IdentityId,
        password: &Password,
    ) -> Result<(), IdentityAdminError>;
}
