//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CredentialReset, UserProvisioning};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Creates users in both subsystems.
    pub provisioning: Arc<dyn UserProvisioning>,
    /// Replaces passwords.
    pub credentials: Arc<dyn CredentialReset>,
}

impl HttpState {
    /// Construct state from the two driving ports.
    pub fn new(
        provisioning: Arc<dyn UserProvisioning>,
        credentials: Arc<dyn CredentialReset>,
    ) -> Self {
        Self {
            provisioning,
            credentials,
        }
    }
}
