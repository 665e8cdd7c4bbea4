//! Driven port for the profile table.

use async_trait::async_trait;

use crate::domain::ProfileRecord;

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile store adapters.
    pub enum ProfileStoreError {
        /// A uniqueness, foreign-key or check constraint rejected the row.
        Constraint => "profile constraint violated",
        /// The store rejected the request as invalid.
        Rejected => "profile insert rejected",
        /// The call did not complete in time.
        Timeout => "profile store timed out",
        /// Connection failures and unexpected statuses.
        Transport => "profile store transport failure",
    }
}

/// Write access to application profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a new profile row.
    async fn insert_profile(&self, profile: &ProfileRecord) -> Result<(), ProfileStoreError>;
}
