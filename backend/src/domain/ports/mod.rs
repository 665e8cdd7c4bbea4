//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`IdentityAdmin`], [`ProfileStore`]) describe the two
//! backing subsystems. Driving ports ([`UserProvisioning`],
//! [`CredentialReset`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_reset;
mod identity_admin;
mod profile_store;
mod user_provisioning;

pub use credential_reset::CredentialReset;
#[cfg(test)]
pub use credential_reset::MockCredentialReset;
#[cfg(test)]
pub use identity_admin::MockIdentityAdmin;
pub use identity_admin::{IdentityAdmin, IdentityAdminError};
#[cfg(test)]
pub use profile_store::MockProfileStore;
pub use profile_store::{ProfileStore, ProfileStoreError};
#[cfg(test)]
pub use user_provisioning::MockUserProvisioning;
pub use user_provisioning::UserProvisioning;
