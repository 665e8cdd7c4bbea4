//! Domain types and services for privileged identity administration.
//!
//! Purpose: keep the provisioning workflow and the password reset free of
//! transport concerns. Inbound adapters decode requests into the types here
//! and outbound adapters implement the driven ports.
//!
//! Public surface:
//! - [`ProvisioningService`]: creates the identity then the profile, rolling
//!   the identity back when the profile write fails.
//! - [`CredentialResetService`]: replaces an identity's password.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`saga`]: the generic step runner used by provisioning.

mod call_timeout;
pub mod credential_reset;
pub mod error;
pub mod ports;
pub mod provisioning;
pub mod saga;
mod trace_id;
pub mod user;
pub mod validation;

pub use self::call_timeout::CallTimeout;
pub use self::credential_reset::{
    CredentialResetRequest, CredentialResetService, RESET_FAILURE_MESSAGE,
    RESET_MISSING_FIELDS_MESSAGE, ResetError,
};
pub use self::error::{Error, ErrorCode};
pub use self::provisioning::{
    IDENTITY_FAILURE_MESSAGE, MISSING_FIELDS_MESSAGE, NewUser, PROFILE_FAILURE_MESSAGE,
    ProvisionError, ProvisionedUser, ProvisioningService, UserProvisioningRequest,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    IdentityId, IdentityRecord, NewIdentity, Password, ProfileRecord, UserValidationError,
};
pub use self::validation::{JsonObject, MALFORMED_BODY_MESSAGE, RequiredFields, ValidationError};
