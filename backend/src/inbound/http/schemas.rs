//! Response bodies and OpenAPI schema definitions.
//!
//! Request bodies are decoded field by field from a [`crate::domain::JsonObject`]
//! so that malformed and incomplete input map to distinct errors. The request
//! schemas below exist for documentation only.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned on success by both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuccessBody {
    /// Always `true`.
    #[schema(example = true)]
    pub success: bool,
}

impl SuccessBody {
    /// The success payload.
    pub const OK: Self = Self { success: true };
}

/// Body returned for every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Fixed, client-safe description of the failure.
    #[schema(example = "Missing required fields")]
    pub error: String,
}

/// Request body for `create-user`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateUserBodySchema {
    /// Login email, also stored as the profile contact address.
    #[schema(example = "a@x.com")]
    email: String,
    /// Initial password.
    #[schema(example = "pw123456")]
    password: String,
    /// Display name.
    #[schema(example = "A")]
    name: String,
    /// Optional mobile number.
    mobile_no: Option<String>,
    /// Caller-defined role.
    #[schema(example = "admin")]
    role: String,
    /// Owning organisation; strings and numbers are accepted.
    #[schema(example = "org1")]
    organisation_id: String,
    /// Optional venue; strings and numbers are accepted.
    venue_id: Option<String>,
}

/// Request body for `reset-user-password`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ResetPasswordBodySchema {
    /// Identity identifier.
    #[schema(example = "6d1f3c1e-2b1a-4d4e-9f3a-0c8e5b7a9d21")]
    user_id: String,
    /// Replacement password.
    new_password: String,
}
