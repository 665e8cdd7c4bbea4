//! Wire payloads for the GoTrue admin API and PostgREST.

use serde::{Deserialize, Serialize};

use crate::domain::ProfileRecord;

/// `POST /auth/v1/admin/users` body.
#[derive(Debug, Serialize)]
pub(super) struct CreateUserDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) email_confirm: bool,
}

/// `PUT /auth/v1/admin/users/{id}` body.
#[derive(Debug, Serialize)]
pub(super) struct UpdatePasswordDto<'a> {
    pub(super) password: &'a str,
}

/// User object returned by the admin API. Older GoTrue releases return the
/// user at the top level; newer ones wrap it in `user`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum UserResponseDto {
    Wrapped { user: UserDto },
    Bare(UserDto),
}

impl UserResponseDto {
    pub(super) fn into_user(self) -> UserDto {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

/// Error envelope used by both GoTrue and PostgREST. Every field is optional
/// because the two services and their versions disagree on names.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorDto {
    #[serde(default)]
    pub(super) code: Option<serde_json::Value>,
    #[serde(default)]
    pub(super) error_code: Option<String>,
    #[serde(default)]
    pub(super) msg: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorDto {
    pub(super) fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// `code` as text; GoTrue sends a number, PostgREST a SQLSTATE string.
    pub(super) fn code_text(&self) -> Option<String> {
        match self.code.as_ref()? {
            serde_json::Value::String(code) => Some(code.clone()),
            serde_json::Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }

    pub(super) fn description(&self) -> Option<&str> {
        self.msg.as_deref().or(self.message.as_deref())
    }
}

/// Profile row inserted through PostgREST.
#[derive(Debug, Serialize)]
pub(super) struct ProfileRowDto<'a> {
    id: &'a str,
    name: &'a str,
    email_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile_no: Option<&'a str>,
    role: &'a str,
    organisation_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    venue_id: Option<&'a str>,
}

impl<'a> From<&'a ProfileRecord> for ProfileRowDto<'a> {
    fn from(profile: &'a ProfileRecord) -> Self {
        Self {
            id: profile.id.as_ref(),
            name: profile.name.as_str(),
            email_id: profile.email_id.as_str(),
            mobile_no: profile.mobile_no.as_deref(),
            role: profile.role.as_str(),
            organisation_id: profile.organisation_id.as_str(),
            venue_id: profile.venue_id.as_deref(),
        }
    }
}
