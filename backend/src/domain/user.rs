//! Identity and profile records shared by the provisioning and reset flows.
//!
//! The identity subsystem owns identifiers and credentials; the profile store
//! owns application attributes keyed by the same identifier. Types here stay
//! free of transport concerns so adapters can map them onto any wire format.

use std::fmt;

use zeroize::Zeroizing;

/// Validation errors raised when constructing identity primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was empty after trimming.
    #[error("identity id must not be empty")]
    EmptyId,
    /// Identifier carried leading or trailing whitespace.
    #[error("identity id must not contain surrounding whitespace")]
    PaddedId,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Identifier generated by the identity subsystem.
///
/// The value is opaque to this service. It is forwarded unchanged to the
/// profile store so the two records share a key.
///
/// # Examples
/// ```
/// use identity_admin::domain::IdentityId;
///
/// let id = IdentityId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.as_ref(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(IdentityId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityId(String);

impl IdentityId {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] for blank or padded values.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if value.trim() != value {
            return Err(UserValidationError::PaddedId);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password held only for the duration of one request.
///
/// The buffer is zeroed on drop and `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a plaintext password.
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyPassword`] for empty input.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = Zeroizing::new(value.into());
        if value.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(value))
    }

    /// Borrow the plaintext for forwarding to the identity subsystem.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        self.expose()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Parameters for creating an identity with a confirmed email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    /// Login identifier.
    pub email: String,
    /// Initial password.
    pub password: Password,
    /// Whether the email is marked confirmed on creation.
    pub email_confirmed: bool,
}

/// Identity as reported back by the identity subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// System-generated identifier.
    pub id: IdentityId,
    /// Email the identity was created with, when echoed back.
    pub email: Option<String>,
}

/// Application profile row keyed by the identity identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Identifier shared with the identity record.
    pub id: IdentityId,
    /// Display name.
    pub name: String,
    /// Contact email, equal to the login email.
    pub email_id: String,
    /// Optional mobile number.
    pub mobile_no: Option<String>,
    /// Caller-defined role name.
    pub role: String,
    /// Owning organisation.
    pub organisation_id: String,
    /// Optional venue within the organisation.
    pub venue_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("   ", UserValidationError::EmptyId)]
    #[case(" abc", UserValidationError::PaddedId)]
    fn identity_id_rejects_invalid_values(
        #[case] raw: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(IdentityId::new(raw), Err(expected));
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter22").expect("password");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
        assert_eq!(password.expose(), "hunter22");
    }

    #[rstest]
    fn password_rejects_empty_input() {
        assert_eq!(Password::new(""), Err(UserValidationError::EmptyPassword));
    }
}
