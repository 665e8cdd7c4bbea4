//! Request validation shared by both privileged operations.
//!
//! Bodies are decoded into a [`JsonObject`] first so malformed input is
//! rejected before any field is inspected. Required fields are then checked
//! as a group and every missing name is reported together. Only empty
//! strings count as blank: whitespace is forwarded for the identity subsystem
//! to judge. Nothing here performs I/O.

use serde_json::{Map, Value};

use super::Error;

/// Client-facing message for bodies that are not a JSON object.
pub const MALFORMED_BODY_MESSAGE: &str = "Invalid or empty JSON body";

/// Reasons a request body fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body was empty, not JSON, or not a JSON object.
    #[error("request body is not a JSON object")]
    Malformed,
    /// One or more required fields were absent, null, or empty.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Missing field names in declaration order.
        fields: Vec<&'static str>,
    },
}

impl ValidationError {
    /// Client-facing error for this failure.
    ///
    /// Malformed bodies always use [`MALFORMED_BODY_MESSAGE`]; missing fields
    /// use the operation's own `missing_message`.
    #[must_use]
    pub fn to_client_error(&self, missing_message: &'static str) -> Error {
        match self {
            Self::Malformed => Error::invalid_request(MALFORMED_BODY_MESSAGE),
            Self::MissingFields { .. } => Error::invalid_request(missing_message),
        }
    }
}

/// Decoded JSON object body.
///
/// # Examples
/// ```
/// use identity_admin::domain::JsonObject;
///
/// let object = JsonObject::parse(br#"{"email":"a@x.com","venue_id":7}"#).expect("object");
/// assert_eq!(object.text("email").as_deref(), Some("a@x.com"));
/// assert_eq!(object.text("venue_id").as_deref(), Some("7"));
/// assert!(object.text("role").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    /// Decode a raw body.
    ///
    /// # Errors
    /// Returns [`ValidationError::Malformed`] for empty bodies, invalid JSON,
    /// and JSON values other than objects.
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) | Err(_) => Err(ValidationError::Malformed),
        }
    }

    /// Textual value of a field.
    ///
    /// Strings are returned unchanged and numbers in their decimal form.
    /// Absent fields, nulls, empty strings and any other JSON type count as
    /// missing.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(value) if !value.is_empty() => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for JsonObject {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Collector for required fields.
///
/// Each [`RequiredFields::take`] call passes the value through and records
/// the field name when the value is absent or empty, so every missing field
/// is reported in one error.
///
/// # Examples
/// ```
/// use identity_admin::domain::{RequiredFields, ValidationError};
///
/// let mut fields = RequiredFields::default();
/// let email = fields.take("email", Some("a@x.com".to_owned()));
/// let role = fields.take("role", None::<String>);
/// assert_eq!(email.as_deref(), Some("a@x.com"));
/// assert!(role.is_none());
/// assert_eq!(
///     fields.into_result(),
///     Err(ValidationError::MissingFields { fields: vec!["role"] })
/// );
/// ```
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// Pass `value` through, recording `name` when it is absent or empty.
    pub fn take<T: AsRef<str>>(&mut self, name: &'static str, value: Option<T>) -> Option<T> {
        let value = value.filter(|text| !text.as_ref().is_empty());
        if value.is_none() {
            self.missing.push(name);
        }
        value
    }

    /// Error listing every missing field, in the order they were taken.
    #[must_use]
    pub fn into_error(self) -> ValidationError {
        ValidationError::MissingFields {
            fields: self.missing,
        }
    }

    /// `Ok(())` when nothing was missing.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingFields`] otherwise.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}
