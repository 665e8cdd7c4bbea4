//! Client-facing failure returned by the driving ports.
//!
//! Services translate their own error enums into this type after logging the
//! cause, so the message is always one of the fixed strings defined next to
//! each service. The HTTP adapter only chooses a status from the [`ErrorCode`].

use std::borrow::Cow;
use std::fmt;

use super::TraceId;

/// Failure category, mapped to an HTTP status by the inbound adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Malformed body or missing fields.
    InvalidRequest,
    /// A backing subsystem failed.
    InternalError,
}

impl ErrorCode {
    /// Snake-case label used as a log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InternalError => "internal_error",
        }
    }
}

/// Failure payload with a fixed message and the request's trace id.
///
/// # Examples
/// ```
/// use identity_admin::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("Missing fields");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "Missing fields");
/// assert!(err.trace_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: Cow<'static, str>,
    trace_id: Option<TraceId>,
}

impl Error {
    /// Build an error, capturing the trace id of the enclosing request.
    pub fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current(),
        }
    }

    /// [`ErrorCode::InvalidRequest`] with `message`.
    pub fn invalid_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::InternalError`] with `message`.
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message returned to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace id of the request that raised the error, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Replace the captured trace id.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest, "invalid_request")]
    #[case(Error::internal("boom"), ErrorCode::InternalError, "internal_error")]
    fn constructors_set_code(
        #[case] error: Error,
        #[case] expected: ErrorCode,
        #[case] label: &str,
    ) {
        assert_eq!(error.code(), expected);
        assert_eq!(error.code().as_str(), label);
    }

    #[tokio::test]
    async fn trace_id_is_captured_in_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("uuid");
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(trace_id));
        assert_eq!(Error::internal("boom").trace_id(), None);
    }

    #[rstest]
    fn display_is_the_client_message() {
        assert_eq!(Error::invalid_request("Missing fields").to_string(), "Missing fields");
    }
}
