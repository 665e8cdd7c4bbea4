//! Shared body decoding for inbound HTTP adapters.

use crate::domain::{Error, JsonObject, MALFORMED_BODY_MESSAGE};

/// Decode a raw request body into a JSON object.
///
/// Empty bodies, invalid JSON and non-object JSON values are all rejected
/// with the same client-facing message.
pub(crate) fn parse_body(body: &[u8]) -> Result<JsonObject, Error> {
    JsonObject::parse(body).map_err(|err| {
        tracing::debug!(error = %err, "rejecting request body");
        err.to_client_error(MALFORMED_BODY_MESSAGE)
    })
}
