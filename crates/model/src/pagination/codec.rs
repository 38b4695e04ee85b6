//! Conversion between [`Cursor`] values and opaque string tokens.
//!
//! Tokens are compact JSON, e.g. `{"id":42,"sortValue":{"kind":"decimal","value":"19.90"}}`.
//! Callers embedding them in a URL are responsible for percent-encoding.
//! The literal `null` (and the empty string) mean "no cursor".
//!
//! Decoding is permissive at the boundary: anything that is not a well-formed
//! cursor turns into "start from the first page" rather than an error.

use crate::pagination::cursor::Cursor;
use thiserror::Error;
use tracing::warn;

/// Token value reserved for "no cursor".
pub const NULL_TOKEN: &str = "null";

#[derive(Debug, Error)]
pub enum CursorDecodeError {
    #[error("Cursor token is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Cursor token is not a JSON object")]
    NotAnObject,

    #[error("Cursor object is malformed: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Serializes a cursor into its token form.
pub fn encode(cursor: &Cursor) -> Result<String, serde_json::Error> {
    serde_json::to_string(cursor)
}

/// Parses a token, distinguishing "no cursor supplied" (`Ok(None)`) from
/// "cursor supplied but unusable" (`Err`).
pub fn parse(token: &str) -> Result<Option<Cursor>, CursorDecodeError> {
    let token = token.trim();
    if token.is_empty() || token == NULL_TOKEN {
        return Ok(None);
    }

    let json: serde_json::Value = serde_json::from_str(token).map_err(CursorDecodeError::Json)?;
    if json.is_null() {
        return Ok(None);
    }
    if !json.is_object() {
        return Err(CursorDecodeError::NotAnObject);
    }

    serde_json::from_value(json)
        .map(Some)
        .map_err(CursorDecodeError::Shape)
}

/// Decodes a token, mapping every failure to `None`.
pub fn decode(token: &str) -> Option<Cursor> {
    match parse(token) {
        Ok(cursor) => cursor,
        Err(err) => {
            warn!(%err, "Ignoring unusable cursor; starting from the first page");
            None
        }
    }
}

/// Decodes an optional token as received from a request.
pub fn decode_opt(token: Option<&str>) -> Option<Cursor> {
    token.and_then(decode)
}
