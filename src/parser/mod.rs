//! JSONL parser for chat records.
//!
//! Each line holds one JSON object tagged by `"type"` (`user` or `comment`).
//! Parsing happens in two steps so syntax errors and schema errors can be
//! told apart in the log.

use crate::model::{ChatRecord, ParseError};
use serde_json::Value;

/// Field reported when the decoder does not name one.
const UNKNOWN_FIELD: &str = "record";

/// Parse a single JSONL line into a [`ChatRecord`].
///
/// # Errors
///
/// - [`ParseError::InvalidJson`] if the line is not valid JSON
/// - [`ParseError::InvalidField`] if it is JSON but not a valid record
///
/// # Examples
///
/// ```
/// # use lcv::parser::parse_record;
/// # use lcv::model::ParseError;
/// let err = parse_record(r#"{"type":"comment","id":"c1"}"#, 4).unwrap_err();
/// assert!(matches!(err, ParseError::InvalidField { line: 4, .. }));
/// ```
pub fn parse_record(raw: &str, line_number: usize) -> Result<ChatRecord, ParseError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    if value.get("type").is_none() {
        return Err(ParseError::InvalidField {
            line: line_number,
            field: "type".to_string(),
            message: "record has no \"type\" tag".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        ParseError::InvalidField {
            line: line_number,
            field: offending_field(&message).unwrap_or(UNKNOWN_FIELD).to_string(),
            message,
        }
    })
}

/// Extract the first backquoted name from a serde error message, as in
/// "missing field `text`".
fn offending_field(message: &str) -> Option<&str> {
    if message.starts_with("unknown variant") {
        return Some("type");
    }
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(&message[start..start + len]).filter(|name| !name.is_empty())
}
