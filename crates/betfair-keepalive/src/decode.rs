//! Response body decoding

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Parse the body into a JSON object.
///
/// All or nothing: malformed JSON and well-formed JSON that is not an object
/// both fail with the raw text attached.
pub fn decode(text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            debug!(kind = json_kind(&other), "keepAlive body is not an object");
            Err(invalid(text))
        }
        Err(e) => {
            debug!(error = %e, "keepAlive body is not valid JSON");
            Err(invalid(text))
        }
    }
}

fn invalid(text: &str) -> Error {
    Error::InvalidResponse {
        text: text.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_object() {
        let map = decode(r#"{"status":"SUCCESS","token":"abc123"}"#).unwrap();
        assert_eq!(map["status"], "SUCCESS");
        assert_eq!(map["token"], "abc123");
    }

    #[test]
    fn rejects_plain_text_with_raw_body() {
        match decode("not json").unwrap_err() {
            Error::InvalidResponse { text } => assert_eq!(text, "not json"),
            other => panic!("expected InvalidResponse, got {other:?}"),
        }
    }

    #[test]
    fn rejects_truncated_object() {
        assert!(decode(r#"{"status":"SUCC"#).is_err());
    }

    #[test]
    fn rejects_non_object_json() {
        for body in ["[1,2]", "\"SUCCESS\"", "42", "null"] {
            match decode(body) {
                Err(Error::InvalidResponse { text }) => assert_eq!(text, body),
                other => panic!("{body}: expected InvalidResponse, got {other:?}"),
            }
        }
    }
}
