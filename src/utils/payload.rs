// Payload unwrapping

use crate::types::*;
use serde_json::Value;

/// Extract the payload of a response body.
///
/// JSON bodies are parsed, anything else is kept as a JSON string and an
/// empty body becomes `null`. A bare number that would not print back as the
/// same text (`1e3`, integers beyond 64 bits) is kept as its original text.
pub fn unwrap_payload(body: &str) -> Value {
    let text = body.trim();
    if text.is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(body) {
        Ok(Value::Number(n)) if n.to_string() != text => Value::String(text.to_string()),
        Ok(value) => value,
        Err(_) => Value::String(body.to_string()),
    }
}

/// Read a resource identifier returned as a bare payload
pub fn payload_to_id(payload: Value) -> ApiResult<String> {
    match payload {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        other => Err(ApiError::parse_error(
            "Expected an identifier in response",
            Some(other.to_string()),
            None::<serde_json::Error>,
            Some(concat!(file!(), ":", line!())),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_payload() {
        assert_eq!(unwrap_payload(r#"{"id":"1"}"#), json!({"id": "1"}));
        assert_eq!(unwrap_payload("abc-123"), json!("abc-123"));
        assert_eq!(unwrap_payload("  "), Value::Null);
        assert_eq!(unwrap_payload("[]"), json!([]));
        assert_eq!(unwrap_payload("17"), json!(17));
        assert_eq!(unwrap_payload("1.5"), json!(1.5));
    }

    #[test]
    fn test_unwrap_payload_keeps_number_text() {
        assert_eq!(unwrap_payload("1e3"), json!("1e3"));
        assert_eq!(
            unwrap_payload("123456789012345678901234567890"),
            json!("123456789012345678901234567890")
        );
    }

    #[test]
    fn test_payload_to_id() {
        assert_eq!(payload_to_id(json!("x1")).unwrap(), "x1");
        assert_eq!(payload_to_id(json!(42)).unwrap(), "42");
        assert_eq!(payload_to_id(json!(-3)).unwrap(), "-3");
        assert!(payload_to_id(json!(1000.0)).is_err());
        assert!(payload_to_id(json!("")).is_err());
        assert!(payload_to_id(json!({"id": 1})).is_err());
    }
}
