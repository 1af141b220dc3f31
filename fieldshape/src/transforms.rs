//! Built-in field transformations
//!
//! Each returns `None` when handed a value it cannot transform, which the
//! pipeline reports as a transformation error on that field.

use serde_json::Value;

/// Placeholder written by [`redact`]
pub const REDACTED: &str = "[redacted]";

pub fn uppercase(value: &Value) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.to_uppercase()))
}

pub fn lowercase(value: &Value) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.to_lowercase()))
}

/// Strip leading and trailing whitespace
pub fn trim(value: &Value) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.trim().to_string()))
}

/// Keep the field but hide its value
pub fn redact(_value: &Value) -> Option<Value> {
    Some(Value::String(REDACTED.to_string()))
}

/// Render scalars and containers as text; null has no text form
pub fn to_string(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Value::String(s.clone())),
        other => Some(Value::String(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_transforms() {
        assert_eq!(uppercase(&json!("alice")), Some(json!("ALICE")));
        assert_eq!(lowercase(&json!("ALICE")), Some(json!("alice")));
        assert_eq!(uppercase(&json!(1)), None);
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(&json!("  padded \n")), Some(json!("padded")));
        assert_eq!(trim(&json!(true)), None);
    }

    #[test]
    fn test_redact_accepts_anything() {
        assert_eq!(redact(&json!({"a": 1})), Some(json!(REDACTED)));
        assert_eq!(redact(&Value::Null), Some(json!(REDACTED)));
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&json!(42)), Some(json!("42")));
        assert_eq!(to_string(&json!(false)), Some(json!("false")));
        assert_eq!(to_string(&json!("x")), Some(json!("x")));
        assert_eq!(to_string(&json!([1, 2])), Some(json!("[1,2]")));
        assert_eq!(to_string(&Value::Null), None);
    }
}
