//! Helpers shared by the tool implementations: argument extraction and the
//! `content` envelope of a `tools/call` result.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{QaError, QaResult};

/// Wrap plain text as a tool result
pub fn text_response(text: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    })
}

/// Wrap a serializable value as pretty-printed JSON text
pub fn json_response<T: Serialize>(value: &T) -> QaResult<Value> {
    Ok(text_response(serde_json::to_string_pretty(value)?))
}

/// Tool result flagged as an error, for failures the caller should read
/// rather than protocol errors
pub fn error_response(message: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": format!("Error: {}", message)
        }],
        "isError": true
    })
}

pub fn required_str<'a>(params: &'a Value, key: &str) -> QaResult<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| QaError::invalid(format!("'{}' must be a string", key)))
}

/// Absent and `null` both read as `None`
pub fn optional_str<'a>(params: &'a Value, key: &str) -> QaResult<Option<&'a str>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(QaError::invalid(format!("'{}' must be a string", key))),
    }
}

pub fn required_id(params: &Value, key: &str) -> QaResult<u64> {
    params
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| QaError::invalid(format!("'{}' must be a non-negative integer", key)))
}

pub fn optional_f64(params: &Value, key: &str) -> QaResult<Option<f64>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| QaError::invalid(format!("'{}' must be a number", key))),
    }
}

pub fn required_bool(params: &Value, key: &str) -> QaResult<bool> {
    params
        .get(key)
        .and_then(Value::as_bool)
        .ok_or_else(|| QaError::invalid(format!("'{}' must be a boolean", key)))
}

/// Deserialize one argument into a typed value
pub fn required_value<T: serde::de::DeserializeOwned>(params: &Value, key: &str) -> QaResult<T> {
    let value = params
        .get(key)
        .cloned()
        .ok_or_else(|| QaError::invalid(format!("'{}' is required", key)))?;
    serde_json::from_value(value)
        .map_err(|e| QaError::invalid(format!("'{}' is malformed: {}", key, e)))
}
