//! Interpretation of the portal's JSON response envelopes.

use crate::domain::errors::ApiError;
use serde_json::Value;

/// Extracts `data` from a `{success, data, message?}` envelope. Non-2xx
/// statuses, `success: false` and a present `error` member are failures.
pub fn interpret_envelope(status: u16, body: &[u8]) -> Result<Value, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            message: error_message(body),
        });
    }

    let json: Value = serde_json::from_slice(body)?;
    if let Some(object) = json.as_object() {
        if object.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(ApiError::Rejected {
                message: message_of(&json),
            });
        }
        if object.get("error").is_some_and(|e| !e.is_null()) {
            return Err(ApiError::Rejected {
                message: message_of(&json),
            });
        }
    }

    Ok(json.get("data").cloned().unwrap_or(Value::Null))
}

/// Export responses are an opaque file on success. A JSON body that reports
/// `success: false` is still a failure.
pub fn interpret_export(status: u16, is_json: bool, body: Vec<u8>) -> Result<Vec<u8>, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            message: error_message(&body),
        });
    }
    if is_json {
        if let Ok(json) = serde_json::from_slice::<Value>(&body) {
            if json.get("success").and_then(Value::as_bool) == Some(false) {
                return Err(ApiError::Rejected {
                    message: message_of(&json),
                });
            }
        }
    }
    Ok(body)
}

/// Server-provided `message` (or a string `error`) from an error body.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| message_of(&json))
}

fn message_of(json: &Value) -> Option<String> {
    json.get("message")
        .and_then(Value::as_str)
        .or_else(|| json.get("error").and_then(Value::as_str))
        .map(str::to_string)
}
