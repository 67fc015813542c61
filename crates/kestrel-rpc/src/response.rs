//! Canonical response envelopes.
//!
//! Success bodies carry `"status": "OK"`. In-band failures carry
//! `"status": "Failed"` plus an `"error"` message; pipeline errors use the
//! separate `errorCode`/`errorMessage` shape. Wallets parse these field
//! names, so they are wire contract.

use serde_json::{json, Value};

/// Body-level status for successful responses.
pub const STATUS_OK: &str = "OK";

/// Body-level status for failures reported in-band.
pub const STATUS_FAILED: &str = "Failed";

/// In-band failure envelope: `{"status": "Failed", "error": <message>}`.
pub fn failure(message: impl Into<String>) -> Value {
    json!({
        "status": STATUS_FAILED,
        "error": message.into(),
    })
}

/// In-band failure envelope carrying a stable code, for responses wallets
/// match on numerically.
pub fn coded_failure(code: i32, message: impl Into<String>) -> Value {
    json!({
        "status": STATUS_FAILED,
        "errorCode": code,
        "error": message.into(),
    })
}

/// Pipeline error envelope: `{"errorCode": <code>, "errorMessage": <message>}`.
pub fn error_envelope(code: i32, message: &str) -> Value {
    json!({
        "errorCode": code,
        "errorMessage": message,
    })
}
