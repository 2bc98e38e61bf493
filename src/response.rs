//! Typed view of the GDMS response envelope.
//!
//! Every signed endpoint wraps its payload the same way:
//!
//! ```json
//! { "retCode": 0, "msg": "success", "data": { "result": [ ... ] } }
//! ```
//!
//! `retCode` 0 means the operation was accepted; non-zero codes report
//! vendor-side failures (bad signature, unknown device, permission denied)
//! inside a 200 response. The payload under `data` varies per endpoint and
//! is kept as a generic [`serde_json::Value`], with accessors that turn a
//! missing field into a typed error instead of a panic.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GdmsError, Result};

/// A GDMS API response envelope.
///
/// Deserialization is deliberately tolerant: every field is optional on the
/// wire, because failure payloads omit `data` and some endpoints omit
/// `msg`. Use the accessors to reach into the payload safely.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Vendor result code; 0 on success. Defaults to 0 when absent.
    #[serde(default)]
    pub ret_code: i64,

    /// Human-readable result message (e.g. `"success"`).
    #[serde(default)]
    pub msg: Option<String>,

    /// Endpoint-specific payload. Shape varies per endpoint; list
    /// endpoints nest their items under a `result` key.
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Whether the vendor accepted the operation (`retCode == 0`).
    ///
    /// A non-zero code is not an error at the transport layer — the
    /// response is still returned to the caller with the code and message
    /// intact, mirroring how the API reports them.
    pub fn is_ok(&self) -> bool {
        self.ret_code == 0
    }

    /// The `data` payload.
    ///
    /// # Errors
    ///
    /// `GdmsError::Response` when the envelope has no `data` field.
    pub fn data(&self) -> Result<&Value> {
        self.data.as_ref().ok_or_else(|| GdmsError::Response {
            field: "data".to_string(),
        })
    }

    /// The `data.result` payload used by list endpoints.
    ///
    /// # Errors
    ///
    /// `GdmsError::Response` when `data` or `data.result` is absent.
    pub fn result(&self) -> Result<&Value> {
        self.data()?.get("result").ok_or_else(|| GdmsError::Response {
            field: "data.result".to_string(),
        })
    }

    /// The `data.result` payload as an array.
    ///
    /// # Errors
    ///
    /// `GdmsError::Response` when the field is absent or not an array.
    pub fn result_array(&self) -> Result<&Vec<Value>> {
        self.result()?.as_array().ok_or_else(|| GdmsError::Response {
            field: "data.result[]".to_string(),
        })
    }
}
