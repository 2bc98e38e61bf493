//! Typed error hierarchy for the gdms crate.
//!
//! `GdmsError` gives every failure a structured variant that preserves
//! diagnostic context at its boundary. Every variant carries enough
//! information for callers to:
//! - Distinguish the failure category (auth, API, envelope, parse, network).
//! - Inspect the original cause via `source()` (thiserror derives this
//!   automatically from `#[source]` fields).
//! - Display a human-readable message that includes the relevant context
//!   (status code, missing field, etc.).
//!
//! Design rationale:
//! - Variants map to real system boundaries, not to internal implementation
//!   details. `Auth` covers the OAuth token endpoint and the not-logged-in
//!   case; `Api` covers the GDMS REST API; `Response` covers the vendor
//!   envelope; etc.
//! - `Api` preserves the response body. GDMS error responses carry a
//!   `retCode` and `msg` that would be lost if the body were discarded at
//!   the status check.
//! - `Network` wraps `reqwest::Error` for transport-level failures (DNS,
//!   TCP, TLS) that don't produce an HTTP status code.
//! - No operation panics on a failed call; everything surfaces as a
//!   `Result` the caller can inspect.

use reqwest::StatusCode;

/// Unified error type for all gdms library operations.
///
/// Each variant corresponds to a distinct failure boundary in the system.
/// The `#[source]` attribute on inner errors enables `Error::source()`
/// chaining so callers (and logging frameworks) can traverse the full
/// cause chain.
#[derive(Debug, thiserror::Error)]
pub enum GdmsError {
    /// Authentication failure.
    ///
    /// This covers:
    /// - Non-2xx responses from `/oapi/oauth/token` (bad credentials,
    ///   disabled API access). The message includes the response body,
    ///   which carries the GDMS error detail.
    /// - A login response with no `access_token` field.
    /// - A signed API call issued before `login` has succeeded.
    #[error("authentication failed: {message}")]
    Auth {
        /// Human-readable description of the authentication failure,
        /// including HTTP status and response body when available.
        message: String,
        /// The underlying transport or parse error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The GDMS API returned a non-success HTTP status code.
    ///
    /// The full response body is preserved — GDMS error responses contain
    /// a `retCode` and `msg` explaining the rejection (bad signature,
    /// expired token, unknown endpoint), which is essential for debugging.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code returned by the GDMS API.
        status: StatusCode,
        /// The raw response body text. May contain JSON error details
        /// from GDMS, or an empty string if the body could not be read.
        body: String,
    },

    /// The response envelope was missing an expected field.
    ///
    /// GDMS wraps payloads as `{"retCode": .., "msg": .., "data": {"result": ..}}`
    /// but omits `data` (or `result`) on some failures. Accessors on
    /// [`crate::response::ApiResponse`] return this instead of panicking
    /// when a field is absent or has the wrong shape.
    #[error("response missing expected field `{field}`")]
    Response {
        /// Dotted path of the absent field (e.g. `"data.result"`).
        field: String,
    },

    /// JSON deserialization failed when parsing an API response body.
    ///
    /// This occurs when GDMS returns a body that is not valid JSON
    /// (HTML error pages from intermediate proxies, truncated responses).
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Query-string serialization failed while building a GET request.
    #[error("failed to encode query: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// A network-level failure occurred (DNS resolution, TCP connection,
    /// TLS handshake, request timeout).
    ///
    /// No HTTP status code is available because the request did not
    /// complete. This wraps the underlying `reqwest::Error` which carries
    /// detailed transport diagnostics.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Convenience alias used throughout the library.
/// Keeps function signatures concise while providing the full typed error.
pub type Result<T> = std::result::Result<T, GdmsError>;
