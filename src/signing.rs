//! Request signing for the GDMS API.
//!
//! Every signed call carries three query parameters — `access_token`,
//! `signature`, `timestamp` — where the signature is a SHA-256 digest over
//! a fixed-order parameter string that the server recomputes and compares.
//! The functions here are pure: the caller generates the timestamp once per
//! request and passes it in, so a signature is always computed against the
//! exact timestamp and body bytes that go on the wire.
//!
//! The parameter order inside [`signature`] is a hard-coded literal
//! (alphabetical by parameter name, per the vendor contract). It does not
//! depend on any container's iteration order and must not be reordered —
//! the server rejects mismatched hashes.

use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// SHA-256 digest of `data`, as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Current time in milliseconds since the Unix epoch, as the integer the
/// `timestamp` API parameter expects.
pub fn timestamp_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_millis() as i64
}

/// Computes the GDMS request signature.
///
/// Builds the string
/// `&access_token=<token>&client_id=<id>&client_secret=<secret>&timestamp=<ts>&`
/// and, only when `body` is non-empty, appends `SHA256(body)&`. The result
/// is the SHA-256 of that string as lowercase hex.
///
/// `body` is the exact serialized request payload: the JSON text for POST
/// calls, the url-encoded query string for GET calls, or `""` when the
/// request carries neither.
pub fn signature(
    access_token: &str,
    client_id: i64,
    client_secret: &str,
    timestamp: i64,
    body: &str,
) -> String {
    let mut base = format!(
        "&access_token={access_token}&client_id={client_id}&client_secret={client_secret}&timestamp={timestamp}&"
    );
    if !body.is_empty() {
        base.push_str(&sha256_hex(body.as_bytes()));
        base.push('&');
    }
    sha256_hex(base.as_bytes())
}

/// Builds the authentication query string every signed request carries:
/// `access_token=<token>&signature=<sig>&timestamp=<ts>`.
///
/// The timestamp is passed in rather than generated here so the caller can
/// reuse the same value it signs with; see the invariant in the module docs.
pub fn signed_query(
    access_token: &str,
    client_id: i64,
    client_secret: &str,
    timestamp: i64,
    body: &str,
) -> String {
    let sig = signature(access_token, client_id, client_secret, timestamp, body);
    format!("access_token={access_token}&signature={sig}&timestamp={timestamp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "tok-abc123";
    const CLIENT_ID: i64 = 100555;
    const SECRET: &str = "UYURsdf898fDF3e8f7dusf89dsgfgsdf";
    const TS: i64 = 1_700_000_000_000;

    #[test]
    fn sha256_hex_is_lowercase_and_64_chars() {
        let digest = sha256_hex(b"abc");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, digest.to_lowercase());
        // Known vector for "abc" from FIPS 180-2.
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let a = signature(TOKEN, CLIENT_ID, SECRET, TS, r#"{"mac":"00AABBCCDDFF"}"#);
        let b = signature(TOKEN, CLIENT_ID, SECRET, TS, r#"{"mac":"00AABBCCDDFF"}"#);
        assert_eq!(a, b, "identical inputs must produce identical signatures");
    }

    #[test]
    fn empty_body_signature_matches_base_string_hash() {
        // With no body, the signature is SHA256 of the bare parameter string —
        // no body-hash segment.
        let expected = sha256_hex(
            format!("&access_token={TOKEN}&client_id={CLIENT_ID}&client_secret={SECRET}&timestamp={TS}&")
                .as_bytes(),
        );
        assert_eq!(signature(TOKEN, CLIENT_ID, SECRET, TS, ""), expected);
    }

    #[test]
    fn body_signature_inserts_single_body_hash_segment() {
        let body = r#"{"mac":"00AABBCCDDFF"}"#;
        let body_hash = sha256_hex(body.as_bytes());
        let expected = sha256_hex(
            format!(
                "&access_token={TOKEN}&client_id={CLIENT_ID}&client_secret={SECRET}&timestamp={TS}&{body_hash}&"
            )
            .as_bytes(),
        );
        assert_eq!(signature(TOKEN, CLIENT_ID, SECRET, TS, body), expected);
    }

    #[test]
    fn changing_any_input_changes_the_signature() {
        let baseline = signature(TOKEN, CLIENT_ID, SECRET, TS, "body");
        assert_ne!(baseline, signature("other-token", CLIENT_ID, SECRET, TS, "body"));
        assert_ne!(baseline, signature(TOKEN, CLIENT_ID + 1, SECRET, TS, "body"));
        assert_ne!(baseline, signature(TOKEN, CLIENT_ID, "other-secret", TS, "body"));
        assert_ne!(baseline, signature(TOKEN, CLIENT_ID, SECRET, TS + 1, "body"));
        assert_ne!(baseline, signature(TOKEN, CLIENT_ID, SECRET, TS, "other-body"));
    }

    #[test]
    fn empty_and_nonempty_body_signatures_differ() {
        assert_ne!(
            signature(TOKEN, CLIENT_ID, SECRET, TS, ""),
            signature(TOKEN, CLIENT_ID, SECRET, TS, "{}"),
        );
    }

    #[test]
    fn signed_query_has_fixed_shape() {
        let query = signed_query(TOKEN, CLIENT_ID, SECRET, TS, "");
        let sig = signature(TOKEN, CLIENT_ID, SECRET, TS, "");
        assert_eq!(
            query,
            format!("access_token={TOKEN}&signature={sig}&timestamp={TS}")
        );
    }

    #[test]
    fn timestamp_ms_is_plausible() {
        let ts = timestamp_ms();
        // After 2023-01-01 and before 2100 — catches unit mistakes
        // (seconds vs milliseconds), not clock accuracy.
        assert!(ts > 1_672_531_200_000);
        assert!(ts < 4_102_444_800_000);
    }
}
