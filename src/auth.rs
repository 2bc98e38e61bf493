//! Credentials and login types for the GDMS OAuth endpoint.
//!
//! GDMS authenticates with a password-grant token request against
//! `/oapi/oauth/token`. The account password is never sent as typed by the
//! user: the vendor convention is `SHA256(MD5(password))`, available here as
//! [`hash_password`]. The resulting access token is held by
//! [`crate::client::GdmsClient`] and attached to every signed call.

use md5::Md5;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Immutable client credentials for a GDMS developer account.
///
/// All four values come from the GDMS portal and account settings:
/// - `api_id` — the numeric developer API ID ("Client ID").
/// - `secret_key` — the 32-character secret key.
/// - `username` — the GDMS account username (not the email address).
/// - `password_hash` — `SHA256(MD5(account password))`, see [`hash_password`].
///
/// Constructed once and never mutated; the session token lives in the
/// client, not here.
#[derive(Clone)]
pub struct Credentials {
    api_id: i64,
    secret_key: String,
    username: String,
    password_hash: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    ///
    /// `password_hash` must already be the vendor's `SHA256(MD5(password))`
    /// form — pass a plain password through [`hash_password`] first.
    pub fn new(api_id: i64, secret_key: &str, username: &str, password_hash: &str) -> Self {
        Credentials {
            api_id,
            secret_key: secret_key.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        }
    }

    /// The numeric developer API ID.
    pub fn api_id(&self) -> i64 {
        self.api_id
    }

    /// The secret key, used for request signing. Never log the return value.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// The GDMS account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The pre-hashed account password sent to the token endpoint.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("secret_key", &"[REDACTED]")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Derives the password value the GDMS token endpoint expects:
/// `SHA256(MD5(password))`, both digests as lowercase hex.
///
/// The hash is a wire convention, not a security measure — treat the
/// result with the same care as the password itself.
pub fn hash_password(password: &str) -> String {
    let mut md5 = Md5::new();
    md5.update(password.as_bytes());
    let md5_hex = hex::encode(md5.finalize());

    let mut sha = Sha256::new();
    sha.update(md5_hex.as_bytes());
    hex::encode(sha.finalize())
}

/// Subset of the token endpoint response that we need.
///
/// `access_token` is optional because GDMS reports some login failures with
/// a 200 status and an error payload carrying no token; the client maps that
/// case to an auth error rather than a deserialization failure. Extra fields
/// (`refresh_token`, `expires_in`, ...) are silently ignored by serde.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// The opaque session credential, absent when login was rejected.
    #[serde(default)]
    pub access_token: Option<String>,
}
