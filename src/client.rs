//! Authenticated HTTP client for the GDMS API.
//!
//! `GdmsClient` wraps a `reqwest::Client`, the immutable [`Credentials`],
//! and the session access token behind a `Mutex`, providing the signed
//! `get`/`post` dispatch that every operation module funnels through.
//!
//! Token lifecycle:
//! - The token is absent until [`GdmsClient::login`] succeeds, and is then
//!   reused by every subsequent call for the life of the client. There is
//!   no refresh or expiry handling; a rejected token surfaces as the API's
//!   error payload.
//! - `login` is the only writer of the token. Dispatch methods take the
//!   lock just long enough to clone the token, never across an HTTP round
//!   trip, so concurrent signed calls only contend on a short critical
//!   section. Callers must complete `login` before issuing signed calls;
//!   a signed call without a token fails with an auth error instead of
//!   going to the wire.
//!
//! Request signing:
//! - Each signed call serializes its parameters (POST: JSON text, GET:
//!   url-encoded query), generates one timestamp, computes the signature
//!   over that exact serialization, and assembles
//!   `{base}/oapi/v1.0.0/{endpoint}?access_token=..&signature=..&timestamp=..`.
//!   See [`crate::signing`] for the digest details.

use crate::auth::{Credentials, LoginResponse};
use crate::error::{GdmsError, Result};
use crate::signing;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::Mutex;

/// GDMS OpenAPI version segment baked into every signed URL.
const API_VERSION: &str = "1.0.0";

/// Connect timeout for GDMS API calls. Covers TCP + TLS handshake only.
const API_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for GDMS API calls, covering the full round
/// trip. GDMS responses are small JSON payloads; 30 seconds is generous.
const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GDMS hosting region, selecting the cloud domain all requests go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// United States deployment (`www.gdms.cloud`).
    Us,
    /// European Union deployment (`eu.gdms.cloud`).
    Eu,
}

impl Region {
    /// The cloud domain serving this region.
    pub fn domain(&self) -> &'static str {
        match self {
            Region::Us => "www.gdms.cloud",
            Region::Eu => "eu.gdms.cloud",
        }
    }

    fn base_url(&self) -> String {
        format!("https://{}", self.domain())
    }
}

/// Builds a `reqwest::Client` with explicit timeouts for GDMS API calls.
///
/// `accept_invalid_certs` disables TLS certificate verification for
/// deployments sitting behind intercepting proxies; see
/// [`GdmsClient::insecure`].
fn build_http_client(accept_invalid_certs: bool) -> Client {
    Client::builder()
        .connect_timeout(API_CONNECT_TIMEOUT)
        .timeout(API_REQUEST_TIMEOUT)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .expect("failed to build HTTP client for the GDMS API")
}

/// Authenticated HTTP client for the GDMS REST API.
///
/// Design decisions:
/// - `access_token` is behind a `Mutex` because `login` writes it while
///   dispatch methods read it. The lock is held only for the brief token
///   clone or store, never across an HTTP round-trip.
/// - `base_url` is stored as a `String` rather than derived from `Region`
///   on each call so it can be overridden in tests (e.g. pointing at a
///   wiremock server).
pub struct GdmsClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    access_token: Mutex<Option<String>>,
}

impl GdmsClient {
    /// Creates a client for the given region with verified TLS.
    pub fn new(credentials: Credentials, region: Region) -> Self {
        Self::build(credentials, &region.base_url(), false, None)
    }

    /// Creates a client that skips TLS certificate verification.
    ///
    /// Only for lab environments where the GDMS endpoint sits behind an
    /// intercepting proxy with an untrusted certificate. Prefer
    /// [`GdmsClient::new`] everywhere else.
    pub fn insecure(credentials: Credentials, region: Region) -> Self {
        Self::build(credentials, &region.base_url(), true, None)
    }

    /// Constructor that accepts a custom base URL, used by tests to point
    /// at a local mock server instead of the real GDMS cloud.
    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Self {
        Self::build(credentials, base_url, false, None)
    }

    /// Creates a client with a pre-set session token and custom base URL,
    /// bypassing the login round trip. Used by tests of signed endpoints.
    pub fn with_token(credentials: Credentials, base_url: &str, token: &str) -> Self {
        Self::build(credentials, base_url, false, Some(token.to_string()))
    }

    fn build(
        credentials: Credentials,
        base_url: &str,
        accept_invalid_certs: bool,
        token: Option<String>,
    ) -> Self {
        GdmsClient {
            client: build_http_client(accept_invalid_certs),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            access_token: Mutex::new(token),
        }
    }

    /// Logs in to the GDMS API with the password grant and stores the
    /// returned access token for subsequent signed calls.
    ///
    /// The token request itself is unsigned: a GET to `/oapi/oauth/token`
    /// with the grant parameters in the query string. No retries are
    /// attempted; on any failure the stored token is left untouched.
    ///
    /// # Errors
    ///
    /// `GdmsError::Auth` in all failure cases — transport failure reaching
    /// the token endpoint, a non-2xx response, an unparseable body, or a
    /// response with no `access_token` field. The message preserves the
    /// response body so the GDMS error detail is not lost.
    pub async fn login(&self) -> Result<()> {
        let api_id = self.credentials.api_id().to_string();
        let params = [
            ("grant_type", "password"),
            ("password", self.credentials.password_hash()),
            ("username", self.credentials.username()),
            ("client_id", &api_id),
            ("client_secret", self.credentials.secret_key()),
        ];
        let query = serde_urlencoded::to_string(params)?;
        let url = format!("{}/oapi/oauth/token?{query}", self.base_url);
        tracing::debug!(endpoint = "oauth/token", "GET login request");

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| GdmsError::Auth {
                message: format!("token request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        // Read the body before checking status so the GDMS error payload
        // survives into the error message.
        let status = response.status();
        let body = response.text().await.map_err(|e| GdmsError::Auth {
            message: format!("failed to read token response: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(GdmsError::Auth {
                message: format!("token request failed ({status}): {body}"),
                source: None,
            });
        }

        let resp: LoginResponse = serde_json::from_str(&body).map_err(|e| GdmsError::Auth {
            message: format!("failed to parse token response: {e}"),
            source: Some(Box::new(e)),
        })?;

        match resp.access_token {
            Some(token) => {
                *self.access_token.lock().await = Some(token);
                tracing::debug!("logged in successfully");
                Ok(())
            }
            None => Err(GdmsError::Auth {
                message: format!("no access_token in login response: {body}"),
                source: None,
            }),
        }
    }

    /// Returns the stored session token, or an auth error if `login` has
    /// not succeeded yet. The mutex is held only for the clone.
    async fn session_token(&self) -> Result<String> {
        self.access_token
            .lock()
            .await
            .clone()
            .ok_or_else(|| GdmsError::Auth {
                message: "not logged in; call login() before issuing signed requests".to_string(),
                source: None,
            })
    }

    /// Computes `access_token=..&signature=..&timestamp=..` for a request
    /// whose serialized body/query is `body`. The timestamp is generated
    /// here, once, so the signature always matches it.
    async fn auth_query(&self, body: &str) -> Result<String> {
        let token = self.session_token().await?;
        let timestamp = signing::timestamp_ms();
        Ok(signing::signed_query(
            &token,
            self.credentials.api_id(),
            self.credentials.secret_key(),
            timestamp,
            body,
        ))
    }

    /// Sends a signed GET request and deserializes the JSON response.
    ///
    /// `params` are url-encoded into the query string; the signature is
    /// computed over that encoded form, which is then appended after the
    /// authentication parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let query = serde_urlencoded::to_string(params)?;
        let mut url = format!(
            "{}/oapi/v{API_VERSION}/{endpoint}?{}",
            self.base_url,
            self.auth_query(&query).await?
        );
        if !query.is_empty() {
            url.push('&');
            url.push_str(&query);
        }
        tracing::debug!(url = %url, "GET request");

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Sends a signed POST request with an optional JSON body and
    /// deserializes the response.
    ///
    /// `params` is serialized to JSON text exactly once; the signature is
    /// computed over that text and the same bytes are sent as the body.
    /// `None` means no body at all — the signature then covers the empty
    /// string, which is how parameterless endpoints like `device/list`
    /// are called.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<&serde_json::Value>,
    ) -> Result<T> {
        let body = match params {
            Some(value) => serde_json::to_string(value)?,
            None => String::new(),
        };
        let url = format!(
            "{}/oapi/v{API_VERSION}/{endpoint}?{}",
            self.base_url,
            self.auth_query(&body).await?
        );
        tracing::debug!(url = %url, body = %body, "POST request");

        let mut request = self.client.post(&url).header(CONTENT_TYPE, "application/json");
        if !body.is_empty() {
            request = request.body(body);
        }
        let response = request.send().await?;
        Self::read_json(response).await
    }

    /// Reads the response body as text, maps non-success statuses to
    /// `Api {status, body}` (preserving the GDMS error payload), and
    /// deserializes successful bodies as JSON.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GdmsError::Api { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GdmsError;

    fn test_credentials() -> Credentials {
        Credentials::new(100555, "KEY", "user", "hash")
    }

    #[test]
    fn region_selects_cloud_domain() {
        assert_eq!(Region::Us.domain(), "www.gdms.cloud");
        assert_eq!(Region::Eu.domain(), "eu.gdms.cloud");
    }

    #[test]
    fn region_base_url_is_https() {
        assert_eq!(Region::Us.base_url(), "https://www.gdms.cloud");
        assert_eq!(Region::Eu.base_url(), "https://eu.gdms.cloud");
    }

    #[test]
    fn with_base_url_trims_trailing_slash() {
        let client = GdmsClient::with_base_url(test_credentials(), "http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[tokio::test]
    async fn signed_call_before_login_is_an_auth_error() {
        // The token check happens before any network I/O, so an unreachable
        // base URL never gets contacted.
        let client = GdmsClient::with_base_url(test_credentials(), "http://127.0.0.1:9");
        let result = client.get::<serde_json::Value>("org/list", &[]).await;
        match result {
            Err(GdmsError::Auth { message, .. }) => {
                assert!(message.contains("not logged in"));
            }
            other => panic!("expected Auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn with_token_seeds_the_session() {
        let client = GdmsClient::with_token(test_credentials(), "http://localhost:9999", "tok");
        assert_eq!(client.session_token().await.unwrap(), "tok");
    }
}
