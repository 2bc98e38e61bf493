//! Organization and site endpoints for the GDMS API.
//!
//! This module covers the account-structure endpoints:
//!
//! - [`list_organizations`] — all organizations visible to the account.
//! - [`list_sites`] — sites, optionally scoped to one organization.
//!
//! Both return the raw [`ApiResponse`] envelope; list items live under
//! `data.result` (see [`ApiResponse::result_array`]).
//!
//! ## Endpoints
//!
//! | Function | API Path | Method |
//! |----------|----------|--------|
//! | [`list_organizations`] | `org/list` | GET |
//! | [`list_sites`] | `site/list` | POST |

use serde_json::json;

use crate::client::GdmsClient;
use crate::response::ApiResponse;

/// Retrieves the list of organizations for the logged-in account.
///
/// # Errors
///
/// - `GdmsError::Auth` — `login` has not succeeded yet.
/// - `GdmsError::Api` — the GDMS API returned a non-success status.
/// - `GdmsError::Network` / `GdmsError::Parse` — transport or decode failure.
pub async fn list_organizations(client: &GdmsClient) -> crate::error::Result<ApiResponse> {
    client.get("org/list", &[]).await
}

/// Retrieves the list of sites.
///
/// Pass `Some(org_id)` to scope the listing to one organization; `None`
/// lists sites of the account's default organization (not all
/// organizations).
///
/// # Errors
///
/// Same error variants as [`list_organizations`].
pub async fn list_sites(
    client: &GdmsClient,
    org_id: Option<i64>,
) -> crate::error::Result<ApiResponse> {
    let params = org_id.map(|id| json!({ "orgId": id }));
    client.post("site/list", params.as_ref()).await
}
