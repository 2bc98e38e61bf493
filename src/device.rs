//! Device endpoints for the GDMS API.
//!
//! This module covers the device inventory and status endpoint family.
//! Every function shapes a fixed parameter structure and funnels through
//! the signed POST dispatch; none of them mutate client state.
//!
//! ## Endpoints
//!
//! | Function | API Path | Notes |
//! |----------|----------|-------|
//! | [`list_devices`] | `device/list` | empty body |
//! | [`add_device`] | `device/add` | body is a one-element array |
//! | [`edit_device`] | `device/edit` | flat object; also the way to view details of offline devices |
//! | [`device_detail`] | `device/detail` | online devices only; two-phase fetch |
//! | [`account_status`] | `device/account/status` | SIP account registration states |
//! | [`account_config`] | `device/account/info` | SIP account configuration |
//!
//! ## add vs edit
//!
//! `device/add` accepts a batch and therefore wraps its fields in a JSON
//! array even for a single device; `device/edit` takes the same fields as
//! a flat object. [`DeviceSpec`] models the shared field set and the two
//! functions apply the wrapping difference.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::GdmsClient;
use crate::error::Result;
use crate::response::ApiResponse;

/// Identifying and placement fields for a device, shared by
/// [`add_device`] and [`edit_device`].
///
/// Field names serialize in camelCase to match the GDMS API contract.
/// `device_name` and `org_id` are omitted from the payload when `None`,
/// which selects the vendor-side defaults (no display name, default
/// organization).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSpec {
    /// MAC address, with or without colons (e.g. `"00:AA:BB:CC:DD:FF"`).
    pub mac: String,

    /// Device serial number.
    pub sn: String,

    /// Site the device belongs to.
    pub site_id: i64,

    /// Display name. Omitted when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// Organization. Omitted when `None` (default organization).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<i64>,
}

impl DeviceSpec {
    /// Creates a spec with the required fields; optional fields start
    /// as `None`.
    pub fn new(mac: &str, sn: &str, site_id: i64) -> Self {
        DeviceSpec {
            mac: mac.to_string(),
            sn: sn.to_string(),
            site_id,
            device_name: None,
            org_id: None,
        }
    }

    /// Sets the display name.
    pub fn device_name(mut self, name: &str) -> Self {
        self.device_name = Some(name.to_string());
        self
    }

    /// Sets the organization.
    pub fn org_id(mut self, org_id: i64) -> Self {
        self.org_id = Some(org_id);
        self
    }
}

/// Retrieves the list of devices known to the account.
///
/// # Errors
///
/// - `GdmsError::Auth` — `login` has not succeeded yet.
/// - `GdmsError::Api` — the GDMS API returned a non-success status.
/// - `GdmsError::Network` / `GdmsError::Parse` — transport or decode failure.
pub async fn list_devices(client: &GdmsClient) -> Result<ApiResponse> {
    client.post("device/list", None).await
}

/// Adds a single device to GDMS.
///
/// The endpoint accepts a batch, so the spec is wrapped in a one-element
/// array on the wire.
///
/// # Errors
///
/// Same error variants as [`list_devices`].
pub async fn add_device(client: &GdmsClient, spec: &DeviceSpec) -> Result<ApiResponse> {
    let params = Value::Array(vec![serde_json::to_value(spec)?]);
    client.post("device/add", Some(&params)).await
}

/// Edits a device, or — with unchanged fields — views its current details.
///
/// Unlike [`device_detail`], this works for devices that are currently
/// offline, which makes it the most reliable way to inspect a device.
///
/// # Errors
///
/// Same error variants as [`list_devices`].
pub async fn edit_device(client: &GdmsClient, spec: &DeviceSpec) -> Result<ApiResponse> {
    let params = serde_json::to_value(spec)?;
    client.post("device/edit", Some(&params)).await
}

/// Fetches detailed device information.
///
/// The endpoint is two-phase: call with `is_first = true` to submit the
/// request to the device, then again with `is_first = false` within one
/// minute to retrieve the collected information. Only works for devices
/// that are currently online.
///
/// # Errors
///
/// Same error variants as [`list_devices`].
pub async fn device_detail(
    client: &GdmsClient,
    mac: &str,
    is_first: bool,
) -> Result<ApiResponse> {
    let params = json!({
        "mac": mac,
        "isFirst": if is_first { 1 } else { 0 },
    });
    client.post("device/detail", Some(&params)).await
}

/// Retrieves the registration status of the device's SIP accounts.
///
/// # Errors
///
/// Same error variants as [`list_devices`].
pub async fn account_status(client: &GdmsClient, mac: &str) -> Result<ApiResponse> {
    let params = json!({ "mac": mac });
    client.post("device/account/status", Some(&params)).await
}

/// Retrieves the configuration of the device's SIP accounts.
///
/// # Errors
///
/// Same error variants as [`list_devices`].
pub async fn account_config(client: &GdmsClient, mac: &str) -> Result<ApiResponse> {
    let params = json!({ "mac": mac });
    client.post("device/account/info", Some(&params)).await
}
