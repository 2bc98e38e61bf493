//! Async Rust client library for the Grandstream Device Management System
//! (GDMS) cloud API.
//!
//! Provides password-grant login, per-request SHA-256 signing, and typed
//! operations over the device-management endpoints (organizations, sites,
//! devices, tasks such as reboot and factory reset).
//!
//! # Modules
//!
//! - [`auth`] — Credentials, the vendor password-hash convention, and login types.
//! - [`client`] — Signed HTTP dispatch and session token lifecycle.
//! - [`device`] — Device inventory, add/edit, detail, and account endpoints.
//! - [`error`] — Typed error hierarchy (`GdmsError`) for all library operations.
//! - [`org`] — Organization and site listing.
//! - [`response`] — The `{retCode, msg, data}` response envelope.
//! - [`signing`] — Timestamp and signature computation for authenticated calls.
//! - [`task`] — Task submission, device reboot, and factory reset.
//!
//! # Quick Start
//!
//! ```ignore
//! use gdms::auth::{hash_password, Credentials};
//! use gdms::client::{GdmsClient, Region};
//!
//! let creds = Credentials::new(100555, "secret-key", "jsmith", &hash_password("p@ssw0rd"));
//! let client = GdmsClient::new(creds, Region::Us);
//! client.login().await?;
//! let orgs = gdms::org::list_organizations(&client).await?;
//! for org in orgs.result_array()? {
//!     println!("{org}");
//! }
//! ```

#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod device;
pub mod error;
pub mod org;
pub mod response;
pub mod signing;
pub mod task;
