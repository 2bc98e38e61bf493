//! Integration tests for the task endpoints using wiremock.
//!
//! These tests mock the GDMS API to verify the task/add request shapes:
//!
//! - End-to-end login → reboot: taskType 1, execType 1, macList, and the
//!   generated `<timestamp>_<mac>_Reboot` task name
//! - Factory reset: taskType 2 and the `_Reset` name suffix
//! - The orgId placement under the literal `"0"` key
//! - Firmware URL inclusion for upgrade-style tasks

use gdms::auth::Credentials;
use gdms::client::GdmsClient;
use gdms::task::{self, TaskRequest, EXEC_TYPE_IMMEDIATE};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_ID: i64 = 100555;
const SECRET: &str = "KEY";

/// Helper: creates a client with a pre-set session token pointed at the
/// given wiremock server.
fn mock_client(server: &MockServer) -> GdmsClient {
    let credentials = Credentials::new(API_ID, SECRET, "user", "pw-hash");
    GdmsClient::with_token(credentials, &server.uri(), "mock-token")
}

fn task_created_envelope() -> serde_json::Value {
    serde_json::json!({
        "retCode": 0,
        "msg": "success",
        "data": {"taskId": 9001}
    })
}

async fn mount_task_add(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oapi/v1.0.0/task/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_created_envelope()))
        .mount(server)
        .await;
}

/// Helper: the JSON body of the single captured task/add request.
async fn captured_task_body(server: &MockServer) -> serde_json::Value {
    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.url.path() == "/oapi/v1.0.0/task/add")
        .expect("a task/add request should have been sent");
    serde_json::from_slice(&post.body).unwrap()
}

// ── reboot ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_then_reboot_submits_reboot_task() {
    let server = MockServer::start().await;

    // Full call order: password-grant login first, then the signed call.
    Mock::given(method("GET"))
        .and(path("/oapi/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "abc123"
        })))
        .mount(&server)
        .await;
    mount_task_add(&server).await;

    let credentials = Credentials::new(API_ID, SECRET, "user", "pw-hash");
    let client = GdmsClient::with_base_url(credentials, &server.uri());
    client.login().await.expect("login should succeed");

    let resp = task::reboot_device(&client, "00AABBCCDDFF", None)
        .await
        .unwrap();
    assert!(resp.is_ok());
    assert_eq!(resp.data().unwrap()["taskId"], 9001);

    let body = captured_task_body(&server).await;
    assert_eq!(body["taskType"], 1);
    assert_eq!(body["execType"], 1);
    assert_eq!(body["macList"], serde_json::json!(["00AABBCCDDFF"]));
    assert!(body.get("firmwareDownloadUrl").is_none());
    assert!(body.get("0").is_none());

    // Task name is <timestamp_ms>_<mac>_Reboot with a current timestamp.
    let task_name = body["taskName"].as_str().unwrap();
    let (prefix, rest) = task_name.split_once('_').expect("name has a timestamp prefix");
    let ts: i64 = prefix.parse().expect("prefix is a millisecond timestamp");
    assert!(ts > 1_672_531_200_000, "timestamp should be in milliseconds");
    assert_eq!(rest, "00AABBCCDDFF_Reboot");
}

// ── factory reset ──────────────────────────────────────────────────────

#[tokio::test]
async fn factory_reset_submits_reset_task() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    mount_task_add(&server).await;

    let resp = task::factory_reset_device(&client, "00AABBCCDDFF", None)
        .await
        .unwrap();
    assert!(resp.is_ok());

    let body = captured_task_body(&server).await;
    assert_eq!(body["taskType"], 2);
    assert_eq!(body["execType"], 1);
    assert_eq!(body["macList"], serde_json::json!(["00AABBCCDDFF"]));
    assert!(
        body["taskName"].as_str().unwrap().ends_with("_00AABBCCDDFF_Reset"),
        "factory reset names end in _Reset, got: {}",
        body["taskName"]
    );
}

// ── orgId placement ────────────────────────────────────────────────────

#[tokio::test]
async fn org_scoped_task_places_org_id_under_zero_key() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    mount_task_add(&server).await;

    task::reboot_device(&client, "00AABBCCDDFF", Some(45789))
        .await
        .unwrap();

    let body = captured_task_body(&server).await;
    assert_eq!(body["0"], serde_json::json!({"orgId": 45789}));
    assert!(
        body.get("orgId").is_none(),
        "orgId must not also appear top-level"
    );
}

// ── add_task ───────────────────────────────────────────────────────────

#[tokio::test]
async fn add_task_sends_firmware_url_when_set() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    mount_task_add(&server).await;

    let request = TaskRequest {
        task_name: "nightly_upgrade_lab".to_string(),
        task_type: 3,
        mac_list: vec!["00AABBCCDDFF".to_string(), "00AABBCCDDEE".to_string()],
        exec_type: EXEC_TYPE_IMMEDIATE,
        firmware_download_url: Some("https://fw.example.com/image.bin".to_string()),
        org_id: None,
    };
    let resp = task::add_task(&client, &request).await.unwrap();
    assert!(resp.is_ok());

    let body = captured_task_body(&server).await;
    assert_eq!(body["taskName"], "nightly_upgrade_lab");
    assert_eq!(body["taskType"], 3);
    assert_eq!(
        body["macList"],
        serde_json::json!(["00AABBCCDDFF", "00AABBCCDDEE"])
    );
    assert_eq!(body["firmwareDownloadUrl"], "https://fw.example.com/image.bin");
}
