#![allow(clippy::unwrap_used)]
// Integration tests for `PushClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ucode_api::{Error, Notification, PushClient, PushMessage};

const FIXTURE: &str = include_str!("fixtures/service_account.json");

/// Service-account JSON whose token endpoint points at the mock server.
fn credentials(server: &MockServer) -> String {
    let mut account: Value = serde_json::from_str(FIXTURE).unwrap();
    account["token_uri"] = Value::String(format!("{}/token", server.uri()));
    account.to_string()
}

async fn setup() -> (MockServer, PushClient) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;

    let client = PushClient::new(reqwest::Client::new(), &server.uri(), &credentials(&server)).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_send_android_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/ucode-test/messages:send"))
        .and(header("authorization", "Bearer ya29.test-token"))
        .and(body_partial_json(json!({
            "message": {
                "token": "device-1",
                "data": { "title": "Order shipped", "body": "#42 is on its way" },
                "android": { "priority": "high" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/ucode-test/messages/0:1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let n = Notification::new("android", "device-1", "Order shipped", "#42 is on its way").unwrap();
    let name = client.send(&PushMessage::for_notification(&n)).await.unwrap();
    assert_eq!(name, "projects/ucode-test/messages/0:1");
}

#[tokio::test]
async fn test_send_ios_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/ucode-test/messages:send"))
        .and(body_partial_json(json!({
            "message": {
                "notification": { "title": "Hi", "body": "There" },
                "apns": { "payload": { "aps": { "sound": "default", "content-available": 1 } } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "m/2" })))
        .expect(1)
        .mount(&server)
        .await;

    let n = Notification::new("ios", "device-2", "Hi", "There").unwrap();
    client.send(&PushMessage::for_notification(&n)).await.unwrap();
}

#[tokio::test]
async fn test_fcm_error_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/ucode-test/messages:send"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let n = Notification::new("android", "stale", "t", "b").unwrap();
    let err = client.send(&PushMessage::for_notification(&n)).await.unwrap_err();
    match err {
        Error::PushApi { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "NOT_FOUND: Requested entity was not found.");
        }
        other => panic!("expected PushApi error, got: {other}"),
    }
}

#[tokio::test]
async fn test_token_exchange_failure_stops_send() {
    let server = MockServer::start().await;

    Mock::given(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;
    Mock::given(path("/v1/projects/ucode-test/messages:send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = PushClient::new(reqwest::Client::new(), &server.uri(), &credentials(&server)).unwrap();
    let n = Notification::new("ios", "device", "t", "b").unwrap();
    let err = client.send(&PushMessage::for_notification(&n)).await.unwrap_err();
    assert!(err.to_string().contains("invalid_grant"), "got: {err}");
}
