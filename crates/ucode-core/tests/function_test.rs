#![allow(clippy::unwrap_used)]
// Integration tests for `ObjectFunction` result shaping using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ucode_api::ErrorKind;
use ucode_core::{Argument, Config, Object, ObjectFunction, Status};

async fn setup() -> (MockServer, ObjectFunction) {
    let server = MockServer::start().await;
    let config = Config::new("app-default", server.uri()).with_function_name("orders-sync");
    let function = ObjectFunction::new(config).unwrap();
    (server, function)
}

fn object(value: Value) -> Object {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

#[tokio::test]
async fn test_create_reports_done() {
    let (server, function) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/object/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "data": { "data": { "guid": "g-1" } } }
        })))
        .mount(&server)
        .await;

    let arg = Argument::new("orders").with_data(object(json!({ "title": "x" })));
    let outcome = function.create_object(&arg).await.unwrap();

    assert_eq!(outcome.response.status, Status::Done);
    assert_eq!(outcome.data.object()["guid"], "g-1");
    assert!(outcome.response.error.is_none());
}

#[tokio::test]
async fn test_list_leaves_status_unset() {
    let (server, function) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/object/get-list/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "data": { "count": 3, "response": [{}, {}, {}] } }
        })))
        .mount(&server)
        .await;

    let mut arg = Argument::new("orders");
    let outcome = function.get_list(&mut arg).await.unwrap();

    assert_eq!(outcome.response.status, Status::Unset);
    assert_eq!(outcome.data.count(), 3);
    assert_eq!(arg.request.data["offset"], 0);
    assert_eq!(arg.request.data["limit"], 10);
}

#[tokio::test]
async fn test_not_found_shapes_failure_for_reads_and_writes() {
    let (server, function) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let mut arg = Argument::new("orders").with_data(object(json!({ "guid": "nope" })));

    let failures = vec![
        function.get_single(&arg).await.unwrap_err(),
        function.get_list(&mut arg).await.unwrap_err(),
        function.update_object(&arg).await.unwrap_err(),
        function.delete(&arg).await.unwrap_err(),
        function.append_many_to_many(&arg).await.unwrap_err(),
    ];

    for failure in failures {
        assert_eq!(failure.response.status, Status::Error);
        assert_eq!(failure.kind(), ErrorKind::Backend);
        assert!(failure.to_string().contains("not found"));
        assert_eq!(failure.response.data["error"], "not found");
        assert!(failure.response.message().is_some());
    }
}

#[tokio::test]
async fn test_delete_failure_message() {
    let (server, function) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let arg = Argument::new("orders").with_data(object(json!({ "guid": "g-1" })));
    let failure = function.delete(&arg).await.unwrap_err();
    assert_eq!(failure.response.message(), Some("Error while deleting object"));
    assert_eq!(failure.response.data["description"], "boom");
}

#[tokio::test]
async fn test_unparsable_body_keeps_raw_body_in_diagnostics() {
    let (server, function) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/v1/object/multiple-update/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": 5}"))
        .mount(&server)
        .await;

    let failure = function
        .multiple_update(&Argument::new("orders"))
        .await
        .unwrap_err();

    assert_eq!(failure.kind(), ErrorKind::Shape);
    assert_eq!(failure.response.data["description"], "{\"data\": 5}");
    assert_eq!(
        failure.response.message(),
        Some("Error while unmarshalling multiple update objects")
    );
}

#[tokio::test]
async fn test_setters_apply_to_next_call() {
    let (server, mut function) = setup().await;

    Mock::given(header("X-API-KEY", "app-rotated"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    function.config_mut().set_app_id("app-rotated");
    let response = function
        .multiple_delete(&Argument::new("orders"))
        .await
        .unwrap();
    assert_eq!(response.status, Status::Done);
}

#[tokio::test]
async fn test_set_timeout_rebuilds_transport() {
    let (server, mut function) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    function.multiple_delete(&Argument::new("orders")).await.unwrap();

    function
        .set_timeout(Some(Duration::from_millis(50)))
        .unwrap();
    assert_eq!(function.config().timeout, Some(Duration::from_millis(50)));
    let failure = function
        .multiple_delete(&Argument::new("orders"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_argument_override_beats_config() {
    let (server, function) = setup().await;

    Mock::given(header("X-API-KEY", "tenant-b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let arg = Argument::new("orders").with_app_id("tenant-b");
    function.append_many_to_many(&arg).await.unwrap();
    function.delete_many_to_many(&arg).await.unwrap();
}

#[tokio::test]
async fn test_bad_base_url_fails_without_io() {
    let mut config = Config::new("app", "https://placeholder.invalid");
    config.set_base_url("mailto:nobody@example.com");
    let function = ObjectFunction::new(config).unwrap();

    let failure = function
        .get_list_aggregation(&Argument::new("orders"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), ErrorKind::Usage);
    assert_eq!(failure.response.status, Status::Error);
}
