// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the coupon check endpoint
//!
//! Each test starts the server on an ephemeral port with its upstream pointed
//! at a wiremock server, then drives the full inbound contract over HTTP.

use std::net::SocketAddr;

use api::{Server, ServerConfig, ShutdownConfig};
use axum::http::StatusCode;
use jiomart_api::ResponseValidation;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

async fn start_server(config: ServerConfig) -> SocketAddr {
    let (addr, _) = Server::new(config, ShutdownConfig::default())
        .expect("Failed to create server")
        .run_for_testing()
        .await
        .expect("Failed to start test server");
    addr
}

async fn start_proxy(upstream_url: String, validation: ResponseValidation) -> SocketAddr {
    let mut config = ServerConfig::for_testing();
    config.upstream.base_url = upstream_url;
    config.upstream.validation = validation;
    start_server(config).await
}

fn valid_request() -> Value {
    json!({
        "coupon": "SAVE20",
        "cartId": "cart-42",
        "userId": "user-7",
        "authToken": "token-abc",
        "pin": "400001"
    })
}

#[tokio::test]
async fn non_post_method_rejected() {
    let mock_server = MockServer::start().await;
    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{addr}/v1/coupon/check"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body, json!({"error": "Method not allowed"}));
}

#[tokio::test]
async fn missing_field_rejected() {
    let mock_server = MockServer::start().await;
    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();

    // Drop each required field in turn
    for field in ["coupon", "cartId", "userId", "authToken", "pin"] {
        let mut request = valid_request();
        request
            .as_object_mut()
            .expect("request is an object")
            .remove(field);

        let response = client
            .post(format!("http://{addr}/v1/coupon/check"))
            .json(&request)
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "missing {field} should be rejected"
        );

        let body: Value = response.json().await.expect("Failed to read response");
        assert_eq!(body, json!({"error": "Missing required fields"}));
    }
}

#[tokio::test]
async fn empty_body_treated_as_empty_object() {
    let mock_server = MockServer::start().await;
    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .header("content-type", "application/json")
        .send()
        .await
        .expect("Failed to send request");

    // No body parses as {}, so validation (not JSON parsing) reports the failure
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn malformed_json_rejected_as_client_fault() {
    let mock_server = MockServer::start().await;
    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to read response");
    assert!(body.get("error").is_some());
    assert!(body.get("retry").is_none());
}

#[tokio::test]
async fn successful_check_echoes_coupon() {
    let mock_server = MockServer::start().await;

    let upstream_body = json!({"result": {"coupon_applied": true, "discount": 120}});
    Mock::given(method("GET"))
        .and(path("/cart/apply_coupon"))
        .and(query_param("coupon_code", "SAVE20"))
        .and(query_param("cart_id", "cart-42"))
        .and(header("authtoken", "token-abc"))
        .and(header("userid", "user-7"))
        .and(header("pin", "400001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .mount(&mock_server)
        .await;

    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .json(&valid_request())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body["coupon"], "SAVE20");
    assert_eq!(body["result"], upstream_body);
}

#[tokio::test]
async fn blocked_upstream_maps_to_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart/apply_coupon"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>Access Denied</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .json(&valid_request())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body, json!({"error": "API blocked / non-JSON", "retry": true}));
}

#[tokio::test]
async fn shapeless_upstream_maps_to_502() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart/apply_coupon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .json(&valid_request())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body, json!({"error": "Unexpected API response", "retry": true}));
}

#[tokio::test]
async fn upstream_timeout_maps_to_500_with_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart/apply_coupon"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": {}}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = ServerConfig::for_testing();
    config.upstream.base_url = mock_server.uri();
    config.upstream.timeout_seconds = 1;
    let addr = start_server(config).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .json(&valid_request())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.expect("Failed to read response");
    assert!(body.get("error").is_some());
    assert_eq!(body["retry"], true);
}

#[tokio::test]
async fn upstream_error_status_relays_body_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart/apply_coupon"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .mount(&mock_server)
        .await;

    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .json(&valid_request())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body, json!({"error": "maintenance window", "retry": true}));
}

#[tokio::test]
async fn lenient_mode_relays_shapeless_payloads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart/apply_coupon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let addr = start_proxy(mock_server.uri(), ResponseValidation::Lenient).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .json(&valid_request())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body["coupon"], "SAVE20");
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn validation_failure_does_not_echo_credentials() {
    let mock_server = MockServer::start().await;
    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/v1/coupon/check"))
        .json(&json!({
            "coupon": "SAVE20",
            "cartId": "cart-42",
            "userId": "user-7",
            "authToken": "super-secret-token"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let text = response.text().await.expect("Failed to read response");
    assert!(!text.contains("super-secret-token"));
}

#[tokio::test]
async fn health_endpoint_reports_up() {
    let mock_server = MockServer::start().await;
    let addr = start_proxy(mock_server.uri(), ResponseValidation::Strict).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to read response");
    assert_eq!(body["status"], "Up");
    assert_eq!(body["environment"], "testing");
}
