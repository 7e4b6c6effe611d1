// tests/integration/system/system_tests.rs

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use checkout_relay::config::AppConfig;
use serde_json::json;
use tower::ServiceExt;

use crate::common::app_helper::{response_bytes, response_json, setup_app, setup_app_with_config};
use crate::common::mock_platform::MockPaymentPlatform;
use crate::common::request::{empty_request, json_request, sized_json_request};

#[tokio::test]
async fn test_root_returns_hello_world() {
    let app = setup_app(MockPaymentPlatform::new());

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_bytes(response).await, b"Hello World");
}

#[tokio::test]
async fn test_cors_test_echoes_origin() {
    let app = setup_app(MockPaymentPlatform::new());

    let request = Request::builder()
        .method("GET")
        .uri("/api/test-cors")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "CORS test successful");
    assert_eq!(json["origin"], "http://localhost:3000");

    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_cors_test_without_origin() {
    let app = setup_app(MockPaymentPlatform::new());

    let response = app
        .oneshot(empty_request("GET", "/api/test-cors"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert!(json["origin"].is_null());
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = setup_app(MockPaymentPlatform::new());

    let response = app
        .oneshot(empty_request("GET", "/api/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_wrong_method_on_known_route() {
    let mock = MockPaymentPlatform::new();
    let app = setup_app(mock.clone());

    let response = app.oneshot(empty_request("GET", "/api/charge")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn test_request_id_header() {
    let app = setup_app(MockPaymentPlatform::new());

    // 生成されたIDが付与される
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    // クライアント指定のIDは引き継がれる
    let request = Request::builder()
        .uri("/")
        .header("x-request-id", "req-from-client")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-from-client");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mock = MockPaymentPlatform::new();
    let mut config = AppConfig::for_testing();
    config.server.body_limit = 32;
    let app = setup_app_with_config(config, mock.clone());

    let response = app
        .oneshot(json_request(
            "/api/lookup-user-from-receipt",
            &json!({"receiptId": "pay_".repeat(40)}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response_json(response).await,
        json!({"error": "Request body too large"})
    );
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn test_oversized_body_with_content_length_is_json_error() {
    let mock = MockPaymentPlatform::new();
    let mut config = AppConfig::for_testing();
    config.server.body_limit = 32;
    let app = setup_app_with_config(config, mock.clone());

    let response = app
        .oneshot(sized_json_request(
            "/api/lookup-user-from-receipt",
            &json!({"receiptId": "pay_".repeat(40)}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(
        response_json(response).await,
        json!({"error": "Request body too large"})
    );
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn test_body_limit_above_two_mebibytes_is_honored() {
    let mock = MockPaymentPlatform::new();
    let mut config = AppConfig::for_testing();
    config.server.body_limit = 8 * 1024 * 1024;
    let app = setup_app_with_config(config, mock.clone());

    // 3MiB のボディは設定上限内なので通る
    let response = app
        .oneshot(sized_json_request(
            "/api/lookup-user-from-receipt",
            &json!({"receiptId": "pay_large", "padding": "x".repeat(3 * 1024 * 1024)}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mock.lookup_calls(), vec!["pay_large".to_string()]);
}
