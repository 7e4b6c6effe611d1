// tests/integration/payment/lookup_tests.rs

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::common::app_helper::{response_bytes, response_json, setup_app};
use crate::common::mock_platform::{MockPaymentPlatform, MockResponse};
use crate::common::request::{form_request, json_request, raw_request};

const LOOKUP_PATH: &str = "/api/lookup-user-from-receipt";

#[tokio::test]
async fn test_lookup_success() {
    // Arrange
    let mock = MockPaymentPlatform::new();
    let app = setup_app(mock.clone());

    // Act
    let response = app
        .oneshot(json_request(LOOKUP_PATH, &json!({"receiptId": "pay_123"})))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({"userId": "user_test", "email": "buyer@example.com"})
    );
    assert_eq!(mock.lookup_calls(), vec!["pay_123".to_string()]);
}

#[tokio::test]
async fn test_lookup_missing_receipt_id() {
    for body in [json!({}), json!({"receiptId": ""}), json!({"receiptId": null})] {
        let mock = MockPaymentPlatform::new();
        let app = setup_app(mock.clone());

        let response = app.oneshot(json_request(LOOKUP_PATH, &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_json(response).await,
            json!({"error": "Missing receiptId"})
        );
        // 上流は呼ばれない
        assert_eq!(mock.total_calls(), 0);
    }
}

#[tokio::test]
async fn test_lookup_empty_body() {
    let mock = MockPaymentPlatform::new();
    let app = setup_app(mock.clone());

    let response = app
        .oneshot(raw_request(LOOKUP_PATH, "application/json", String::new()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Missing receiptId");
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn test_lookup_malformed_body() {
    let mock = MockPaymentPlatform::new();
    let app = setup_app(mock.clone());

    let response = app
        .oneshot(raw_request(
            LOOKUP_PATH,
            "application/json",
            "{\"receiptId\": ".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid request body");
    assert!(json["details"].is_string());
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn test_lookup_rejects_whitespace_in_receipt_id() {
    let mock = MockPaymentPlatform::new();
    let app = setup_app(mock.clone());

    let response = app
        .oneshot(json_request(LOOKUP_PATH, &json!({"receiptId": "pay 123"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["details"].as_object().unwrap().len(), 1);
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn test_lookup_form_body() {
    let mock = MockPaymentPlatform::new();
    let app = setup_app(mock.clone());

    let response = app
        .oneshot(form_request(LOOKUP_PATH, "receiptId=pay_form"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["userId"], "user_test");
    assert_eq!(mock.lookup_calls(), vec!["pay_form".to_string()]);
}

#[tokio::test]
async fn test_lookup_payment_without_user() {
    let payments = [
        json!({"id": "pay_1"}),
        json!({"id": "pay_1", "user": null}),
        json!({"id": "pay_1", "user": {"id": ""}}),
    ];

    for payment in payments {
        let mock = MockPaymentPlatform::with_lookup(MockResponse::Ok(payment));
        let app = setup_app(mock);

        let response = app
            .oneshot(json_request(LOOKUP_PATH, &json!({"receiptId": "pay_1"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response_json(response).await,
            json!({"error": "User not found on payment"})
        );
    }
}

#[tokio::test]
async fn test_lookup_user_reference_without_email() {
    let mock = MockPaymentPlatform::with_lookup(MockResponse::Ok(json!({
        "id": "pay_1",
        "user": "user_ref"
    })));
    let app = setup_app(mock);

    let response = app
        .oneshot(json_request(LOOKUP_PATH, &json!({"receiptId": "pay_1"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"userId": "user_ref"}));
}

#[tokio::test]
async fn test_lookup_upstream_status_passthrough() {
    let mock = MockPaymentPlatform::with_lookup(MockResponse::Status(
        404,
        json!({"error": {"message": "Payment not found"}}),
    ));
    let app = setup_app(mock);

    let response = app
        .oneshot(json_request(LOOKUP_PATH, &json!({"receiptId": "pay_missing"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Payment not found");
    assert_eq!(json["details"]["error"]["message"], "Payment not found");
}

#[tokio::test]
async fn test_lookup_transport_failure() {
    let mock = MockPaymentPlatform::with_lookup(MockResponse::Transport(
        "connection refused".to_string(),
    ));
    let app = setup_app(mock);

    let response = app
        .oneshot(json_request(LOOKUP_PATH, &json!({"receiptId": "pay_1"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response_json(response).await["error"],
        "Upstream platform request failed: connection refused"
    );
}

#[tokio::test]
async fn test_lookup_is_deterministic() {
    let mock = MockPaymentPlatform::new();
    let app = setup_app(mock.clone());
    let body = json!({"receiptId": "pay_123"});

    let first = app
        .clone()
        .oneshot(json_request(LOOKUP_PATH, &body))
        .await
        .unwrap();
    let second = app.oneshot(json_request(LOOKUP_PATH, &body)).await.unwrap();

    assert_eq!(response_bytes(first).await, response_bytes(second).await);
    assert_eq!(mock.lookup_calls().len(), 2);
}
