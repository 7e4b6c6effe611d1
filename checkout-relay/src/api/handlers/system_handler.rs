use axum::{http::HeaderMap, routing::get, Json, Router};

use crate::api::dto::system_dto::CorsTestResponse;

/// 疎通確認
pub async fn root_handler() -> &'static str {
    "Hello World"
}

/// CORS設定の確認用。リクエストの Origin をそのまま返す
pub async fn cors_test_handler(headers: HeaderMap) -> Json<CorsTestResponse> {
    let origin = headers
        .get(axum::http::header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    Json(CorsTestResponse::new(origin))
}

pub fn system_router() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/test-cors", get(cors_test_handler))
}
