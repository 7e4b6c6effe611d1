// src/middleware/cors.rs

use axum::http::{header, request::Parts, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsPolicy;

/// 設定に応じたメソッド一覧
pub fn allowed_methods(policy: &CorsPolicy) -> Vec<Method> {
    if policy.is_permissive() {
        vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]
    } else {
        vec![Method::GET, Method::POST, Method::OPTIONS]
    }
}

/// CORS設定
///
/// 認証はボディ経由で行うため credentials は許可しない。
pub fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    let allow_origin = match policy {
        CorsPolicy::Any => AllowOrigin::any(),
        CorsPolicy::List(origins) => AllowOrigin::list(origins.clone()),
        CorsPolicy::Pattern(_) => {
            let policy = policy.clone();
            AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
                policy.allows(origin)
            })
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allowed_methods(policy))
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600)) // プリフライトリクエストのキャッシュ時間
}
