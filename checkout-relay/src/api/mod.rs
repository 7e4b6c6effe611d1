// checkout-relay/src/api/mod.rs
use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::cors_layer;
use crate::service::{PaymentPlatform, RelayService};

pub mod dto;
pub mod handlers;

use handlers::{payment_handler::payment_router, system_handler::system_router};

/// アプリケーション状態（すべて不変）
#[derive(Clone)]
pub struct AppState {
    pub relay_service: Arc<RelayService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, platform: Arc<dyn PaymentPlatform>) -> Self {
        Self {
            relay_service: Arc::new(RelayService::new(platform)),
            config: Arc::new(config),
        }
    }
}

async fn not_found_handler() -> AppError {
    AppError::NotFound("Not found".to_string())
}

/// ルーター全体を組み立てる
///
/// レイヤーは下から順に外側になる。CORS のプリフライトはハンドラーに届かない。
/// ボディ上限は抽出時に判定され、超過は JSON の 413 になる。
pub fn app_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config.cors);
    let body_limit = app_state.config.server.body_limit;

    Router::new()
        .merge(system_router())
        .merge(payment_router(app_state))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(axum_middleware::from_fn(inject_request_context))
}
