// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

use crate::service::payment_platform::PlatformError;

#[derive(Error, Debug)]
pub enum AppError {
    /// 必須項目の欠落など、クライアント入力の不備
    #[error("{0}")]
    Validation(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("{0}")]
    NotFound(String),

    /// 上流プラットフォーム呼び出しの失敗
    #[error("Upstream error: {message}")]
    Upstream {
        status: Option<StatusCode>,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// 上流は成功を返したが、期待したオブジェクトが含まれていない
    #[error("{0}")]
    IncompleteResult(String),
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        let message = err.upstream_message();
        match err {
            PlatformError::Status { status, body } => AppError::Upstream {
                status: StatusCode::from_u16(status).ok(),
                message,
                details: (!body.is_null()).then_some(body),
            },
            PlatformError::Rejected { details, .. } => AppError::Upstream {
                status: None,
                message,
                details,
            },
            PlatformError::Transport(_) | PlatformError::Decode(_) => AppError::Upstream {
                status: None,
                message,
                details: None,
            },
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(message) => {
                tracing::warn!(error = %message, "Request rejected");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            AppError::ValidationFailure(errors) => {
                let field_errors: BTreeMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let messages = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map_or_else(|| "Invalid value".to_string(), |m| m.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect();
                tracing::warn!(
                    fields = ?field_errors.keys().collect::<Vec<_>>(),
                    "Request validation failed"
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation failed".to_string(),
                        details: Some(json!(field_errors)),
                    },
                )
            }
            AppError::InvalidBody(message) => {
                tracing::warn!(error = %message, "Unparsable request body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid request body".to_string(),
                        details: Some(json!(message)),
                    },
                )
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse::new("Request body too large"),
            ),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorResponse::new(message)),
            AppError::Upstream {
                status,
                message,
                details,
            } => {
                // 上流のステータスはエラー系のみそのまま返す
                let status = status
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                tracing::error!(
                    status = status.as_u16(),
                    error = %message,
                    "Upstream platform call failed"
                );
                (status, ErrorResponse { error: message, details })
            }
            AppError::IncompleteResult(message) => {
                tracing::error!(error = %message, "Upstream returned an incomplete result");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message))
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}
