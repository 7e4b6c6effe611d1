// checkout-relay/src/service/payment_platform.rs

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::payment_model::{ChargeParams, ChargeResult, PaymentRecord};

/// 上流決済プラットフォームのトレイト定義
///
/// リレーが必要とする操作だけを公開する。テストではネットワークを使わない
/// 実装に差し替える。
#[async_trait]
pub trait PaymentPlatform: Send + Sync {
    /// 決済レコードを取得（関連ユーザーを展開して返す）
    async fn lookup_payment(&self, payment_id: &str) -> Result<PaymentRecord, PlatformError>;

    /// 保留中のアプリ内購入を作成
    async fn create_charge(&self, params: &ChargeParams) -> Result<ChargeResult, PlatformError>;
}

#[derive(Error, Debug)]
pub enum PlatformError {
    /// 上流が非成功ステータスを返した
    #[error("Upstream returned status {status}")]
    Status { status: u16, body: Value },

    /// 上流は応答したが、リクエストを拒否した（GraphQL errors など）
    #[error("Upstream rejected the request: {message}")]
    Rejected {
        message: String,
        details: Option<Value>,
    },

    #[error("Upstream platform request failed: {0}")]
    Transport(String),

    #[error("Unexpected upstream response: {0}")]
    Decode(String),
}

impl PlatformError {
    /// クライアントに返すエラーメッセージ
    ///
    /// ステータスエラーの場合は上流ボディ内のメッセージを優先する。
    pub fn upstream_message(&self) -> String {
        match self {
            PlatformError::Status { status, body } => message_from_body(body)
                .unwrap_or_else(|| format!("Upstream request failed with status {}", status)),
            PlatformError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn message_from_body(body: &Value) -> Option<String> {
    let candidates = [
        body.pointer("/error/message"),
        body.get("message"),
        body.get("error"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}
