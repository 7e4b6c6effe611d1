// checkout-relay/src/domain/payment_model.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::currency::{CurrencyCode, MinorUnits};

/// 上流の決済レコード（必要な項目のみ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user: Option<PaymentUser>,
    /// 展開されていない場合に返されることがあるユーザーID
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub final_amount: Option<f64>,
}

/// 決済に紐づくユーザー
///
/// 展開済みならオブジェクト、未展開ならIDの文字列で返る。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentUser {
    Expanded {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        username: Option<String>,
    },
    Reference(String),
}

impl PaymentRecord {
    /// 展開済み `user.id` → 未展開の `user` → `user_id` の順で解決する
    pub fn resolve_user_id(&self) -> Option<&str> {
        let from_user = match &self.user {
            Some(PaymentUser::Expanded { id, .. }) => id.as_deref(),
            Some(PaymentUser::Reference(id)) => Some(id.as_str()),
            None => None,
        };

        from_user
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.user_id.as_deref().filter(|id| !id.trim().is_empty()))
    }

    pub fn user_email(&self) -> Option<&str> {
        match &self.user {
            Some(PaymentUser::Expanded { email, .. }) => {
                email.as_deref().filter(|e| !e.trim().is_empty())
            }
            _ => None,
        }
    }
}

/// 課金作成パラメータ
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeParams {
    pub user_id: String,
    pub amount: MinorUnits,
    pub currency: CurrencyCode,
    pub memo: Option<String>,
}

/// 課金作成の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResult {
    #[serde(default)]
    pub status: Option<String>,
    /// 購入インテント。クライアントへはそのまま返す
    #[serde(default)]
    pub in_app_purchase: Option<Value>,
}
