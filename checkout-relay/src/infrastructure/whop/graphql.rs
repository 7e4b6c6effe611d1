// checkout-relay/src/infrastructure/whop/graphql.rs

use serde::Serialize;
use serde_json::Value;

use crate::domain::payment_model::ChargeParams;

pub(super) const CHARGE_USER_MUTATION: &str = r#"mutation chargeUser($input: ChargeUserInput!) {
  chargeUser(input: $input) {
    status
    inAppPurchase {
      id
      planId
    }
  }
}"#;

#[derive(Debug, Serialize)]
pub(super) struct GraphQlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub(super) struct ChargeUserVariables<'a> {
    pub input: ChargeUserInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChargeUserInput<'a> {
    pub user_id: &'a str,
    /// 上流は主通貨単位の小数で受け取る
    pub amount: f64,
    pub currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl<'a> ChargeUserInput<'a> {
    pub fn from_params(params: &'a ChargeParams) -> Self {
        Self {
            user_id: &params.user_id,
            amount: params.amount.to_major(&params.currency),
            currency: params.currency.as_str(),
            metadata: params
                .memo
                .as_ref()
                .map(|memo| serde_json::json!({ "memo": memo })),
        }
    }
}

/// GraphQL の `errors` 配列からメッセージを組み立てる
pub(super) fn error_message(errors: &[Value]) -> String {
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|error| error.get("message").and_then(Value::as_str))
        .collect();

    if messages.is_empty() {
        "Upstream GraphQL request failed".to_string()
    } else {
        messages.join("; ")
    }
}
