// checkout-relay/src/service/relay_service.rs

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dto::payment_dto::{ChargeRequest, LookupUserResponse, ReceiptLookupRequest};
use crate::domain::payment_model::ChargeParams;
use crate::error::{AppError, AppResult};
use crate::service::payment_platform::PaymentPlatform;

/// 検証済みリクエストを上流プラットフォームへ1回だけ中継するサービス
pub struct RelayService {
    platform: Arc<dyn PaymentPlatform>,
}

impl RelayService {
    pub fn new(platform: Arc<dyn PaymentPlatform>) -> Self {
        Self { platform }
    }

    /// レシート（決済ID）から購入ユーザーを特定
    pub async fn lookup_user_by_receipt(
        &self,
        request: ReceiptLookupRequest,
    ) -> AppResult<LookupUserResponse> {
        let payment = self.platform.lookup_payment(&request.receipt_id).await?;

        let Some(user_id) = payment.resolve_user_id() else {
            warn!("Payment has no associated user");
            return Err(AppError::NotFound("User not found on payment".to_string()));
        };

        let response = LookupUserResponse {
            user_id: user_id.to_string(),
            email: payment.user_email().map(str::to_string),
        };

        info!(
            has_email = response.email.is_some(),
            "Resolved user from receipt"
        );
        Ok(response)
    }

    /// 課金（保留中のアプリ内購入）を作成し、購入インテントをそのまま返す
    pub async fn create_charge(&self, request: ChargeRequest) -> AppResult<Value> {
        let params = ChargeParams {
            user_id: request.whop_user_id,
            amount: request.amount,
            currency: request.currency,
            memo: request.memo,
        };

        let result = self.platform.create_charge(&params).await?;

        match result.in_app_purchase {
            Some(purchase) if !purchase.is_null() => {
                info!(
                    currency = %params.currency,
                    amount = params.amount.get(),
                    status = ?result.status,
                    "Charge created"
                );
                Ok(purchase)
            }
            _ => {
                warn!(status = ?result.status, "Upstream charge returned no purchase intent");
                Err(AppError::IncompleteResult(
                    "No inAppPurchase returned.".to_string(),
                ))
            }
        }
    }
}
