use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;

use crate::api::dto::payment_dto::{ChargeRequestBody, LookupUserRequestBody, LookupUserResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::Payload;

/// レシートIDから購入ユーザーを検索
pub async fn lookup_user_handler(
    State(app_state): State<AppState>,
    Payload(payload): Payload<LookupUserRequestBody>,
) -> AppResult<Json<LookupUserResponse>> {
    // 上流呼び出しの前に検証を完了させる
    let request = payload.into_request()?;

    let response = app_state
        .relay_service
        .lookup_user_by_receipt(request)
        .await?;

    Ok(Json(response))
}

/// 課金作成。上流の購入インテントをそのまま返す
pub async fn create_charge_handler(
    State(app_state): State<AppState>,
    Payload(payload): Payload<ChargeRequestBody>,
) -> AppResult<Json<Value>> {
    let request = payload.into_request()?;

    let purchase = app_state.relay_service.create_charge(request).await?;

    Ok(Json(purchase))
}

pub fn payment_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/lookup-user-from-receipt", post(lookup_user_handler))
        .route("/api/charge", post(create_charge_handler))
        .with_state(app_state)
}
