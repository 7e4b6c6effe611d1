// checkout-relay/src/api/dto/payment_dto.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::currency::{CurrencyCode, MinorUnits};
use crate::error::{AppError, AppResult};
use crate::utils::error_helper::{missing_fields_error, validate_with_context};
use crate::utils::validation::{
    identifier, memo, non_blank, validate_amount, validate_currency, validate_identifier,
};

// --- Request DTOs ---

/// レシートからのユーザー検索リクエスト
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LookupUserRequestBody {
    #[validate(
        length(
            max = identifier::MAX_LENGTH,
            message = "receiptId must be 256 characters or less"
        ),
        custom(function = validate_identifier)
    )]
    pub receipt_id: Option<String>,
}

impl LookupUserRequestBody {
    pub fn into_request(self) -> AppResult<ReceiptLookupRequest> {
        let body = Self {
            receipt_id: non_blank(self.receipt_id),
        };

        if body.receipt_id.is_none() {
            return Err(missing_fields_error("Missing receiptId", "lookup_user"));
        }
        validate_with_context(&body, "lookup_user")?;

        let receipt_id = body
            .receipt_id
            .ok_or_else(|| missing_fields_error("Missing receiptId", "lookup_user"))?;

        Ok(ReceiptLookupRequest { receipt_id })
    }
}

/// 課金作成リクエスト
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequestBody {
    #[validate(
        length(
            min = identifier::MIN_LENGTH,
            max = identifier::MAX_LENGTH,
            message = "whopUserId must be between 1 and 256 characters"
        ),
        custom(function = validate_identifier)
    )]
    pub whop_user_id: Option<String>,

    /// 最小通貨単位の整数（数値または数字のみの文字列）
    #[validate(custom(function = validate_amount))]
    pub amount: Option<Value>,

    #[validate(custom(function = validate_currency))]
    pub currency: Option<String>,

    #[validate(length(
        max = memo::MAX_LENGTH,
        message = "memo must be 200 characters or less"
    ))]
    pub memo: Option<String>,
}

const MISSING_CHARGE_FIELDS: &str = "Missing required fields";

impl ChargeRequestBody {
    pub fn into_request(self) -> AppResult<ChargeRequest> {
        let body = Self {
            whop_user_id: non_blank(self.whop_user_id),
            amount: self.amount.filter(is_present),
            currency: non_blank(self.currency),
            memo: non_blank(self.memo),
        };

        if body.whop_user_id.is_none() || body.amount.is_none() || body.currency.is_none() {
            return Err(missing_fields_error(MISSING_CHARGE_FIELDS, "create_charge"));
        }
        validate_with_context(&body, "create_charge")?;

        let missing = || missing_fields_error(MISSING_CHARGE_FIELDS, "create_charge");
        let user_id = body.whop_user_id.ok_or_else(missing)?;
        let amount = body.amount.ok_or_else(missing)?;
        let currency = body.currency.ok_or_else(missing)?;

        Ok(ChargeRequest {
            whop_user_id: user_id,
            amount: MinorUnits::from_json(&amount)
                .map_err(|e| AppError::Validation(e.to_string()))?,
            currency: CurrencyCode::parse(&currency)
                .ok_or_else(|| AppError::Validation("Invalid currency".to_string()))?,
            memo: body.memo,
        })
    }
}

/// `null` と空文字列は未指定として扱う
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

// --- Validated Requests ---

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLookupRequest {
    pub receipt_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub whop_user_id: String,
    pub amount: MinorUnits,
    pub currency: CurrencyCode,
    pub memo: Option<String>,
}

// --- Response DTOs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupUserResponse {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
