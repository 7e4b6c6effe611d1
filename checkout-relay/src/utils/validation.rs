// checkout-relay/src/utils/validation.rs

//! リクエストDTOで共有するバリデーション定数と関数

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use validator::ValidationError;

use crate::domain::currency::{CurrencyCode, MinorUnits};

/// 上流IDの制約
pub mod identifier {
    pub const MIN_LENGTH: u64 = 1;
    pub const MAX_LENGTH: u64 = 256;
}

/// メモの制約
pub mod memo {
    pub const MAX_LENGTH: u64 = 200;
}

/// 空白・制御文字を含まないID
pub static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s\p{Cc}]+$").expect("Invalid identifier regex"));

/// レシートID・ユーザーIDの形式をバリデーション
pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if IDENTIFIER_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(error_with_message(
            "invalid_identifier",
            "must not contain whitespace or control characters".to_string(),
        ))
    }
}

pub fn validate_currency(value: &str) -> Result<(), ValidationError> {
    match CurrencyCode::parse(value) {
        Some(_) => Ok(()),
        None => Err(error_with_message(
            "invalid_currency",
            "currency must be a three-letter ISO-4217 code".to_string(),
        )),
    }
}

/// 金額（最小通貨単位の整数）をバリデーション
pub fn validate_amount(value: &Value) -> Result<(), ValidationError> {
    MinorUnits::from_json(value)
        .map(|_| ())
        .map_err(|e| error_with_message("invalid_amount", e.to_string()))
}

fn error_with_message(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// 空白のみの文字列を未指定として扱う
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
