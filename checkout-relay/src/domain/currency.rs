// checkout-relay/src/domain/currency.rs

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// 受け付ける金額の上限（最小通貨単位）
pub const MAX_AMOUNT_MINOR: u64 = 99_999_999;

/// 補助単位を持たない通貨
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["clp", "isk", "jpy", "krw", "ugx", "vnd", "xaf", "xof"];

/// ISO-4217 形式の通貨コード（小文字に正規化済み）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Option<Self> {
        let code = raw.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(code.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 主単位と最小単位の桁差
    pub fn minor_unit_exponent(&self) -> u32 {
        if ZERO_DECIMAL_CURRENCIES.contains(&self.0.as_str()) {
            0
        } else {
            2
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must be an integer number of minor currency units")]
    NotInteger,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount must not exceed {}", MAX_AMOUNT_MINOR)]
    TooLarge,
    #[error("amount must be a number")]
    InvalidType,
}

/// 最小通貨単位での金額（例: セント）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MinorUnits(u64);

impl MinorUnits {
    pub fn new(value: u64) -> Result<Self, AmountError> {
        match value {
            0 => Err(AmountError::NotPositive),
            v if v > MAX_AMOUNT_MINOR => Err(AmountError::TooLarge),
            v => Ok(Self(v)),
        }
    }

    /// JSON値から金額を読み取る
    ///
    /// 整数の数値、または数字のみの文字列（フォーム送信）を受け付ける。
    /// 小数は丸めずに拒否する。
    pub fn from_json(value: &Value) -> Result<Self, AmountError> {
        match value {
            Value::Number(number) => {
                if let Some(v) = number.as_u64() {
                    Self::new(v)
                } else if number.as_i64().is_some() {
                    Err(AmountError::NotPositive)
                } else {
                    Err(AmountError::NotInteger)
                }
            }
            Value::String(raw) => Self::parse_str(raw),
            _ => Err(AmountError::InvalidType),
        }
    }

    fn parse_str(raw: &str) -> Result<Self, AmountError> {
        let raw = raw.trim();
        if let Some(digits) = raw.strip_prefix('-') {
            return if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                Err(AmountError::NotPositive)
            } else {
                Err(AmountError::InvalidType)
            };
        }
        if raw.is_empty() {
            return Err(AmountError::InvalidType);
        }
        if raw.chars().all(|c| c.is_ascii_digit()) {
            // 桁あふれは上限超過として扱う
            return raw
                .parse::<u64>()
                .map_err(|_| AmountError::TooLarge)
                .and_then(Self::new);
        }
        if raw.parse::<f64>().is_ok_and(f64::is_finite) {
            Err(AmountError::NotInteger)
        } else {
            Err(AmountError::InvalidType)
        }
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// 上流APIが期待する主単位の金額へ変換
    pub fn to_major(self, currency: &CurrencyCode) -> f64 {
        let divisor = 10u64.pow(currency.minor_unit_exponent()) as f64;
        self.0 as f64 / divisor
    }
}
