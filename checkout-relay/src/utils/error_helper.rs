// checkout-relay/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! ハンドラー層・DTO層で共通して使用するエラー処理パターンを提供します。

use crate::error::{AppError, AppResult};
use tracing::warn;
use validator::Validate;

// =============================================================================
// バリデーションエラー処理の統一
// =============================================================================

/// validator によるバリデーションをログ付きで実行する
///
/// # Arguments
/// * `payload` - 検証対象
/// * `context` - エラーが発生したコンテキスト（ログ用）
pub fn validate_with_context<T: Validate>(payload: &T, context: &str) -> AppResult<()> {
    payload.validate().map_err(|validation_errors| {
        warn!(
            context = %context,
            error_count = validation_errors.field_errors().len(),
            "Validation failed"
        );
        AppError::ValidationFailure(validation_errors)
    })
}

/// 必須項目欠落エラーをログ付きで生成
pub fn missing_fields_error(message: &str, context: &str) -> AppError {
    warn!(context = %context, "Required fields missing");
    AppError::Validation(message.to_string())
}
