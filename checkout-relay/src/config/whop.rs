use std::fmt;

use super::app::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.whop.com/api";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.whop.com/public-graphql";

/// Whop API の接続設定
#[derive(Clone)]
pub struct WhopConfig {
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub company_id: Option<String>,
    pub company_token: String,
    pub api_base_url: String,
    pub graphql_url: String,
}

impl WhopConfig {
    /// 環境変数から読み込む。`WHOP_COMPANY_TOKEN` は必須
    pub(crate) fn from_lookup(var: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let company_token =
            var("WHOP_COMPANY_TOKEN").ok_or(ConfigError::Missing("WHOP_COMPANY_TOKEN"))?;

        let api_key = var("WHOP_API_KEY");
        if api_key.is_none() {
            tracing::warn!("WHOP_API_KEY not set - charges will use the company token");
        }

        Ok(Self {
            app_id: var("NEXT_PUBLIC_WHOP_APP_ID").or_else(|| var("WHOP_APP_ID")),
            api_key,
            company_id: var("NEXT_PUBLIC_WHOP_COMPANY_ID").or_else(|| var("WHOP_COMPANY_ID")),
            company_token,
            api_base_url: base_url(var("WHOP_API_BASE_URL"), DEFAULT_API_BASE_URL),
            graphql_url: base_url(var("WHOP_GRAPHQL_URL"), DEFAULT_GRAPHQL_URL),
        })
    }

    /// 課金APIに使う認証トークン
    pub fn charge_token(&self) -> &str {
        self.api_key.as_deref().unwrap_or(&self.company_token)
    }

    /// テスト用の設定を作成（上流URLは任意のスタブを指す）
    pub fn for_testing(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            app_id: Some("app_test".to_string()),
            api_key: Some("test_api_key".to_string()),
            company_id: Some("biz_test".to_string()),
            company_token: "test_company_token".to_string(),
            api_base_url: format!("{}/api", base_url),
            graphql_url: format!("{}/public-graphql", base_url),
        }
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

// 起動ログに設定を出すため、秘密値は伏せる
impl fmt::Debug for WhopConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhopConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("company_id", &self.company_id)
            .field("company_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("graphql_url", &self.graphql_url)
            .finish()
    }
}
