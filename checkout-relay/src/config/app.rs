use axum::http::HeaderValue;
use dotenvy::dotenv;
use regex::Regex;
use std::env;

use super::whop::WhopConfig;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024; // 1MB

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid {name} value: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("Invalid CORS_ORIGIN_PATTERN: {0}")]
    Pattern(#[from] regex::Error),
}

/// CORS の許可オリジン設定
#[derive(Clone, Debug)]
pub enum CorsPolicy {
    /// すべてのオリジンを許可
    Any,
    /// 明示的なオリジン一覧
    List(Vec<HeaderValue>),
    /// 開発ホスト向けの正規表現マッチ
    Pattern(Regex),
}

impl CorsPolicy {
    fn from_vars(origins: Option<String>, pattern: Option<String>) -> Result<Self, ConfigError> {
        // パターン指定が優先
        if let Some(pattern) = pattern {
            return Ok(CorsPolicy::Pattern(Regex::new(&pattern)?));
        }

        let origins = match origins {
            None => return Ok(CorsPolicy::Any),
            Some(origins) if origins.trim() == "*" => return Ok(CorsPolicy::Any),
            Some(origins) => origins,
        };

        let list = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::Invalid {
                        name: "CORS_ALLOWED_ORIGINS",
                        value: origin.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if list.is_empty() {
            return Ok(CorsPolicy::Any);
        }
        Ok(CorsPolicy::List(list))
    }

    /// ワイルドカード設定では PUT / PATCH / DELETE も許可する
    pub fn is_permissive(&self) -> bool {
        matches!(self, CorsPolicy::Any)
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        match self {
            CorsPolicy::Any => true,
            CorsPolicy::List(list) => list.iter().any(|allowed| allowed == origin),
            CorsPolicy::Pattern(regex) => origin.to_str().is_ok_and(|o| regex.is_match(o)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub body_limit: usize,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors: CorsPolicy,
    pub server: ServerConfig,
    pub whop: WhopConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の変数ソースから設定を組み立てる（テストでは偽の環境を注入する）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port,
            })?,
            None => DEFAULT_PORT,
        };

        let body_limit = match var("BODY_LIMIT_BYTES") {
            Some(limit) => limit.parse().map_err(|_| ConfigError::Invalid {
                name: "BODY_LIMIT_BYTES",
                value: limit,
            })?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            cors: CorsPolicy::from_vars(var("CORS_ALLOWED_ORIGINS"), var("CORS_ORIGIN_PATTERN"))?,
            server: ServerConfig { body_limit },
            whop: WhopConfig::from_lookup(&var)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// テスト用の設定を作成
    pub fn for_testing() -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsPolicy::Any,
            server: ServerConfig {
                body_limit: DEFAULT_BODY_LIMIT,
            },
            whop: WhopConfig::for_testing("http://127.0.0.1:9"),
        }
    }
}
