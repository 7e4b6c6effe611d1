// checkout-relay/src/api/dto/system_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CORS疎通確認のレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsTestResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub origin: Option<String>,
}

impl CorsTestResponse {
    pub fn new(origin: Option<String>) -> Self {
        Self {
            message: "CORS test successful".to_string(),
            timestamp: Utc::now(),
            origin,
        }
    }
}
