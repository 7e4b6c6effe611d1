// src/config.rs
pub mod app;
pub mod whop;

pub use app::{AppConfig, ConfigError, CorsPolicy, ServerConfig};
pub use whop::WhopConfig;
