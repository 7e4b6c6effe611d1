// src/lib.rs
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod infrastructure;
pub mod logging;
pub mod middleware;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use api::{app_router, AppState};
pub use error::{AppError, AppResult};
