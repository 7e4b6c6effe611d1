// src/service/mod.rs
pub mod payment_platform;
pub mod relay_service;

pub use payment_platform::{PaymentPlatform, PlatformError};
pub use relay_service::RelayService;
