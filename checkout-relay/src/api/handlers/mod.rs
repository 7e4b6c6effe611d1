// src/api/handlers/mod.rs
pub mod payment_handler;
pub mod system_handler;
