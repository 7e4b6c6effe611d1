pub mod error_helper;
pub mod validation;
