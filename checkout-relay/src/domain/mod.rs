pub mod currency;
pub mod payment_model;

pub use currency::{CurrencyCode, MinorUnits};
pub use payment_model::{ChargeParams, ChargeResult, PaymentRecord, PaymentUser};
