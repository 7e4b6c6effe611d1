// checkout-relay/src/api/dto/mod.rs

pub mod payment_dto;
pub mod system_dto;

pub use payment_dto::{
    ChargeRequest, ChargeRequestBody, LookupUserRequestBody, LookupUserResponse,
    ReceiptLookupRequest,
};
pub use system_dto::CorsTestResponse;
