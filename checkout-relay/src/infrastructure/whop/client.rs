// checkout-relay/src/infrastructure/whop/client.rs

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::graphql::{
    error_message, ChargeUserInput, ChargeUserVariables, GraphQlRequest, CHARGE_USER_MUTATION,
};
use crate::config::WhopConfig;
use crate::domain::payment_model::{ChargeParams, ChargeResult, PaymentRecord};
use crate::service::payment_platform::{PaymentPlatform, PlatformError};

/// reqwest による `PaymentPlatform` 実装
#[derive(Clone)]
pub struct WhopClient {
    client: reqwest::Client,
    config: WhopConfig,
}

impl WhopClient {
    pub fn new(config: WhopConfig) -> Result<Self, PlatformError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("checkout-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn payment_url(&self, payment_id: &str) -> String {
        format!(
            "{}/v2/payments/{}?expand[]=user",
            self.config.api_base_url,
            urlencoding::encode(payment_id)
        )
    }

    fn graphql_request(&self) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(&self.config.graphql_url)
            .bearer_auth(self.config.charge_token());

        if let Some(company_id) = &self.config.company_id {
            request = request.header("x-company-id", company_id);
        }
        if let Some(app_id) = &self.config.app_id {
            request = request.header("x-app-id", app_id);
        }
        request
    }
}

#[async_trait]
impl PaymentPlatform for WhopClient {
    async fn lookup_payment(&self, payment_id: &str) -> Result<PaymentRecord, PlatformError> {
        debug!(operation = "lookup_payment", "Calling upstream platform");

        let response = self
            .client
            .get(self.payment_url(payment_id))
            .bearer_auth(&self.config.company_token)
            .send()
            .await
            .map_err(transport_error)?;

        let body = success_body(response, "lookup_payment").await?;
        serde_json::from_value(body).map_err(|e| PlatformError::Decode(e.to_string()))
    }

    async fn create_charge(&self, params: &ChargeParams) -> Result<ChargeResult, PlatformError> {
        debug!(
            operation = "create_charge",
            currency = %params.currency,
            "Calling upstream platform"
        );

        let payload = GraphQlRequest {
            query: CHARGE_USER_MUTATION,
            variables: ChargeUserVariables {
                input: ChargeUserInput::from_params(params),
            },
        };

        let response = self
            .graphql_request()
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let body = success_body(response, "create_charge").await?;

        if let Some(errors) = body
            .get("errors")
            .and_then(Value::as_array)
            .filter(|errors| !errors.is_empty())
        {
            let message = error_message(errors);
            warn!(operation = "create_charge", error = %message, "Upstream rejected request");
            return Err(PlatformError::Rejected {
                message,
                details: Some(Value::Array(errors.clone())),
            });
        }

        match body.pointer("/data/chargeUser") {
            None | Some(Value::Null) => Ok(ChargeResult::default()),
            Some(result) => serde_json::from_value(result.clone())
                .map_err(|e| PlatformError::Decode(e.to_string())),
        }
    }
}

fn transport_error(error: reqwest::Error) -> PlatformError {
    warn!(error = %error, "Upstream platform unreachable");
    PlatformError::Transport(error.to_string())
}

/// 2xx ならボディ（JSON）を返し、それ以外は `PlatformError::Status` にする
async fn success_body(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<Value, PlatformError> {
    let status = response.status();
    let text = response.text().await.map_err(transport_error)?;

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };

    if !status.is_success() {
        warn!(
            operation = operation,
            status = status.as_u16(),
            "Upstream returned non-success status"
        );
        return Err(PlatformError::Status {
            status: status.as_u16(),
            body,
        });
    }

    if !body.is_object() {
        return Err(PlatformError::Decode(format!(
            "expected a JSON object from {}",
            operation
        )));
    }

    Ok(body)
}
