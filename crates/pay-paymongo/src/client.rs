//! # PayMongo Payment Intents
//!
//! Implementation of the PayMongo Payment Intents API.
//! The provider's success body is returned untouched.

use crate::config::PayMongoConfig;
use async_trait::async_trait;
use book_core::{PaymentIntentRequest, PaymentProvider, ServiceError, ServiceResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "paymongo";

/// PayMongo payment-intent client
pub struct PayMongoClient {
    config: PayMongoConfig,
    client: Client,
}

impl PayMongoClient {
    /// Create a new PayMongo client
    pub fn new(config: PayMongoConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ServiceError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PaymentProvider for PayMongoClient {
    #[instrument(skip(self, request), fields(amount = %request.amount, currency = %request.currency))]
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
        idempotency_key: &str,
    ) -> ServiceResult<Value> {
        let url = self.config.payment_intents_url();
        let body = PayMongoEnvelope {
            data: PayMongoData {
                attributes: request,
            },
        };

        debug!("Creating PayMongo payment intent: key={}", idempotency_key);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Idempotency-Key", idempotency_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("PayMongo request failed: {}", e);
                ServiceError::Network(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<PayMongoErrorResponse>(&text) {
                Ok(parsed) if !parsed.errors.is_empty() => parsed.details(),
                _ => text,
            };
            error!("PayMongo API error: status={}, detail={}", status, message);

            return Err(ServiceError::Provider {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = serde_json::from_str(&text).map_err(|e| {
            error!("PayMongo returned a non-JSON body: {}", e);
            ServiceError::Provider {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message: format!("Failed to parse PayMongo response: {}", e),
            }
        })?;

        info!(
            "Created PayMongo payment intent: id={}",
            payload
                .pointer("/data/id")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
        );

        Ok(payload)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// PayMongo API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct PayMongoEnvelope<'a> {
    data: PayMongoData<'a>,
}

#[derive(Debug, Serialize)]
struct PayMongoData<'a> {
    attributes: &'a PaymentIntentRequest,
}

#[derive(Debug, Deserialize)]
struct PayMongoErrorResponse {
    #[serde(default)]
    errors: Vec<PayMongoError>,
}

#[derive(Debug, Deserialize)]
struct PayMongoError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl PayMongoErrorResponse {
    fn details(&self) -> String {
        self.errors
            .iter()
            .map(|e| match (&e.code, &e.detail) {
                (Some(code), Some(detail)) => format!("{}: {}", code, detail),
                (None, Some(detail)) => detail.clone(),
                (Some(code), None) => code.clone(),
                (None, None) => "unknown error".to_string(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope_shape() {
        let request = PaymentIntentRequest::from_amount(&json!(250));
        let body = serde_json::to_value(PayMongoEnvelope {
            data: PayMongoData {
                attributes: &request,
            },
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "data": {
                    "attributes": {
                        "amount": 25000,
                        "payment_method_allowed": ["card", "gcash"],
                        "payment_method_types": ["card"],
                        "currency": "PHP"
                    }
                }
            })
        );
    }

    #[test]
    fn test_error_details() {
        let parsed: PayMongoErrorResponse = serde_json::from_value(json!({
            "errors": [
                {"code": "parameter_below_minimum", "detail": "amount cannot be less than 2000."},
                {"detail": "currency is invalid."}
            ]
        }))
        .unwrap();

        assert_eq!(
            parsed.details(),
            "parameter_below_minimum: amount cannot be less than 2000.; currency is invalid."
        );
    }
}
