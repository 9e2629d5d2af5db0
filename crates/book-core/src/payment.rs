//! # Payment Provider Trait
//!
//! Payment-intent request shape and the provider seam.
//! Implementations: PayMongo (`pay-paymongo`).
//!
//! ```text
//! POST /api/create-payment {amount}
//!            │
//!            ▼
//!   PaymentIntentRequest::from_amount     amount × 100, fixed methods/currency
//!            │
//!            ▼
//!   PaymentProvider::create_payment_intent   provider body returned verbatim
//! ```

use crate::error::ServiceResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    PHP,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::PHP => "PHP",
        }
    }

    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::PHP => 2,
        }
    }

    /// Convert a decimal amount to the smallest currency unit (centavos)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment methods accepted on an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Gcash,
}

/// Attributes of a payment intent as sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in minor units, or `null` when the caller sent no usable number
    pub amount: Value,
    pub payment_method_allowed: Vec<PaymentMethod>,
    pub payment_method_types: Vec<PaymentMethod>,
    pub currency: Currency,
}

impl PaymentIntentRequest {
    /// Build the fixed-shape intent for a caller-supplied major-unit amount.
    ///
    /// The amount is not validated. Numbers and numeric strings are scaled
    /// by 100; anything else becomes `null` and is left for the provider to
    /// reject.
    pub fn from_amount(amount: &Value) -> Self {
        let currency = Currency::default();
        Self {
            amount: to_minor_units(amount, currency),
            payment_method_allowed: vec![PaymentMethod::Card, PaymentMethod::Gcash],
            payment_method_types: vec![PaymentMethod::Card],
            currency,
        }
    }
}

fn to_minor_units(amount: &Value, currency: Currency) -> Value {
    let major = match amount {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    major
        .filter(|m| m.is_finite())
        .map(|m| Value::from(currency.to_smallest_unit(m)))
        .unwrap_or(Value::Null)
}

/// Third-party payment-intent API.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent and return the provider's response body.
    ///
    /// Any transport failure or non-2xx answer is an error; the body is not
    /// inspected on success.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
        idempotency_key: &str,
    ) -> ServiceResult<Value>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
