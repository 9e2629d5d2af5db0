//! # pay-paymongo
//!
//! PayMongo payment-intent client for the FullyBooked API.
//!
//! Implements [`book_core::PaymentProvider`] against
//! `POST /v1/payment_intents`, authenticating with the secret key as an
//! HTTP Basic username.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_paymongo::{PayMongoClient, PayMongoConfig};
//! use book_core::{PaymentIntentRequest, PaymentProvider};
//!
//! // Create client from environment
//! let client = PayMongoClient::new(PayMongoConfig::from_env()?)?;
//!
//! // 250.00 PHP → 25000 centavos
//! let request = PaymentIntentRequest::from_amount(&serde_json::json!(250));
//! let body = client.create_payment_intent(&request, "order-42").await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::PayMongoClient;
pub use config::PayMongoConfig;
