//! # PayMongo Configuration
//!
//! Configuration management for the PayMongo integration.
//! The secret key is loaded from the environment and checked at startup so a
//! missing credential fails the boot, not the first payment.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use book_core::ServiceError;
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://api.paymongo.com";

/// PayMongo API configuration
#[derive(Clone)]
pub struct PayMongoConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl PayMongoConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYMONGO_SECRET_KEY` (or the legacy `PAYMONGO_SECRET`)
    ///
    /// Optional:
    /// - `PAYMONGO_API_BASE_URL`
    pub fn from_env() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
        let secret_key = lookup("PAYMONGO_SECRET_KEY")
            .or_else(|| lookup("PAYMONGO_SECRET"))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ServiceError::Configuration("PAYMONGO_SECRET_KEY not set".to_string())
            })?;

        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(ServiceError::Configuration(
                "PAYMONGO_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        let config = Self::new(secret_key);
        Ok(match lookup("PAYMONGO_API_BASE_URL") {
            Some(url) if !url.is_empty() => config.with_api_base_url(url),
            _ => config,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value: the secret as Basic username, empty password
    pub fn auth_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:", self.secret_key)))
    }

    /// Payment intents endpoint
    pub fn payment_intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base_url.trim_end_matches('/'))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl std::fmt::Debug for PayMongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayMongoConfig")
            .field("secret_key", &"***")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_modes() {
        let config = PayMongoConfig::new("sk_test_abc123");
        assert!(config.is_test_mode());

        let config = PayMongoConfig::new("sk_live_abc123");
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = PayMongoConfig::new("sk_test_abc123");
        // base64("sk_test_abc123:")
        assert_eq!(config.auth_header(), "Basic c2tfdGVzdF9hYmMxMjM6");
    }

    #[test]
    fn test_payment_intents_url() {
        let config = PayMongoConfig::new("sk_test_abc123");
        assert_eq!(
            config.payment_intents_url(),
            "https://api.paymongo.com/v1/payment_intents"
        );

        let config = config.with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(
            config.payment_intents_url(),
            "http://127.0.0.1:9999/v1/payment_intents"
        );
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let result = PayMongoConfig::from_lookup(|_| None);
        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }

    #[test]
    fn test_from_lookup_legacy_name_and_validation() {
        let config = PayMongoConfig::from_lookup(|key| {
            (key == "PAYMONGO_SECRET").then(|| "sk_test_legacy".to_string())
        })
        .unwrap();
        assert_eq!(config.secret_key, "sk_test_legacy");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        let result = PayMongoConfig::from_lookup(|key| {
            (key == "PAYMONGO_SECRET_KEY").then(|| "pk_test_public".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = PayMongoConfig::new("sk_test_abc123");
        assert!(!format!("{:?}", config).contains("abc123"));
    }
}
