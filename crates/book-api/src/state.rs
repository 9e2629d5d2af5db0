//! # Application State
//!
//! Shared state for the Axum application.
//! Built once in `main` and cloned into every handler; holds the book store,
//! the payment provider and the server configuration.

use book_core::{BoxedBookStore, BoxedPaymentProvider, ServiceError, ServiceResult};
use book_store::{DatabaseConfig, PgBookStore};
use pay_paymongo::{PayMongoClient, PayMongoConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> ServiceResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ServiceResult<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| {
                ServiceError::Configuration(format!("PORT must be a port number, got {:?}", raw))
            })?,
            None => 5000,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ServiceResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServiceError::Configuration(format!("Invalid socket address: {}", e)))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `matched_books` access
    pub store: BoxedBookStore,
    /// Payment-intent provider
    pub payments: BoxedPaymentProvider,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, store: BoxedBookStore, payments: BoxedPaymentProvider) -> Self {
        Self {
            store,
            payments,
            config,
        }
    }

    /// Create AppState from the environment: PostgreSQL store and PayMongo.
    ///
    /// Fails when any required secret is missing or the database is
    /// unreachable.
    pub async fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let database = DatabaseConfig::from_env()?;
        let store = PgBookStore::connect(&database)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

        let paymongo = PayMongoConfig::from_env()?;
        info!(
            "PayMongo key mode: {}",
            if paymongo.is_test_mode() { "test" } else { "live" }
        );
        let payments = PayMongoClient::new(paymongo)
            .map_err(|e| anyhow::anyhow!("Failed to initialize PayMongo: {}", e))?;

        Ok(Self::new(config, Arc::new(store), Arc::new(payments)))
    }
}
