//! # book-store
//!
//! PostgreSQL implementation of [`book_core::BookStore`] for the
//! `matched_books` table.
//!
//! Rows leave the database as JSON (`row_to_json`) so the API can return
//! every column without a compile-time schema.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use book_store::{DatabaseConfig, PgBookStore};
//!
//! let config = DatabaseConfig::from_env()?;
//! let store = PgBookStore::connect(&config).await?;
//!
//! let total = store.count().await?;
//! ```

pub mod config;
pub mod pg;

// Re-exports
pub use config::DatabaseConfig;
pub use pg::PgBookStore;
