//! # book-core
//!
//! Core types and traits for the FullyBooked API.
//!
//! This crate provides:
//! - `BookStore` trait for the relational store holding `matched_books`
//! - `PaymentProvider` trait for third-party payment-intent APIs
//! - `Book`, `BookSummary` and `BookPage` response shapes
//! - `PageRequest` pagination arithmetic
//! - `ServiceError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use book_core::{catalog, PageRequest};
//!
//! // Parse lenient query parameters
//! let request = PageRequest::from_query(Some("2"), Some("5"));
//!
//! // Count + fetch against any store implementation
//! let page = catalog::list_books(&store, request).await?;
//! assert!(page.books.len() <= 5);
//! ```

pub mod book;
pub mod catalog;
pub mod error;
pub mod pagination;
pub mod payment;
pub mod store;

// Re-exports for convenience
pub use book::{Book, BookPage, BookSummary};
pub use error::{ServiceError, ServiceResult};
pub use pagination::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use payment::{
    BoxedPaymentProvider, Currency, PaymentIntentRequest, PaymentMethod, PaymentProvider,
};
pub use store::{BookStore, BoxedBookStore};
