//! # Book Store Trait
//!
//! Seam between the route handlers and the relational store.
//! `book-store` provides the PostgreSQL implementation; tests plug in
//! in-memory fakes.

use crate::book::{Book, BookSummary};
use crate::error::ServiceResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only access to `matched_books`.
///
/// Every method is a single parameterized query. Implementations must bind
/// caller input as parameters, never splice it into SQL.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Look up one row by identifier.
    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<Book>>;

    /// Live row count.
    async fn count(&self) -> ServiceResult<i64>;

    /// Fetch up to `limit` rows after skipping `offset`, ordered by `id`.
    async fn fetch_page(&self, offset: i64, limit: i64) -> ServiceResult<Vec<Book>>;

    /// Case-insensitive `LIKE` match of `pattern` against the title column.
    ///
    /// `pattern` already carries its wildcards.
    async fn search_titles(&self, pattern: &str, limit: i64) -> ServiceResult<Vec<BookSummary>>;
}

/// Type alias for a shared store (dynamic dispatch)
pub type BoxedBookStore = Arc<dyn BookStore>;
