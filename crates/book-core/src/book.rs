//! # Book Types
//!
//! Response shapes for `matched_books` records.
//! Rows are owned by the data store; these types only live for one request.

use crate::pagination::PageRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A full `matched_books` row.
///
/// The store hands rows over as JSON objects so columns this service never
/// inspects pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Book(pub Value);

impl Book {
    /// The row's `id` column, if present
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// The row's `fullybooked_title` column, if present and textual
    pub fn title(&self) -> Option<&str> {
        self.0.get("fullybooked_title").and_then(Value::as_str)
    }
}

impl From<Value> for Book {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Reduced projection returned by title search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: Value,
    pub fullybooked_title: Option<String>,
}

/// Paginated listing envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl BookPage {
    pub fn new(books: Vec<Book>, total: i64, request: PageRequest) -> Self {
        Self {
            books,
            total,
            page: request.page,
            total_pages: request.total_pages(total),
        }
    }
}
