//! # Catalog Operations
//!
//! The decisions behind `/api/matched-books` and `/api/search-books`,
//! written against [`BookStore`] so they run the same on PostgreSQL and
//! in tests.

use crate::book::{Book, BookPage, BookSummary};
use crate::error::{ServiceError, ServiceResult};
use crate::pagination::PageRequest;
use crate::store::BookStore;
use tracing::debug;

/// Maximum rows returned by a title search
pub const SEARCH_LIMIT: i64 = 10;

/// Single-record lookup. Absent rows are a `NotFound`, not an empty list.
pub async fn find_book(store: &dyn BookStore, id: &str) -> ServiceResult<Book> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Book not found".to_string()))
}

/// Count, then fetch one page.
///
/// The two queries are not a snapshot; concurrent writes between them can
/// make `total_pages` disagree with the rows returned.
pub async fn list_books(store: &dyn BookStore, request: PageRequest) -> ServiceResult<BookPage> {
    let total = store.count().await?;
    let books = store.fetch_page(request.offset(), request.limit).await?;

    debug!(
        "Listed {} of {} books (page={}, limit={})",
        books.len(),
        total,
        request.page,
        request.limit
    );

    Ok(BookPage::new(books, total, request))
}

/// Title search. Rejects a missing or empty query before touching the store.
pub async fn search_books(
    store: &dyn BookStore,
    query: Option<&str>,
) -> ServiceResult<Vec<BookSummary>> {
    let query = query.filter(|q| !q.is_empty()).ok_or_else(|| {
        ServiceError::InvalidRequest("Query parameter q is required".to_string())
    })?;

    store.search_titles(&contains_pattern(query), SEARCH_LIMIT).await
}

/// Wraps `query` in `%` wildcards.
pub fn contains_pattern(query: &str) -> String {
    format!("%{}%", query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStore {
        rows: Vec<Book>,
        calls: AtomicUsize,
    }

    impl FixedStore {
        fn with_rows(n: i64) -> Self {
            let rows = (1..=n)
                .map(|id| Book(json!({"id": id, "fullybooked_title": format!("Book {}", id)})))
                .collect();
            Self {
                rows,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BookStore for FixedStore {
        async fn find_by_id(&self, id: &str) -> ServiceResult<Option<Book>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .rows
                .iter()
                .find(|b| b.id().map(|v| v.to_string()) == Some(id.to_string()))
                .cloned())
        }

        async fn count(&self) -> ServiceResult<i64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.len() as i64)
        }

        async fn fetch_page(&self, offset: i64, limit: i64) -> ServiceResult<Vec<Book>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .rows
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn search_titles(
            &self,
            _pattern: &str,
            _limit: i64,
        ) -> ServiceResult<Vec<BookSummary>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_find_book_missing_is_not_found() {
        let store = FixedStore::with_rows(3);
        let err = find_book(&store, "999").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.public_message(), "Book not found");

        let book = find_book(&store, "2").await.unwrap();
        assert_eq!(book.id(), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_list_books_second_page() {
        let store = FixedStore::with_rows(12);
        let page = list_books(&store, PageRequest { page: 2, limit: 5 })
            .await
            .unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.books.len(), 5);
        assert_eq!(page.books[0].id(), Some(&json!(6)));
    }

    #[tokio::test]
    async fn test_list_books_last_partial_page() {
        let store = FixedStore::with_rows(12);
        let page = list_books(&store, PageRequest { page: 3, limit: 5 })
            .await
            .unwrap();
        assert_eq!(page.books.len(), 2);
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query_without_store_call() {
        let store = FixedStore::with_rows(3);

        for query in [None, Some("")] {
            let err = search_books(&store, query).await.unwrap_err();
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.public_message(), "Query parameter q is required");
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("harry"), "%harry%");
    }
}
