//! # PostgreSQL Book Store
//!
//! `matched_books` queries over a shared `sqlx` pool.

use crate::config::DatabaseConfig;
use async_trait::async_trait;
use book_core::{Book, BookStore, BookSummary, ServiceError, ServiceResult};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::time::Duration;
use tracing::{debug, info, instrument};

const FIND_BY_ID_SQL: &str =
    "SELECT row_to_json(b) FROM matched_books b WHERE b.id::text = $1 LIMIT 1";

const COUNT_SQL: &str = "SELECT COUNT(*) FROM matched_books";

const FETCH_PAGE_SQL: &str = "SELECT row_to_json(b) FROM \
     (SELECT * FROM matched_books ORDER BY id OFFSET $1 LIMIT $2) b";

const SEARCH_TITLES_SQL: &str = "SELECT json_build_object('id', id, 'fullybooked_title', fullybooked_title) \
     FROM matched_books WHERE fullybooked_title ILIKE $1 ORDER BY id LIMIT $2";

/// Book store backed by a PostgreSQL connection pool
///
/// Each method borrows a pooled connection for one statement. No
/// transactions are opened.
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool and verify one connection
    pub async fn connect(config: &DatabaseConfig) -> ServiceResult<Self> {
        let pool = Self::pool_options(config)
            .connect_with(config.connect_options()?)
            .await
            .map_err(database_error)?;

        info!(
            "Connected to {} (tls={}, max_connections={})",
            config.redacted_url(),
            config.require_tls,
            config.max_connections
        );

        Ok(Self::new(pool))
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
    }

    /// Get the underlying pool reference.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<Book>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(FIND_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(|Json(value)| Book(value)))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ServiceResult<i64> {
        sqlx::query_scalar::<_, i64>(COUNT_SQL)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    #[instrument(skip(self))]
    async fn fetch_page(&self, offset: i64, limit: i64) -> ServiceResult<Vec<Book>> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(FETCH_PAGE_SQL)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        debug!("Fetched {} rows", rows.len());

        Ok(rows.into_iter().map(|Json(value)| Book(value)).collect())
    }

    #[instrument(skip(self))]
    async fn search_titles(&self, pattern: &str, limit: i64) -> ServiceResult<Vec<BookSummary>> {
        let rows = sqlx::query_scalar::<_, Json<BookSummary>>(SEARCH_TITLES_SQL)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(|Json(summary)| summary).collect())
    }
}

fn database_error(err: sqlx::Error) -> ServiceError {
    ServiceError::Database(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_bind_parameters() {
        assert!(FIND_BY_ID_SQL.contains("$1"));
        assert!(FETCH_PAGE_SQL.contains("OFFSET $1 LIMIT $2"));
        assert!(SEARCH_TITLES_SQL.contains("ILIKE $1"));
        assert!(SEARCH_TITLES_SQL.contains("LIMIT $2"));
    }

    #[test]
    fn test_listing_is_ordered() {
        assert!(FETCH_PAGE_SQL.contains("ORDER BY id"));
        assert!(SEARCH_TITLES_SQL.contains("ORDER BY id"));
    }

    #[tokio::test]
    async fn test_unreachable_database_is_database_error() {
        let config = DatabaseConfig::new("postgres://reader:pw@127.0.0.1:1/books");
        let store = PgBookStore::new(
            PgPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_millis(500))
                .connect_lazy_with(config.connect_options().unwrap()),
        );

        let err = store.count().await.unwrap_err();
        assert!(matches!(err, ServiceError::Database(_)));
        assert_eq!(err.public_message(), "Internal Server Error");
    }
}
