//! # Request Handlers
//!
//! Axum request handlers for the book and payment API.
//! Each handler either fully succeeds or answers with `{"error": ...}`.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use book_core::{catalog, error::PAYMENT_FAILED, PageRequest, PaymentIntentRequest, ServiceError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

/// Header callers may set to make payment creation retry-safe
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Raw query string pairs, in request order.
///
/// Extracted as pairs rather than a struct so a repeated key is not a
/// deserialization error; the first occurrence wins.
pub type QueryPairs = Vec<(String, String)>;

fn first_value(pairs: &QueryPairs, key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// `/api/matched-books` query string
#[derive(Debug, Default)]
pub struct MatchedBooksQuery {
    /// Single-record lookup when present and non-empty
    pub id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl MatchedBooksQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            id: first_value(pairs, "id"),
            page: first_value(pairs, "page"),
            limit: first_value(pairs, "limit"),
        }
    }
}

/// `/api/search-books` query string
#[derive(Debug, Default)]
pub struct SearchBooksQuery {
    pub q: Option<String>,
}

impl SearchBooksQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            q: first_value(pairs, "q"),
        }
    }
}

/// Create payment request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Major-unit amount. Left untyped: it is forwarded without validation.
    #[serde(default)]
    pub amount: Value,
}

impl CreatePaymentRequest {
    /// Read `amount` from a raw body.
    ///
    /// Bodies that are not a JSON object yield a `null` amount instead of a
    /// rejection, so the provider decides.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or(Self {
            amount: Value::Null,
        })
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn service_error_to_response(err: ServiceError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.public_message())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "fullybooked",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Look up one book by `id`, or list a page of books.
///
/// A found book comes back as a one-element array.
#[instrument(skip(state))]
pub async fn matched_books(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Response, ApiError> {
    let query = MatchedBooksQuery::from_pairs(&pairs);
    let result = match query.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => catalog::find_book(state.store.as_ref(), id)
            .await
            .map(|book| Json(vec![book]).into_response()),
        None => {
            let request = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());
            catalog::list_books(state.store.as_ref(), request)
                .await
                .map(|page| Json(page).into_response())
        }
    };

    result.map_err(|e| {
        if e.is_downstream() {
            error!("Error fetching matched_books: {}", e);
        }
        service_error_to_response(e)
    })
}

/// Case-insensitive title search, at most 10 `{id, fullybooked_title}` rows.
#[instrument(skip(state))]
pub async fn search_books(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Response, ApiError> {
    let query = SearchBooksQuery::from_pairs(&pairs);
    catalog::search_books(state.store.as_ref(), query.q.as_deref())
        .await
        .map(|rows| Json(rows).into_response())
        .map_err(|e| {
            if e.is_downstream() {
                error!("Search error: {}", e);
            }
            service_error_to_response(e)
        })
}

/// Create a payment intent and relay the provider's body.
#[instrument(skip(state, headers, body))]
pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request = CreatePaymentRequest::from_body(&body);
    let intent = PaymentIntentRequest::from_amount(&request.amount);
    let idempotency_key = idempotency_key(&headers);

    info!(
        "Creating payment intent: provider={}, amount={}, key={}",
        state.payments.provider_name(),
        intent.amount,
        idempotency_key
    );

    state
        .payments
        .create_payment_intent(&intent, &idempotency_key)
        .await
        .map(Json)
        .map_err(|e| {
            error!("{} error: {}", state.payments.provider_name(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(PAYMENT_FAILED)),
            )
        })
}

/// Caller-supplied idempotency key, or a fresh one per request
fn idempotency_key(headers: &HeaderMap) -> String {
    headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Book not found");
        assert_eq!(err.error, "Book not found");
    }

    #[test]
    fn test_service_error_conversion() {
        let (status, Json(body)) =
            service_error_to_response(ServiceError::NotFound("Book not found".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Book not found");

        let (status, Json(body)) =
            service_error_to_response(ServiceError::Database("connection refused".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal Server Error");
    }

    #[test]
    fn test_repeated_query_key_takes_first() {
        let pairs: QueryPairs = vec![
            ("page".to_string(), "1".to_string()),
            ("page".to_string(), "2".to_string()),
            ("limit".to_string(), "5".to_string()),
        ];
        let query = MatchedBooksQuery::from_pairs(&pairs);
        assert_eq!(query.page.as_deref(), Some("1"));
        assert_eq!(query.limit.as_deref(), Some("5"));
        assert!(query.id.is_none());
    }

    #[test]
    fn test_payment_body_fallbacks() {
        use serde_json::json;

        assert_eq!(CreatePaymentRequest::from_body(br#"{"amount": 100}"#).amount, json!(100));
        assert_eq!(CreatePaymentRequest::from_body(br#"{}"#).amount, Value::Null);
        assert_eq!(CreatePaymentRequest::from_body(b"100").amount, Value::Null);
        assert_eq!(CreatePaymentRequest::from_body(b"amount=100").amount, Value::Null);
        assert_eq!(CreatePaymentRequest::from_body(b"").amount, Value::Null);
    }

    #[test]
    fn test_idempotency_key_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(IDEMPOTENCY_KEY_HEADER, HeaderValue::from_static("order-42"));
        assert_eq!(idempotency_key(&headers), "order-42");
    }

    #[test]
    fn test_idempotency_key_generated() {
        let headers = HeaderMap::new();
        let first = idempotency_key(&headers);
        let second = idempotency_key(&headers);

        assert!(uuid::Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second);
    }
}
