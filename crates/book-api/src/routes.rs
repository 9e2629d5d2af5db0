//! # Routes
//!
//! Axum router configuration for the book and payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /api/matched-books - Lookup by `id`, or paginated listing
/// - GET  /api/search-books - Title search (`q` required)
/// - POST /api/create-payment - Create a PayMongo payment intent
/// - GET  /health, / - Health check
pub fn create_router(state: AppState) -> Router {
    // Open to any origin; no route is authenticated
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/matched-books", get(handlers::matched_books))
        .route("/search-books", get(handlers::search_books))
        .route("/create-payment", post(handlers::create_payment));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}
