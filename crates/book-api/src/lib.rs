//! # book-api
//!
//! HTTP API layer for the FullyBooked backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Book lookup, listing and title search over PostgreSQL
//! - Payment-intent passthrough to PayMongo
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/matched-books` | Lookup by `id` or paginated listing |
//! | GET | `/api/search-books` | Title search |
//! | POST | `/api/create-payment` | Create payment intent |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
