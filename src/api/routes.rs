//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::api::middleware::cors;
use crate::state::AppState;
use axum::{Router, routing::post};

/// API routes, open to cross-origin callers.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .layer(cors::layer())
}
