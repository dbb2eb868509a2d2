//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`             - Redirect to the fallback landing page
//! - `GET  /{code}`       - Short link redirect
//! - `GET  /health`       - Health check
//! - `POST /api/shorten`  - Create a short link (CORS enabled)
//! - `POST /shorten`      - Same, without the `/api` prefix
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin may call the create endpoint
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_redirect_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(fallback_redirect_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .merge(api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// [`router`] with trailing slashes trimmed before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
