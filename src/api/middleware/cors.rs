//! Cross-origin policy for the create endpoint.

use axum::http::{HeaderName, Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Allows browser clients on any origin to call the create endpoint.
///
/// Preflight `OPTIONS` requests are answered by the layer itself.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-amz-date"),
            header::AUTHORIZATION,
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-amz-security-token"),
        ])
}
