//! Handlers for short URL redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **301** with `Location` set to the stored URL
/// - **301** to the fallback landing page if the code is blank
/// - **404** `{ "message": "Short URL not found." }` for unknown codes
/// - **500** `{ "message": "Internal server error." }` if the store failed or
///   the stored URL cannot be sent as a `Location` header
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if code.trim().is_empty() {
        return moved_permanently(&state.fallback_url);
    }

    let target_url = state.resolver.resolve(&code).await?;
    debug!("Redirecting {} to {}", code, target_url);

    moved_permanently(&target_url)
}

/// Sends requests without a code to the landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn fallback_redirect_handler(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    moved_permanently(&state.fallback_url)
}

/// 301 to `location`.
///
/// Stored URLs are opaque and may hold bytes that are not legal in a header
/// (control characters); those fail as a 500 rather than a bare 301.
fn moved_permanently(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location).map_err(|e| {
        error!("Cannot redirect to {:?}: {}", location, e);
        AppError::internal("Internal server error.")
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
