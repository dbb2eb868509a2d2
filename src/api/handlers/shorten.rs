//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;

use crate::api::dto::shorten::{SHORTEN_SUCCESS_MESSAGE, ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a/b",
///   "customShortCode": "my-link!"
/// }
/// ```
///
/// `customShortCode` is optional.
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "message": "URL shortened successfully!",
///   "shortUrl": "https://itsurl.com/my-link!",
///   "shortCode": "my-link!",
///   "originalUrl": "https://example.com/a/b"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed, the URL or alias is invalid, or the alias is taken
/// - 500 if no free code was found or the store failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected shorten body: {}", rejection);
        AppError::bad_request("Invalid request body.")
    })?;

    let mapping = state
        .registrar
        .register(&payload.original_url, payload.custom_alias())
        .await?;

    let short_url = state.short_url(&mapping.code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            message: SHORTEN_SUCCESS_MESSAGE.to_string(),
            short_url,
            short_code: mapping.code,
            original_url: mapping.target_url,
        }),
    ))
}
