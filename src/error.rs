//! HTTP error type shared by all handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::application::services::{RegisterError, ResolveError};

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Error returned by handlers, rendered as `{ "message": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Validation { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// User-correctable failures keep their message; systemic ones are logged
/// and replaced with a generic one.
impl From<RegisterError> for AppError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::InvalidUrl
            | RegisterError::InvalidAlias(_)
            | RegisterError::AliasTaken => AppError::bad_request(err.to_string()),
            RegisterError::GenerationExhausted { .. } => {
                error!("{}", err);
                AppError::internal("Failed to generate a unique short code. Please try again later.")
            }
            RegisterError::StoreUnavailable(ref source) => {
                error!("Registration failed: {}", source);
                AppError::internal("Internal Server Error saving to database after retries.")
            }
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound => AppError::not_found(err.to_string()),
            ResolveError::StoreUnavailable(source) => {
                error!("Lookup failed: {}", source);
                AppError::internal("Internal server error.")
            }
        }
    }
}
