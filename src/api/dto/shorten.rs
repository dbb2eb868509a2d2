//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Confirmation message returned with every created link.
pub const SHORTEN_SUCCESS_MESSAGE: &str = "URL shortened successfully!";

/// Request to shorten a URL.
///
/// A missing `originalUrl` deserializes to an empty string and is rejected
/// by the registrar as an invalid URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    pub original_url: String,

    /// Optional custom alias; an empty string means none.
    #[serde(default)]
    pub custom_short_code: Option<String>,
}

impl ShortenRequest {
    /// The requested alias, treating `""` as absent.
    pub fn custom_alias(&self) -> Option<&str> {
        self.custom_short_code
            .as_deref()
            .filter(|alias| !alias.is_empty())
    }
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub message: String,
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}
