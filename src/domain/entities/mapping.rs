//! Mapping entity representing a registered short code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short code bound to its target URL.
///
/// Mappings are created exactly once through a conditional write and never
/// mutated afterwards. `target_url` is stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            target_url,
            created_at,
        }
    }

    /// Creates a mapping stamped with the current time.
    pub fn now(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self::new(code.into(), target_url.into(), Utc::now())
    }
}
