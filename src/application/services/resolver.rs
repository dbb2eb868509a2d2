//! Short code lookup service.

use std::sync::Arc;

use tracing::debug;

use crate::domain::repositories::{MappingStore, StoreError};

/// Reasons a code cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Short URL not found.")]
    NotFound,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Service resolving short codes to their target URLs.
///
/// Performs a single point lookup per call: no retries, no writes.
pub struct Resolver {
    store: Arc<dyn MappingStore>,
}

impl Resolver {
    /// Creates a new resolver.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    /// Returns the target URL registered for `code`, unchanged.
    ///
    /// Lookups are not restricted to the creation alphabet: an empty code or
    /// one that could never have been registered simply resolves to
    /// [`ResolveError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if no mapping exists.
    /// Returns [`ResolveError::StoreUnavailable`] if the lookup failed.
    pub async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        if code.is_empty() {
            return Err(ResolveError::NotFound);
        }

        match self.store.get(code).await {
            Ok(Some(mapping)) => Ok(mapping.target_url),
            Ok(None) => {
                debug!("Short code '{}' not found", code);
                Err(ResolveError::NotFound)
            }
            Err(e) => Err(ResolveError::StoreUnavailable(e)),
        }
    }
}
