//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{Registrar, Resolver};
use crate::domain::repositories::MappingStore;

/// Services and settings shared by all handlers.
///
/// Built once at startup around an explicitly constructed store; there is
/// no process-wide store client.
#[derive(Clone)]
pub struct AppState {
    pub registrar: Arc<Registrar>,
    pub resolver: Arc<Resolver>,
    pub store: Arc<dyn MappingStore>,
    pub short_url_base: String,
    pub fallback_url: String,
}

impl AppState {
    /// Creates state with a registrar and resolver over `store`.
    pub fn new(
        store: Arc<dyn MappingStore>,
        short_url_base: impl Into<String>,
        fallback_url: impl Into<String>,
    ) -> Self {
        Self::with_registrar(
            Arc::new(Registrar::new(store.clone())),
            store,
            short_url_base,
            fallback_url,
        )
    }

    /// Creates state around a preconfigured registrar.
    pub fn with_registrar(
        registrar: Arc<Registrar>,
        store: Arc<dyn MappingStore>,
        short_url_base: impl Into<String>,
        fallback_url: impl Into<String>,
    ) -> Self {
        Self {
            registrar,
            resolver: Arc::new(Resolver::new(store.clone())),
            store,
            short_url_base: short_url_base.into(),
            fallback_url: fallback_url.into(),
        }
    }

    /// Full short URL for `code`.
    ///
    /// Characters that would end the path (`?`, `#`) and `%` itself are
    /// percent-encoded so the link routes back to the same code.
    pub fn short_url(&self, code: &str) -> String {
        let mut url = String::with_capacity(self.short_url_base.len() + code.len() + 1);
        url.push_str(self.short_url_base.trim_end_matches('/'));
        url.push('/');
        for c in code.chars() {
            match c {
                '%' => url.push_str("%25"),
                '?' => url.push_str("%3F"),
                '#' => url.push_str("%23"),
                _ => url.push(c),
            }
        }
        url
    }
}
