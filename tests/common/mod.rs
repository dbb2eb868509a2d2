#![allow(dead_code)]

use async_trait::async_trait;
use link_registrar::domain::entities::Mapping;
use link_registrar::domain::repositories::{MappingStore, PutOutcome, StoreError};
use link_registrar::infrastructure::persistence::MemoryMappingStore;
use link_registrar::state::AppState;
use std::sync::Arc;

pub const SHORT_URL_BASE: &str = "https://itsurl.com/";
pub const FALLBACK_URL: &str = "https://app.itsurl.com";

/// Store whose every call fails, as if the backend were down.
pub struct FailingStore;

#[async_trait]
impl MappingStore for FailingStore {
    async fn get(&self, _code: &str) -> Result<Option<Mapping>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn put_if_absent(&self, _mapping: Mapping) -> Result<PutOutcome, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_test_state() -> (AppState, Arc<MemoryMappingStore>) {
    let store = Arc::new(MemoryMappingStore::new());
    let state = AppState::new(store.clone(), SHORT_URL_BASE, FALLBACK_URL);
    (state, store)
}

pub fn create_failing_state() -> AppState {
    AppState::new(Arc::new(FailingStore), SHORT_URL_BASE, FALLBACK_URL)
}

pub async fn create_test_mapping(store: &MemoryMappingStore, code: &str, url: &str) {
    let outcome = store.put_if_absent(Mapping::now(code, url)).await.unwrap();
    assert_eq!(outcome, PutOutcome::Created);
}
