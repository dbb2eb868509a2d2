//! Process-local mapping store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};

/// In-memory store for development and tests.
///
/// The write lock makes `put_if_absent` atomic within one process only;
/// mappings are lost on restart.
#[derive(Default)]
pub struct MemoryMappingStore {
    mappings: RwLock<HashMap<String, Mapping>>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self::default()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.mappings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.mappings.read().await.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn get(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        Ok(self.mappings.read().await.get(code).cloned())
    }

    async fn put_if_absent(&self, mapping: Mapping) -> Result<PutOutcome, StoreError> {
        let mut mappings = self.mappings.write().await;

        match mappings.entry(mapping.code.clone()) {
            Entry::Occupied(_) => Ok(PutOutcome::ConditionFailed),
            Entry::Vacant(slot) => {
                slot.insert(mapping);
                Ok(PutOutcome::Created)
            }
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
