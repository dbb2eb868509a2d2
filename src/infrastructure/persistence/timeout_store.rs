//! Per-call timeout decorator for mapping stores.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};

/// Wraps a store so that no single call blocks longer than `limit`.
///
/// An elapsed call yields [`StoreError::Timeout`]. A timed-out
/// `put_if_absent` may still have committed on the backend.
pub struct TimeoutStore {
    inner: Arc<dyn MappingStore>,
    limit: Duration,
}

impl TimeoutStore {
    pub fn new(inner: Arc<dyn MappingStore>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl MappingStore for TimeoutStore {
    async fn get(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        timeout(self.limit, self.inner.get(code))
            .await
            .map_err(|_| StoreError::Timeout(self.limit))?
    }

    async fn put_if_absent(&self, mapping: Mapping) -> Result<PutOutcome, StoreError> {
        timeout(self.limit, self.inner.put_if_absent(mapping))
            .await
            .map_err(|_| StoreError::Timeout(self.limit))?
    }

    async fn health_check(&self) -> bool {
        timeout(self.limit, self.inner.health_check())
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::MemoryMappingStore;

    /// Store whose every call hangs for `delay`.
    struct SlowStore {
        delay: Duration,
    }

    #[async_trait]
    impl MappingStore for SlowStore {
        async fn get(&self, _code: &str) -> Result<Option<Mapping>, StoreError> {
            tokio::time::sleep(self.delay).await;
            Ok(None)
        }

        async fn put_if_absent(&self, _mapping: Mapping) -> Result<PutOutcome, StoreError> {
            tokio::time::sleep(self.delay).await;
            Ok(PutOutcome::Created)
        }

        async fn health_check(&self) -> bool {
            tokio::time::sleep(self.delay).await;
            true
        }
    }

    fn slow(limit_ms: u64) -> TimeoutStore {
        TimeoutStore::new(
            Arc::new(SlowStore {
                delay: Duration::from_secs(5),
            }),
            Duration::from_millis(limit_ms),
        )
    }

    #[tokio::test]
    async fn test_get_times_out() {
        let err = slow(20).get("abc").await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_put_times_out() {
        let err = slow(20)
            .put_if_absent(Mapping::now("abc", "https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_health_check_times_out_as_unhealthy() {
        assert!(!slow(20).health_check().await);
    }

    #[tokio::test]
    async fn test_fast_calls_pass_through() {
        let store = TimeoutStore::new(
            Arc::new(MemoryMappingStore::new()),
            Duration::from_secs(1),
        );

        let outcome = store
            .put_if_absent(Mapping::now("abc", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(outcome, PutOutcome::Created);

        let found = store.get("abc").await.unwrap().unwrap();
        assert_eq!(found.target_url, "https://example.com");
        assert!(store.health_check().await);
    }
}
