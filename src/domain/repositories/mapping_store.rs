//! Store trait for the shared mapping key space.

use crate::domain::entities::Mapping;
use async_trait::async_trait;
use std::time::Duration;

/// Failures of the backing store itself.
///
/// A lost create-if-absent race is not an error; it is reported as
/// [`PutOutcome::ConditionFailed`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Result of a conditional create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The key was absent and the mapping is now durable.
    Created,
    /// The key already existed; nothing was written.
    ConditionFailed,
}

/// Narrow interface to the durable key-value store holding mappings.
///
/// Uniqueness of codes is enforced solely by [`MappingStore::put_if_absent`].
/// Implementations must make that call atomic across processes; callers hold
/// no locks of their own.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryMappingStore`] - process-local map
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::RedisMappingStore`] - Redis `SET NX`
/// - [`crate::infrastructure::persistence::TimeoutStore`] - per-call timeout decorator
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Point lookup by code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be reached or answers
    /// with something that is not a mapping.
    async fn get(&self, code: &str) -> Result<Option<Mapping>, StoreError>;

    /// Writes `mapping` only if no mapping with the same code exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O failure. Whether the write committed is
    /// then unknown to the caller.
    async fn put_if_absent(&self, mapping: Mapping) -> Result<PutOutcome, StoreError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
