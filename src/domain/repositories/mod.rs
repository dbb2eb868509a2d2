//! Store trait definitions for the domain layer.
//!
//! The core consumes the key-value store only through [`MappingStore`].
//! Concrete backends live in `crate::infrastructure::persistence`; a mock is
//! generated via `mockall` for unit tests.

pub mod mapping_store;

pub use mapping_store::{MappingStore, PutOutcome, StoreError};

#[cfg(test)]
pub use mapping_store::MockMappingStore;
