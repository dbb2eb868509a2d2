//! Domain layer containing the mapping entity and the store contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store trait consumed by the application services
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers.

pub mod entities;
pub mod repositories;
