//! Infrastructure layer for external integrations.
//!
//! Implements the store interface defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Memory, PostgreSQL and Redis mapping stores

pub mod persistence;
