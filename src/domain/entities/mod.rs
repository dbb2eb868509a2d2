//! Core domain entities.
//!
//! The service has a single persistent entity, [`Mapping`], binding a short
//! code to the URL it redirects to.

pub mod mapping;

pub use mapping::Mapping;
