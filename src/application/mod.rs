//! Application layer services implementing the create and read paths.
//!
//! Services consume the [`crate::domain::repositories::MappingStore`] trait and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::registrar::Registrar`] - Code assignment with bounded retry
//! - [`services::resolver::Resolver`] - Code to target URL lookup

pub mod services;
