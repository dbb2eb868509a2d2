//! Business logic services for the application layer.

pub mod registrar;
pub mod resolver;

pub use registrar::{MAX_RETRIES, RegisterError, Registrar};
pub use resolver::{ResolveError, Resolver};
