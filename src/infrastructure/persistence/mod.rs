//! Mapping store implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::MappingStore`].
//!
//! # Stores
//!
//! - [`MemoryMappingStore`] - Process-local map
//! - [`PgMappingStore`] - PostgreSQL, `INSERT ... ON CONFLICT DO NOTHING`
//! - [`RedisMappingStore`] - Redis, `SET ... NX`
//! - [`TimeoutStore`] - Per-call timeout around any of the above

pub mod memory_mapping_store;
pub mod pg_mapping_store;
pub mod redis_mapping_store;
pub mod timeout_store;

pub use memory_mapping_store::MemoryMappingStore;
pub use pg_mapping_store::PgMappingStore;
pub use redis_mapping_store::RedisMappingStore;
pub use timeout_store::TimeoutStore;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::MappingStore;

/// Connection attempts made at startup before giving up.
const CONNECT_ATTEMPTS: usize = 5;

fn connect_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(10)
        .factor(10)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1)
}

/// Builds the store selected by `config`, wrapped in a [`TimeoutStore`].
///
/// Postgres and Redis connections are retried with exponential backoff.
/// Postgres migrations are applied before the store is returned.
///
/// # Errors
///
/// Returns an error if the backend stays unreachable or migrations fail.
pub async fn connect(config: &Config) -> Result<Arc<dyn MappingStore>> {
    let store: Arc<dyn MappingStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryMappingStore::new()),
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not configured")?;

            let pool = Retry::start(connect_strategy(), move || async move {
                PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                    .connect(database_url)
                    .await
                    .inspect_err(|e| warn!("Database connection failed: {}", e))
            })
            .await
            .context("Failed to connect to database")?;
            info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Arc::new(PgMappingStore::new(Arc::new(pool)))
        }
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is not configured")?;

            let store = Retry::start(connect_strategy(), move || async move {
                RedisMappingStore::connect(redis_url)
                    .await
                    .inspect_err(|e| warn!("{}", e))
            })
            .await
            .context("Failed to connect to Redis")?;

            Arc::new(store)
        }
    };

    Ok(Arc::new(TimeoutStore::new(store, config.store_timeout())))
}
