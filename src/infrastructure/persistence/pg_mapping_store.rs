//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};

/// PostgreSQL store for mappings.
///
/// The primary key on `mappings.code` makes `INSERT ... ON CONFLICT DO
/// NOTHING` the atomic create-if-absent.
pub struct PgMappingStore {
    pool: Arc<PgPool>,
}

#[derive(sqlx::FromRow)]
struct MappingRow {
    code: String,
    target_url: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping::new(row.code, row.target_url, row.created_at)
    }
}

impl PgMappingStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Connection(e.to_string())
        }
        other => StoreError::Operation(other.to_string()),
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn get(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT code, target_url, created_at
            FROM mappings
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Mapping::from))
    }

    async fn put_if_absent(&self, mapping: Mapping) -> Result<PutOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO mappings (code, target_url, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(&mapping.code)
        .bind(&mapping.target_url)
        .bind(mapping.created_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            Ok(PutOutcome::ConditionFailed)
        } else {
            Ok(PutOutcome::Created)
        }
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
