//! Redis implementation of the mapping store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Value, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};

/// Redis store keeping each mapping as a JSON string under `map:<code>`.
///
/// `SET key value NX` is the atomic create-if-absent. Keys carry no TTL.
pub struct RedisMappingStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisMappingStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis mapping store");

        Ok(Self {
            client: manager,
            key_prefix: "map:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

#[async_trait]
impl MappingStore for RedisMappingStore {
    async fn get(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        let raw: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| StoreError::Operation(format!("Redis GET failed: {}", e)))?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| {
                StoreError::Operation(format!("Corrupt mapping under {}: {}", key, e))
            })
        })
        .transpose()
    }

    async fn put_if_absent(&self, mapping: Mapping) -> Result<PutOutcome, StoreError> {
        let key = self.build_key(&mapping.code);
        let payload = serde_json::to_string(&mapping)
            .map_err(|e| StoreError::Operation(format!("Failed to encode mapping: {}", e)))?;
        let mut conn = self.client.clone();

        let reply: Value = redis::cmd("SET")
            .arg(&key)
            .arg(payload)
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Operation(format!("Redis SET NX failed: {}", e)))?;

        // Nil means the key already existed.
        if matches!(reply, Value::Nil) {
            debug!("Redis SET NX rejected for {}", key);
            Ok(PutOutcome::ConditionFailed)
        } else {
            Ok(PutOutcome::Created)
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
