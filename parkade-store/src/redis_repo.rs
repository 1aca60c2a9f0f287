use async_trait::async_trait;
use parkade_core::{KvStore, KvWrite, StoreError};
use redis::AsyncCommands;
use tracing::debug;

fn backend(err: redis::RedisError) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Redis-backed key-value store. Commits run as a MULTI/EXEC pipeline.
#[derive(Clone)]
pub struct RedisKvStore {
    client: redis::Client,
}

impl RedisKvStore {
    pub fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;
        let value: Option<String> = conn.get(key).await.map_err(backend)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;
        conn.set::<_, _, ()>(key, value).await.map_err(backend)
    }

    async fn commit(&self, writes: Vec<KvWrite>) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }

        let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        for write in &writes {
            match write {
                KvWrite::Set { key, value } => {
                    pipe.set(key, value).ignore();
                }
                KvWrite::Delete { key } => {
                    pipe.del(key).ignore();
                }
            }
        }

        let _: () = pipe.query_async(&mut conn).await.map_err(backend)?;
        debug!("Committed {} keys to Redis", writes.len());
        Ok(())
    }
}
