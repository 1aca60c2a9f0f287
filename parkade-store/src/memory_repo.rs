use async_trait::async_trait;
use parkade_core::{KvStore, KvWrite, StoreError};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local key-value store, used for development and tests
#[derive(Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn commit(&self, writes: Vec<KvWrite>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        for write in writes {
            match write {
                KvWrite::Set { key, value } => {
                    entries.insert(key, value);
                }
                KvWrite::Delete { key } => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}
