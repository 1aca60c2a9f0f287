use async_trait::async_trait;

/// A single staged write against the key-value store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvWrite {
    Set { key: String, value: String },
    Delete { key: String },
}

impl KvWrite {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        KvWrite::Set { key: key.into(), value: value.into() }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        KvWrite::Delete { key: key.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored value under '{key}' is corrupt: {reason}")]
    Corrupt {
        key: String,
        reason: String,
    },

    #[error("Failed to encode value for '{key}': {reason}")]
    Encode {
        key: String,
        reason: String,
    },
}

/// Persisted string key-value surface.
///
/// Values are JSON documents or bare scalars. `commit` applies every write
/// or none of them.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn commit(&self, writes: Vec<KvWrite>) -> Result<(), StoreError>;
}
