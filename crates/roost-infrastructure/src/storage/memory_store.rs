use async_trait::async_trait;
use roost_core::error::Result;
use roost_core::storage::KeyValueStore;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory key-value store.
///
/// Nothing survives the process. Used by tests, and by the CLI when no data
/// directory can be resolved.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "1".to_string()).await.unwrap();
        store.set("k", "2".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("2".to_string()));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
