//! Key-value storage trait.

use async_trait::async_trait;

use crate::error::Result;

/// Device-local, string-valued key-value storage.
///
/// No transactional guarantees: concurrent writers to the same key are
/// last-write-wins. Callers that can degrade (session persistence) log and
/// swallow errors instead of propagating them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Deletes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
