//! File-backed key-value store.
//!
//! All keys live in one JSON object file. Writes go through a temporary
//! sibling file and an atomic rename so a crash mid-write leaves the previous
//! contents intact.

use async_trait::async_trait;
use roost_core::error::{Result, RoostError};
use roost_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    /// Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file. A missing or blank file is an empty map.
    async fn read_entries(&self) -> Result<Entries> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Like `read_entries`, but a corrupt file is replaced rather than fatal.
    async fn read_entries_for_write(&self) -> Result<Entries> {
        match self.read_entries().await {
            Err(e) if e.is_serialization() => {
                tracing::warn!(
                    "[FileKeyValueStore] Discarding unreadable storage file {:?}: {}",
                    self.path,
                    e
                );
                Ok(Entries::new())
            }
            other => other,
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| RoostError::storage("Storage path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| RoostError::storage("Storage path has no file name"))?;

        tokio::fs::create_dir_all(parent).await?;

        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

        let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
        tmp_file.write_all(json.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_write().await?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_write().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}
