//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/roost/config.toml`.

use crate::paths::RoostPaths;
use roost_core::config::ClientConfig;
use roost_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from the platform config location.
    pub fn new(paths: &RoostPaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields defaults; a file that does not parse is an error.
    pub async fn get_config(&self) -> Result<ClientConfig> {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let loaded = self.load_config().await?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn cached(&self) -> Option<ClientConfig> {
        self.config.read().ok().and_then(|lock| lock.clone())
    }

    async fn load_config(&self) -> Result<ClientConfig> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "[ConfigService] No config at {:?}, using defaults",
                    self.path
                );
                return Ok(ClientConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            roost_core::RoostError::config(format!("Invalid config {:?}: {}", self.path, e))
        })?;
        Ok(config)
    }
}
