//! Session repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::Session;

/// Reads and writes the persisted session snapshot.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the stored snapshot. `Ok(None)` when nothing was ever saved.
    async fn load(&self) -> Result<Option<Session>>;

    /// Saves a full snapshot, replacing the previous one.
    async fn save(&self, session: &Session) -> Result<()>;
}
