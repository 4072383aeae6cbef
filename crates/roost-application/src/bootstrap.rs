//! Composition root for the client session.
//!
//! Process start: rehydrate the session from storage, install it in a fresh
//! store, then start persisting changes. The navigation gate reports `Loading`
//! until the first step finishes.

use crate::session::{PersisterHandle, SessionPersister, SessionStore};
use roost_core::error::Result;
use roost_core::session::{Session, SessionRepository};
use roost_core::storage::KeyValueStore;
use roost_infrastructure::{
    FileKeyValueStore, KeyValueSessionRepository, MemoryKeyValueStore, RoostPaths,
};
use std::sync::Arc;

pub struct ClientBootstrap {
    pub store: SessionStore,
    pub persister: PersisterHandle,
}

impl ClientBootstrap {
    /// Flushes pending writes. Call before the process exits.
    pub async fn shutdown(self) {
        self.persister.shutdown().await;
    }
}

/// Reads the persisted session. Never fails: a missing, unreadable or
/// malformed snapshot yields the defaults.
pub async fn rehydrate(repository: &dyn SessionRepository) -> Session {
    match repository.load().await {
        Ok(Some(session)) => {
            if !session.is_consistent() {
                tracing::warn!(
                    "[Bootstrap] Stored session had isAuthenticated={} with user present={}, repairing",
                    session.is_authenticated,
                    session.user.is_some()
                );
            }
            tracing::info!("[Bootstrap] Restored session from storage");
            session.normalized()
        }
        Ok(None) => {
            tracing::info!("[Bootstrap] No stored session, starting fresh");
            Session::default()
        }
        Err(e) => {
            tracing::warn!(
                "[Bootstrap] Failed to restore session, starting fresh: {}",
                e
            );
            Session::default()
        }
    }
}

/// Builds a hydrated store with a running persister.
///
/// The persister subscribes after hydration, so restoring a session does not
/// immediately write it back.
pub async fn bootstrap(repository: Arc<dyn SessionRepository>) -> ClientBootstrap {
    let store = SessionStore::new();
    let session = rehydrate(repository.as_ref()).await;
    store.hydrate(session);

    let persister = SessionPersister::spawn(&store, repository);
    ClientBootstrap { store, persister }
}

/// Bootstraps against the on-disk key-value store under the Roost data dir.
pub async fn open_file_backed(paths: &RoostPaths) -> Result<ClientBootstrap> {
    let storage_file = paths.storage_file()?;
    tracing::debug!("[Bootstrap] Using storage file {:?}", storage_file);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(storage_file));
    let repository: Arc<dyn SessionRepository> = Arc::new(KeyValueSessionRepository::new(store));
    Ok(bootstrap(repository).await)
}

/// Bootstraps against an in-memory store. Nothing outlives the process.
pub async fn open_ephemeral() -> ClientBootstrap {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    bootstrap(Arc::new(KeyValueSessionRepository::new(store))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_core::navigation::{Destination, GateDecision};
    use roost_core::session::{SESSION_STORAGE_KEY, User};

    fn repository(store: MemoryKeyValueStore) -> Arc<dyn SessionRepository> {
        Arc::new(KeyValueSessionRepository::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_rehydrate_absent_gives_defaults() {
        let repo = repository(MemoryKeyValueStore::new());
        assert_eq!(rehydrate(repo.as_ref()).await, Session::default());
    }

    #[tokio::test]
    async fn test_rehydrate_malformed_gives_defaults() {
        let repo = repository(MemoryKeyValueStore::with_entry(
            SESSION_STORAGE_KEY,
            "not json at all",
        ));
        assert_eq!(rehydrate(repo.as_ref()).await, Session::default());
    }

    #[tokio::test]
    async fn test_rehydrate_repairs_inconsistent_snapshot() {
        let raw = r#"{"version":"1.1.0","hasSeenOnboarding":true,"isAuthenticated":true,"user":null,"userLocation":"Nagpur, Maharashtra","hasSelectedLocation":false}"#;
        let repo = repository(MemoryKeyValueStore::with_entry(SESSION_STORAGE_KEY, raw));

        let session = rehydrate(repo.as_ref()).await;
        assert!(session.has_seen_onboarding);
        assert!(!session.is_authenticated);
    }

    #[tokio::test]
    async fn test_bootstrap_routes_restored_user_home() {
        let repo = repository(MemoryKeyValueStore::new());
        repo.save(&Session {
            has_seen_onboarding: true,
            is_authenticated: true,
            user: Some(User::new("1", "X", "555")),
            ..Session::default()
        })
        .await
        .unwrap();

        let app = bootstrap(repo).await;
        assert_eq!(
            app.store.entry_decision(),
            GateDecision::Route(Destination::Home)
        );
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_ephemeral_starts_at_onboarding() {
        let app = open_ephemeral().await;
        assert_eq!(
            app.store.entry_decision(),
            GateDecision::Route(Destination::Onboarding)
        );
        app.shutdown().await;
    }
}
