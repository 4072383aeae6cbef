use super::store::{SessionStore, StoreState};
use roost_core::navigation::HydrationStatus;
use roost_core::session::SessionRepository;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// Writes the session to its repository whenever the store changes.
///
/// Runs as its own task, subscribed to the store. Changes that arrive while a
/// write is in flight are coalesced; the latest snapshot always wins. Nothing
/// is written while the store is still hydrating, so defaults can never
/// overwrite a stored session that has not been read yet.
pub struct SessionPersister {
    repository: Arc<dyn SessionRepository>,
    rx: watch::Receiver<StoreState>,
}

/// Handle to a running persister.
///
/// Dropping it also stops the task (after a final flush), but nothing waits for
/// that flush. Call `shutdown` before the process exits.
pub struct PersisterHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SessionPersister {
    /// Spawns the persister on the current tokio runtime.
    pub fn spawn(store: &SessionStore, repository: Arc<dyn SessionRepository>) -> PersisterHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let persister = SessionPersister {
            repository,
            rx: store.subscribe(),
        };
        let task = tokio::spawn(persister.run(shutdown_rx));
        PersisterHandle { shutdown_tx, task }
    }

    async fn run(mut self, mut shutdown_rx: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        tracing::debug!("[SessionPersister] Store dropped, stopping");
                        break;
                    }
                    let state = self.rx.borrow_and_update().clone();
                    self.persist(state).await;
                }
                _ = &mut shutdown_rx => {
                    if self.rx.has_changed().unwrap_or(false) {
                        let state = self.rx.borrow_and_update().clone();
                        self.persist(state).await;
                    }
                    tracing::debug!("[SessionPersister] Shut down");
                    break;
                }
            }
        }
    }

    /// Write failures are logged and dropped: memory stays correct, the change
    /// just will not survive a restart.
    async fn persist(&self, state: StoreState) {
        if state.status == HydrationStatus::Hydrating {
            tracing::debug!("[SessionPersister] Skipping write while hydrating");
            return;
        }

        if let Err(e) = self.repository.save(&state.session).await {
            tracing::warn!("[SessionPersister] Failed to persist session: {}", e);
        }
    }
}

impl PersisterHandle {
    /// Flushes any unwritten snapshot and waits for the task to finish.
    pub async fn shutdown(self) {
        // The task may already have stopped on its own; both sides are fine.
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::warn!("[SessionPersister] Task ended abnormally: {}", e);
        }
    }
}
