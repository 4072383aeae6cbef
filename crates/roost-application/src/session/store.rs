use roost_core::navigation::{
    AuthenticatedScreen, GateDecision, HydrationStatus, SectionDecision, evaluate_entry,
    guard_section,
};
use roost_core::session::{Session, SessionAction, User, UserPatch};
use std::sync::Arc;
use tokio::sync::watch;

/// Everything subscribers observe: the session plus whether it has been
/// rehydrated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreState {
    pub status: HydrationStatus,
    pub session: Session,
}

/// Owned handle to the process-wide session.
///
/// Clones share the same state. Every mutation runs a `SessionAction` inside a
/// single watch-channel update, so readers never see `user` without the
/// matching `is_authenticated`. Mutators never touch storage; persistence is a
/// subscriber (see `SessionPersister`).
///
/// # Example
///
/// ```ignore
/// let store = SessionStore::new();
/// store.hydrate(rehydrated_session);
/// store.login(User::new("1", "Asha", "9876543210"));
/// assert_eq!(store.entry_decision(), GateDecision::Route(Destination::Home));
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<StoreState>>,
}

impl SessionStore {
    /// Creates a store holding defaults and waiting for rehydration.
    pub fn new() -> Self {
        Self::with_state(StoreState {
            status: HydrationStatus::Hydrating,
            session: Session::default(),
        })
    }

    /// Creates a store that is already hydrated with `session`.
    pub fn ready(session: Session) -> Self {
        Self::with_state(StoreState {
            status: HydrationStatus::Ready,
            session: session.normalized(),
        })
    }

    fn with_state(state: StoreState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    // ============================================================================
    // Reads
    // ============================================================================

    pub fn state(&self) -> StoreState {
        self.tx.borrow().clone()
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().session.clone()
    }

    pub fn status(&self) -> HydrationStatus {
        self.tx.borrow().status
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }

    /// Resolves once rehydration has completed.
    pub async fn wait_until_ready(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx
            .wait_for(|state| state.status == HydrationStatus::Ready)
            .await;
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Entry gate over the current state. `Loading` until hydrated.
    pub fn entry_decision(&self) -> GateDecision {
        let state = self.tx.borrow();
        evaluate_entry(state.status, &state.session)
    }

    /// Authenticated-section gate for `screen`.
    pub fn guard(&self, screen: AuthenticatedScreen) -> SectionDecision {
        guard_section(&self.tx.borrow().session, screen)
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Installs the rehydrated session and marks the store ready.
    pub fn hydrate(&self, session: Session) {
        let session = session.normalized();
        self.tx.send_modify(|state| {
            state.status = HydrationStatus::Ready;
            state.session = session;
        });
        tracing::info!("[SessionStore] Hydrated");
    }

    /// Applies `action` and notifies subscribers, even when the value is
    /// unchanged, so a repeated write can repair storage after a failed one.
    ///
    /// The one exception is `UpdateUser` while logged out, which leaves the
    /// state untouched. Returns whether subscribers were notified.
    pub fn dispatch(&self, action: SessionAction) -> bool {
        let name = action.name();
        let notified = self.tx.send_if_modified(|state| {
            if matches!(action, SessionAction::UpdateUser { .. }) && state.session.user.is_none() {
                return false;
            }
            state.session = action.apply(state.session.clone());
            true
        });
        tracing::debug!("[SessionStore] {} (notified: {})", name, notified);
        notified
    }

    pub fn set_has_seen_onboarding(&self, value: bool) {
        self.dispatch(SessionAction::SetHasSeenOnboarding { value });
    }

    pub fn set_user_location(&self, location: impl Into<String>) {
        self.dispatch(SessionAction::SetUserLocation {
            location: location.into(),
        });
    }

    pub fn set_has_selected_location(&self, value: bool) {
        self.dispatch(SessionAction::SetHasSelectedLocation { value });
    }

    pub fn login(&self, user: User) {
        tracing::info!("[SessionStore] Login user {}", user.id);
        self.dispatch(SessionAction::Login { user });
    }

    pub fn logout(&self) {
        tracing::info!("[SessionStore] Logout");
        self.dispatch(SessionAction::Logout);
    }

    /// Merges `patch` into the current user. No-op when logged out.
    pub fn update_user(&self, patch: UserPatch) {
        self.dispatch(SessionAction::UpdateUser { patch });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_core::navigation::Destination;

    fn user() -> User {
        User::new("1", "X", "555")
    }

    #[test]
    fn test_new_store_is_hydrating_with_defaults() {
        let store = SessionStore::new();
        assert_eq!(store.status(), HydrationStatus::Hydrating);
        assert_eq!(store.snapshot(), Session::default());
        assert_eq!(store.entry_decision(), GateDecision::Loading);
    }

    #[test]
    fn test_hydrate_normalizes_and_routes() {
        let store = SessionStore::new();
        store.hydrate(Session {
            has_seen_onboarding: true,
            is_authenticated: true,
            user: None,
            ..Session::default()
        });

        assert_eq!(store.status(), HydrationStatus::Ready);
        assert!(!store.snapshot().is_authenticated);
        assert_eq!(store.entry_decision(), GateDecision::Route(Destination::Login));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::ready(Session::default());
        let other = store.clone();
        other.login(user());
        assert_eq!(store.snapshot().user, Some(user()));
    }

    #[test]
    fn test_login_and_logout_flow_through_gate() {
        let store = SessionStore::ready(Session::default());
        assert_eq!(store.entry_decision(), GateDecision::Route(Destination::Onboarding));

        store.set_has_seen_onboarding(true);
        assert_eq!(store.entry_decision(), GateDecision::Route(Destination::Login));
        assert_eq!(
            store.guard(AuthenticatedScreen::Profile),
            SectionDecision::Redirect(Destination::Login)
        );

        store.login(user());
        assert_eq!(store.entry_decision(), GateDecision::Route(Destination::Home));
        assert_eq!(
            store.guard(AuthenticatedScreen::Profile),
            SectionDecision::Render(AuthenticatedScreen::Profile)
        );

        store.logout();
        assert_eq!(store.entry_decision(), GateDecision::Route(Destination::Login));
        assert!(store.snapshot().has_seen_onboarding);
    }

    #[test]
    fn test_update_while_logged_out_does_not_notify() {
        let store = SessionStore::ready(Session::default());
        let rx = store.subscribe();

        let notified = store.dispatch(SessionAction::UpdateUser {
            patch: UserPatch {
                email: Some("a@b.com".to_string()),
                ..UserPatch::default()
            },
        });
        assert!(!notified);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn test_repeated_value_still_notifies() {
        let store = SessionStore::ready(Session::default());
        let mut rx = store.subscribe();

        store.set_has_seen_onboarding(false);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.logout();
        assert!(rx.has_changed().unwrap());
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn test_subscribers_never_see_half_a_login() {
        let store = SessionStore::ready(Session::default());
        let mut rx = store.subscribe();

        store.login(user());
        let seen = rx.borrow_and_update().clone();
        assert!(seen.session.is_consistent());
        assert!(seen.session.is_authenticated);

        store.logout();
        let seen = rx.borrow_and_update().clone();
        assert!(seen.session.is_consistent());
        assert!(seen.session.user.is_none());
    }

    #[tokio::test]
    async fn test_wait_until_ready() {
        let store = SessionStore::new();
        let waiter = {
            let store = store.clone();
            tokio::spawn(async move { store.wait_until_ready().await })
        };

        store.hydrate(Session::default());
        waiter.await.unwrap();
        assert_eq!(store.status(), HydrationStatus::Ready);
    }
}
