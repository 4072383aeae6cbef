use roost_application::{bootstrap, open_file_backed};
use roost_core::navigation::{AuthenticatedScreen, Destination, GateDecision, SectionDecision};
use roost_core::session::{SESSION_STORAGE_KEY, Session, SessionRepository, User, UserPatch};
use roost_core::storage::KeyValueStore;
use roost_infrastructure::{FileKeyValueStore, KeyValueSessionRepository, RoostPaths};
use std::sync::Arc;
use tempfile::TempDir;

fn paths_in(dir: &TempDir) -> RoostPaths {
    RoostPaths::new(Some(dir.path().to_path_buf()))
}

#[tokio::test]
async fn test_fresh_install_routes_to_onboarding() {
    let dir = TempDir::new().unwrap();
    let app = open_file_backed(&paths_in(&dir)).await.unwrap();

    assert_eq!(app.store.snapshot(), Session::default());
    assert_eq!(
        app.store.entry_decision(),
        GateDecision::Route(Destination::Onboarding)
    );
    app.shutdown().await;

    // No mutation, so nothing was written.
    assert!(!dir.path().join("storage.json").exists());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    let app = open_file_backed(&paths_in(&dir)).await.unwrap();
    app.store.set_has_seen_onboarding(true);
    app.store.login(User::new("1", "X", "555"));
    app.store.update_user(UserPatch {
        email: Some("a@b.com".to_string()),
        ..UserPatch::default()
    });
    app.store.set_user_location("Pune, Maharashtra");
    app.store.set_has_selected_location(true);
    let before = app.store.snapshot();
    app.shutdown().await;

    let app = open_file_backed(&paths_in(&dir)).await.unwrap();
    assert_eq!(app.store.snapshot(), before);
    assert_eq!(
        app.store.entry_decision(),
        GateDecision::Route(Destination::Home)
    );
    assert_eq!(
        app.store.guard(AuthenticatedScreen::Bookings),
        SectionDecision::Render(AuthenticatedScreen::Bookings)
    );
    app.shutdown().await;
}

#[tokio::test]
async fn test_logout_persists_but_keeps_onboarding() {
    let dir = TempDir::new().unwrap();

    let app = open_file_backed(&paths_in(&dir)).await.unwrap();
    app.store.set_has_seen_onboarding(true);
    app.store.login(User::new("1", "X", "555"));
    app.shutdown().await;

    let app = open_file_backed(&paths_in(&dir)).await.unwrap();
    app.store.logout();
    app.shutdown().await;

    let app = open_file_backed(&paths_in(&dir)).await.unwrap();
    let session = app.store.snapshot();
    assert!(session.has_seen_onboarding);
    assert!(session.user.is_none());
    assert!(!session.is_authenticated);
    assert_eq!(
        app.store.entry_decision(),
        GateDecision::Route(Destination::Login)
    );
    assert_eq!(
        app.store.guard(AuthenticatedScreen::Profile),
        SectionDecision::Redirect(Destination::Login)
    );
    app.shutdown().await;
}

#[tokio::test]
async fn test_corrupt_storage_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("storage.json"), "\u{0}\u{1}garbage").unwrap();

    let app = open_file_backed(&paths_in(&dir)).await.unwrap();
    assert_eq!(app.store.snapshot(), Session::default());

    // The next write replaces the unreadable file.
    app.store.set_has_seen_onboarding(true);
    app.shutdown().await;

    let app = open_file_backed(&paths_in(&dir)).await.unwrap();
    assert!(app.store.snapshot().has_seen_onboarding);
    app.shutdown().await;
}

#[tokio::test]
async fn test_old_snapshot_is_migrated_on_load() {
    let dir = TempDir::new().unwrap();
    let kv: Arc<dyn KeyValueStore> =
        Arc::new(FileKeyValueStore::new(dir.path().join("storage.json")));
    kv.set(
        SESSION_STORAGE_KEY,
        r#"{"version":"1.0.0","hasSeenOnboarding":true,"isAuthenticated":false,"user":null,"userLocation":"Indore, Madhya Pradesh"}"#
            .to_string(),
    )
    .await
    .unwrap();

    let repo: Arc<dyn SessionRepository> = Arc::new(KeyValueSessionRepository::new(kv.clone()));
    let app = bootstrap(repo).await;
    let session = app.store.snapshot();
    assert_eq!(session.user_location, "Indore, Madhya Pradesh");
    assert!(session.has_selected_location);

    app.store.set_has_seen_onboarding(false);
    app.shutdown().await;

    let raw = kv.get(SESSION_STORAGE_KEY).await.unwrap().unwrap();
    assert!(raw.contains("\"version\":\"1.1.0\""));
}
