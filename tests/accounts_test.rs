mod common;

use common::config_in;
use std::time::Duration;
use storefront::error::{AuthError, StoreError};
use storefront::login::Sessions;
use storefront::state::AppState;
use tempfile::tempdir;

#[test]
fn test_register_login_and_recover() {
    let dir = tempdir().unwrap();
    let mut state = AppState::open(config_in(dir.path())).unwrap();
    assert!(!state.credentials.is_registered());
    assert_eq!(
        state.credentials.login("admin", "secret"),
        Err(AuthError::InvalidCredentials)
    );

    state
        .credentials
        .register("admin", "secret", "Owner@Example.com")
        .unwrap();
    assert!(matches!(
        state.credentials.register("other", "pw", "x@example.com"),
        Err(StoreError::Auth(AuthError::AlreadyRegistered))
    ));

    let reopened = AppState::open(config_in(dir.path())).unwrap();
    let credentials = &reopened.credentials;
    assert_eq!(credentials.username(), Some("admin"));
    assert!(credentials.login("admin", "secret").is_ok());
    assert_eq!(
        credentials.login("admin", "Secret"),
        Err(AuthError::InvalidCredentials)
    );

    assert_eq!(credentials.recover("owner@example.com").unwrap(), "secret");
    assert_eq!(
        credentials.recover("someone@example.com"),
        Err(AuthError::EmailMismatch)
    );
    assert_eq!(credentials.recover(""), Err(AuthError::EmailMismatch));
}

#[test]
fn test_recovery_without_account_is_denied() {
    let dir = tempdir().unwrap();
    let state = AppState::open(config_in(dir.path())).unwrap();
    assert_eq!(
        state.credentials.recover("owner@example.com"),
        Err(AuthError::EmailMismatch)
    );
}

#[test]
fn test_update_credentials() {
    let dir = tempdir().unwrap();
    let mut state = AppState::open(config_in(dir.path())).unwrap();
    assert!(matches!(
        state.credentials.update("admin", "pw", "a@b.c"),
        Err(StoreError::Auth(AuthError::NotRegistered))
    ));

    state.credentials.register("admin", "pw", "a@b.c").unwrap();
    assert!(matches!(
        state.credentials.update("admin", "", "a@b.c"),
        Err(StoreError::Auth(AuthError::EmptyField))
    ));
    state
        .credentials
        .update("owner", "new pw", "owner@b.c")
        .unwrap();

    let reopened = AppState::open(config_in(dir.path())).unwrap();
    assert!(reopened.credentials.verify("owner", "new pw"));
    assert!(!reopened.credentials.verify("admin", "pw"));
}

#[test]
fn test_sessions_track_pending_delete() {
    let dir = tempdir().unwrap();
    let mut state = AppState::open(config_in(dir.path())).unwrap();
    state
        .inventory
        .insert(storefront::Product::new("1001", "Rice", 50.0, 10))
        .unwrap();

    let mut sessions = Sessions::default();
    let id = sessions.create("admin");
    assert_eq!(sessions.validate(&id), Some("admin".to_string()));

    let pending = state.inventory.request_delete("1001").unwrap();
    sessions.set_pending_delete(&id, Some(pending));
    assert!(sessions.take_pending_delete(&id, "2002").is_none());

    let pending = sessions.take_pending_delete(&id, "1001").unwrap();
    assert!(sessions.take_pending_delete(&id, "1001").is_none());
    state.inventory.delete(pending).unwrap();
    assert!(state.inventory.is_empty());

    sessions.remove(&id);
    assert!(sessions.validate(&id).is_none());
}

#[test]
fn test_sessions_expire() {
    let mut sessions = Sessions::new(Duration::ZERO);
    let id = sessions.create("admin");
    assert!(sessions.validate(&id).is_none());
}

#[test]
fn test_failed_credential_write_is_not_applied() {
    let dir = tempdir().unwrap();
    let mut state = AppState::open(config_in(dir.path())).unwrap();
    let table = dir.path().join("credentials.csv");
    std::fs::create_dir(&table).unwrap();

    assert!(matches!(
        state.credentials.register("admin", "secret", "a@b.c"),
        Err(StoreError::Io(_))
    ));
    assert!(!state.credentials.is_registered());

    std::fs::remove_dir(&table).unwrap();
    state.credentials.register("admin", "secret", "a@b.c").unwrap();
    std::fs::remove_file(&table).unwrap();
    std::fs::create_dir(&table).unwrap();

    assert!(state.credentials.update("owner", "new", "a@b.c").is_err());
    assert!(state.credentials.verify("admin", "secret"));
    assert_eq!(state.credentials.username(), Some("admin"));
}
