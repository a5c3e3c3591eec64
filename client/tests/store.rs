mod common;

use std::cell::RefCell;
use std::rc::Rc;

use client::storage::SESSION_STORAGE_KEY;
use client::{AuthStore, KeyValueStorage, MemoryStorage, Session};
use common::auth_results;
use serde_json::json;
use shared::{CountingPost, UserProfilePatch, UserType};

#[test]
fn test_session_is_authorized_only_with_token_and_user() -> anyhow::Result<()> {
    let anonymous = Session::default();
    assert!(!anonymous.is_authorized());
    assert_eq!(anonymous.user_type(), UserType::Unknown);

    let half: Session = serde_json::from_value(json!({
        "isAuthorized": false,
        "accessToken": "access-1",
        "refreshToken": "refresh-1",
    }))?;
    assert!(!half.is_authorized());

    let store = AuthStore::in_memory();
    store.sign_in_with_credentials(&auth_results("agent"));
    let session = store.snapshot();
    assert!(session.is_authorized());
    assert_eq!(session.user_type(), UserType::Agent);
    Ok(())
}

#[test]
fn test_inconsistent_persisted_flag_loads_anonymous() -> anyhow::Result<()> {
    let storage = MemoryStorage::new();
    storage.set(
        SESSION_STORAGE_KEY,
        &json!({ "isAuthorized": true, "accessToken": "access-1" }).to_string(),
    )?;

    let store = AuthStore::load(Rc::new(storage));

    assert_eq!(store.snapshot(), Session::default());
    Ok(())
}

#[test]
fn test_corrupt_persisted_session_is_ignored() -> anyhow::Result<()> {
    let storage = MemoryStorage::new();
    storage.set(SESSION_STORAGE_KEY, "{not json")?;

    let store = AuthStore::load(Rc::new(storage));

    assert!(!store.is_authorized());
    Ok(())
}

#[test]
fn test_session_survives_reload() -> anyhow::Result<()> {
    let storage = MemoryStorage::new();
    let store = AuthStore::load(Rc::new(storage.clone()));
    store.sign_in_with_credentials(&auth_results("admin"));

    let reloaded = AuthStore::load(Rc::new(storage.clone()));

    assert_eq!(reloaded.snapshot(), store.snapshot());
    assert_eq!(reloaded.user_type(), UserType::Admin);

    let persisted: serde_json::Value =
        serde_json::from_str(&storage.get(SESSION_STORAGE_KEY).unwrap_or_default())?;
    assert_eq!(persisted["isAuthorized"], json!(true));
    assert_eq!(persisted["user"]["role"], json!("admin"));
    Ok(())
}

#[test]
fn test_refresh_token_falls_back_to_access_token() {
    let store = AuthStore::in_memory();
    let mut results = auth_results("admin");
    results.refresh_token = None;

    store.sign_in_with_credentials(&results);

    assert_eq!(store.refresh_token().as_deref(), Some("access-1"));
}

#[test]
fn test_logout_resets_persisted_storage() -> anyhow::Result<()> {
    let storage = MemoryStorage::new();
    let store = AuthStore::load(Rc::new(storage.clone()));
    store.sign_in_with_credentials(&auth_results("admin"));

    store.logout();

    assert_eq!(store.snapshot(), Session::default());
    let reloaded = AuthStore::load(Rc::new(storage));
    assert_eq!(reloaded.snapshot(), Session::default());
    Ok(())
}

#[test]
fn test_update_user_data_patches_profile() {
    let store = AuthStore::in_memory();
    store.update_user_data(UserProfilePatch {
        full_name: Some("Nobody".to_string()),
        ..UserProfilePatch::default()
    });
    assert_eq!(store.user(), None);

    store.sign_in_with_credentials(&auth_results("agent"));
    store.update_user_data(UserProfilePatch {
        full_name: Some("Renamed Agent".to_string()),
        counting_post: Some(CountingPost::End),
        ..UserProfilePatch::default()
    });

    let user = store.user().expect("signed in");
    assert_eq!(user.full_name, "Renamed Agent");
    assert_eq!(user.counting_post, Some(CountingPost::End));
    assert_eq!(user.email, "agent@example.com");
}

#[test]
fn test_subscribers_see_changes_until_dropped() {
    let store = AuthStore::in_memory();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let subscription = {
        let seen = seen.clone();
        store.subscribe(move |session| seen.borrow_mut().push(session.is_authorized()))
    };
    store.sign_in_with_credentials(&auth_results("admin"));
    store.update_access_token("access-2");
    drop(subscription);
    store.logout();

    assert_eq!(*seen.borrow(), vec![true, true]);
    assert_eq!(store.access_token(), None);
}
