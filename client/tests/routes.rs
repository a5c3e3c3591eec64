mod common;

use client::routes::{available_routes, error_code, guard, home_entries, USERS_PATH};
use client::{AuthStore, Session};
use common::auth_results;
use shared::UserType;

fn session_for(role: &str) -> Session {
    let store = AuthStore::in_memory();
    store.sign_in_with_credentials(&auth_results(role));
    store.snapshot()
}

fn paths(session: &Session) -> Vec<&'static str> {
    available_routes(session).iter().map(|route| route.path).collect()
}

#[test]
fn test_admin_only_routes_hidden_from_other_roles() {
    let admin = paths(&session_for("admin"));
    let agent = paths(&session_for("agent"));
    let user = paths(&session_for("user"));

    assert!(admin.contains(&USERS_PATH));
    assert!(!admin.contains(&"/counting"));
    assert!(!agent.contains(&USERS_PATH));
    assert!(agent.contains(&"/counting"));
    assert!(!user.contains(&USERS_PATH));
    assert_eq!(
        user,
        vec!["/login", "/reset-password", "/error/:errorCode", "/", "/change-password", "/surveys"]
    );
}

#[test]
fn test_anonymous_sees_only_public_routes() {
    assert_eq!(
        paths(&Session::default()),
        vec!["/login", "/reset-password", "/error/:errorCode"]
    );
}

#[test]
fn test_public_routes_stay_available_when_signed_in() {
    let admin = session_for("admin");
    let routes = paths(&admin);

    assert!(routes.contains(&"/reset-password"));
    assert!(routes.contains(&"/error/:errorCode"));
    assert_eq!(guard("/reset-password", &admin), None);
    assert_eq!(guard("/error/403", &admin), None);
    assert_eq!(guard("/login", &admin), Some("/"));
}

#[test]
fn test_guard_redirects() {
    let anonymous = Session::default();
    let admin = session_for("admin");
    let agent = session_for("agent");

    assert_eq!(guard("/surveys", &anonymous), Some("/login"));
    assert_eq!(guard("/login", &anonymous), None);
    assert_eq!(guard("/no-such-page", &anonymous), Some("/login"));

    assert_eq!(guard("/login", &admin), Some("/"));
    assert_eq!(guard("/users", &admin), None);
    assert_eq!(guard("/users/", &admin), None);
    assert_eq!(guard("/users", &agent), Some("/"));
    assert_eq!(guard("/no-such-page", &agent), Some("/"));

    assert_eq!(guard("/error/500", &anonymous), None);
    assert_eq!(guard("/error/404", &admin), None);
}

#[test]
fn test_error_code_segment() {
    assert_eq!(error_code("/error/503"), Some("503"));
    assert_eq!(error_code("/error"), None);
    assert_eq!(error_code("/surveys/503"), None);
}

#[test]
fn test_home_entries_follow_role() {
    let admin: Vec<_> = home_entries(UserType::Admin).iter().map(|e| e.path).collect();
    let user: Vec<_> = home_entries(UserType::User).iter().map(|e| e.path).collect();

    assert_eq!(admin, vec!["/surveys", "/users"]);
    assert_eq!(user, vec!["/surveys"]);
}
