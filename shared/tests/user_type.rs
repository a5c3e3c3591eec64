use serde_json::json;
use shared::{AuthResults, AuthUserResponse, RoleRef, User, UserProfile, UserType};

#[test]
fn test_user_type_from_role_name() {
    assert_eq!(UserType::from_role(Some("Admin")), UserType::Admin);
    assert_eq!(UserType::from_role(Some("super admin")), UserType::Admin);
    assert_eq!(UserType::from_role(Some(" agent ")), UserType::Agent);
    assert_eq!(UserType::from_role(Some("user")), UserType::User);
    assert_eq!(UserType::from_role(Some("auditor")), UserType::Unknown);
    assert_eq!(UserType::from_role(None), UserType::Unknown);

    assert!(UserType::Admin.has_elevated_privileges());
    assert!(!UserType::User.has_elevated_privileges());
}

#[test]
fn test_role_accepts_name_or_object() -> anyhow::Result<()> {
    let users: Vec<User> = serde_json::from_value(json!([
        { "_id": "u-1", "email": "a@example.com", "full_name": "A", "role": "agent" },
        { "id": "u-2", "email": "b@example.com", "full_name": "B", "role": { "name": "admin" } },
        { "id": "u-3", "email": "c@example.com" },
    ]))?;

    assert_eq!(users[0].role, Some(RoleRef::Name("agent".to_string())));
    assert_eq!(users[1].role_name(), "admin");
    assert_eq!(users[2].role_name(), "-");
    Ok(())
}

#[test]
fn test_sign_in_payload_becomes_profile() -> anyhow::Result<()> {
    let response: AuthUserResponse = serde_json::from_value(json!({
        "message": "Signed in",
        "error": false,
        "code": 200,
        "results": {
            "token": "access",
            "refreshToken": "refresh",
            "user": {
                "_id": "u-9",
                "email": "agent@example.com",
                "full_name": "Field Agent",
                "role": { "name": "Agent" },
                "countingPost": "end"
            }
        }
    }))?;
    assert!(response.is_success());

    let results: AuthResults = response.results.expect("results present");
    assert_eq!(results.refresh_token.as_deref(), Some("refresh"));

    let profile = UserProfile::from(results.user);
    assert_eq!(profile.id, "u-9");
    assert_eq!(profile.user_type(), UserType::Agent);
    Ok(())
}
