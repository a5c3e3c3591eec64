mod common;

use client::api::auth_api::{self, LoginOutcome};
use client::api::{FieldError, FormOutcome};
use client::Session;
use common::test_backend::TestBackend;
use common::{json_response, sign_in_body};
use secrecy::SecretString;
use serde_json::json;
use shared::{ChangePasswordRequest, SignInRequest};

fn credentials(password: &str) -> SignInRequest {
    SignInRequest {
        email: "admin@example.com".to_string(),
        password: SecretString::from(password.to_string()),
    }
}

#[tokio::test]
async fn test_login_success_navigates_home() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    backend.transport.push(json_response(200, sign_in_body("admin")));

    let outcome = auth_api::login(&backend.client, &credentials("secret")).await;

    assert_eq!(outcome, LoginOutcome::SignedIn);
    assert!(backend.client.store().is_authorized());
    assert_eq!(backend.navigator.visited(), vec!["/"]);

    let request = &backend.transport.requests()[0];
    assert_eq!(
        request.body.as_deref(),
        Some(r#"{"email":"admin@example.com","password":"secret"}"#)
    );
    Ok(())
}

#[tokio::test]
async fn test_wrong_password_leaves_session_untouched() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    backend
        .transport
        .push(json_response(400, json!({ "message": "bad credentials" })));

    let outcome = auth_api::login(&backend.client, &credentials("wrong")).await;

    assert_eq!(
        outcome,
        LoginOutcome::Rejected(FieldError::new("password", "incorrectEmailOrPassword"))
    );
    assert_eq!(backend.client.store().snapshot(), Session::default());
    assert!(backend.navigator.visited().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_login_status_mapping() -> anyhow::Result<()> {
    let cases = [
        (403, "inactiveUser"),
        (404, "incorrectEmailOrPassword"),
        (429, "toManyRequest"),
        (500, "incorrectEmailOrPassword"),
    ];
    for (status, key) in cases {
        let backend = TestBackend::anonymous();
        backend.transport.push(json_response(status, json!({})));

        let outcome = auth_api::login(&backend.client, &credentials("secret")).await;

        assert_eq!(
            outcome,
            LoginOutcome::Rejected(FieldError::new("password", key)),
            "status {status}"
        );
        assert!(!backend.client.store().is_authorized());
    }
    Ok(())
}

#[tokio::test]
async fn test_temporary_password_requires_change() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    let mut body = sign_in_body("agent");
    body["results"]["user"]["passwordResetToken"] = json!("reset-1");
    body["results"]["user"]["userName"] = json!("agent-login");
    backend.transport.push(json_response(200, body));

    let outcome = auth_api::login(&backend.client, &credentials("temporary")).await;
    let LoginOutcome::PasswordChangeRequired(pending) = outcome else {
        panic!("expected a password change, got {outcome:?}");
    };
    assert!(!backend.client.store().is_authorized());

    backend
        .transport
        .push(json_response(409, json!({ "message": "used before" })));
    let rejected = auth_api::change_temporary_password(
        &backend.client,
        &pending,
        SecretString::from("old-one".to_string()),
    )
    .await?;
    assert_eq!(
        rejected,
        FormOutcome::Rejected(FieldError::new("newPassword", "historyValidPassword"))
    );

    backend.transport.push(json_response(200, sign_in_body("agent")));
    let accepted = auth_api::change_temporary_password(
        &backend.client,
        &pending,
        SecretString::from("brand-new".to_string()),
    )
    .await?;
    assert_eq!(accepted, FormOutcome::Accepted);
    assert!(backend.client.store().is_authorized());

    let body: serde_json::Value =
        serde_json::from_str(backend.transport.requests()[2].body.as_deref().unwrap_or("{}"))?;
    assert_eq!(body["passwordResetToken"], json!("reset-1"));
    assert_eq!(body["userName"], json!("agent-login"));
    assert_eq!(body["newPassword"], json!("brand-new"));
    Ok(())
}

#[tokio::test]
async fn test_change_password_errors() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend.navigator.set_location("/change-password");
    let request = || ChangePasswordRequest {
        current_password: SecretString::from("current".to_string()),
        new_password: SecretString::from("next".to_string()),
    };

    backend.transport.push(json_response(404, json!({})));
    backend.transport.push(json_response(409, json!({})));
    backend.transport.push(json_response(200, sign_in_body("admin")));

    assert_eq!(
        auth_api::change_password(&backend.client, &request()).await?,
        FormOutcome::Rejected(FieldError::new("currentPassword", "incorrectPassword"))
    );
    assert_eq!(
        auth_api::change_password(&backend.client, &request()).await?,
        FormOutcome::Rejected(FieldError::new("currentPassword", "historyValidPassword"))
    );
    assert_eq!(
        auth_api::change_password(&backend.client, &request()).await?,
        FormOutcome::Accepted
    );
    assert_eq!(backend.navigator.visited(), vec!["/"]);
    Ok(())
}

#[tokio::test]
async fn test_forgot_password_hides_unknown_emails() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    backend.navigator.set_location("/reset-password");
    backend.transport.push(json_response(404, json!({})));
    backend.transport.push(json_response(429, json!({})));
    backend.transport.push(json_response(400, json!({})));

    assert!(auth_api::send_forgot_password_email(&backend.client, "ghost@example.com").await?);
    assert_eq!(
        auth_api::check_forgot_password_code(&backend.client, "ghost@example.com", "1234").await?,
        FormOutcome::Rejected(FieldError::new("code", "tooManyIncorrectAttempts"))
    );
    assert_eq!(
        auth_api::check_forgot_password_code(&backend.client, "ghost@example.com", "1234").await?,
        FormOutcome::Rejected(FieldError::new("code", "wrongCode"))
    );
    Ok(())
}

#[test]
fn test_field_error_text() {
    assert_eq!(
        FieldError::new("password", "incorrectEmailOrPassword").text(),
        "Incorrect email or password"
    );
    assert_eq!(FieldError::new("email", "Email taken").text(), "Email taken");
}
