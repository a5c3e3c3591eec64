mod common;

use client::storage::SESSION_STORAGE_KEY;
use client::{ApiRequest, Error, KeyValueStorage, TransportError};
use common::test_backend::TestBackend;
use common::{envelope, json_response};
use serde_json::json;

#[tokio::test]
async fn test_bearer_attached_only_when_authorized() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    backend.transport.push(envelope(200, json!({})));
    backend.client.execute(ApiRequest::get("surveys")).await?;

    let signed_in = TestBackend::signed_in("admin");
    signed_in.transport.push(envelope(200, json!({})));
    signed_in.client.execute(ApiRequest::get("surveys")).await?;

    let anonymous_request = &backend.transport.requests()[0];
    assert_eq!(anonymous_request.header("Authorization"), None);
    assert_eq!(anonymous_request.header("ClientId"), Some("road-traffic-survey-ui"));

    let authorized_request = &signed_in.transport.requests()[0];
    assert_eq!(authorized_request.header("Authorization"), Some("Bearer access-1"));
    assert_eq!(authorized_request.url.as_str(), "http://backend.test/api/surveys");
    Ok(())
}

#[tokio::test]
async fn test_expired_token_refreshes_once_and_reissues() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend
        .transport
        .push(json_response(401, json!({ "message": "jwt expired" })));
    backend
        .transport
        .push(json_response(200, json!({ "accessToken": "access-2" })));
    backend.transport.push(envelope(200, json!({ "total": 3 })));

    let response = backend.client.execute(ApiRequest::get("surveys/stats/overview")).await?;

    assert_eq!(response.status, 200);
    assert_eq!(
        backend.transport.paths(),
        vec!["surveys/stats/overview", "auth/refresh-token", "surveys/stats/overview"]
    );

    let requests = backend.transport.requests();
    let refresh = &requests[1];
    assert_eq!(refresh.header("Authorization"), None);
    assert_eq!(refresh.header("ClientId"), Some("road-traffic-survey-ui"));
    assert_eq!(refresh.body.as_deref(), Some(r#"{"refreshToken":"refresh-1"}"#));
    assert_eq!(requests[2].header("Authorization"), Some("Bearer access-2"));

    assert_eq!(backend.client.store().access_token().as_deref(), Some("access-2"));
    assert!(backend.client.store().is_authorized());
    assert!(backend.navigator.visited().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_unauthorized_requests_refresh_independently() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend.transport.interleave();
    backend.transport.push(json_response(401, json!({ "message": "jwt expired" })));
    backend.transport.push(json_response(401, json!({ "message": "jwt expired" })));
    backend
        .transport
        .push(json_response(200, json!({ "accessToken": "access-2" })));
    backend
        .transport
        .push(json_response(200, json!({ "accessToken": "access-3" })));
    backend.transport.push(envelope(200, json!({ "total": 3 })));
    backend.transport.push(envelope(200, json!({ "docs": [] })));

    let (stats, list) = tokio::join!(
        backend.client.execute(ApiRequest::get("surveys/stats/overview")),
        backend.client.execute(ApiRequest::get("surveys")),
    );
    assert_eq!(stats?.status, 200);
    assert_eq!(list?.status, 200);

    let paths = backend.transport.paths();
    assert_eq!(paths.len(), 6);
    assert_eq!(paths.iter().filter(|path| *path == "auth/refresh-token").count(), 2);
    assert_eq!(paths.iter().filter(|path| *path == "surveys").count(), 2);
    assert_eq!(paths.iter().filter(|path| *path == "surveys/stats/overview").count(), 2);
    assert_eq!(backend.transport.pending(), 0);
    assert!(backend.client.store().is_authorized());
    assert!(backend.navigator.visited().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reissued_response_is_returned_unchanged() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend.transport.push(json_response(401, json!({})));
    backend
        .transport
        .push(json_response(200, json!({ "accessToken": "access-2" })));
    backend.transport.push(json_response(401, json!({})));

    let response = backend.client.execute(ApiRequest::get("surveys")).await?;

    assert_eq!(response.status, 401);
    assert_eq!(backend.transport.requests().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_failed_refresh_logs_out() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("agent");
    backend.transport.push(json_response(401, json!({})));
    backend
        .transport
        .push(json_response(401, json!({ "message": "refresh expired" })));

    let result = backend.client.execute(ApiRequest::get("surveys")).await;

    assert!(matches!(result, Err(Error::SessionTerminated)));
    assert!(!backend.client.store().is_authorized());
    assert_eq!(backend.client.store().refresh_token(), None);
    assert_eq!(backend.navigator.visited(), vec!["/login"]);
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_without_refresh_token_logs_out() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    backend.transport.push(json_response(401, json!({})));

    let result = backend.client.execute(ApiRequest::get("users/list")).await;

    assert!(matches!(result, Err(Error::SessionTerminated)));
    assert_eq!(backend.transport.requests().len(), 1);
    assert_eq!(backend.navigator.visited(), vec!["/login"]);
    Ok(())
}

#[tokio::test]
async fn test_forced_logout_skips_refresh() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend.transport.push(json_response(
        401,
        json!({ "error": "force_logout", "message": "Session revoked" }),
    ));

    let result = backend.client.execute(ApiRequest::get("surveys")).await;

    assert!(matches!(result, Err(Error::SessionTerminated)));
    assert_eq!(backend.transport.paths(), vec!["surveys"]);
    assert!(!backend.client.store().is_authorized());

    let persisted = backend.storage.get(SESSION_STORAGE_KEY).unwrap_or_default();
    let persisted: serde_json::Value = serde_json::from_str(&persisted)?;
    assert_eq!(persisted["isAuthorized"], json!(false));
    assert_eq!(persisted["accessToken"], json!(null));
    Ok(())
}

#[tokio::test]
async fn test_invalid_login_token_message_forces_logout() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend.transport.push(json_response(
        401,
        json!({ "error": true, "message": "Invalid login token" }),
    ));

    let result = backend.client.execute(ApiRequest::get("surveys")).await;

    assert!(matches!(result, Err(Error::SessionTerminated)));
    assert_eq!(backend.transport.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_server_errors_escalate_to_error_page() -> anyhow::Result<()> {
    for status in [403, 500, 502, 503, 504] {
        let backend = TestBackend::signed_in("admin");
        backend
            .transport
            .push(json_response(status, json!({ "message": "boom" })));

        let result = backend.client.execute(ApiRequest::get("surveys")).await;

        assert!(
            matches!(result, Err(Error::ErrorPage { status: s }) if s == status),
            "status {status} should escalate"
        );
        assert_eq!(backend.navigator.visited(), vec![format!("/error/{status}")]);
        assert!(backend.client.store().is_authorized());
    }
    Ok(())
}

#[tokio::test]
async fn test_login_page_passes_errors_through() -> anyhow::Result<()> {
    let backend = TestBackend::anonymous();
    backend
        .transport
        .push(json_response(403, json!({ "message": "User inactive" })));

    let response = backend.client.execute(ApiRequest::post("auth/signIn")).await?;

    assert_eq!(response.status, 403);
    assert!(backend.navigator.visited().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_permission_denial_alerts() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("agent");
    backend.transport.push(json_response(
        403,
        json!({ "message": "You do not have Permission to do that" }),
    ));

    let result = backend.client.execute(ApiRequest::put("surveys/s-1/start")).await;

    assert!(matches!(result, Err(Error::ErrorPage { status: 403 })));
    assert_eq!(backend.navigator.alerts(), vec!["You do not have Permission to do that"]);
    Ok(())
}

#[tokio::test]
async fn test_other_statuses_pass_through() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend
        .transport
        .push(json_response(409, json!({ "message": "conflict" })));

    let response = backend.client.execute(ApiRequest::post("surveys/create")).await?;

    assert_eq!(response.status, 409);
    assert!(backend.navigator.visited().is_empty());
    assert!(backend.navigator.alerts().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_surfaced() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend.transport.push_error(TransportError::Timeout);

    let result = backend.client.execute(ApiRequest::get("surveys")).await;

    assert!(matches!(result, Err(Error::Timeout)));
    assert_eq!(backend.transport.requests().len(), 1);
    assert!(backend.client.store().is_authorized());
    Ok(())
}

#[tokio::test]
async fn test_download_uses_content_disposition() -> anyhow::Result<()> {
    let backend = TestBackend::signed_in("admin");
    backend.transport.push(
        client::HttpResponse::new(200, "id,email\n1,a@example.com\n")
            .with_header("Content-Disposition", r#"attachment; filename="users.csv""#)
            .with_header("Content-Type", "text/csv"),
    );
    backend
        .transport
        .push(client::HttpResponse::new(200, "raw"));

    let named = backend
        .client
        .download(ApiRequest::get("users/export"), None)
        .await?;
    let unnamed = backend
        .client
        .download(ApiRequest::get("users/export"), None)
        .await?;

    assert_eq!(named.file_name, "users.csv");
    assert_eq!(named.content_type.as_deref(), Some("text/csv"));
    assert_eq!(unnamed.file_name, "downloaded_file");
    assert_eq!(unnamed.bytes, b"raw".to_vec());
    Ok(())
}
