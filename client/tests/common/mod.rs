#![allow(dead_code)]

use client::HttpResponse;
use serde_json::{json, Value};
use shared::{AuthResults, AuthUser, RoleRef};

pub mod test_backend;

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::new(status, body.to_string()).with_header("Content-Type", "application/json")
}

pub fn envelope(status: u16, results: Value) -> HttpResponse {
    json_response(
        status,
        json!({ "message": "ok", "error": false, "code": status, "results": results }),
    )
}

pub fn failed_envelope(status: u16, message: &str) -> HttpResponse {
    json_response(
        status,
        json!({ "message": message, "error": true, "code": status }),
    )
}

pub fn auth_user(role: &str) -> AuthUser {
    AuthUser {
        id: format!("{role}-1"),
        email: format!("{role}@example.com"),
        full_name: format!("Test {role}"),
        phone: None,
        role: Some(RoleRef::Object {
            name: role.to_string(),
        }),
        counting_post: None,
        password_reset_token: None,
        user_name: None,
    }
}

pub fn auth_results(role: &str) -> AuthResults {
    AuthResults {
        token: "access-1".to_string(),
        refresh_token: Some("refresh-1".to_string()),
        expires_at: None,
        user: auth_user(role),
    }
}

pub fn sign_in_body(role: &str) -> Value {
    json!({
        "message": "Signed in",
        "error": false,
        "code": 200,
        "results": serde_json::to_value(auth_results(role)).unwrap(),
    })
}

pub fn survey_json(id: &str, start: &str, end: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("Survey {id}"),
        "startPoint": "North gate",
        "endPoint": "South gate",
        "scheduledStartTime": start,
        "scheduledEndTime": end,
        "status": status,
        "startPointAgent": { "id": "agent-1", "full_name": "Ana Agent" },
        "endPointAgent": "Bruno Agent",
    })
}
