use serde_json::json;
use shared::{ApiEnvelope, Paginated, User};

#[test]
fn test_envelope_without_results() -> anyhow::Result<()> {
    let envelope: ApiEnvelope<User> = serde_json::from_value(json!({
        "message": "User not found",
        "error": true,
        "code": 404
    }))?;
    assert!(!envelope.is_success());
    assert_eq!(envelope.results, None);
    Ok(())
}

#[test]
fn test_page_of_users() -> anyhow::Result<()> {
    let envelope: ApiEnvelope<Paginated<User>> = serde_json::from_value(json!({
        "message": "Users",
        "results": {
            "docs": [{ "_id": "u-1", "email": "admin@example.com", "role": "admin" }],
            "totalDocs": 1,
            "totalPages": 1
        }
    }))?;
    assert!(envelope.is_success());

    let page = envelope.results.expect("results present");
    assert_eq!(page.docs.len(), 1);
    assert_eq!(page.docs[0].id, "u-1");
    assert_eq!(page.page, 1);

    let empty: Paginated<User> = serde_json::from_value(json!({ "totalDocs": 0 }))?;
    assert!(empty.docs.is_empty());
    assert_eq!(empty.total_pages, 1);
    Ok(())
}
