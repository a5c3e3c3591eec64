use std::time::Duration;

use client::{ClientConfig, Error, DEFAULT_API_BASE_URL, DEFAULT_CLIENT_ID};

#[test]
fn test_default_base_url_parses() -> anyhow::Result<()> {
    let config = ClientConfig::parse(DEFAULT_API_BASE_URL)?;
    assert_eq!(config.api_base_url.as_str(), "http://localhost:5000/api/");
    assert_eq!(config.client_id.as_deref(), Some(DEFAULT_CLIENT_ID));
    assert_eq!(config.timeout, Duration::from_secs(15));
    assert_eq!(config.endpoint("surveys")?.as_str(), "http://localhost:5000/api/surveys");
    Ok(())
}

#[test]
fn test_invalid_base_url_is_an_error() {
    let result = ClientConfig::parse("/api");
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_empty_client_id_is_dropped() -> anyhow::Result<()> {
    let config = ClientConfig::parse(DEFAULT_API_BASE_URL)?.with_client_id(Some(String::new()));
    assert_eq!(config.client_id, None);
    Ok(())
}
