//! Tests for the auth module

use super::*;
use reqwest::header::HeaderMap;

#[test]
fn test_existing_headers_are_kept() {
    let mut headers = HeaderMap::new();
    headers.insert("accept", "application/json".parse().unwrap());
    Authenticator::new(AuthConfig::fastly_key("xyz"))
        .apply(&mut headers)
        .unwrap();

    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get("accept").unwrap(), "application/json");
}

#[test]
fn test_fastly_key_is_sensitive() {
    let mut headers = HeaderMap::new();
    Authenticator::new(AuthConfig::fastly_key("xyz"))
        .apply(&mut headers)
        .unwrap();

    let value = headers.get("Fastly-Key").unwrap();
    assert_eq!(value, "xyz");
    assert!(value.is_sensitive());
}

#[test]
fn test_custom_header_name() {
    let mut headers = HeaderMap::new();
    Authenticator::new(AuthConfig::ApiKey {
        header_name: "X-API-Key".to_string(),
        value: "test-key-123".to_string(),
    })
    .apply(&mut headers)
    .unwrap();
    assert_eq!(headers.get("x-api-key").unwrap(), "test-key-123");
}

#[test]
fn test_invalid_token_rejected() {
    let mut headers = HeaderMap::new();
    let result = Authenticator::new(AuthConfig::fastly_key("bad\ntoken")).apply(&mut headers);
    assert!(matches!(result, Err(crate::error::Error::Config { .. })));
}

#[test]
fn test_debug_hides_key() {
    let debug = format!("{:?}", AuthConfig::fastly_key("secret-value"));
    assert!(debug.contains("Fastly-Key"));
    assert!(!debug.contains("secret-value"));
}
