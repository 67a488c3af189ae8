//! Tests for the Fastly API client

use super::*;
use crate::config::IntegrationConfig;
use crate::error::{ApiStatus, Error};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CUSTOMER_ID: &str = "6Bfjl1cR8HV2hPuQykFxJa";
const API_TOKEN: &str = "xyz";

fn client_for(server: &MockServer) -> ApiClient {
    let config = IntegrationConfig::new(API_TOKEN, CUSTOMER_ID).with_base_url(server.uri());
    ApiClient::new(&config).unwrap()
}

#[test]
fn test_new_requires_token_and_customer() {
    let missing_token = IntegrationConfig::new("", CUSTOMER_ID);
    assert!(matches!(
        ApiClient::new(&missing_token),
        Err(Error::MissingConfigField { .. })
    ));

    let missing_customer = IntegrationConfig::new(API_TOKEN, "");
    assert!(matches!(
        ApiClient::new(&missing_customer),
        Err(Error::MissingConfigField { .. })
    ));
}

#[tokio::test]
async fn test_get_current_user_sends_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current_user"))
        .and(header("Fastly-Key", API_TOKEN))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "login": "admin@example.com",
            "name": "Admin",
            "role": "superuser",
            "customer_id": CUSTOMER_ID
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let user = client.get_current_user().await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.login.as_deref(), Some("admin@example.com"));
    assert_eq!(user.customer_id.as_deref(), Some(CUSTOMER_ID));
}

#[tokio::test]
async fn test_get_account_details_keeps_unknown_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/customer/{CUSTOMER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": CUSTOMER_ID,
            "name": "Example Co",
            "billing_network_type": "public"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let account = client.get_account_details().await.unwrap();

    assert_eq!(account.id, CUSTOMER_ID);
    assert_eq!(account.name.as_deref(), Some("Example Co"));
    assert_eq!(account.extra["billing_network_type"], "public");
}

#[tokio::test]
async fn test_iterate_users_visits_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/customer/{CUSTOMER_ID}/users")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u1", "name": "First"},
            {"id": "u2", "name": "Second"},
            {"id": "u3", "name": "Third"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let seen = Arc::new(Mutex::new(Vec::new()));

    client
        .iterate_users(|user| {
            let seen = Arc::clone(&seen);
            async move {
                tokio::task::yield_now().await;
                seen.lock().unwrap().push(user.id);
                Ok(())
            }
        })
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["u1", "u2", "u3"]);
}

#[tokio::test]
async fn test_iterate_stops_on_visitor_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/customer/{CUSTOMER_ID}/tokens")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t1", "user_id": "u1"},
            {"id": "t2", "user_id": "u1"}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut visited = 0;

    let result = client
        .iterate_tokens(|_token| {
            visited += 1;
            async { Err(Error::graph("boom")) }
        })
        .await;

    assert!(matches!(result, Err(Error::Graph { .. })));
    assert_eq!(visited, 1);
}

#[tokio::test]
async fn test_iterate_services_and_sub_resources() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "svc1", "name": "www", "version": 3, "type": "vcl"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/svc1/version/3/backend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "origin", "hostname": "origin.example.com", "address": "10.0.0.1", "port": 443, "use_ssl": true}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/service/svc1/version/3/domain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "www.example.com", "locked": true}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let mut services = Vec::new();
    client
        .iterate_services(|service| {
            services.push(service);
            async { Ok(()) }
        })
        .await
        .unwrap();

    assert_eq!(services.len(), 1);
    assert_eq!(services[0].version, 3);
    assert_eq!(services[0].service_type.as_deref(), Some("vcl"));

    let backends = client.get_service_backends("svc1", 3).await.unwrap();
    assert_eq!(backends.len(), 1);
    assert_eq!(backends[0].port, Some(443));
    assert_eq!(backends[0].extra["use_ssl"], true);

    let domains = client.get_service_domains("svc1", 3).await.unwrap();
    assert_eq!(domains[0].name, "www.example.com");
    assert_eq!(domains[0].locked, Some(true));
}

#[tokio::test]
async fn test_get_data_passes_query_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service"))
        .and(query_param("page", "2"))
        .and(query_param("filter[name]", "www"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let services: Vec<FastlyService> = client
        .get_data("/service", &[("page", "2"), ("filter[name]", "www")])
        .await
        .unwrap();

    assert!(services.is_empty());
}

#[tokio::test]
async fn test_server_error_becomes_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .iterate_services(|_| async { Ok(()) })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(ApiStatus::Code(500)));
    assert_eq!(err.endpoint(), Some(format!("{}/service", mock_server.uri()).as_str()));
}

#[tokio::test]
async fn test_unauthorized_verify_authentication() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current_user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "Provided credentials are missing or invalid"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.verify_authentication().await.unwrap_err();

    assert_eq!(err.status(), Some(ApiStatus::Code(401)));
}

#[test]
fn test_null_collections_decode_as_empty() {
    let token: FastlyToken =
        serde_json::from_value(json!({"id": "t1", "user_id": "u1", "services": null})).unwrap();
    assert!(token.services.is_empty());
    assert_eq!(token.user_id.as_deref(), Some("u1"));

    let service: FastlyService =
        serde_json::from_value(json!({"id": "s1", "version": null, "comment": null})).unwrap();
    assert_eq!(service.version, 0);
    assert!(service.comment.is_none());
}
