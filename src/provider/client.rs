//! Fastly API client

use super::types::{
    FastlyAccount, FastlyService, FastlyServiceBackend, FastlyServiceDomain, FastlyToken,
    FastlyUser,
};
use crate::auth::AuthConfig;
use crate::config::IntegrationConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

/// Client for the Fastly REST API
///
/// Holds no state besides its configuration. List operations fetch the whole
/// collection once and then hand each element to the visitor in API order,
/// awaiting every visit before starting the next.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    customer_id: String,
}

impl ApiClient {
    /// Create a client for a validated configuration
    ///
    /// Fails with a missing-config-field error when the token or customer id
    /// is absent, so no unauthenticated client can exist.
    pub fn new(config: &IntegrationConfig) -> Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig::builder()
            .base_url(config.base_url())
            .timeout(config.timeout())
            .header("Accept", "application/json")
            .build();

        let http = HttpClient::with_auth(http_config, AuthConfig::fastly_key(&config.api_token))?;

        Ok(Self {
            http,
            customer_id: config.customer_id.clone(),
        })
    }

    /// Configured customer id
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Fetch one resource, passing query parameters through verbatim
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let request = query
            .iter()
            .fold(RequestConfig::new(), |req, (key, value)| req.query(*key, *value));
        self.http.get_json(path, request).await
    }

    async fn iterate<T, F, Fut>(&self, path: &str, mut visit: F) -> Result<()>
    where
        T: DeserializeOwned,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let items: Vec<T> = self.get_data(path, &[]).await?;
        debug!("Fetched {} items from {}", items.len(), path);

        for item in items {
            visit(item).await?;
        }
        Ok(())
    }

    /// Verify the credentials by fetching the current user
    pub async fn verify_authentication(&self) -> Result<()> {
        self.get_current_user().await.map(|_| ())
    }

    /// `GET /current_user`
    pub async fn get_current_user(&self) -> Result<FastlyUser> {
        self.get_data("/current_user", &[]).await
    }

    /// `GET /customer/{customerId}`
    pub async fn get_account_details(&self) -> Result<FastlyAccount> {
        self.get_data(&format!("/customer/{}", self.customer_id), &[])
            .await
    }

    /// Visit every user of the customer
    pub async fn iterate_users<F, Fut>(&self, visit: F) -> Result<()>
    where
        F: FnMut(FastlyUser) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        self.iterate(&format!("/customer/{}/users", self.customer_id), visit)
            .await
    }

    /// Visit every API token of the customer
    pub async fn iterate_tokens<F, Fut>(&self, visit: F) -> Result<()>
    where
        F: FnMut(FastlyToken) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        self.iterate(&format!("/customer/{}/tokens", self.customer_id), visit)
            .await
    }

    /// Visit every service visible to the token
    pub async fn iterate_services<F, Fut>(&self, visit: F) -> Result<()>
    where
        F: FnMut(FastlyService) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        self.iterate("/service", visit).await
    }

    /// `GET /service/{id}/version/{version}/backend`
    pub async fn get_service_backends(
        &self,
        service_id: &str,
        version: u32,
    ) -> Result<Vec<FastlyServiceBackend>> {
        self.get_data(&format!("/service/{service_id}/version/{version}/backend"), &[])
            .await
    }

    /// `GET /service/{id}/version/{version}/domain`
    pub async fn get_service_domains(
        &self,
        service_id: &str,
        version: u32,
    ) -> Result<Vec<FastlyServiceDomain>> {
        self.get_data(&format!("/service/{service_id}/version/{version}/domain"), &[])
            .await
    }
}
