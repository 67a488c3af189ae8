//! Integration instance configuration
//!
//! The configuration carries the Fastly API token and customer id. Both are
//! required; [`IntegrationConfig::validate`] rejects a configuration missing
//! either one before any step executes.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default Fastly API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.fastly.com";

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "API_TOKEN";

/// Environment variable holding the customer id
pub const ENV_CUSTOMER_ID: &str = "CUSTOMER_ID";

/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "FASTLY_BASE_URL";

/// Configuration for one integration instance
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    /// Fastly API token, sent as the `Fastly-Key` header
    #[serde(default)]
    pub api_token: String,

    /// Fastly customer id
    #[serde(default)]
    pub customer_id: String,

    /// Override for the API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            customer_id: String::new(),
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl IntegrationConfig {
    /// Create a config from a token and customer id
    pub fn new(api_token: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            customer_id: customer_id.into(),
            ..Self::default()
        }
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_seconds = timeout.as_secs();
        self
    }

    /// Load a config from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_str(&contents)
    }

    /// Parse a config from a YAML or JSON string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        // JSON is a subset of YAML, so one parser covers both
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Build a config from `API_TOKEN`, `CUSTOMER_ID` and `FASTLY_BASE_URL`
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var(ENV_API_TOKEN).unwrap_or_default(),
            customer_id: std::env::var(ENV_CUSTOMER_ID).unwrap_or_default(),
            base_url: std::env::var(ENV_BASE_URL).ok().filter(|s| !s.is_empty()),
            ..Self::default()
        }
    }

    /// Fill empty fields from another config
    #[must_use]
    pub fn or(mut self, fallback: Self) -> Self {
        if self.api_token.is_empty() {
            self.api_token = fallback.api_token;
        }
        if self.customer_id.is_empty() {
            self.customer_id = fallback.customer_id;
        }
        if self.base_url.is_none() {
            self.base_url = fallback.base_url;
        }
        self
    }

    /// Check that all required fields are present
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(Error::missing_field("apiToken"));
        }
        if self.customer_id.trim().is_empty() {
            return Err(Error::missing_field("customerId"));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::InvalidConfigValue {
                field: "timeoutSeconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)?;
        }
        Ok(())
    }

    /// API base URL, falling back to the public Fastly endpoint
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl fmt::Debug for IntegrationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrationConfig")
            .field("api_token", &"***")
            .field("customer_id", &self.customer_id)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_valid_config() {
        let config = IntegrationConfig::new("token", "customer");
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test_case("", "customer", "apiToken" ; "missing token")]
    #[test_case("token", "", "customerId" ; "missing customer")]
    #[test_case("  ", "customer", "apiToken" ; "blank token")]
    #[test_case("", "", "apiToken" ; "missing both")]
    fn test_missing_fields(token: &str, customer: &str, expected: &str) {
        let err = IntegrationConfig::new(token, customer)
            .validate()
            .unwrap_err();
        match err {
            Error::MissingConfigField { field } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let config = IntegrationConfig::new("token", "customer").with_base_url("not a url");
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config =
            IntegrationConfig::new("token", "customer").with_timeout(Duration::from_millis(10));
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_parse_json() {
        let config =
            IntegrationConfig::from_str(r#"{"apiToken": "xyz", "customerId": "abc"}"#).unwrap();
        assert_eq!(config.api_token, "xyz");
        assert_eq!(config.customer_id, "abc");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_parse_yaml_with_overrides() {
        let yaml = "apiToken: xyz\ncustomerId: abc\nbaseUrl: http://localhost:8080\ntimeoutSeconds: 5\n";
        let config = IntegrationConfig::from_str(yaml).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_missing_fields_fails_validation() {
        let config = IntegrationConfig::from_str("customerId: abc").unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "apiToken: t\ncustomerId: c\n").unwrap();

        let config = IntegrationConfig::from_file(&path).unwrap();
        assert_eq!(config, IntegrationConfig::new("t", "c"));

        let missing = IntegrationConfig::from_file(dir.path().join("nope.yaml"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_or_fills_empty_fields() {
        let cli = IntegrationConfig::new("", "from-cli");
        let file = IntegrationConfig::new("from-file", "other").with_base_url("http://proxy");
        let merged = cli.or(file);
        assert_eq!(merged.api_token, "from-file");
        assert_eq!(merged.customer_id, "from-cli");
        assert_eq!(merged.base_url.as_deref(), Some("http://proxy"));
    }

    #[test]
    fn test_debug_masks_token() {
        let config = IntegrationConfig::new("super-secret", "customer");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("customer"));
    }
}
