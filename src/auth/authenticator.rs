//! Authenticator implementation

use super::types::AuthConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Turns an [`AuthConfig`] into request headers
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Add the credential headers to `headers`
    ///
    /// Credential values are marked sensitive so they never show up in
    /// reqwest's debug output.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let AuthConfig::ApiKey { header_name, value } = &self.config;

        let name = HeaderName::from_bytes(header_name.as_bytes())
            .map_err(|e| Error::config(format!("Invalid auth header name: {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|_| Error::config("API token contains invalid header characters"))?;
        value.set_sensitive(true);
        headers.insert(name, value);
        Ok(())
    }
}
