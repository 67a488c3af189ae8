//! Auth configuration types

use std::fmt;

/// Name of the header Fastly reads the API token from
pub const FASTLY_KEY_HEADER: &str = "Fastly-Key";

/// Authentication configuration
#[derive(Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// API key sent in a request header
    ApiKey {
        /// Header name
        header_name: String,
        /// The API key value
        value: String,
    },
}

impl AuthConfig {
    /// API key carried in the `Fastly-Key` header
    pub fn fastly_key(token: impl Into<String>) -> Self {
        Self::ApiKey {
            header_name: FASTLY_KEY_HEADER.to_string(),
            value: token.into(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey { header_name, .. } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("value", &"***")
                .finish(),
        }
    }
}
