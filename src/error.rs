//! Error types for the Fastly ingest crate
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The API client only ever produces [`Error::ProviderApi`]; the remaining
//! variants belong to configuration, job state and step scheduling.

use std::fmt;
use thiserror::Error;

/// Sentinel used when a status or status text is not available
pub const UNKNOWN: &str = "UNKNOWN";

/// HTTP status attached to a provider API error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// A response was received with this status code
    Code(u16),
    /// The request failed before a status was available
    Unknown,
}

impl ApiStatus {
    /// Status code, if one was received
    pub fn code(self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(code),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// The main error type
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Provider Errors
    // ============================================================================
    #[error("Provider API error at {endpoint}: {status} {status_text}")]
    ProviderApi {
        endpoint: String,
        status: ApiStatus,
        status_text: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Graph / Job State Errors
    // ============================================================================
    #[error("Invalid graph object: {message}")]
    Graph { message: String },

    #[error("No data stored in job state under '{key}'")]
    MissingData { key: String },

    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // Step Errors
    // ============================================================================
    #[error("Step '{step}' is declared more than once")]
    DuplicateStep { step: String },

    #[error("Step '{step}' not found")]
    UnknownStep { step: String },

    #[error("Step '{step}' depends on unknown step '{dependency}'")]
    UnknownDependency { step: String, dependency: String },

    #[error("Dependency cycle between steps: {}", steps.join(", "))]
    DependencyCycle { steps: Vec<String> },

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Wrap a transport or status failure from the provider API
    pub fn provider_api(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        let status = source.status();
        Self::provider_api_with_status(endpoint, status, source)
    }

    /// Wrap a provider API failure that happened after `status` was received
    ///
    /// Used when the cause itself carries no status, such as a body that
    /// fails to decode after a 200.
    pub fn provider_api_with_status(
        endpoint: impl Into<String>,
        status: Option<reqwest::StatusCode>,
        source: reqwest::Error,
    ) -> Self {
        let (status, status_text) = match status {
            Some(code) => (
                ApiStatus::Code(code.as_u16()),
                code.canonical_reason().unwrap_or(UNKNOWN).to_string(),
            ),
            None => (ApiStatus::Unknown, UNKNOWN.to_string()),
        };

        Self::ProviderApi {
            endpoint: endpoint.into(),
            status,
            status_text,
            source,
        }
    }

    /// Create a graph construction error
    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph {
            message: message.into(),
        }
    }

    /// Create a missing job state data error
    pub fn missing_data(key: impl Into<String>) -> Self {
        Self::MissingData { key: key.into() }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Wrap an error raised by a step handler
    pub fn step_failed(step: impl Into<String>, source: Error) -> Self {
        Self::StepFailed {
            step: step.into(),
            source: Box::new(source),
        }
    }

    /// Whether this is (or wraps) a provider API error
    pub fn is_provider_api(&self) -> bool {
        match self {
            Self::ProviderApi { .. } => true,
            Self::StepFailed { source, .. } => source.is_provider_api(),
            _ => false,
        }
    }

    /// HTTP status of a provider API error, looking through step failures
    pub fn status(&self) -> Option<ApiStatus> {
        match self {
            Self::ProviderApi { status, .. } => Some(*status),
            Self::StepFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Endpoint of a provider API error, looking through step failures
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::ProviderApi { endpoint, .. } => Some(endpoint),
            Self::StepFailed { source, .. } => source.endpoint(),
            _ => None,
        }
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
