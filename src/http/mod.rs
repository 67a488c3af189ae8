//! HTTP client module
//!
//! Thin wrapper over `reqwest` that attaches default headers and
//! authentication, and converts every failure into a provider API error.
//! Requests are not retried or rate limited.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
