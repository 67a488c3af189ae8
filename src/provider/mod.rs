//! Fastly API provider
//!
//! Typed payloads for the Fastly REST resources and the [`ApiClient`] that
//! fetches them. Every request is a single authenticated GET; failures of
//! any kind surface as [`crate::Error::ProviderApi`].

mod client;
mod types;

pub use client::ApiClient;
pub use types::{
    FastlyAccount, FastlyService, FastlyServiceBackend, FastlyServiceDomain, FastlyToken,
    FastlyUser,
};

#[cfg(test)]
mod tests;
