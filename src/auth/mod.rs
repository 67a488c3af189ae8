//! Authentication module
//!
//! Fastly authenticates every request with an API key header. The
//! `Authenticator` applies the configured key to outgoing requests.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;

#[cfg(test)]
mod tests;
