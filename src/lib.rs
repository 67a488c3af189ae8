// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # Fastly Graph Ingest
//!
//! Collects a Fastly customer account into an asset graph: the account, its
//! users and API tokens, its services, the backends each service forwards to
//! and the domains each service answers for.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fastly_ingest::{
//!     engine::StepRunner, state::InMemoryJobState, steps::integration_steps,
//!     steps::StepExecutionContext, IntegrationConfig, Result,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = IntegrationConfig::from_env();
//!     let state = Arc::new(InMemoryJobState::new());
//!     let context = StepExecutionContext::new(config, state.clone());
//!
//!     let summary = StepRunner::new(integration_steps())?.run(&context).await?;
//!     println!("{} entities", summary.total_entities);
//!
//!     state.save_to_file("graph.json").await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         StepRunner                           │
//! │   fetch-account → fetch-users | fetch-tokens | fetch-services│
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────────────┼───────────────┬───────────────┐
//! │ Provider  │      HTTP        │     Graph     │   Job State   │
//! ├───────────┼──────────────────┼───────────────┼───────────────┤
//! │ ApiClient │ Fastly-Key auth  │ Entities      │ In-memory     │
//! │ Payloads  │ Uniform errors   │ Direct/Mapped │ JSON snapshot │
//! └───────────┴──────────────────┴───────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Integration instance configuration
pub mod config;

/// Authentication for outgoing requests
pub mod auth;

/// HTTP client with uniform provider errors
pub mod http;

/// Fastly API client and payload types
pub mod provider;

/// Entities, relationships and their builders
pub mod graph;

/// Job state
pub mod state;

/// Integration steps and the step registry
pub mod steps;

/// Step runner
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::IntegrationConfig;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
