//! CLI module
//!
//! Command-line interface for running the integration.
//!
//! # Commands
//!
//! - `collect` - Run the steps and optionally write the graph snapshot
//! - `validate` - Check configuration and credentials
//! - `document` - Print the step registry as Markdown tables

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{render_documentation, Runner};
