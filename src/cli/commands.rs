//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fastly graph ingestion CLI
#[derive(Parser, Debug)]
#[command(name = "fastly-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Fastly API token (overrides config file and API_TOKEN)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// Fastly customer id (overrides config file and CUSTOMER_ID)
    #[arg(long, global = true)]
    pub customer_id: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the integration steps and collect the graph
    Collect {
        /// Step to run, together with its dependencies (repeatable, empty = all)
        #[arg(long = "step")]
        steps: Vec<String>,

        /// Write the collected graph to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration and the API credentials
    Validate,

    /// Print the entities and relationships each step produces
    Document,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
