//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::IntegrationConfig;
use crate::engine::{RunConfig, StepRunner};
use crate::error::Result;
use crate::provider::ApiClient;
use crate::state::{InMemoryJobState, JobState};
use crate::steps::{integration_steps, IntegrationStep, StepExecutionContext};
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Collect { steps, output } => self.collect(steps, output.as_deref()).await,
            Commands::Validate => self.validate().await,
            Commands::Document => {
                print!("{}", render_documentation(&integration_steps()));
                Ok(())
            }
        }
    }

    /// Resolve configuration: flags, then config file, then environment
    pub fn load_config(&self) -> Result<IntegrationConfig> {
        let mut config = match &self.cli.config {
            Some(path) => IntegrationConfig::from_file(path)?,
            None => IntegrationConfig::default(),
        };

        if let Some(token) = &self.cli.api_token {
            config.api_token.clone_from(token);
        }
        if let Some(customer_id) = &self.cli.customer_id {
            config.customer_id.clone_from(customer_id);
        }
        if let Some(base_url) = &self.cli.base_url {
            config.base_url = Some(base_url.clone());
        }

        let config = config.or(IntegrationConfig::from_env());
        config.validate()?;
        Ok(config)
    }

    /// Run the integration steps
    async fn collect(&self, steps: &[String], output: Option<&Path>) -> Result<()> {
        let config = self.load_config()?;

        let run_config = if steps.is_empty() {
            RunConfig::new()
        } else {
            RunConfig::new().with_steps(steps.iter().cloned())
        };
        let runner = StepRunner::new(integration_steps())?.with_config(run_config);

        let job_state = Arc::new(InMemoryJobState::new());
        let context = StepExecutionContext::new(config, job_state.clone());

        match runner.run(&context).await {
            Ok(summary) => {
                if let Some(path) = output {
                    job_state.save_to_file(path).await?;
                    info!("Wrote graph snapshot to {}", path.display());
                }
                self.output_message(&json!({
                    "type": "SUMMARY",
                    "summary": summary,
                }));
                Ok(())
            }
            Err(e) => {
                let partial = job_state.summary().await;
                warn!(
                    "Run aborted with {} entities and {} relationships collected",
                    partial.entities, partial.relationships
                );

                // Partial progress is still written; the step error wins
                if let Some(path) = output {
                    match job_state.save_to_file(path).await {
                        Ok(()) => info!("Wrote partial graph snapshot to {}", path.display()),
                        Err(save_err) => warn!(
                            "Failed to write partial graph snapshot to {}: {}",
                            path.display(),
                            save_err
                        ),
                    }
                }
                Err(e)
            }
        }
    }

    /// Validate configuration and credentials
    async fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = ApiClient::new(&config)?;
        client.verify_authentication().await?;

        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": "SUCCEEDED",
                "customerId": client.customer_id(),
            }
        }));
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Markdown tables of the entities and relationships the steps produce
pub fn render_documentation(steps: &[IntegrationStep]) -> String {
    let mut out = String::new();

    out.push_str("## Data Model\n\n### Entities\n\n");
    out.push_str("| Resources | Entity `_type` | Entity `_class` |\n");
    out.push_str("| --------- | -------------- | --------------- |\n");
    let mut entities: Vec<_> = steps.iter().flat_map(|s| s.entities.iter()).collect();
    entities.sort_by_key(|e| e.resource_name);
    for entity in entities {
        let _ = writeln!(
            out,
            "| {} | `{}` | `{}` |",
            entity.resource_name, entity.entity_type, entity.class
        );
    }

    out.push_str("\n### Relationships\n\n");
    out.push_str("| Source Entity `_type` | Relationship `_class` | Target Entity `_type` |\n");
    out.push_str("| --------------------- | --------------------- | --------------------- |\n");
    let mut relationships: Vec<_> = steps.iter().flat_map(|s| s.relationships.iter()).collect();
    relationships.sort_by_key(|r| (r.source_type, r.target_type));
    for relationship in relationships {
        let _ = writeln!(
            out,
            "| `{}` | **{}** | `{}` |",
            relationship.source_type, relationship.class, relationship.target_type
        );
    }

    out
}
