//! Integration steps
//!
//! Each step fetches one family of Fastly resources and writes entities and
//! relationships into job state. The registry below declares what every
//! step produces and which steps must run before it; ordering and execution
//! are left to [`crate::engine::StepRunner`].

mod access;
mod account;
pub mod constants;
mod services;

pub use access::{create_token_entity, create_user_entity, fetch_tokens, fetch_users};
pub use account::{create_account_entity, fetch_account_details};
pub use services::{
    create_backend_connects_host_relationship, create_backend_entity,
    create_service_connects_domain_relationship, create_service_entity, fetch_services,
};

use crate::config::IntegrationConfig;
use crate::error::Result;
use crate::graph::RelationshipClass;
use crate::state::JobState;
use futures::future::BoxFuture;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Everything a step handler can reach
#[derive(Clone)]
pub struct StepExecutionContext {
    /// Validated instance configuration
    pub config: IntegrationConfig,
    /// Shared job state for the run
    pub job_state: Arc<dyn JobState>,
}

impl StepExecutionContext {
    /// Create a context
    pub fn new(config: IntegrationConfig, job_state: Arc<dyn JobState>) -> Self {
        Self { config, job_state }
    }

    /// Job state as a trait object
    pub fn job_state(&self) -> &dyn JobState {
        self.job_state.as_ref()
    }
}

impl fmt::Debug for StepExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepExecutionContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Executable body of a step
pub type StepHandler = for<'a> fn(&'a StepExecutionContext) -> BoxFuture<'a, Result<()>>;

/// Entity type produced by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEntityMetadata {
    pub resource_name: &'static str,
    #[serde(rename = "_type")]
    pub entity_type: &'static str,
    #[serde(rename = "_class")]
    pub class: &'static str,
}

/// Relationship type produced by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRelationshipMetadata {
    #[serde(rename = "_type")]
    pub relationship_type: &'static str,
    #[serde(rename = "_class")]
    pub class: RelationshipClass,
    pub source_type: &'static str,
    pub target_type: &'static str,
}

/// Declaration of one step
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStep {
    pub id: &'static str,
    pub name: &'static str,
    pub entities: &'static [StepEntityMetadata],
    pub relationships: &'static [StepRelationshipMetadata],
    pub depends_on: &'static [&'static str],
    #[serde(skip)]
    pub execution_handler: StepHandler,
}

impl IntegrationStep {
    /// Run the step's handler
    pub async fn execute(&self, context: &StepExecutionContext) -> Result<()> {
        (self.execution_handler)(context).await
    }
}

impl fmt::Debug for IntegrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrationStep")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

/// All steps of the integration, in declaration order
pub fn integration_steps() -> Vec<IntegrationStep> {
    let mut steps = account::account_steps();
    steps.extend(access::access_steps());
    steps.extend(services::service_steps());
    steps
}
