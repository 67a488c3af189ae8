//! Engine types
//!
//! Run configuration and per-step results for the step runner.

use serde::Serialize;
use std::time::Duration;

/// Configuration for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Steps to run; `None` runs every step. Dependencies of the named steps
    /// are always included.
    pub steps: Option<Vec<String>>,
}

impl RunConfig {
    /// Run every declared step
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the run to these steps and their dependencies
    #[must_use]
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }
}

/// Outcome of one executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    /// Step id
    pub id: String,
    /// Human readable step name
    pub name: String,
    /// Wall time spent in the handler
    #[serde(serialize_with = "serialize_millis", rename = "durationMs")]
    pub duration: Duration,
    /// Entities the step added to job state
    pub entities_added: usize,
    /// Relationships the step added to job state
    pub relationships_added: usize,
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

/// Statistics from a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Per-step results in execution order
    pub steps: Vec<StepResult>,
    /// Entities in job state after the run
    pub total_entities: usize,
    /// Relationships in job state after the run
    pub total_relationships: usize,
    /// Writes merged into an existing key
    pub merged_duplicates: usize,
    /// Total duration in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    /// Number of executed steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Record a finished step
    pub fn add_step(&mut self, result: StepResult) {
        self.steps.push(result);
    }
}
