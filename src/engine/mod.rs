//! Step runner
//!
//! Validates the step declarations once, orders them by their dependencies
//! and executes them one at a time against a shared context.
//!
//! # Overview
//!
//! - `StepRunner` - dependency validation, ordering and execution
//! - `RunConfig` - optional restriction to a subset of steps
//! - `StepResult`, `RunSummary` - what each step and the whole run produced

mod types;

pub use types::{RunConfig, RunSummary, StepResult};

use crate::error::{Error, Result};
use crate::steps::{IntegrationStep, StepExecutionContext};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;
use tracing::{error, info};

/// Executes integration steps in dependency order
#[derive(Debug)]
pub struct StepRunner {
    steps: Vec<IntegrationStep>,
    /// Indexes into `steps`, topologically sorted
    order: Vec<usize>,
    config: RunConfig,
}

impl StepRunner {
    /// Create a runner, rejecting duplicate ids, unknown dependencies and cycles
    pub fn new(steps: Vec<IntegrationStep>) -> Result<Self> {
        let order = topological_order(&steps)?;
        Ok(Self {
            steps,
            order,
            config: RunConfig::default(),
        })
    }

    /// Set run configuration
    #[must_use]
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Declared steps in declaration order
    pub fn steps(&self) -> &[IntegrationStep] {
        &self.steps
    }

    /// Every step in execution order
    ///
    /// Among steps whose dependencies are satisfied, the one declared first
    /// runs first.
    pub fn execution_order(&self) -> Vec<&IntegrationStep> {
        self.order.iter().map(|&i| &self.steps[i]).collect()
    }

    /// Steps selected by the run configuration, in execution order
    pub fn planned_steps(&self) -> Result<Vec<&IntegrationStep>> {
        let Some(requested) = &self.config.steps else {
            return Ok(self.execution_order());
        };

        let index: HashMap<&str, usize> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.id, i))
            .collect();

        let mut selected = HashSet::new();
        let mut pending = Vec::new();
        for id in requested {
            let &i = index
                .get(id.as_str())
                .ok_or_else(|| Error::UnknownStep { step: id.clone() })?;
            pending.push(i);
        }

        while let Some(i) = pending.pop() {
            if selected.insert(i) {
                pending.extend(self.steps[i].depends_on.iter().map(|dep| index[dep]));
            }
        }

        Ok(self
            .order
            .iter()
            .filter(|i| selected.contains(*i))
            .map(|&i| &self.steps[i])
            .collect())
    }

    /// Run the planned steps, stopping at the first failure
    ///
    /// Whatever earlier steps wrote stays in the context's job state when a
    /// later step fails.
    pub async fn run(&self, context: &StepExecutionContext) -> Result<RunSummary> {
        let start = Instant::now();
        let planned = self.planned_steps()?;
        let job_state = context.job_state();
        let mut summary = RunSummary::default();

        info!("Running {} steps", planned.len());

        for step in planned {
            info!("Starting step {} ({})", step.id, step.name);
            let before = job_state.summary().await;
            let step_start = Instant::now();

            if let Err(e) = step.execute(context).await {
                error!("Step {} failed: {}", step.id, e);
                return Err(Error::step_failed(step.id, e));
            }

            let after = job_state.summary().await;
            let result = StepResult {
                id: step.id.to_string(),
                name: step.name.to_string(),
                duration: step_start.elapsed(),
                entities_added: after.entities - before.entities,
                relationships_added: after.relationships - before.relationships,
            };
            info!(
                "Finished step {}: {} entities, {} relationships in {:?}",
                result.id, result.entities_added, result.relationships_added, result.duration
            );
            summary.add_step(result);
        }

        let totals = job_state.summary().await;
        summary.total_entities = totals.entities;
        summary.total_relationships = totals.relationships;
        summary.merged_duplicates = totals.merged_duplicates;
        summary.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "Run complete: {} entities, {} relationships",
            summary.total_entities, summary.total_relationships
        );
        Ok(summary)
    }
}

/// Kahn's algorithm, always taking the earliest declared ready step
fn topological_order(steps: &[IntegrationStep]) -> Result<Vec<usize>> {
    let mut index = HashMap::new();
    for (i, step) in steps.iter().enumerate() {
        if index.insert(step.id, i).is_some() {
            return Err(Error::DuplicateStep {
                step: step.id.to_string(),
            });
        }
    }

    let mut remaining = vec![0usize; steps.len()];
    let mut dependents = vec![Vec::new(); steps.len()];
    for (i, step) in steps.iter().enumerate() {
        for dep in step.depends_on {
            let &d = index.get(dep).ok_or_else(|| Error::UnknownDependency {
                step: step.id.to_string(),
                dependency: (*dep).to_string(),
            })?;
            remaining[i] += 1;
            dependents[d].push(i);
        }
    }

    let mut ready: BTreeSet<usize> = (0..steps.len()).filter(|&i| remaining[i] == 0).collect();
    let mut order = Vec::with_capacity(steps.len());

    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &next in &dependents[i] {
            remaining[next] -= 1;
            if remaining[next] == 0 {
                ready.insert(next);
            }
        }
    }

    if order.len() < steps.len() {
        let cyclic = (0..steps.len())
            .filter(|i| remaining[*i] > 0)
            .map(|i| steps[i].id.to_string())
            .collect();
        return Err(Error::DependencyCycle { steps: cyclic });
    }

    Ok(order)
}
