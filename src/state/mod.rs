//! Job state
//!
//! Run-scoped store for everything the steps produce. Steps receive it
//! through the execution context, append entities and relationships, and
//! read earlier results back by key.
//!
//! # Overview
//!
//! - `JobState` - the store interface steps program against
//! - `InMemoryJobState` - the in-process implementation used by the runner
//! - `GraphSnapshot` - serializable hand-off of a finished (or failed) run

mod memory;
mod types;

pub use memory::InMemoryJobState;
pub use types::{load_entity, GraphSnapshot, JobState, JobStateSummary};

#[cfg(test)]
mod memory_tests;
