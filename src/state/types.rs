//! Job state interface and snapshot types

use crate::error::{Error, Result};
use crate::graph::{Entity, Relationship};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Store for the entities, relationships and data produced during a run
///
/// The store is append-only. Adding an entity or relationship whose key is
/// already present keeps the first write.
#[async_trait]
pub trait JobState: Send + Sync {
    /// Add an entity
    async fn add_entity(&self, entity: Entity) -> Result<()>;

    /// Add a relationship
    async fn add_relationship(&self, relationship: Relationship) -> Result<()>;

    /// Look up an entity by `_key`
    async fn get_entity(&self, key: &str) -> Option<Entity>;

    /// Whether an entity or relationship with this key exists
    async fn has_key(&self, key: &str) -> bool;

    /// Store arbitrary data for later steps
    async fn set_data(&self, key: &str, value: JsonValue) -> Result<()>;

    /// Read data stored by an earlier step
    async fn get_data(&self, key: &str) -> Option<JsonValue>;

    /// Counts of what has been collected so far
    async fn summary(&self) -> JobStateSummary;

    /// Add several entities in order
    async fn add_entities(&self, entities: Vec<Entity>) -> Result<()> {
        for entity in entities {
            self.add_entity(entity).await?;
        }
        Ok(())
    }

    /// Add several relationships in order
    async fn add_relationships(&self, relationships: Vec<Relationship>) -> Result<()> {
        for relationship in relationships {
            self.add_relationship(relationship).await?;
        }
        Ok(())
    }
}

/// Read an entity that an earlier step stored as data under `key`
pub async fn load_entity(state: &dyn JobState, key: &str) -> Result<Entity> {
    let value = state
        .get_data(key)
        .await
        .ok_or_else(|| Error::missing_data(key))?;
    Ok(serde_json::from_value(value)?)
}

/// Counts of collected graph objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStateSummary {
    pub entities: usize,
    pub relationships: usize,
    /// Writes skipped because their key was already present
    pub merged_duplicates: usize,
}

/// Serializable content of a job state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
    pub encountered_types: Vec<String>,
}
