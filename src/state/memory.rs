//! In-memory job state
//!
//! Holds the run's graph in memory and can write it out as a JSON snapshot
//! with an atomic temp-file-and-rename.

use super::types::{GraphSnapshot, JobState, JobStateSummary};
use crate::error::{Error, Result};
use crate::graph::{Entity, Relationship};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Inner {
    entities: Vec<Entity>,
    entity_index: HashMap<String, usize>,
    relationships: Vec<Relationship>,
    relationship_keys: HashSet<String>,
    data: HashMap<String, JsonValue>,
    encountered_types: BTreeSet<String>,
    merged_duplicates: usize,
}

/// Job state kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryJobState {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryJobState {
    /// Create an empty job state
    pub fn new() -> Self {
        Self::default()
    }

    /// All entities in insertion order
    pub async fn collected_entities(&self) -> Vec<Entity> {
        self.inner.read().await.entities.clone()
    }

    /// All relationships in insertion order
    pub async fn collected_relationships(&self) -> Vec<Relationship> {
        self.inner.read().await.relationships.clone()
    }

    /// Sorted set of `_type`s seen so far
    pub async fn encountered_types(&self) -> Vec<String> {
        self.inner
            .read()
            .await
            .encountered_types
            .iter()
            .cloned()
            .collect()
    }

    /// Copy of the collected graph
    pub async fn snapshot(&self) -> GraphSnapshot {
        let inner = self.inner.read().await;
        GraphSnapshot {
            entities: inner.entities.clone(),
            relationships: inner.relationships.clone(),
            encountered_types: inner.encountered_types.iter().cloned().collect(),
        }
    }

    /// Export the collected graph as pretty-printed JSON
    pub async fn to_json_pretty(&self) -> Result<String> {
        let snapshot = self.snapshot().await;
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::State {
            message: format!("Failed to serialize job state: {e}"),
        })
    }

    /// Write the collected graph to a file
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents = self.to_json_pretty().await?;

        // Write to temp file first, then rename for atomicity
        let path = path.as_ref();
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::State {
                message: format!("Failed to write job state file: {e}"),
            })?;

        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| Error::State {
                message: format!("Failed to rename job state file: {e}"),
            })?;

        debug!("Wrote job state to {}", path.display());
        Ok(())
    }
}

impl Clone for InMemoryJobState {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl JobState for InMemoryJobState {
    async fn add_entity(&self, entity: Entity) -> Result<()> {
        let mut inner = self.inner.write().await;

        if inner.entity_index.contains_key(&entity.key) {
            warn!("Entity key already collected, keeping first: {}", entity.key);
            inner.merged_duplicates += 1;
            return Ok(());
        }
        if inner.relationship_keys.contains(&entity.key) {
            return Err(Error::state(format!(
                "Key '{}' is already used by a relationship",
                entity.key
            )));
        }

        inner.encountered_types.insert(entity.entity_type.clone());
        let index = inner.entities.len();
        inner.entity_index.insert(entity.key.clone(), index);
        inner.entities.push(entity);
        Ok(())
    }

    async fn add_relationship(&self, relationship: Relationship) -> Result<()> {
        let mut inner = self.inner.write().await;
        let key = relationship.key().to_string();

        if inner.relationship_keys.contains(&key) {
            debug!("Relationship key already collected, keeping first: {}", key);
            inner.merged_duplicates += 1;
            return Ok(());
        }
        if inner.entity_index.contains_key(&key) {
            return Err(Error::state(format!(
                "Key '{key}' is already used by an entity"
            )));
        }

        inner
            .encountered_types
            .insert(relationship.relationship_type().to_string());
        inner.relationship_keys.insert(key);
        inner.relationships.push(relationship);
        Ok(())
    }

    async fn get_entity(&self, key: &str) -> Option<Entity> {
        let inner = self.inner.read().await;
        inner
            .entity_index
            .get(key)
            .map(|&index| inner.entities[index].clone())
    }

    async fn has_key(&self, key: &str) -> bool {
        let inner = self.inner.read().await;
        inner.entity_index.contains_key(key) || inner.relationship_keys.contains(key)
    }

    async fn set_data(&self, key: &str, value: JsonValue) -> Result<()> {
        self.inner.write().await.data.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_data(&self, key: &str) -> Option<JsonValue> {
        self.inner.read().await.data.get(key).cloned()
    }

    async fn summary(&self) -> JobStateSummary {
        let inner = self.inner.read().await;
        JobStateSummary {
            entities: inner.entities.len(),
            relationships: inner.relationships.len(),
            merged_duplicates: inner.merged_duplicates,
        }
    }
}
