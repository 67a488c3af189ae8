//! Graph object types
//!
//! Field names follow the asset-graph wire format (`_key`, `_type`,
//! `_class`, ...) so a serialized run can be uploaded as is.

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed node in the output graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "_key")]
    pub key: String,

    #[serde(rename = "_type")]
    pub entity_type: String,

    #[serde(rename = "_class")]
    pub class: Vec<String>,

    #[serde(rename = "_rawData", default, skip_serializing_if = "Vec::is_empty")]
    pub raw_data: Vec<RawDataEntry>,

    #[serde(flatten)]
    pub properties: JsonObject,
}

impl Entity {
    /// Get a property value
    pub fn property(&self, name: &str) -> Option<&JsonValue> {
        self.properties.get(name)
    }

    /// Whether the entity carries the given class
    pub fn has_class(&self, class: &str) -> bool {
        self.class.iter().any(|c| c == class)
    }

    /// Display name, if set
    pub fn display_name(&self) -> Option<&str> {
        self.properties.get("displayName").and_then(JsonValue::as_str)
    }
}

/// Raw provider payload attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataEntry {
    pub name: String,
    #[serde(rename = "rawData")]
    pub raw_data: JsonValue,
}

/// Relationship classes used by this connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelationshipClass {
    Has,
    Connects,
}

impl RelationshipClass {
    /// Upper-case wire name (`HAS`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Has => "HAS",
            Self::Connects => "CONNECTS",
        }
    }

    /// Lower-case form used in keys and generated types (`has`)
    pub fn as_lower(self) -> &'static str {
        match self {
            Self::Has => "has",
            Self::Connects => "connects",
        }
    }
}

impl fmt::Display for RelationshipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a mapped relationship relative to its source entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelationshipDirection {
    #[default]
    Forward,
    Reverse,
}

impl RelationshipDirection {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "FORWARD",
            Self::Reverse => "REVERSE",
        }
    }
}

/// Edge between two entities materialized in this run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectRelationship {
    #[serde(rename = "_key")]
    pub key: String,

    #[serde(rename = "_type")]
    pub relationship_type: String,

    #[serde(rename = "_class")]
    pub class: RelationshipClass,

    #[serde(rename = "_fromEntityKey")]
    pub from_entity_key: String,

    #[serde(rename = "_toEntityKey")]
    pub to_entity_key: String,

    #[serde(flatten)]
    pub properties: JsonObject,
}

/// How an external reconciliation pass should find the target entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipMapping {
    pub source_entity_key: String,
    pub relationship_direction: RelationshipDirection,
    /// Each inner list is one alternative set of properties to match on
    pub target_filter_keys: Vec<Vec<String>>,
    pub target_entity: JsonObject,
    #[serde(default)]
    pub skip_target_creation: bool,
}

/// Edge whose target is resolved outside this crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedRelationship {
    #[serde(rename = "_key")]
    pub key: String,

    #[serde(rename = "_type")]
    pub relationship_type: String,

    #[serde(rename = "_class")]
    pub class: RelationshipClass,

    #[serde(rename = "_mapping")]
    pub mapping: RelationshipMapping,

    #[serde(flatten)]
    pub properties: JsonObject,
}

/// Any relationship the steps produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relationship {
    Mapped(MappedRelationship),
    Direct(DirectRelationship),
}

impl Relationship {
    /// Relationship key
    pub fn key(&self) -> &str {
        match self {
            Self::Direct(r) => &r.key,
            Self::Mapped(r) => &r.key,
        }
    }

    /// Relationship `_type`
    pub fn relationship_type(&self) -> &str {
        match self {
            Self::Direct(r) => &r.relationship_type,
            Self::Mapped(r) => &r.relationship_type,
        }
    }

    /// Relationship `_class`
    pub fn class(&self) -> RelationshipClass {
        match self {
            Self::Direct(r) => r.class,
            Self::Mapped(r) => r.class,
        }
    }

    /// Whether the target is resolved externally
    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }

    /// Get a property value
    pub fn property(&self, name: &str) -> Option<&JsonValue> {
        match self {
            Self::Direct(r) => r.properties.get(name),
            Self::Mapped(r) => r.properties.get(name),
        }
    }
}

impl From<DirectRelationship> for Relationship {
    fn from(relationship: DirectRelationship) -> Self {
        Self::Direct(relationship)
    }
}

impl From<MappedRelationship> for Relationship {
    fn from(relationship: MappedRelationship) -> Self {
        Self::Mapped(relationship)
    }
}
