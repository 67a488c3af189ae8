//! Entity and relationship builders
//!
//! Keys are pure functions of the inputs: building the same entity or
//! relationship twice yields the same `_key`.

use super::types::{
    DirectRelationship, Entity, MappedRelationship, RawDataEntry, RelationshipClass,
    RelationshipDirection, RelationshipMapping,
};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use std::collections::BTreeMap;

/// Builder for [`Entity`]
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    key: String,
    entity_type: String,
    class: Vec<String>,
    raw_data: Vec<RawDataEntry>,
    properties: JsonObject,
}

impl EntityBuilder {
    /// Start an entity with its identity fields
    pub fn new(key: impl Into<String>, entity_type: impl Into<String>, class: &[&str]) -> Self {
        Self {
            key: key.into(),
            entity_type: entity_type.into(),
            class: class.iter().map(ToString::to_string).collect(),
            raw_data: Vec::new(),
            properties: JsonObject::new(),
        }
    }

    /// Attach the provider payload as the `default` raw data entry
    #[must_use]
    pub fn source(mut self, raw: JsonValue) -> Self {
        self.raw_data.push(RawDataEntry {
            name: "default".to_string(),
            raw_data: raw,
        });
        self
    }

    /// Set a property; `null` values are dropped at build time
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Merge a set of properties, overwriting existing names
    #[must_use]
    pub fn properties(mut self, properties: JsonObject) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Finish the entity
    pub fn build(self) -> Result<Entity> {
        if self.key.trim().is_empty() {
            return Err(Error::graph(format!(
                "entity of type '{}' has an empty key",
                self.entity_type
            )));
        }
        if self.entity_type.is_empty() {
            return Err(Error::graph(format!("entity '{}' has no _type", self.key)));
        }
        if self.class.is_empty() {
            return Err(Error::graph(format!("entity '{}' has no _class", self.key)));
        }

        let mut properties = self.properties;
        properties.retain(|_, v| !v.is_null());

        if !properties.contains_key("displayName") {
            let display_name = properties
                .get("name")
                .and_then(JsonValue::as_str)
                .map_or_else(|| self.key.clone(), ToString::to_string);
            properties.insert("displayName".to_string(), display_name.into());
        }

        Ok(Entity {
            key: self.key,
            entity_type: self.entity_type,
            class: self.class,
            raw_data: self.raw_data,
            properties,
        })
    }
}

/// Generate a relationship `_type` from its class and endpoint types
///
/// The segments the target type shares with the source type are dropped:
/// `fastly_service` + `fastly_service_backend` gives `fastly_service_has_backend`.
pub fn generate_relationship_type(
    class: RelationshipClass,
    from_type: &str,
    to_type: &str,
) -> String {
    let from_parts: Vec<&str> = from_type.split('_').collect();
    let to_parts: Vec<&str> = to_type.split('_').collect();

    let shared = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let target = if shared == 0 || shared == to_parts.len() {
        to_type.to_string()
    } else {
        to_parts[shared..].join("_")
    };

    format!("{from_type}_{}_{target}", class.as_lower())
}

/// Link two entities that both exist in this run
pub fn create_direct_relationship(
    class: RelationshipClass,
    from: &Entity,
    to: &Entity,
) -> DirectRelationship {
    let mut properties = JsonObject::new();
    properties.insert("displayName".to_string(), class.as_str().into());

    DirectRelationship {
        key: format!("{}|{}|{}", from.key, class.as_lower(), to.key),
        relationship_type: generate_relationship_type(class, &from.entity_type, &to.entity_type),
        class,
        from_entity_key: from.key.clone(),
        to_entity_key: to.key.clone(),
        properties,
    }
}

/// Inputs for [`create_mapped_relationship`]
#[derive(Debug, Clone)]
pub struct MappedRelationshipOptions {
    pub relationship_type: String,
    pub class: RelationshipClass,
    pub source_entity_key: String,
    pub direction: RelationshipDirection,
    pub target_filter_keys: Vec<Vec<String>>,
    pub target_entity: JsonObject,
    pub skip_target_creation: bool,
    pub properties: JsonObject,
}

impl MappedRelationshipOptions {
    /// Forward mapping from `source_entity_key` with no extra properties
    pub fn new(
        relationship_type: impl Into<String>,
        class: RelationshipClass,
        source_entity_key: impl Into<String>,
    ) -> Self {
        Self {
            relationship_type: relationship_type.into(),
            class,
            source_entity_key: source_entity_key.into(),
            direction: RelationshipDirection::Forward,
            target_filter_keys: Vec::new(),
            target_entity: JsonObject::new(),
            skip_target_creation: false,
            properties: JsonObject::new(),
        }
    }

    /// Add one alternative set of filter keys
    #[must_use]
    pub fn filter_keys(mut self, keys: &[&str]) -> Self {
        self.target_filter_keys
            .push(keys.iter().map(ToString::to_string).collect());
        self
    }

    /// Set a property on the target pointer
    #[must_use]
    pub fn target(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.target_entity.insert(name.into(), value.into());
        self
    }

    /// Do not synthesize a target when nothing matches
    #[must_use]
    pub fn skip_target_creation(mut self, skip: bool) -> Self {
        self.skip_target_creation = skip;
        self
    }

    /// Set a property on the relationship itself
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// Build a relationship whose target is resolved by filter keys downstream
pub fn create_mapped_relationship(options: MappedRelationshipOptions) -> Result<MappedRelationship> {
    if options.source_entity_key.trim().is_empty() {
        return Err(Error::graph(format!(
            "mapped relationship '{}' has no source entity key",
            options.relationship_type
        )));
    }
    if options.target_filter_keys.is_empty() {
        return Err(Error::graph(format!(
            "mapped relationship '{}' has no target filter keys",
            options.relationship_type
        )));
    }

    let mut target_entity = options.target_entity;
    target_entity.retain(|_, v| !v.is_null());

    let mut properties = options.properties;
    properties.retain(|_, v| !v.is_null());
    properties
        .entry("displayName")
        .or_insert_with(|| options.class.as_str().into());

    let key = format!(
        "{}|{}|{}:{}",
        options.source_entity_key,
        options.class.as_lower(),
        options.direction.as_str(),
        target_signature(&target_entity)
    );

    Ok(MappedRelationship {
        key,
        relationship_type: options.relationship_type,
        class: options.class,
        mapping: RelationshipMapping {
            source_entity_key: options.source_entity_key,
            relationship_direction: options.direction,
            target_filter_keys: options.target_filter_keys,
            target_entity,
            skip_target_creation: options.skip_target_creation,
        },
        properties,
    })
}

/// Sorted `name=value` pairs of the target pointer, joined with `:`
fn target_signature(target: &JsonObject) -> String {
    let sorted: BTreeMap<&String, &JsonValue> = target.iter().collect();
    sorted
        .into_iter()
        .map(|(name, value)| format!("{name}={}", signature_value(value)))
        .collect::<Vec<_>>()
        .join(":")
}

fn signature_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(signature_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
