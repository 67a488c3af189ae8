//! Graph model
//!
//! Entities and relationships produced by the steps, plus the helpers that
//! build them with deterministic keys.
//!
//! # Overview
//!
//! - `Entity` - typed node with `_key`, `_type`, `_class` and properties
//! - `Relationship` - either a `Direct` edge between two known entities or a
//!   `Mapped` edge whose target is resolved later by filter keys
//! - `EntityBuilder`, `create_direct_relationship`, `create_mapped_relationship`
//! - `get_time`, `convert_properties` - property normalization

mod builders;
mod convert;
mod types;

pub use builders::{
    create_direct_relationship, create_mapped_relationship, generate_relationship_type,
    EntityBuilder, MappedRelationshipOptions,
};
pub use convert::{convert_properties, get_time};
pub use types::{
    DirectRelationship, Entity, MappedRelationship, RawDataEntry, Relationship,
    RelationshipClass, RelationshipDirection, RelationshipMapping,
};
