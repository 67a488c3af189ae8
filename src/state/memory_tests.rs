//! Tests for InMemoryJobState

use super::*;
use crate::graph::{
    create_direct_relationship, create_mapped_relationship, Entity, EntityBuilder,
    MappedRelationshipOptions, RelationshipClass,
};
use serde_json::json;
use tempfile::tempdir;

fn entity(key: &str, entity_type: &str) -> Entity {
    EntityBuilder::new(key, entity_type, &["Thing"])
        .property("name", key)
        .build()
        .unwrap()
}

// ============================================================================
// Entity Tests
// ============================================================================

#[tokio::test]
async fn test_add_and_get_entity() {
    let state = InMemoryJobState::new();
    state.add_entity(entity("a", "type_a")).await.unwrap();

    assert!(state.has_key("a").await);
    assert!(!state.has_key("b").await);
    assert_eq!(state.get_entity("a").await.unwrap().key, "a");
    assert!(state.get_entity("b").await.is_none());
}

#[tokio::test]
async fn test_duplicate_entity_keeps_first() {
    let state = InMemoryJobState::new();

    let first = EntityBuilder::new("dup", "type_a", &["Thing"])
        .property("name", "first")
        .build()
        .unwrap();
    let second = EntityBuilder::new("dup", "type_a", &["Thing"])
        .property("name", "second")
        .build()
        .unwrap();

    state.add_entity(first).await.unwrap();
    state.add_entity(second).await.unwrap();

    let collected = state.collected_entities().await;
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].display_name(), Some("first"));
    assert_eq!(state.summary().await.merged_duplicates, 1);
}

#[tokio::test]
async fn test_add_entities_preserves_order() {
    let state = InMemoryJobState::new();
    state
        .add_entities(vec![entity("c", "t"), entity("a", "t"), entity("b", "t")])
        .await
        .unwrap();

    let keys: Vec<String> = state
        .collected_entities()
        .await
        .into_iter()
        .map(|e| e.key)
        .collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
}

// ============================================================================
// Relationship Tests
// ============================================================================

#[tokio::test]
async fn test_relationships_and_encountered_types() {
    let state = InMemoryJobState::new();
    let account = entity("acct", "fastly_account");
    let service = entity("svc", "fastly_service");

    state.add_entity(account.clone()).await.unwrap();
    state.add_entity(service.clone()).await.unwrap();

    let direct = create_direct_relationship(RelationshipClass::Has, &account, &service);
    state.add_relationship(direct.clone().into()).await.unwrap();
    state.add_relationship(direct.into()).await.unwrap();

    let mapped = create_mapped_relationship(
        MappedRelationshipOptions::new(
            "fastly_service_connects_domain_record",
            RelationshipClass::Connects,
            "svc",
        )
        .filter_keys(&["_class", "name"])
        .target("_class", "DomainRecord")
        .target("name", "www.example.com"),
    )
    .unwrap();
    state.add_relationship(mapped.into()).await.unwrap();

    let summary = state.summary().await;
    assert_eq!(summary.entities, 2);
    assert_eq!(summary.relationships, 2);
    assert_eq!(summary.merged_duplicates, 1);

    assert_eq!(
        state.encountered_types().await,
        vec![
            "fastly_account",
            "fastly_account_has_service",
            "fastly_service",
            "fastly_service_connects_domain_record",
        ]
    );
}

#[tokio::test]
async fn test_key_shared_between_entity_and_relationship_is_rejected() {
    let state = InMemoryJobState::new();
    let a = entity("a", "t");
    let b = entity("b", "t");
    let relationship = create_direct_relationship(RelationshipClass::Has, &a, &b);
    let key = relationship.key.clone();

    state.add_relationship(relationship.into()).await.unwrap();

    let result = state.add_entity(entity(&key, "t")).await;
    assert!(matches!(result, Err(crate::Error::State { .. })));
}

// ============================================================================
// Data Tests
// ============================================================================

#[tokio::test]
async fn test_set_get_data() {
    let state = InMemoryJobState::new();
    assert!(state.get_data("missing").await.is_none());

    state.set_data("k", json!({"v": 1})).await.unwrap();
    assert_eq!(state.get_data("k").await, Some(json!({"v": 1})));
}

#[tokio::test]
async fn test_load_entity() {
    let state = InMemoryJobState::new();
    let account = entity("fastly-account:c1", "fastly_account");
    state
        .set_data("fastly-account:c1", serde_json::to_value(&account).unwrap())
        .await
        .unwrap();

    let loaded = load_entity(&state, "fastly-account:c1").await.unwrap();
    assert_eq!(loaded, account);

    let missing = load_entity(&state, "fastly-account:other").await;
    assert!(matches!(missing, Err(crate::Error::MissingData { .. })));
}

#[tokio::test]
async fn test_clone_shares_state() {
    let state = InMemoryJobState::new();
    let clone = state.clone();

    clone.add_entity(entity("a", "t")).await.unwrap();
    assert!(state.has_key("a").await);
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");

    let state = InMemoryJobState::new();
    state.add_entity(entity("a", "t")).await.unwrap();
    state.save_to_file(&path).await.unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());

    let contents = std::fs::read_to_string(&path).unwrap();
    let snapshot: GraphSnapshot = serde_json::from_str(&contents).unwrap();
    assert_eq!(snapshot, state.snapshot().await);
    assert_eq!(snapshot.encountered_types, vec!["t"]);
}

#[tokio::test]
async fn test_save_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("graph.json");

    let state = InMemoryJobState::new();
    let result = state.save_to_file(&path).await;
    assert!(matches!(result, Err(crate::Error::State { .. })));
}
