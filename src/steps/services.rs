//! Services step: services, their backends and their domains
//!
//! Services are processed one after another in API order. Backend keys are
//! derived from the origin (hostname, address, port) only, so two services
//! pointing at the same origin share one backend entity.

use super::constants::{
    account_key, backend_key, service_key, ACCOUNT_HAS_SERVICE, BACKEND_CONNECTS_HOST,
    BACKEND_ENTITY, SERVICE_CONNECTS_DOMAIN_RECORD, SERVICE_ENTITY, SERVICE_HAS_BACKEND,
    STEP_FETCH_ACCOUNT, STEP_FETCH_SERVICES,
};
use super::{IntegrationStep, StepExecutionContext};
use crate::error::Result;
use crate::graph::{
    convert_properties, create_direct_relationship, create_mapped_relationship, get_time, Entity,
    EntityBuilder, MappedRelationship, MappedRelationshipOptions, RelationshipClass,
};
use crate::provider::{ApiClient, FastlyService, FastlyServiceBackend, FastlyServiceDomain};
use crate::state::{load_entity, JobState};
use futures::future::BoxFuture;
use serde_json::json;
use tracing::{debug, info};

pub fn create_service_entity(service: &FastlyService) -> Result<Entity> {
    EntityBuilder::new(
        service_key(&service.id),
        SERVICE_ENTITY.entity_type,
        &[SERVICE_ENTITY.class],
    )
    .source(serde_json::to_value(service)?)
    .property("id", service.id.clone())
    .property(
        "displayName",
        service.name.clone().unwrap_or_else(|| service.id.clone()),
    )
    .property("name", service.name.clone())
    .property("category", json!(["infrastructure"]))
    .property("description", service.comment.clone())
    .property("version", service.version)
    .property("serviceType", service.service_type.clone())
    .property("createdOn", get_time(service.created_at.as_deref()))
    .property("updatedOn", get_time(service.updated_at.as_deref()))
    .build()
}

pub fn create_backend_entity(backend: &FastlyServiceBackend) -> Result<Entity> {
    let raw = serde_json::to_value(backend)?;
    let display_name = backend
        .name
        .clone()
        .or_else(|| backend.hostname.clone())
        .or_else(|| backend.address.clone());

    EntityBuilder::new(
        backend_key(
            backend.hostname.as_deref(),
            backend.address.as_deref(),
            backend.port,
        ),
        BACKEND_ENTITY.entity_type,
        &[BACKEND_ENTITY.class],
    )
    .properties(convert_properties(&raw))
    .source(raw)
    .property("displayName", display_name)
    .property("description", backend.comment.clone())
    .property("ipAddress", backend.address.clone())
    .property("createdOn", get_time(backend.created_at.as_deref()))
    .property("updatedOn", get_time(backend.updated_at.as_deref()))
    .property("deletedOn", get_time(backend.deleted_at.as_deref()))
    .build()
}

/// Pointer from a backend to the Host or Gateway serving its origin
pub fn create_backend_connects_host_relationship(
    backend_entity: &Entity,
    backend: &FastlyServiceBackend,
) -> Result<MappedRelationship> {
    create_mapped_relationship(
        MappedRelationshipOptions::new(
            BACKEND_CONNECTS_HOST.relationship_type,
            RelationshipClass::Connects,
            backend_entity.key.clone(),
        )
        .filter_keys(&["_class", "ipAddress"])
        .filter_keys(&["_class", "hostname"])
        .target("_class", json!(["Host", "Gateway"]))
        .target("ipAddress", backend.address.clone())
        .target("hostname", backend.hostname.clone())
        .skip_target_creation(true),
    )
}

/// Pointer from a service to the DNS record of one of its domains
pub fn create_service_connects_domain_relationship(
    service_entity: &Entity,
    domain: &FastlyServiceDomain,
) -> Result<MappedRelationship> {
    create_mapped_relationship(
        MappedRelationshipOptions::new(
            SERVICE_CONNECTS_DOMAIN_RECORD.relationship_type,
            RelationshipClass::Connects,
            service_entity.key.clone(),
        )
        .filter_keys(&["_class", "name"])
        .target("_class", "DomainRecord")
        .target("name", domain.name.clone())
        .property("description", domain.comment.clone())
        .property("locked", domain.locked)
        .property("createdOn", get_time(domain.created_at.as_deref()))
        .property("updatedOn", get_time(domain.updated_at.as_deref()))
        .property("deletedOn", get_time(domain.deleted_at.as_deref())),
    )
}

/// Collect every service together with its backends and domains
pub async fn fetch_services(context: &StepExecutionContext) -> Result<()> {
    let client = ApiClient::new(&context.config)?;
    let job_state = context.job_state();
    let account = load_entity(job_state, &account_key(&context.config.customer_id)).await?;
    let account = &account;
    let client_ref = &client;

    let mut count = 0usize;
    client
        .iterate_services(|service| {
            count += 1;
            async move { collect_service(client_ref, job_state, account, service).await }
        })
        .await?;

    info!("Collected {} services", count);
    Ok(())
}

async fn collect_service(
    client: &ApiClient,
    job_state: &dyn JobState,
    account: &Entity,
    service: FastlyService,
) -> Result<()> {
    let service_entity = create_service_entity(&service)?;

    tokio::try_join!(
        job_state.add_entity(service_entity.clone()),
        job_state.add_relationship(
            create_direct_relationship(RelationshipClass::Has, account, &service_entity).into()
        ),
    )?;

    let backends = client
        .get_service_backends(&service.id, service.version)
        .await?;
    debug!(
        "Service {} version {} has {} backends",
        service.id,
        service.version,
        backends.len()
    );

    for backend in &backends {
        let backend_entity = create_backend_entity(backend)?;
        let has_backend =
            create_direct_relationship(RelationshipClass::Has, &service_entity, &backend_entity);
        let connects_host = create_backend_connects_host_relationship(&backend_entity, backend)?;

        tokio::try_join!(
            job_state.add_entity(backend_entity),
            job_state.add_relationship(has_backend.into()),
            job_state.add_relationship(connects_host.into()),
        )?;
    }

    let domains = client
        .get_service_domains(&service.id, service.version)
        .await?;
    debug!(
        "Service {} version {} has {} domains",
        service.id,
        service.version,
        domains.len()
    );

    for domain in &domains {
        let relationship = create_service_connects_domain_relationship(&service_entity, domain)?;
        job_state.add_relationship(relationship.into()).await?;
    }

    Ok(())
}

fn fetch_services_handler(context: &StepExecutionContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(fetch_services(context))
}

pub(super) fn service_steps() -> Vec<IntegrationStep> {
    vec![IntegrationStep {
        id: STEP_FETCH_SERVICES,
        name: "Fetch Services",
        entities: &[SERVICE_ENTITY, BACKEND_ENTITY],
        relationships: &[
            ACCOUNT_HAS_SERVICE,
            SERVICE_HAS_BACKEND,
            BACKEND_CONNECTS_HOST,
            SERVICE_CONNECTS_DOMAIN_RECORD,
        ],
        depends_on: &[STEP_FETCH_ACCOUNT],
        execution_handler: fetch_services_handler,
    }]
}
