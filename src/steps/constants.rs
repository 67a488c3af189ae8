//! Step ids, graph types and key formats

use super::{StepEntityMetadata, StepRelationshipMetadata};
use crate::graph::RelationshipClass;

pub const STEP_FETCH_ACCOUNT: &str = "fetch-account";
pub const STEP_FETCH_USERS: &str = "fetch-users";
pub const STEP_FETCH_TOKENS: &str = "fetch-tokens";
pub const STEP_FETCH_SERVICES: &str = "fetch-services";

pub const ACCOUNT_ENTITY: StepEntityMetadata = StepEntityMetadata {
    resource_name: "Account",
    entity_type: "fastly_account",
    class: "Account",
};

pub const USER_ENTITY: StepEntityMetadata = StepEntityMetadata {
    resource_name: "User",
    entity_type: "fastly_user",
    class: "User",
};

pub const TOKEN_ENTITY: StepEntityMetadata = StepEntityMetadata {
    resource_name: "API Token",
    entity_type: "fastly_api_token",
    class: "AccessKey",
};

pub const SERVICE_ENTITY: StepEntityMetadata = StepEntityMetadata {
    resource_name: "Service",
    entity_type: "fastly_service",
    class: "Service",
};

pub const BACKEND_ENTITY: StepEntityMetadata = StepEntityMetadata {
    resource_name: "Service Backend",
    entity_type: "fastly_service_backend",
    class: "ApplicationEndpoint",
};

pub const ACCOUNT_HAS_USER: StepRelationshipMetadata = StepRelationshipMetadata {
    relationship_type: "fastly_account_has_user",
    class: RelationshipClass::Has,
    source_type: "fastly_account",
    target_type: "fastly_user",
};

pub const ACCOUNT_HAS_TOKEN: StepRelationshipMetadata = StepRelationshipMetadata {
    relationship_type: "fastly_account_has_api_token",
    class: RelationshipClass::Has,
    source_type: "fastly_account",
    target_type: "fastly_api_token",
};

pub const ACCOUNT_HAS_SERVICE: StepRelationshipMetadata = StepRelationshipMetadata {
    relationship_type: "fastly_account_has_service",
    class: RelationshipClass::Has,
    source_type: "fastly_account",
    target_type: "fastly_service",
};

pub const SERVICE_HAS_BACKEND: StepRelationshipMetadata = StepRelationshipMetadata {
    relationship_type: "fastly_service_has_backend",
    class: RelationshipClass::Has,
    source_type: "fastly_service",
    target_type: "fastly_service_backend",
};

pub const BACKEND_CONNECTS_HOST: StepRelationshipMetadata = StepRelationshipMetadata {
    relationship_type: "fastly_service_backend_connects_host",
    class: RelationshipClass::Connects,
    source_type: "fastly_service_backend",
    target_type: "Host or Gateway",
};

pub const SERVICE_CONNECTS_DOMAIN_RECORD: StepRelationshipMetadata = StepRelationshipMetadata {
    relationship_type: "fastly_service_connects_domain_record",
    class: RelationshipClass::Connects,
    source_type: "fastly_service",
    target_type: "DomainRecord",
};

/// `fastly-account:<customerId>`, also the job state data key of the account
pub fn account_key(customer_id: &str) -> String {
    format!("fastly-account:{customer_id}")
}

pub fn user_key(user_id: &str) -> String {
    format!("fastly-user:{user_id}")
}

pub fn token_key(token_id: &str) -> String {
    format!("fastly-api-token:{token_id}")
}

pub fn service_key(service_id: &str) -> String {
    format!("fastly-service:{service_id}")
}

/// Backends sharing an origin across services share this key
pub fn backend_key(hostname: Option<&str>, address: Option<&str>, port: Option<u16>) -> String {
    format!(
        "fastly-service-backend:{}:{}:{}",
        hostname.unwrap_or_default(),
        address.unwrap_or_default(),
        port.map(|p| p.to_string()).unwrap_or_default()
    )
}
