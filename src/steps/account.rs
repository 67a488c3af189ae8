//! Account step: the root of the step graph

use super::constants::{account_key, ACCOUNT_ENTITY, STEP_FETCH_ACCOUNT};
use super::{IntegrationStep, StepExecutionContext};
use crate::error::Result;
use crate::graph::{get_time, Entity, EntityBuilder};
use crate::provider::{ApiClient, FastlyAccount};
use futures::future::BoxFuture;
use tracing::{debug, info, warn};

/// Build the account entity for the configured customer
pub fn create_account_entity(customer_id: &str, account: &FastlyAccount) -> Result<Entity> {
    let name = account.name.clone().unwrap_or_else(|| account.id.clone());

    EntityBuilder::new(
        account_key(customer_id),
        ACCOUNT_ENTITY.entity_type,
        &[ACCOUNT_ENTITY.class],
    )
    .source(serde_json::to_value(account)?)
    .property("id", account.id.clone())
    .property("name", name.clone())
    .property("displayName", name)
    .property("ownerId", account.owner_id.clone())
    .property("createdOn", get_time(account.created_at.as_deref()))
    .property("updatedOn", get_time(account.updated_at.as_deref()))
    .property("deletedOn", get_time(account.deleted_at.as_deref()))
    .build()
}

/// Fetch the customer account and store it for the steps that depend on it
pub async fn fetch_account_details(context: &StepExecutionContext) -> Result<()> {
    let config = &context.config;
    let client = ApiClient::new(config)?;

    let account = client.get_account_details().await?;
    let current_user = client.get_current_user().await?;

    debug!(
        "Authenticated as user {} ({})",
        current_user.id,
        current_user.login.as_deref().unwrap_or("unknown login")
    );
    if let Some(customer_id) = current_user.customer_id.as_deref() {
        if customer_id != config.customer_id {
            warn!(
                "Token belongs to customer {} but customer {} is configured",
                customer_id, config.customer_id
            );
        }
    }

    let entity = create_account_entity(&config.customer_id, &account)?;
    let data_key = account_key(&config.customer_id);

    let job_state = context.job_state();
    job_state
        .set_data(&data_key, serde_json::to_value(&entity)?)
        .await?;
    job_state.add_entity(entity).await?;

    info!("Collected account {}", data_key);
    Ok(())
}

fn fetch_account_handler(context: &StepExecutionContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(fetch_account_details(context))
}

pub(super) fn account_steps() -> Vec<IntegrationStep> {
    vec![IntegrationStep {
        id: STEP_FETCH_ACCOUNT,
        name: "Fetch Account Details",
        entities: &[ACCOUNT_ENTITY],
        relationships: &[],
        depends_on: &[],
        execution_handler: fetch_account_handler,
    }]
}
