//! Access steps: users and API tokens of the account

use super::constants::{
    account_key, token_key, user_key, ACCOUNT_HAS_TOKEN, ACCOUNT_HAS_USER, STEP_FETCH_ACCOUNT,
    STEP_FETCH_TOKENS, STEP_FETCH_USERS, TOKEN_ENTITY, USER_ENTITY,
};
use super::{IntegrationStep, StepExecutionContext};
use crate::error::Result;
use crate::graph::{create_direct_relationship, get_time, Entity, EntityBuilder, RelationshipClass};
use crate::provider::{ApiClient, FastlyToken, FastlyUser};
use crate::state::load_entity;
use futures::future::BoxFuture;
use tracing::info;

pub fn create_user_entity(user: &FastlyUser) -> Result<Entity> {
    let name = user
        .name
        .clone()
        .or_else(|| user.login.clone())
        .unwrap_or_else(|| user.id.clone());

    EntityBuilder::new(user_key(&user.id), USER_ENTITY.entity_type, &[USER_ENTITY.class])
        .source(serde_json::to_value(user)?)
        .property("id", user.id.clone())
        .property("name", name.clone())
        .property("displayName", name)
        .property("username", user.login.clone())
        .property("email", user.login.clone())
        .property("role", user.role.clone())
        .property("active", !user.locked.unwrap_or(false))
        .property("mfaEnabled", user.two_factor_auth_enabled)
        .property("createdOn", get_time(user.created_at.as_deref()))
        .property("updatedOn", get_time(user.updated_at.as_deref()))
        .property("deletedOn", get_time(user.deleted_at.as_deref()))
        .build()
}

pub fn create_token_entity(token: &FastlyToken) -> Result<Entity> {
    let name = token.name.clone().unwrap_or_else(|| token.id.clone());

    EntityBuilder::new(
        token_key(&token.id),
        TOKEN_ENTITY.entity_type,
        &[TOKEN_ENTITY.class],
    )
    .source(serde_json::to_value(token)?)
    .property("id", token.id.clone())
    .property("name", name.clone())
    .property("displayName", name)
    .property("userId", token.user_id.clone())
    .property("scope", token.scope.clone())
    .property("services", token.services.clone())
    .property("ip", token.ip.clone())
    .property("createdOn", get_time(token.created_at.as_deref()))
    .property("lastUsedOn", get_time(token.last_used_at.as_deref()))
    .property("expiresOn", get_time(token.expires_at.as_deref()))
    .build()
}

/// Collect every user and link it to the account
pub async fn fetch_users(context: &StepExecutionContext) -> Result<()> {
    let client = ApiClient::new(&context.config)?;
    let job_state = context.job_state();
    let account = load_entity(job_state, &account_key(&context.config.customer_id)).await?;
    let account = &account;

    let mut count = 0usize;
    client
        .iterate_users(|user| {
            count += 1;
            async move {
                let user_entity = create_user_entity(&user)?;
                let relationship =
                    create_direct_relationship(RelationshipClass::Has, account, &user_entity);

                job_state.add_entity(user_entity).await?;
                job_state.add_relationship(relationship.into()).await
            }
        })
        .await?;

    info!("Collected {} users", count);
    Ok(())
}

/// Collect every API token and link it to the account
pub async fn fetch_tokens(context: &StepExecutionContext) -> Result<()> {
    let client = ApiClient::new(&context.config)?;
    let job_state = context.job_state();
    let account = load_entity(job_state, &account_key(&context.config.customer_id)).await?;
    let account = &account;

    let mut count = 0usize;
    client
        .iterate_tokens(|token| {
            count += 1;
            async move {
                let token_entity = create_token_entity(&token)?;
                let relationship =
                    create_direct_relationship(RelationshipClass::Has, account, &token_entity);

                job_state.add_entity(token_entity).await?;
                job_state.add_relationship(relationship.into()).await
            }
        })
        .await?;

    info!("Collected {} API tokens", count);
    Ok(())
}

fn fetch_users_handler(context: &StepExecutionContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(fetch_users(context))
}

fn fetch_tokens_handler(context: &StepExecutionContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(fetch_tokens(context))
}

pub(super) fn access_steps() -> Vec<IntegrationStep> {
    vec![
        IntegrationStep {
            id: STEP_FETCH_USERS,
            name: "Fetch Users",
            entities: &[USER_ENTITY],
            relationships: &[ACCOUNT_HAS_USER],
            depends_on: &[STEP_FETCH_ACCOUNT],
            execution_handler: fetch_users_handler,
        },
        IntegrationStep {
            id: STEP_FETCH_TOKENS,
            name: "Fetch API Tokens",
            entities: &[TOKEN_ENTITY],
            relationships: &[ACCOUNT_HAS_TOKEN],
            depends_on: &[STEP_FETCH_ACCOUNT],
            execution_handler: fetch_tokens_handler,
        },
    ]
}
