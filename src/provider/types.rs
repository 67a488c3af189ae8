//! Fastly API payload types
//!
//! Only the fields the steps read are typed. Everything else is kept in
//! `extra` so the raw payload survives serialization into `_rawData`.

use crate::types::JsonObject;
use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /customer/{customerId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FastlyAccount {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// `GET /current_user` and `GET /customer/{customerId}/users`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FastlyUser {
    pub id: String,
    /// Login is the user's email address
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub two_factor_auth_enabled: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// `GET /customer/{customerId}/tokens`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FastlyToken {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Space separated list of scopes
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// `GET /service`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FastlyService {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default, rename = "type")]
    pub service_type: Option<String>,
    /// Active configuration version
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// `GET /service/{id}/version/{version}/backend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FastlyServiceBackend {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// `GET /service/{id}/version/{version}/domain`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FastlyServiceDomain {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}
