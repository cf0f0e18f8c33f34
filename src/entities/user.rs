use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_ROLE;

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// A registered user. `email` is the join key to reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub join_date: Option<DateTime<Utc>>,
    /// Derived from reports; only a snapshot when stored locally.
    #[serde(default)]
    pub report_count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller input for adding a user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Build the locally persisted record, stamping `join_date` and zeroing the count.
    pub fn into_local(self, id: String, joined: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role.unwrap_or_else(default_role),
            join_date: Some(joined),
            report_count: 0,
            extra: self.extra,
        }
    }
}

/// Row shape sent to the remote backend on insert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewRemoteUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "reportCount")]
    pub report_count: u32,
}

impl NewRemoteUser {
    pub fn from_new_user(user: &NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone().unwrap_or_else(default_role),
            created_at,
            report_count: 0,
        }
    }
}
