use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Workflow status of a civic report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "resolved_by_official", alias = "resolved-by-official")]
    ResolvedByOfficial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A single civic report as persisted in local storage.
///
/// Fields the store does not interpret (title, description, location, ...)
/// are kept in `extra` and written back untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub status: ReportStatus,
    pub priority: Priority,
    #[serde(default)]
    pub has_images: bool,
    pub email: String,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Report {
    /// Create a report with a random id, stamped with the current time.
    pub fn new(email: impl Into<String>, status: ReportStatus, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status,
            priority,
            has_images: false,
            email: email.into(),
            created_at: Some(Utc::now()),
            extra: Map::new(),
        }
    }

    /// Attach an additional descriptive field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
