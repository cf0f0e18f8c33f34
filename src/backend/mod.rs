//! Remote backend abstraction for user records.
//!
//! This module defines the narrow interface the user store consumes from a
//! remote backend-as-a-service, along with the error type those calls return.
//! Transport, auth and schema live behind the trait.

use async_trait::async_trait;

use crate::entities::user::{NewRemoteUser, User};
use crate::utils::merge::Patch;

/// Common error types for remote backend operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// Remote CRUD surface for user records.
///
/// Report counts are derived by the backend on every `get_all_with_counts`
/// call, so users returned from it carry live `report_count` values.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Returns the backend type identifier (e.g., "supabase").
    fn backend_type(&self) -> &str;

    /// Fetch every user with `report_count` computed from the remote reports table.
    async fn get_all_with_counts(&self) -> Result<Vec<User>, RemoteError>;

    /// Fetch a single user. `Ok(None)` and `Err(RemoteError::NotFound)` both mean absent.
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, RemoteError>;

    /// Insert a user; the backend assigns the identifier.
    async fn insert(&self, user: NewRemoteUser) -> Result<User, RemoteError>;

    async fn update(&self, id: &str, patch: &Patch) -> Result<User, RemoteError>;

    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}
