//! User record store with a local or remote-with-fallback repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{error, info, warn};
use serde::Serialize;

use super::report::ReportRecordStore;
use crate::backend::{RemoteBackend, RemoteError};
use crate::constants::{DEFAULT_ROLE, DEFAULT_USERS, LOCAL_USER_ID_PREFIX, USERS_COLLECTION, USERS_STORAGE_KEY};
use crate::entities::{NewRemoteUser, NewUser, User};
use crate::error::StoreResult;
use crate::storage::{KeyValueStore, LocalCollection};
use crate::utils::datetime;
use crate::utils::merge::Patch;

/// Persistence strategy for user records.
///
/// Chosen once when a [`UserRecordStore`] is built; callers never branch on
/// which backend is active.
#[async_trait]
pub trait UserRepository: Send + Sync {
    fn is_remote(&self) -> bool;

    /// Load every user. Never fails; unreadable data yields an empty list.
    async fn load_all(&self) -> Vec<User>;

    async fn add(&self, user: NewUser) -> StoreResult<()>;

    async fn update(&self, id: &str, patch: &Patch) -> StoreResult<()>;

    async fn delete(&self, id: &str) -> StoreResult<()>;

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Refresh derived `report_count` values.
    async fn recompute_report_counts(&self) -> StoreResult<()>;
}

/// Users kept in local storage, appended oldest-first.
#[derive(Clone)]
pub struct LocalUserRepository {
    users: LocalCollection<User>,
    reports: ReportRecordStore,
}

impl LocalUserRepository {
    pub fn new(storage: Arc<dyn KeyValueStore>, reports: ReportRecordStore) -> Self {
        Self::with_key(storage, USERS_STORAGE_KEY, reports)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>, reports: ReportRecordStore) -> Self {
        Self {
            users: LocalCollection::new(storage, key, USERS_COLLECTION),
            reports,
        }
    }

    pub fn key(&self) -> &str {
        self.users.key()
    }

    pub fn load_local(&self) -> Vec<User> {
        self.users.load_all()
    }

    pub fn save_local(&self, users: &[User]) -> StoreResult<()> {
        self.users.save_all(users)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.users.clear()
    }

    /// Seed the placeholder users if the local collection is empty.
    /// Unreadable stored data is left alone and reported as an error.
    ///
    /// Returns `true` when seeding happened.
    pub fn seed_defaults(&self) -> StoreResult<bool> {
        if !self.users.try_load_all()?.is_empty() {
            return Ok(false);
        }

        let now = Utc::now();
        let defaults: Vec<User> = DEFAULT_USERS
            .iter()
            .map(|(id, name, email)| User {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role: DEFAULT_ROLE.to_string(),
                join_date: Some(now),
                report_count: 0,
                extra: Default::default(),
            })
            .collect();

        self.save_local(&defaults)?;
        info!("Seeded {} default users", defaults.len());
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for LocalUserRepository {
    fn is_remote(&self) -> bool {
        false
    }

    async fn load_all(&self) -> Vec<User> {
        self.load_local()
    }

    async fn add(&self, user: NewUser) -> StoreResult<()> {
        self.users
            .append(user.into_local(datetime::time_based_id(LOCAL_USER_ID_PREFIX), Utc::now()))
    }

    async fn update(&self, id: &str, patch: &Patch) -> StoreResult<()> {
        self.users.update(id, patch).map(|_| ())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.users.delete(id)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.find(id))
    }

    /// Recounts every user against the local reports, regardless of which
    /// user triggered the call.
    async fn recompute_report_counts(&self) -> StoreResult<()> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for report in self.reports.try_load_all()? {
            *counts.entry(report.email).or_default() += 1;
        }

        self.users.modify_all(|user| {
            user.report_count = counts.get(&user.email).copied().unwrap_or(0);
        })
    }
}

/// Users served by a remote backend, with reads falling back to local storage.
///
/// Write failures are reported to the caller and never replayed locally.
pub struct RemoteUserRepository {
    remote: Arc<dyn RemoteBackend>,
    fallback: LocalUserRepository,
}

impl RemoteUserRepository {
    pub fn new(remote: Arc<dyn RemoteBackend>, fallback: LocalUserRepository) -> Self {
        Self { remote, fallback }
    }
}

#[async_trait]
impl UserRepository for RemoteUserRepository {
    fn is_remote(&self) -> bool {
        true
    }

    async fn load_all(&self) -> Vec<User> {
        match self.remote.get_all_with_counts().await {
            Ok(users) => {
                info!("Loaded {} users from {}", users.len(), self.remote.backend_type());
                users
            }
            Err(e) => {
                warn!("Remote error, falling back to local storage: {}", e);
                self.fallback.load_local()
            }
        }
    }

    /// Inserts remotely; the assigned id is discarded, so callers re-fetch to learn it.
    async fn add(&self, user: NewUser) -> StoreResult<()> {
        let row = NewRemoteUser::from_new_user(&user, Utc::now());
        let saved = self.remote.insert(row).await.inspect_err(|e| {
            error!("Error saving user to {}: {}", self.remote.backend_type(), e);
        })?;
        info!("User saved to {}: {}", self.remote.backend_type(), saved.id);
        Ok(())
    }

    async fn update(&self, id: &str, patch: &Patch) -> StoreResult<()> {
        self.remote.update(id, patch).await.inspect_err(|e| {
            error!("Error updating user {} in {}: {}", id, self.remote.backend_type(), e);
        })?;
        info!("User updated in {}: {}", self.remote.backend_type(), id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.remote.delete(id).await.inspect_err(|e| {
            error!("Error deleting user {} from {}: {}", id, self.remote.backend_type(), e);
        })?;
        info!("User deleted from {}: {}", self.remote.backend_type(), id);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        match self.remote.get_by_id(id).await {
            Ok(user) => Ok(user),
            Err(RemoteError::NotFound(_)) => Ok(None),
            Err(e) => {
                error!("Error getting user {} from {}: {}", id, self.remote.backend_type(), e);
                Err(e.into())
            }
        }
    }

    async fn recompute_report_counts(&self) -> StoreResult<()> {
        info!("Report counts are computed by {} on every read", self.remote.backend_type());
        Ok(())
    }
}

/// Aggregate figures over all users.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
    pub total_reports: u64,
    /// Mean reports per user, one decimal place.
    pub average_reports_per_user: String,
    /// Highest `report_count`; the earliest such user on ties.
    pub most_active_user: Option<User>,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        let total_reports: u64 = users.iter().map(|u| u64::from(u.report_count)).sum();
        let average = if users.is_empty() {
            0.0
        } else {
            total_reports as f64 / users.len() as f64
        };
        // Half-up at one decimal; `{:.1}` alone rounds ties to even.
        let average = (average * 10.0).round() / 10.0;

        let most_active_user = users
            .iter()
            .fold(None::<&User>, |best, user| match best {
                Some(best) if best.report_count >= user.report_count => Some(best),
                _ => Some(user),
            })
            .cloned();

        Self {
            total_users: users.len(),
            total_reports,
            average_reports_per_user: format!("{:.1}", average),
            most_active_user,
        }
    }
}

/// Store for user records.
///
/// The repository is picked at construction: remote-with-fallback when the
/// remote flag is on and a backend is supplied, local otherwise. A local store
/// seeds three placeholder users the first time it finds itself empty.
pub struct UserRecordStore {
    repository: Box<dyn UserRepository>,
    local: LocalUserRepository,
}

impl UserRecordStore {
    pub fn new(local: LocalUserRepository, remote: Option<Arc<dyn RemoteBackend>>, use_remote: bool) -> Self {
        match remote.filter(|_| use_remote) {
            Some(remote) => {
                info!("Using {} backend for users", remote.backend_type());
                Self {
                    repository: Box::new(RemoteUserRepository::new(remote, local.clone())),
                    local,
                }
            }
            None => {
                if let Err(e) = local.seed_defaults() {
                    error!("Error seeding default users: {}", e);
                }
                Self {
                    repository: Box::new(local.clone()),
                    local,
                }
            }
        }
    }

    /// Local-only store.
    pub fn local(local: LocalUserRepository) -> Self {
        Self::new(local, None, false)
    }

    pub fn is_remote(&self) -> bool {
        self.repository.is_remote()
    }

    pub async fn load_all(&self) -> Vec<User> {
        self.repository.load_all().await
    }

    pub async fn add(&self, user: NewUser) -> StoreResult<()> {
        self.repository.add(user).await
    }

    /// Shallow-merge `patch` over the user with `id`.
    pub async fn update(&self, id: &str, patch: &Patch) -> StoreResult<()> {
        self.repository.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.repository.delete(id).await
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.repository.get_by_id(id).await
    }

    /// Recompute `report_count` for every user from the stored reports.
    ///
    /// A no-op with a remote backend, which derives counts on each read.
    pub async fn recompute_report_counts(&self) -> StoreResult<()> {
        self.repository.recompute_report_counts().await
    }

    pub async fn get_stats(&self) -> UserStats {
        UserStats::from_users(&self.load_all().await)
    }

    /// Remove the locally persisted users. Remote data is untouched.
    pub fn clear_all(&self) -> StoreResult<()> {
        self.local.clear()
    }
}
