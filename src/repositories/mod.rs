//! Record stores for reports and users.
//!
//! [`ReportRecordStore`] persists reports in local storage only.
//! [`UserRecordStore`] persists users through a [`UserRepository`] chosen at
//! construction: local storage, or a remote backend with local read fallback.

pub mod report;
pub mod user;

pub use report::{PriorityCounts, ReportRecordStore, ReportStats};
pub use user::{LocalUserRepository, RemoteUserRepository, UserRecordStore, UserRepository, UserStats};

use std::sync::Arc;

use anyhow::Result;

use crate::backend::RemoteBackend;
use crate::config::Config;

/// Both stores wired to one storage medium from a [`Config`].
pub struct RecordStores {
    pub reports: ReportRecordStore,
    pub users: UserRecordStore,
}

impl RecordStores {
    /// Open the configured storage and build both stores.
    ///
    /// `remote` is only used when `config.remote.enabled` is set.
    pub fn open(config: &Config, remote: Option<Arc<dyn RemoteBackend>>) -> Result<Self> {
        config.validate()?;
        let storage = config.open_storage()?;

        let reports = ReportRecordStore::with_key(Arc::clone(&storage), config.storage.reports_key.clone());
        let local_users = LocalUserRepository::with_key(storage, config.storage.users_key.clone(), reports.clone());
        let users = UserRecordStore::new(local_users, remote, config.remote.enabled);

        Ok(Self { reports, users })
    }
}
