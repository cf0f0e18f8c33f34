//! Report record store backed by local storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use log::{error, info};
use serde::Serialize;

use crate::constants::{EXPORT_FILE_PREFIX, REPORTS_COLLECTION, REPORTS_STORAGE_KEY};
use crate::entities::{Priority, Report, ReportStatus};
use crate::error::StoreResult;
use crate::storage::{KeyValueStore, LocalCollection};
use crate::utils::datetime;
use crate::utils::merge::Patch;

/// Report counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub urgent: usize,
}

/// Aggregate counts over the stored reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total: usize,
    pub new: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub resolved_by_official: usize,
    pub with_images: usize,
    pub by_priority: PriorityCounts,
}

impl ReportStats {
    /// Tally a slice of reports in a single pass.
    pub fn from_reports(reports: &[Report]) -> Self {
        reports.iter().fold(Self::default(), |mut stats, report| {
            stats.total += 1;
            match report.status {
                ReportStatus::New => stats.new += 1,
                ReportStatus::InProgress => stats.in_progress += 1,
                ReportStatus::Resolved => stats.resolved += 1,
                ReportStatus::ResolvedByOfficial => stats.resolved_by_official += 1,
            }
            if report.has_images {
                stats.with_images += 1;
            }
            match report.priority {
                Priority::Low => stats.by_priority.low += 1,
                Priority::Medium => stats.by_priority.medium += 1,
                Priority::High => stats.by_priority.high += 1,
                Priority::Urgent => stats.by_priority.urgent += 1,
            }
            stats
        })
    }
}

/// Store for civic reports, kept most-recent-first under a single key.
///
/// Every operation is a stateless read-modify-write of the whole collection.
/// Identifier uniqueness is the caller's responsibility.
#[derive(Clone)]
pub struct ReportRecordStore {
    reports: LocalCollection<Report>,
}

impl ReportRecordStore {
    /// Create a store using the default `local_reports` key.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, REPORTS_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            reports: LocalCollection::new(storage, key, REPORTS_COLLECTION),
        }
    }

    pub fn key(&self) -> &str {
        self.reports.key()
    }

    /// Persist the entire collection.
    pub fn save_all(&self, reports: &[Report]) -> StoreResult<()> {
        self.reports.save_all(reports)
    }

    /// Load all reports. Missing or corrupt data yields an empty list.
    pub fn load_all(&self) -> Vec<Report> {
        self.reports.load_all()
    }

    /// Load all reports, distinguishing corrupt data from no data.
    pub fn try_load_all(&self) -> StoreResult<Vec<Report>> {
        self.reports.try_load_all()
    }

    /// Prepend `report` so the newest report comes first.
    ///
    /// Fails without writing if the stored collection cannot be read.
    pub fn add(&self, report: Report) -> StoreResult<()> {
        self.reports.prepend(report)
    }

    /// Shallow-merge `patch` over the report with `id` and return the result.
    ///
    /// Nested values in the patch replace the stored value wholesale.
    pub fn update(&self, id: &str, patch: &Patch) -> StoreResult<Report> {
        self.reports.update(id, patch)
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        self.reports.delete(id)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Report> {
        self.reports.find(id)
    }

    pub fn get_by_status(&self, status: ReportStatus) -> Vec<Report> {
        self.load_all()
            .into_iter()
            .filter(|report| report.status == status)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.load_all().len()
    }

    /// Counts by status and priority. Fails if the stored data cannot be read.
    pub fn get_stats(&self) -> StoreResult<ReportStats> {
        let reports = self.try_load_all().inspect_err(|e| {
            error!("Error getting reports statistics: {}", e);
        })?;
        Ok(ReportStats::from_reports(&reports))
    }

    /// Remove the persisted collection.
    pub fn clear_all(&self) -> StoreResult<()> {
        self.reports.clear()
    }

    /// Pretty-printed JSON array of every stored report.
    pub fn export_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.try_load_all()?)?)
    }

    /// Backup file name for a given date, e.g. `reports_backup_2025-01-15.json`.
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("{}{}.json", EXPORT_FILE_PREFIX, datetime::format_ymd(date))
    }

    /// Write a dated JSON backup into `dir` and return its path.
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> StoreResult<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let path = dir.join(Self::export_file_name(chrono::Utc::now().date_naive()));
        fs::write(&path, self.export_json()?)?;

        info!("Exported reports to {}", path.display());
        Ok(path)
    }
}
