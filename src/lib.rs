//! civic-records - persistence for a civic-reporting client
//!
//! This library stores citizen reports and user records in a local key-value
//! medium and, for users, can prefer a remote backend-as-a-service while
//! falling back to local data when the remote read fails.
//!
//! # Modules
//!
//! * [`backend`] - Remote backend trait consumed by the user store
//! * [`config`] - TOML configuration
//! * [`entities`] - Report and user records
//! * [`repositories`] - Report and user record stores
//! * [`storage`] - Key-value storage medium and enveloped collections
//! * [`utils`] - Date helpers and shallow merging

/// Remote backend abstraction for user records
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Storage keys, envelope metadata and seed data
pub mod constants;

/// Serializable record types
pub mod entities;

/// Error kinds returned by the stores
pub mod error;

/// Logging setup on top of the `log` facade
pub mod logger;

/// Report and user record stores
pub mod repositories;

/// Local key-value storage medium
pub mod storage;

/// Utility functions for timestamps and partial updates
pub mod utils;

pub use entities::{NewUser, Priority, Report, ReportStatus, User};
pub use error::{StoreError, StoreResult};
pub use repositories::{RecordStores, ReportRecordStore, UserRecordStore};
