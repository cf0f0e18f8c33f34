//! Constants used throughout the crate
//!
//! This module centralizes storage keys, envelope metadata and seed data
//! so the persisted layout stays consistent across stores.

// Storage keys
pub const REPORTS_STORAGE_KEY: &str = "local_reports";
pub const USERS_STORAGE_KEY: &str = "local_users";

// Envelope metadata
pub const ENVELOPE_VERSION: &str = "1.0";
pub const REPORTS_COLLECTION: &str = "reports";
pub const USERS_COLLECTION: &str = "users";

/// Role assigned to users created without one ("citizen").
pub const DEFAULT_ROLE: &str = "مواطن";

/// Prefix for locally generated user ids.
pub const LOCAL_USER_ID_PREFIX: &str = "user";

/// Placeholder users seeded into an empty local store: (id, name, email).
pub const DEFAULT_USERS: [(&str, &str, &str); 3] = [
    ("user_1", "أحمد محمد", "ahmed.mohamed@example.com"),
    ("user_2", "فاطمة علي", "fatima.ali@example.com"),
    ("user_3", "محمد حسن", "mohamed.hassan@example.com"),
];

// Export
pub const EXPORT_FILE_PREFIX: &str = "reports_backup_";

// Configuration
pub const APP_NAME: &str = "civic-records";
pub const CONFIG_FILE_NAME: &str = "civic-records.toml";
pub const LOG_FILE_NAME: &str = "civic-records.log";
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
