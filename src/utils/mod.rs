//! Utility modules shared by the record stores.
//!
//! - [`datetime`] - Timestamp and date formatting helpers
//! - [`merge`] - Shallow partial-field merging of records

pub mod datetime;
pub mod merge;
