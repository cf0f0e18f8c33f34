use chrono::{NaiveDate, TimeZone, Utc};
use civic_records::utils::datetime::*;

#[test]
fn test_format_ymd() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    assert_eq!(format_ymd(date), "2025-01-15");
}

#[test]
fn test_format_iso_uses_millis_and_z() {
    let ts = Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap();
    assert_eq!(format_iso(ts), "2025-03-01T10:30:00.000Z");
}

#[test]
fn test_parse_iso() {
    let parsed = parse_iso("2025-03-01T10:30:00.000Z").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap());
    assert!(parse_iso("yesterday").is_none());
}

#[test]
fn test_time_based_id() {
    let id = time_based_id("user");
    let millis: i64 = id.strip_prefix("user_").unwrap().parse().unwrap();
    assert!(millis > 0);
}
