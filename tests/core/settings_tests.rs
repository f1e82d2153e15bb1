//! Tests for chart settings loading and validation
//!
//! Tests cover:
//! - Default values and their resolution
//! - Partial documents falling back to defaults
//! - Each validation error
//! - Reading from disk

use std::path::PathBuf;
use std::time::Duration;

use chrono::Weekday;
use trend_pager::{ChartSettings, ConfigError, GroupingMode, Unit};

fn temp_settings_path() -> PathBuf {
    std::env::temp_dir().join(format!("trend-pager-settings-{}.json", uuid::Uuid::new_v4()))
}

// ============================================
// Defaults
// ============================================

#[test]
fn test_default_settings() {
    let settings = ChartSettings::default();
    assert_eq!(settings.version, 1);
    assert_eq!(settings.grouping_mode, GroupingMode::Weekly);
    assert_eq!(settings.display_unit, Unit::Kilograms);
    assert_eq!(settings.time_zone, "UTC");
    assert_eq!(settings.week_start, "monday");
    assert_eq!(settings.settle_delay_ms, 200);
    assert_eq!(settings.lead_pages, 3);
}

#[test]
fn test_defaults_resolve() {
    let options = ChartSettings::default().resolve().expect("defaults are valid");
    assert_eq!(options.calendar.week_start(), Weekday::Mon);
    assert_eq!(options.calendar.time_zone(), chrono_tz::UTC);
    assert_eq!(options.settle_delay, Duration::from_millis(200));
    assert_eq!(options.lead_pages, 3);
}

#[test]
fn test_settings_path_ends_with_file_name() {
    if let Some(path) = ChartSettings::get_settings_path() {
        assert!(path.ends_with("settings.json"));
    }
}

// ============================================
// Parsing
// ============================================

#[test]
fn test_partial_document_uses_defaults() {
    let settings = ChartSettings::from_json_str(
        r#"{ "grouping_mode": "monthly", "time_zone": "Europe/Berlin", "week_start": "Sun" }"#,
    )
    .expect("partial document parses");
    assert_eq!(settings.grouping_mode, GroupingMode::Monthly);
    assert_eq!(settings.display_unit, Unit::Kilograms);
    assert_eq!(settings.lead_pages, 3);

    let options = settings.resolve().expect("valid calendar");
    assert_eq!(options.grouping_mode, GroupingMode::Monthly);
    assert_eq!(options.calendar.week_start(), Weekday::Sun);
    assert_eq!(options.calendar.time_zone(), chrono_tz::Europe::Berlin);
}

#[test]
fn test_empty_object_is_default() {
    let settings = ChartSettings::from_json_str("{}").expect("empty object parses");
    assert_eq!(settings, ChartSettings::default());
}

#[test]
fn test_serialize_round_trip() {
    let settings = ChartSettings {
        grouping_mode: GroupingMode::Daily,
        display_unit: Unit::Pounds,
        allow_negative: false,
        ..ChartSettings::default()
    };
    let json = serde_json::to_string(&settings).expect("serializes");
    assert!(json.contains("\"daily\""));
    assert!(json.contains("\"pounds\""));
    assert_eq!(ChartSettings::from_json_str(&json).expect("parses"), settings);
}

#[test]
fn test_malformed_json() {
    let result = ChartSettings::from_json_str("{ \"grouping_mode\": ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_unknown_grouping_mode() {
    let result = ChartSettings::from_json_str(r#"{ "grouping_mode": "hourly" }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

// ============================================
// Validation
// ============================================

#[test]
fn test_unknown_week_start() {
    let settings = ChartSettings {
        week_start: "someday".to_string(),
        ..ChartSettings::default()
    };
    match settings.resolve() {
        Err(ConfigError::UnknownWeekStart(name)) => assert_eq!(name, "someday"),
        other => panic!("expected UnknownWeekStart, got {:?}", other),
    }
}

#[test]
fn test_unknown_time_zone() {
    let settings = ChartSettings {
        time_zone: "Mars/Olympus_Mons".to_string(),
        ..ChartSettings::default()
    };
    match settings.resolve() {
        Err(ConfigError::UnknownTimeZone(name)) => assert_eq!(name, "Mars/Olympus_Mons"),
        other => panic!("expected UnknownTimeZone, got {:?}", other),
    }
}

#[test]
fn test_zero_settle_delay() {
    let settings = ChartSettings {
        settle_delay_ms: 0,
        ..ChartSettings::default()
    };
    assert!(matches!(
        settings.resolve(),
        Err(ConfigError::InvalidSettleDelay(0))
    ));
}

#[test]
fn test_zero_lead_pages() {
    let settings = ChartSettings {
        lead_pages: 0,
        ..ChartSettings::default()
    };
    assert!(matches!(
        settings.resolve(),
        Err(ConfigError::InvalidLeadPages(0))
    ));
}

#[test]
fn test_error_messages() {
    let err = ConfigError::InvalidSettleDelay(0);
    assert_eq!(err.to_string(), "Settle delay must be positive, got 0ms");
    let err = ConfigError::UnknownWeekStart("x".to_string());
    assert_eq!(err.to_string(), "Unknown week start: \"x\"");
}

// ============================================
// Disk
// ============================================

#[test]
fn test_load_from_file() {
    let path = temp_settings_path();
    std::fs::write(&path, r#"{ "precision": 2, "lead_pages": 5 }"#).expect("write temp file");

    let loaded = ChartSettings::load_from(&path);
    let _ = std::fs::remove_file(&path);

    let settings = loaded.expect("file parses");
    assert_eq!(settings.precision, 2);
    assert_eq!(settings.lead_pages, 5);
}

#[test]
fn test_load_from_missing_file() {
    let path = temp_settings_path();
    assert!(matches!(
        ChartSettings::load_from(&path),
        Err(ConfigError::Io(_))
    ));
}
