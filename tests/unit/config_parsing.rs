//! Unit tests for TOML configuration parsing.

use cnc_stepper::config::{load_config, parse_config, SystemConfig};
use cnc_stepper::error::{ConfigError, Error};
use cnc_stepper::{Axis, PortBits};

/// Test parsing a complete `[stepper]` table.
#[test]
fn test_parse_full_stepper_table() {
    let toml_str = r#"
[stepper]
tick_frequency_hz = 30000
acceleration_ticks_per_second = 50
minimum_step_rate = 1200
pulse_width_us = 4
invert_mask = 0b001001
invert_enable = true
idle_lock_time_ms = 100
keep_enabled_when_idle = true
fixed_point_scale = 1000000.0
segment_step_cap = 120
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");
    let stepper = config.stepper();

    assert_eq!(stepper.tick_frequency_hz.0, 30_000);
    assert_eq!(stepper.ticks_per_acceleration_tick(), 600);
    assert_eq!(stepper.minimum_step_rate, 1200);
    assert_eq!(stepper.pulse_width_us.0, 4);
    assert!(stepper.invert_mask.contains(PortBits::step(Axis::X)));
    assert!(stepper.invert_mask.contains(PortBits::direction(Axis::X)));
    assert!(!stepper.invert_mask.contains(PortBits::step(Axis::Y)));
    assert!(stepper.invert_enable);
    assert!(stepper.disable_line_when_enabled());
    assert_eq!(stepper.idle_lock_time_ms.0, 100);
    assert!(stepper.keep_enabled_when_idle);
    assert_eq!(stepper.fixed_point_scale, 1_000_000.0);
    assert_eq!(stepper.segment_step_cap, 120);
}

/// Test that a missing table falls back to defaults.
#[test]
fn test_missing_table_uses_defaults() {
    let config = parse_config("").expect("Failed to parse TOML");
    assert_eq!(config, SystemConfig::default());
}

/// Test that malformed TOML reports a parse error.
#[test]
fn test_malformed_toml_rejected() {
    let result = parse_config("[stepper\ntick_frequency_hz = 1");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test that a field of the wrong type is rejected.
#[test]
fn test_wrong_field_type_rejected() {
    let toml_str = r#"
[stepper]
segment_step_cap = "many"
"#;

    assert!(parse_config(toml_str).is_err());
}

/// Test loading configuration from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("cnc-stepper-{}.toml", std::process::id()));
    std::fs::write(&path, "[stepper]\nsegment_step_cap = 64\n").expect("write config");

    let result = load_config(&path);
    let _ = std::fs::remove_file(&path);

    let config = result.expect("Failed to load config");
    assert_eq!(config.stepper().segment_step_cap, 64);
}

/// Test that a missing file reports an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/cnc-stepper.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
