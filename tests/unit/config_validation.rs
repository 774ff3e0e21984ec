//! Unit tests for configuration validation.

use cnc_stepper::config::units::{Hertz, Microseconds};
use cnc_stepper::config::{parse_config, validate_config, validate_settings, SystemConfig};
use cnc_stepper::error::{ConfigError, Error};
use cnc_stepper::{PortBits, StepperSettings};

fn rejected(settings: StepperSettings) -> ConfigError {
    match validate_settings(&settings) {
        Err(Error::Config(e)) => e,
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

/// Test that the default configuration is valid.
#[test]
fn test_empty_config_is_valid() {
    assert!(validate_config(&SystemConfig::default()).is_ok());
}

/// Test validation fails for a zero tick frequency.
#[test]
fn test_zero_tick_frequency() {
    let error = rejected(StepperSettings {
        tick_frequency_hz: Hertz(0),
        ..Default::default()
    });
    assert_eq!(error, ConfigError::InvalidTickFrequency(0));
}

/// Test validation fails when ramps update faster than the tick.
#[test]
fn test_acceleration_ticks_out_of_range() {
    let error = rejected(StepperSettings {
        tick_frequency_hz: Hertz(1_000),
        acceleration_ticks_per_second: 2_000,
        pulse_width_us: Microseconds(10),
        ..Default::default()
    });
    assert_eq!(
        error,
        ConfigError::InvalidAccelerationTicks {
            acceleration_ticks: 2_000,
            tick_frequency: 1_000,
        }
    );

    let error = rejected(StepperSettings {
        acceleration_ticks_per_second: 0,
        ..Default::default()
    });
    assert!(matches!(error, ConfigError::InvalidAccelerationTicks { .. }));
}

/// Test validation fails for a pulse that outlasts the tick period.
#[test]
fn test_pulse_width_too_long() {
    let error = rejected(StepperSettings {
        pulse_width_us: Microseconds(50),
        ..Default::default()
    });
    assert_eq!(
        error,
        ConfigError::PulseWidthTooLong {
            width_us: 50,
            period_us: 50,
        }
    );
}

/// Test validation fails for a zero segment step cap.
#[test]
fn test_zero_segment_step_cap() {
    let error = rejected(StepperSettings {
        segment_step_cap: 0,
        ..Default::default()
    });
    assert_eq!(error, ConfigError::InvalidSegmentStepCap(0));
}

/// Test validation fails for a zero minimum step rate.
#[test]
fn test_zero_minimum_step_rate() {
    let error = rejected(StepperSettings {
        minimum_step_rate: 0,
        ..Default::default()
    });
    assert_eq!(error, ConfigError::InvalidMinimumStepRate(0));
}

/// Test validation fails for non-positive or non-finite fixed-point scales.
#[test]
fn test_invalid_fixed_point_scale() {
    for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let error = rejected(StepperSettings {
            fixed_point_scale: scale,
            ..Default::default()
        });
        assert!(matches!(error, ConfigError::InvalidFixedPointScale(_)));
    }
}

/// Test validation fails for invert bits beyond the six port lines.
#[test]
fn test_invert_mask_out_of_range() {
    let error = rejected(StepperSettings {
        invert_mask: PortBits(0b1000_0001),
        ..Default::default()
    });
    assert_eq!(error, ConfigError::InvalidInvertMask(0b1000_0001));
}

/// Test that parsing runs validation.
#[test]
fn test_parse_validates() {
    let toml_str = r#"
[stepper]
minimum_step_rate = 0
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidMinimumStepRate(0)))
    ));
}
