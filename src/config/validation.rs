//! Configuration validation.

use crate::axis::PortBits;
use crate::error::{ConfigError, Error, Result};

use super::{StepperSettings, SystemConfig};

/// Validate a system configuration.
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_settings(&config.stepper)
}

/// Validate engine settings.
///
/// Checks:
/// - Tick frequency is non-zero
/// - Acceleration tick rate is within 1..=tick frequency
/// - A step pulse fits inside one tick period
/// - Segment step cap, minimum step rate and fixed-point scale are positive
/// - Invert mask only touches the six port lines
pub fn validate_settings(settings: &StepperSettings) -> Result<()> {
    let tick_frequency = settings.tick_frequency_hz.0;
    if tick_frequency == 0 {
        return Err(Error::Config(ConfigError::InvalidTickFrequency(tick_frequency)));
    }

    let acceleration_ticks = settings.acceleration_ticks_per_second;
    if acceleration_ticks == 0 || acceleration_ticks > tick_frequency {
        return Err(Error::Config(ConfigError::InvalidAccelerationTicks {
            acceleration_ticks,
            tick_frequency,
        }));
    }

    let period_us = settings.tick_period_us();
    if settings.pulse_width_us.0 >= period_us {
        return Err(Error::Config(ConfigError::PulseWidthTooLong {
            width_us: settings.pulse_width_us.0,
            period_us,
        }));
    }

    if settings.segment_step_cap == 0 {
        return Err(Error::Config(ConfigError::InvalidSegmentStepCap(
            settings.segment_step_cap,
        )));
    }

    if settings.minimum_step_rate == 0 {
        return Err(Error::Config(ConfigError::InvalidMinimumStepRate(
            settings.minimum_step_rate,
        )));
    }

    let scale = settings.fixed_point_scale;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidFixedPointScale(scale)));
    }

    if settings.invert_mask.bits() & !PortBits::ALL.bits() != 0 {
        return Err(Error::Config(ConfigError::InvalidInvertMask(
            settings.invert_mask.bits(),
        )));
    }

    Ok(())
}
