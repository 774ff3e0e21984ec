//! Engine settings from TOML.

use serde::Deserialize;

use crate::axis::PortBits;

use super::units::{Hertz, Microseconds, Milliseconds};

/// Timing, polarity and fixed-point parameters consumed by the engine.
///
/// Every field has a default, so an empty `[stepper]` table is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StepperSettings {
    /// Frequency of the real-time tick.
    pub tick_frequency_hz: Hertz,

    /// Number of velocity updates per second during ramps.
    pub acceleration_ticks_per_second: u32,

    /// Lowest inverse-time rate the engine will run at, in fixed-point distance per tick.
    pub minimum_step_rate: u32,

    /// Active time of each step pulse.
    pub pulse_width_us: Microseconds,

    /// Lines whose electrical level is inverted.
    pub invert_mask: PortBits,

    /// Drive the disable line high to enable the drivers.
    pub invert_enable: bool,

    /// How long drivers stay energized after motion stops.
    pub idle_lock_time_ms: Milliseconds,

    /// Never de-energize drivers when idle (except on alarm).
    pub keep_enabled_when_idle: bool,

    /// Multiplier converting millimeters into fixed-point distance units.
    pub fixed_point_scale: f32,

    /// Upper bound on the step events carried by one segment.
    pub segment_step_cap: u32,
}

impl Default for StepperSettings {
    fn default() -> Self {
        Self {
            tick_frequency_hz: Hertz(20_000),
            acceleration_ticks_per_second: 100,
            minimum_step_rate: 800,
            pulse_width_us: Microseconds(10),
            invert_mask: PortBits::empty(),
            invert_enable: false,
            idle_lock_time_ms: Milliseconds(25),
            keep_enabled_when_idle: false,
            fixed_point_scale: 10_000_000.0,
            segment_step_cap: 250,
        }
    }
}

impl StepperSettings {
    /// Real-time ticks between two velocity updates.
    #[inline]
    pub fn ticks_per_acceleration_tick(&self) -> u32 {
        (self.tick_frequency_hz.0 / self.acceleration_ticks_per_second.max(1)).max(1)
    }

    /// Tick period in whole microseconds.
    #[inline]
    pub fn tick_period_us(&self) -> u32 {
        self.tick_frequency_hz.period_us()
    }

    /// Level of the disable line that energizes the drivers.
    #[inline]
    pub fn disable_line_when_enabled(&self) -> bool {
        self.invert_enable
    }
}
