//! Conversion of planner units into inverse-time rate units.
//!
//! The engine measures distance in fixed-point units (`mm * fixed_point_scale`)
//! and speed in fixed-point units per tick. Every conversion rounds up so that
//! the engine never runs slower than the planner asked for.

use libm::{ceil, sqrt};

use crate::config::StepperSettings;
use crate::planner::PlannerBlock;

/// Fixed-point rate parameters of one planner block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateProfile {
    /// Rate at block entry, in distance units per tick.
    pub initial_rate: u32,
    /// Cruise rate, in distance units per tick.
    pub nominal_rate: u32,
    /// Rate change applied once per acceleration tick.
    pub rate_delta: u32,
    /// Distance units consumed by one step event.
    pub next_step_distance: u32,
    /// Millimeters travelled per step event.
    pub distance_per_step: f32,
}

impl RateProfile {
    /// Compute the rate parameters of `block` under `settings`.
    pub fn from_block(block: &PlannerBlock, settings: &StepperSettings) -> Self {
        // Worked in f64 with the numerator formed first, so that exact
        // quotients stay exact before rounding up.
        let scale = f64::from(settings.fixed_point_scale);
        let tick_hz = f64::from(settings.tick_frequency_hz.0.max(1));
        let accel_hz = f64::from(settings.acceleration_ticks_per_second.max(1));
        let step_events = f64::from(block.step_event_count.max(1));

        let entry = sqrt(f64::from(block.entry_speed_sqr.max(0.0)));
        let nominal = sqrt(f64::from(block.nominal_speed_sqr.max(0.0)));
        let acceleration = f64::from(block.acceleration.max(0.0));
        let millimeters = f64::from(block.millimeters);

        Self {
            initial_rate: round_up(entry * scale / (60.0 * tick_hz)),
            nominal_rate: round_up(nominal * scale / (60.0 * tick_hz)),
            rate_delta: round_up(acceleration * scale / (3600.0 * tick_hz * accel_hz)),
            next_step_distance: round_up(millimeters * scale / step_events),
            distance_per_step: (millimeters / step_events) as f32,
        }
    }
}

/// `ceil` into a `u32`, saturating at both ends.
#[inline]
fn round_up(value: f64) -> u32 {
    let value = ceil(value);
    if value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::config::units::UnitExt;

    fn block() -> PlannerBlock {
        PlannerBlock::builder()
            .axis(Axis::X, 2000)
            .millimeters(20.0)
            .entry_speed(600.0_f32.mm_per_min())
            .nominal_speed(1200.0_f32.mm_per_min())
            .acceleration(360_000.0_f32.mm_per_min2())
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_settings_conversion() {
        let rates = RateProfile::from_block(&block(), &StepperSettings::default());

        // 600 mm/min * 1e7 / (60 * 20000)
        assert_eq!(rates.initial_rate, 5000);
        assert_eq!(rates.nominal_rate, 10_000);
        // 360000 * 1e7 / (3600 * 20000 * 100) = 500
        assert_eq!(rates.rate_delta, 500);
        // 0.01 mm per step
        assert_eq!(rates.next_step_distance, 100_000);
        assert!((rates.distance_per_step - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_rounds_up() {
        let mut b = block();
        b.millimeters = 20.001;
        let rates = RateProfile::from_block(&b, &StepperSettings::default());

        // 20.001e7 / 2000 = 100005, never below the exact quotient
        assert!(rates.next_step_distance >= 100_005);
        assert!(rates.next_step_distance <= 100_007);
    }

    #[test]
    fn test_standstill_entry() {
        let mut b = block();
        b.entry_speed_sqr = 0.0;
        let rates = RateProfile::from_block(&b, &StepperSettings::default());

        assert_eq!(rates.initial_rate, 0);
    }
}
