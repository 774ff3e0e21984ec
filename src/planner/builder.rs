//! Builder for programmatic block creation.

use crate::axis::{Axis, PortBits, N_AXIS};
use crate::config::units::{MillimetersPerMinute, MillimetersPerMinuteSquared};
use crate::error::{Error, PlannerError, Result};

use super::block::PlannerBlock;

/// Builder for creating planner blocks from signed step counts.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    steps: [i32; N_AXIS],
    millimeters: Option<f32>,
    entry_speed: MillimetersPerMinute,
    nominal_speed: Option<MillimetersPerMinute>,
    acceleration: Option<MillimetersPerMinuteSquared>,
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockBuilder {
    /// Create a new block builder.
    pub fn new() -> Self {
        Self {
            steps: [0; N_AXIS],
            millimeters: None,
            entry_speed: MillimetersPerMinute(0.0),
            nominal_speed: None,
            acceleration: None,
        }
    }

    /// Set signed step counts for X, Y and Z.
    pub fn steps(mut self, steps: [i32; N_AXIS]) -> Self {
        self.steps = steps;
        self
    }

    /// Set the signed step count of one axis.
    pub fn axis(mut self, axis: Axis, steps: i32) -> Self {
        self.steps[axis.index()] = steps;
        self
    }

    /// Set the path length in millimeters.
    pub fn millimeters(mut self, length: f32) -> Self {
        self.millimeters = Some(length);
        self
    }

    /// Set the speed at block entry (defaults to standstill).
    pub fn entry_speed(mut self, speed: MillimetersPerMinute) -> Self {
        self.entry_speed = speed;
        self
    }

    /// Set the cruise speed.
    pub fn nominal_speed(mut self, speed: MillimetersPerMinute) -> Self {
        self.nominal_speed = Some(speed);
        self
    }

    /// Set the acceleration magnitude.
    pub fn acceleration(mut self, acceleration: MillimetersPerMinuteSquared) -> Self {
        self.acceleration = Some(acceleration);
        self
    }

    /// Build the block.
    ///
    /// # Errors
    ///
    /// Returns an error if no axis moves, or if length, speeds or acceleration
    /// are missing, non-positive or not finite.
    pub fn build(self) -> Result<PlannerBlock> {
        let mut steps = [0u32; N_AXIS];
        let mut direction_bits = PortBits::empty();
        for axis in Axis::ALL {
            let signed = self.steps[axis.index()];
            steps[axis.index()] = signed.unsigned_abs();
            if signed < 0 {
                direction_bits |= PortBits::direction(axis);
            }
        }

        let step_event_count = steps.iter().copied().max().unwrap_or(0);
        if step_event_count == 0 {
            return Err(Error::Planner(PlannerError::EmptyBlock));
        }

        let millimeters = self.millimeters.unwrap_or(0.0);
        if !millimeters.is_finite() || millimeters <= 0.0 {
            return Err(Error::Planner(PlannerError::InvalidLength(millimeters)));
        }

        let nominal = self.nominal_speed.map(|s| s.0).unwrap_or(0.0);
        if !nominal.is_finite() || nominal <= 0.0 {
            return Err(Error::Planner(PlannerError::InvalidSpeed(nominal)));
        }

        let entry = self.entry_speed.0;
        if !entry.is_finite() || entry < 0.0 {
            return Err(Error::Planner(PlannerError::InvalidSpeed(entry)));
        }
        if entry > nominal {
            return Err(Error::Planner(PlannerError::EntryAboveNominal { entry, nominal }));
        }

        let acceleration = self.acceleration.map(|a| a.0).unwrap_or(0.0);
        if !acceleration.is_finite() || acceleration <= 0.0 {
            return Err(Error::Planner(PlannerError::InvalidAcceleration(acceleration)));
        }

        Ok(PlannerBlock {
            steps,
            step_event_count,
            direction_bits,
            entry_speed_sqr: entry * entry,
            nominal_speed_sqr: nominal * nominal,
            acceleration,
            millimeters,
        })
    }
}
