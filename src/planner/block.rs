//! Planner blocks as seen by the stepper engine.

use crate::axis::{Axis, PortBits, N_AXIS};

use super::builder::BlockBuilder;

/// A straight-line move computed by the motion planner.
///
/// Speeds are stored squared in (mm/min)², acceleration in mm/min². The engine
/// only ever reads these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlannerBlock {
    /// Absolute step count per axis.
    pub steps: [u32; N_AXIS],
    /// Largest per-axis step count; one step event per step of the dominant axis.
    pub step_event_count: u32,
    /// Direction lines for this move (set bit = negative direction).
    pub direction_bits: PortBits,
    /// Speed² at the start of the block.
    pub entry_speed_sqr: f32,
    /// Speed² the block cruises at.
    pub nominal_speed_sqr: f32,
    /// Acceleration magnitude.
    pub acceleration: f32,
    /// Path length in millimeters.
    pub millimeters: f32,
}

impl PlannerBlock {
    /// Start building a block.
    pub fn builder() -> BlockBuilder {
        BlockBuilder::new()
    }

    /// Step count of one axis.
    #[inline]
    pub fn axis_steps(&self, axis: Axis) -> u32 {
        self.steps[axis.index()]
    }

    /// True when `axis` moves toward negative coordinates.
    #[inline]
    pub fn is_negative(&self, axis: Axis) -> bool {
        self.direction_bits.contains(PortBits::direction(axis))
    }

    /// Signed displacement of `axis` in steps.
    #[inline]
    pub fn signed_steps(&self, axis: Axis) -> i64 {
        let steps = i64::from(self.axis_steps(axis));
        if self.is_negative(axis) {
            -steps
        } else {
            steps
        }
    }
}
