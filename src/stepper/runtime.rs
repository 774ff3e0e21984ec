//! Working set of the execution engine.

use crate::axis::{PortBits, N_AXIS};
use crate::motion::Ramp;
use crate::planner::PlannerBlock;
use crate::segment::Segment;

/// What the next tick must load before stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadState {
    /// A segment is loaded.
    Noop,
    /// Load the next segment of the same block.
    Line,
    /// Load the next segment and re-seed everything for a new block.
    #[default]
    Block,
}

/// Geometry of the executing block, copied out of the planner on block load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveBlock {
    /// Absolute step count per axis.
    pub steps: [u32; N_AXIS],
    /// Step events in the block.
    pub step_event_count: u32,
    /// Direction lines (set = negative).
    pub direction_bits: PortBits,
}

impl From<&PlannerBlock> for ActiveBlock {
    fn from(block: &PlannerBlock) -> Self {
        Self {
            steps: block.steps,
            step_event_count: block.step_event_count,
            direction_bits: block.direction_bits.direction_lines(),
        }
    }
}

/// Everything the tick mutates besides the segment ring and the position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepperRuntime {
    /// Bresenham error terms, one per axis.
    pub counters: [i64; N_AXIS],
    /// Inverse-time distance accumulator.
    pub counter_d: i64,
    /// Step events left in the loaded segment.
    pub segment_steps_remaining: u32,
    /// Velocity ramp.
    pub ramp: Ramp,
    /// Port image applied at the start of the next tick.
    pub out_bits: PortBits,
    /// `out_bits` is pending.
    pub execute_step: bool,
    /// Load request for the next tick.
    pub load: LoadState,
    /// Set while a tick runs.
    pub busy: bool,
    /// Block being stepped.
    pub block: ActiveBlock,
    /// Segment being stepped.
    pub segment: Segment,
}
