//! Run state gating the execution engine.

use core::fmt;

/// Outer run state as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// No motion requested.
    #[default]
    Idle,
    /// Blocks are planned, waiting for cycle start.
    Queued,
    /// Executing segments.
    Cycle,
    /// Feed hold: motion stops at the next segment boundary.
    Hold,
    /// A fault stopped the engine; drivers are disabled.
    Alarm,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Queued => write!(f, "Queued"),
            RunState::Cycle => write!(f, "Cycle"),
            RunState::Hold => write!(f, "Hold"),
            RunState::Alarm => write!(f, "Alarm"),
        }
    }
}
