//! Machine position in steps.

use crate::axis::{Axis, N_AXIS};
use crate::config::units::Steps;

/// Absolute position of every axis, in steps from the machine origin.
///
/// Only the execution engine moves it, one step at a time as step events are
/// emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachinePosition {
    steps: [Steps; N_AXIS],
}

impl MachinePosition {
    /// Position at the origin.
    #[inline]
    pub const fn new() -> Self {
        Self {
            steps: [Steps(0); N_AXIS],
        }
    }

    /// Position from raw step counts.
    #[inline]
    pub const fn at(steps: [i64; N_AXIS]) -> Self {
        Self {
            steps: [Steps(steps[0]), Steps(steps[1]), Steps(steps[2])],
        }
    }

    /// Position of one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> Steps {
        self.steps[axis.index()]
    }

    /// Overwrite the position of one axis.
    #[inline]
    pub fn set(&mut self, axis: Axis, steps: Steps) {
        self.steps[axis.index()] = steps;
    }

    /// Raw step counts in axis order.
    #[inline]
    pub fn as_array(&self) -> [i64; N_AXIS] {
        [self.steps[0].0, self.steps[1].0, self.steps[2].0]
    }

    /// Record one step of `axis`.
    #[inline]
    pub(crate) fn step(&mut self, axis: Axis, negative: bool) {
        let position = &mut self.steps[axis.index()].0;
        if negative {
            *position -= 1;
        } else {
            *position += 1;
        }
    }

    /// Set every axis back to zero.
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = [Steps(0); N_AXIS];
    }
}
