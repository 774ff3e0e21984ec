//! Background slicing of planner blocks into segments.

use crate::config::StepperSettings;
use crate::planner::Planner;

use super::buffer::{Segment, SegmentBuffer, SegmentFlag};
use super::data::{SegmentData, SegmentDataRing};
use super::sizing::SegmentSizing;

/// Cursor of the segment preparer into the planner queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentPreparer {
    preparing: bool,
    block_index: usize,
}

impl SegmentPreparer {
    /// Create a preparer starting at planner index 0.
    pub const fn new() -> Self {
        Self {
            preparing: false,
            block_index: 0,
        }
    }

    /// True while a block is partly sliced.
    #[inline]
    pub fn is_preparing(&self) -> bool {
        self.preparing
    }

    /// Planner index of the block being (or about to be) sliced.
    #[inline]
    pub fn block_index(&self) -> usize {
        self.block_index
    }

    /// Forget the block in progress and continue from planner index `block_index`.
    pub fn reset(&mut self, block_index: usize) {
        self.preparing = false;
        self.block_index = block_index;
    }

    /// Fill `buffer` until it is full or the planner runs out of blocks.
    ///
    /// Returns the number of segments emitted.
    pub fn prepare<P, S>(
        &mut self,
        planner: &P,
        settings: &StepperSettings,
        sizing: &S,
        buffer: &mut SegmentBuffer,
        data: &mut SegmentDataRing,
    ) -> usize
    where
        P: Planner + ?Sized,
        S: SegmentSizing + ?Sized,
    {
        let mut emitted = 0;

        while !buffer.is_full() {
            if !self.preparing {
                let Some(block) = planner.block_by_index(self.block_index) else {
                    break;
                };
                let decelerate_after = planner.trapezoid_breakpoint(self.block_index);
                let index = data.start(SegmentData::new(block, settings, decelerate_after));
                self.preparing = true;

                debug!(
                    "prep block {}: {} events, decel after {}, data {}",
                    self.block_index,
                    block.step_event_count,
                    decelerate_after,
                    index
                );
            }

            let data_index = data.prep_index();
            let current = data.get_mut(data_index);

            let mut step_count = sizing.segment_steps(current, settings).max(1);
            step_count = step_count.min(current.step_events_remaining);
            if current.decelerate_after > 0 {
                step_count = step_count.min(current.decelerate_after);
            }

            current.step_events_remaining -= step_count;
            let end_of_block = current.step_events_remaining == 0;
            let decelerating = current.decelerate_after == 0;
            current.decelerate_after = current.decelerate_after.saturating_sub(step_count);

            let flag = SegmentFlag::classify(end_of_block, decelerating);
            let segment = Segment {
                step_count,
                data_index,
                flag,
            };

            if buffer.push(segment).is_err() {
                break;
            }
            emitted += 1;
            trace!("segment {} steps, {}", step_count, flag);

            if end_of_block {
                self.preparing = false;
                self.block_index = self.block_index.wrapping_add(1);
            }
        }

        emitted
    }
}
