//! Per-block parameters shared by the segments of one planner block.

use crate::config::StepperSettings;
use crate::motion::RateProfile;
use crate::planner::PlannerBlock;

use super::SEGMENT_BUFFER_SIZE;

/// Rate and progress data of one planner block.
///
/// Written by the preparer while it slices the block, read by the engine
/// through the `data_index` of each segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentData {
    /// Step events of the block not yet handed out in a segment.
    pub step_events_remaining: u32,
    /// Rate at block entry.
    pub initial_rate: u32,
    /// Cruise rate.
    pub nominal_rate: u32,
    /// Rate change per acceleration tick.
    pub rate_delta: u32,
    /// Step events left before deceleration starts (0 once decelerating).
    pub decelerate_after: u32,
    /// Millimeters per step event.
    pub distance_per_step: f32,
    /// Distance units consumed by one step event.
    pub next_step_distance: u32,
}

impl SegmentData {
    /// Fresh data for `block`, with its deceleration breakpoint.
    pub fn new(block: &PlannerBlock, settings: &StepperSettings, decelerate_after: u32) -> Self {
        let rates = RateProfile::from_block(block, settings);
        Self {
            step_events_remaining: block.step_event_count,
            initial_rate: rates.initial_rate,
            nominal_rate: rates.nominal_rate,
            rate_delta: rates.rate_delta,
            decelerate_after,
            distance_per_step: rates.distance_per_step,
            next_step_distance: rates.next_step_distance,
        }
    }
}

/// Fixed ring of [`SegmentData`] entries.
///
/// The preparer claims the slot after the one it last wrote for every new
/// block. The ring is as large as the segment buffer, so a slot is never
/// reused while a queued segment still points at it.
#[derive(Debug, Clone)]
pub struct SegmentDataRing {
    entries: [SegmentData; SEGMENT_BUFFER_SIZE],
    prep_index: usize,
}

impl Default for SegmentDataRing {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentDataRing {
    /// Create a ring of zeroed entries.
    pub fn new() -> Self {
        Self {
            entries: [SegmentData::default(); SEGMENT_BUFFER_SIZE],
            prep_index: 0,
        }
    }

    /// Advance to the next slot, store `data` there and return its index.
    pub fn start(&mut self, data: SegmentData) -> usize {
        self.prep_index = (self.prep_index + 1) % SEGMENT_BUFFER_SIZE;
        self.entries[self.prep_index] = data;
        self.prep_index
    }

    /// Index of the entry being prepared.
    #[inline]
    pub fn prep_index(&self) -> usize {
        self.prep_index
    }

    /// Entry at `index` (taken modulo the ring size).
    #[inline]
    pub fn get(&self, index: usize) -> &SegmentData {
        &self.entries[index % SEGMENT_BUFFER_SIZE]
    }

    /// Mutable entry at `index` (taken modulo the ring size).
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut SegmentData {
        &mut self.entries[index % SEGMENT_BUFFER_SIZE]
    }

    /// Rewind the preparation index.
    pub fn reset(&mut self) {
        self.prep_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_advances_before_writing() {
        let mut ring = SegmentDataRing::new();
        let data = SegmentData {
            step_events_remaining: 42,
            ..Default::default()
        };

        assert_eq!(ring.start(data), 1);
        assert_eq!(ring.get(1).step_events_remaining, 42);
        assert_eq!(ring.get(0).step_events_remaining, 0);
    }

    #[test]
    fn test_wraps_around() {
        let mut ring = SegmentDataRing::new();
        for _ in 0..SEGMENT_BUFFER_SIZE - 1 {
            ring.start(SegmentData::default());
        }
        assert_eq!(ring.prep_index(), SEGMENT_BUFFER_SIZE - 1);
        assert_eq!(ring.start(SegmentData::default()), 0);

        ring.reset();
        assert_eq!(ring.prep_index(), 0);
    }
}
