//! Segment sizing policies.

use crate::config::StepperSettings;

use super::SegmentData;

/// Chooses how many step events the next segment of a block may carry.
///
/// The preparer floors the result at one step, then truncates it to the steps
/// left in the block and to the deceleration breakpoint.
pub trait SegmentSizing {
    /// Untruncated size of the next segment.
    fn segment_steps(&self, data: &SegmentData, settings: &StepperSettings) -> u32;
}

/// Every segment carries `settings.segment_step_cap` steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedSegmentSize;

impl SegmentSizing for FixedSegmentSize {
    #[inline]
    fn segment_steps(&self, _data: &SegmentData, settings: &StepperSettings) -> u32 {
        settings.segment_step_cap
    }
}

impl<F> SegmentSizing for F
where
    F: Fn(&SegmentData, &StepperSettings) -> u32,
{
    #[inline]
    fn segment_steps(&self, data: &SegmentData, settings: &StepperSettings) -> u32 {
        self(data, settings)
    }
}
