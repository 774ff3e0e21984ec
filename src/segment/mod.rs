//! Segment pipeline between the planner and the execution engine.
//!
//! The preparer runs in the background context. It slices planner blocks into
//! short segments, each carrying a step count, a ramp flag and the index of a
//! shared [`SegmentData`] entry holding the block's fixed-point rates. The
//! engine consumes segments from the other end of the [`SegmentBuffer`].

mod buffer;
mod data;
mod prep;
mod sizing;

pub use buffer::{Segment, SegmentBuffer, SegmentFlag};
pub use data::{SegmentData, SegmentDataRing};
pub use prep::SegmentPreparer;
pub use sizing::{FixedSegmentSize, SegmentSizing};

/// Slots in the segment ring and the segment data ring.
pub const SEGMENT_BUFFER_SIZE: usize = 10;
