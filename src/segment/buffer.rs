//! Single-producer / single-consumer segment ring.

use core::fmt;

use super::SEGMENT_BUFFER_SIZE;

/// What the engine must do when a segment is loaded or completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentFlag {
    /// Nothing special.
    #[default]
    Noop,
    /// Last segment of its planner block.
    EndOfBlock,
    /// Decelerate from this segment on.
    Decel,
    /// Decelerating and last segment of its planner block.
    DecelEob,
}

impl SegmentFlag {
    /// Flag for a segment given where it sits in its block.
    pub const fn classify(end_of_block: bool, decelerating: bool) -> Self {
        match (end_of_block, decelerating) {
            (false, false) => SegmentFlag::Noop,
            (true, false) => SegmentFlag::EndOfBlock,
            (false, true) => SegmentFlag::Decel,
            (true, true) => SegmentFlag::DecelEob,
        }
    }

    /// True for the last segment of a block.
    #[inline]
    pub const fn is_end_of_block(self) -> bool {
        matches!(self, SegmentFlag::EndOfBlock | SegmentFlag::DecelEob)
    }

    /// True when the segment forces deceleration.
    #[inline]
    pub const fn is_decel(self) -> bool {
        matches!(self, SegmentFlag::Decel | SegmentFlag::DecelEob)
    }
}

impl fmt::Display for SegmentFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentFlag::Noop => write!(f, "noop"),
            SegmentFlag::EndOfBlock => write!(f, "end-of-block"),
            SegmentFlag::Decel => write!(f, "decel"),
            SegmentFlag::DecelEob => write!(f, "decel-eob"),
        }
    }
}

/// A slice of a planner block handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// Step events in this segment.
    pub step_count: u32,
    /// Index of the shared [`SegmentData`](super::SegmentData) entry.
    pub data_index: usize,
    /// Ramp and block-completion flag.
    pub flag: SegmentFlag,
}

/// Fixed-capacity ring of segments.
///
/// `head` and `next_head` belong to the producer, `tail` to the consumer. One
/// slot always stays free, so the ring holds at most `SEGMENT_BUFFER_SIZE - 1`
/// segments and is empty iff `head == tail`, full iff `next_head == tail`.
#[derive(Debug, Clone)]
pub struct SegmentBuffer {
    slots: [Segment; SEGMENT_BUFFER_SIZE],
    head: usize,
    next_head: usize,
    tail: usize,
}

impl Default for SegmentBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentBuffer {
    /// Create an empty ring.
    pub const fn new() -> Self {
        Self {
            slots: [Segment {
                step_count: 0,
                data_index: 0,
                flag: SegmentFlag::Noop,
            }; SEGMENT_BUFFER_SIZE],
            head: 0,
            next_head: 1,
            tail: 0,
        }
    }

    /// Most segments the ring can hold at once.
    #[inline]
    pub const fn capacity(&self) -> usize {
        SEGMENT_BUFFER_SIZE - 1
    }

    /// True when no segment is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// True when the producer must wait.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.next_head == self.tail
    }

    /// Number of queued segments.
    #[inline]
    pub fn len(&self) -> usize {
        (self.head + SEGMENT_BUFFER_SIZE - self.tail) % SEGMENT_BUFFER_SIZE
    }

    /// Producer index.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Consumer index.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Publish a segment at `head`.
    ///
    /// Hands the segment back if the ring is full.
    pub fn push(&mut self, segment: Segment) -> Result<(), Segment> {
        if self.is_full() {
            return Err(segment);
        }
        self.slots[self.head] = segment;
        self.head = self.next_head;
        self.next_head = next_index(self.head);
        Ok(())
    }

    /// Oldest queued segment.
    #[inline]
    pub fn peek(&self) -> Option<&Segment> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.tail])
        }
    }

    /// Release the oldest segment. No-op on an empty ring.
    pub fn advance_tail(&mut self) {
        if !self.is_empty() {
            self.tail = next_index(self.tail);
        }
    }

    /// Drop every segment and rewind all indices.
    pub fn clear(&mut self) {
        self.head = 0;
        self.next_head = 1;
        self.tail = 0;
    }
}

#[inline]
const fn next_index(index: usize) -> usize {
    (index + 1) % SEGMENT_BUFFER_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(step_count: u32) -> Segment {
        Segment {
            step_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_fills_to_capacity() {
        let mut buffer = SegmentBuffer::new();
        assert!(buffer.is_empty());

        for i in 0..buffer.capacity() {
            assert!(buffer.push(segment(i as u32)).is_ok());
        }
        assert!(buffer.is_full());
        assert_eq!(buffer.len(), SEGMENT_BUFFER_SIZE - 1);
        assert_eq!(buffer.push(segment(99)), Err(segment(99)));
    }

    #[test]
    fn test_fifo_order_across_wrap() {
        let mut buffer = SegmentBuffer::new();
        for round in 0..3u32 {
            for i in 0..7 {
                buffer.push(segment(round * 10 + i)).unwrap();
            }
            for i in 0..7 {
                assert_eq!(buffer.peek().map(|s| s.step_count), Some(round * 10 + i));
                buffer.advance_tail();
            }
        }
        assert!(buffer.is_empty());
        assert_eq!(buffer.peek(), None);
    }

    #[test]
    fn test_clear_rewinds() {
        let mut buffer = SegmentBuffer::new();
        buffer.push(segment(1)).unwrap();
        buffer.push(segment(2)).unwrap();
        buffer.advance_tail();
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!((buffer.head(), buffer.tail()), (0, 0));
    }

    #[test]
    fn test_flag_classification() {
        assert_eq!(SegmentFlag::classify(false, false), SegmentFlag::Noop);
        assert_eq!(SegmentFlag::classify(true, true), SegmentFlag::DecelEob);
        assert!(SegmentFlag::EndOfBlock.is_end_of_block());
        assert!(!SegmentFlag::EndOfBlock.is_decel());
        assert!(SegmentFlag::Decel.is_decel());
    }
}
