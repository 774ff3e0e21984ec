//! Fixed-capacity planner block queue.

use heapless::Deque;

use crate::error::{Error, PlannerError, Result};

use super::block::PlannerBlock;
use super::trapezoid;
use super::Planner;

/// Default number of blocks the queue can hold.
pub const BLOCK_BUFFER_SIZE: usize = 18;

/// Queue of planner blocks, consumed from the front by the stepper engine.
///
/// Blocks are addressed by a sequence index that increases by one for every
/// block ever pushed, so an index stays valid while earlier blocks are
/// discarded.
#[derive(Debug)]
pub struct BlockQueue<const N: usize = BLOCK_BUFFER_SIZE> {
    blocks: Deque<PlannerBlock, N>,
    /// Sequence index of the front block.
    tail: usize,
}

impl<const N: usize> Default for BlockQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BlockQueue<N> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            blocks: Deque::new(),
            tail: 0,
        }
    }

    /// Append a block.
    ///
    /// Returns the sequence index assigned to the block.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue is full or the block has no step events.
    pub fn push(&mut self, block: PlannerBlock) -> Result<usize> {
        if block.step_event_count == 0 {
            return Err(Error::Planner(PlannerError::EmptyBlock));
        }

        let index = self.tail.wrapping_add(self.blocks.len());
        self.blocks
            .push_back(block)
            .map_err(|_| Error::Planner(PlannerError::QueueFull))?;

        Ok(index)
    }

    /// Number of queued blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Check if the queue is full.
    pub fn is_full(&self) -> bool {
        self.blocks.is_full()
    }

    /// Drop every queued block. Sequence indices keep counting.
    pub fn clear(&mut self) {
        self.tail = self.tail.wrapping_add(self.blocks.len());
        self.blocks.clear();
    }

    /// Iterate over queued blocks, front first.
    pub fn iter(&self) -> impl Iterator<Item = &PlannerBlock> {
        self.blocks.iter()
    }

    fn offset(&self, index: usize) -> Option<usize> {
        let offset = index.wrapping_sub(self.tail);
        (offset < self.blocks.len()).then_some(offset)
    }
}

impl<const N: usize> Planner for BlockQueue<N> {
    fn current_block(&self) -> Option<&PlannerBlock> {
        self.blocks.front()
    }

    fn discard_current_block(&mut self) {
        if self.blocks.pop_front().is_some() {
            self.tail = self.tail.wrapping_add(1);
        }
    }

    fn block_by_index(&self, index: usize) -> Option<&PlannerBlock> {
        let offset = self.offset(index)?;
        self.blocks.iter().nth(offset)
    }

    fn tail_index(&self) -> usize {
        self.tail
    }

    fn trapezoid_breakpoint(&self, index: usize) -> u32 {
        let Some(block) = self.block_by_index(index) else {
            return 0;
        };

        let exit_speed_sqr = self
            .block_by_index(index.wrapping_add(1))
            .map(|next| next.entry_speed_sqr)
            .unwrap_or(0.0);

        trapezoid::decelerate_after(block, exit_speed_sqr)
    }
}
