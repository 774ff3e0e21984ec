//! Planner interface consumed by the stepper engine.
//!
//! The engine never plans motion itself. It reads blocks through the
//! [`Planner`] trait, asks for the deceleration breakpoint of each block, and
//! discards a block once its last step event has been emitted.
//!
//! [`BlockQueue`] is a ready-made fixed-capacity implementation.

mod block;
mod builder;
mod queue;
pub mod trapezoid;

pub use block::PlannerBlock;
pub use builder::BlockBuilder;
pub use queue::{BlockQueue, BLOCK_BUFFER_SIZE};

/// Read access to planned blocks plus release of the executing block.
///
/// Block indices are sequence numbers: every block gets the index following
/// the block queued before it, and the index of a block never changes while
/// it is queued. Index arithmetic wraps.
pub trait Planner {
    /// The block currently executing (front of the queue).
    fn current_block(&self) -> Option<&PlannerBlock>;

    /// Release the front block after its last step event.
    fn discard_current_block(&mut self);

    /// A queued block by sequence index.
    fn block_by_index(&self, index: usize) -> Option<&PlannerBlock>;

    /// Steps from the start of block `index` after which it must decelerate.
    fn trapezoid_breakpoint(&self, index: usize) -> u32;

    /// Sequence index of the front block.
    fn tail_index(&self) -> usize;
}
