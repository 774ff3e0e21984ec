//! Stepper module for cnc-stepper.
//!
//! Provides the execution engine, its hardware port abstraction, run-state
//! gating and machine position tracking.

mod builder;
mod engine;
mod port;
mod position;
mod runtime;
mod state;

pub use builder::StepperBuilder;
pub use engine::Stepper;
pub use port::{PinPort, StepperPort, TickTimer};
pub use position::MachinePosition;
pub use runtime::LoadState;
pub use state::RunState;
