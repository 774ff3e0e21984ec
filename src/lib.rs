//! # cnc-stepper
//!
//! Real-time stepper segment pipeline for CNC motion control with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Segment pipeline**: Planner blocks are sliced into short segments in the background
//! - **Exact step counts**: Bresenham distribution inside an inverse-time rate counter
//! - **Trapezoidal ramps**: Acceleration, cruise and deceleration at a fixed update rate
//! - **embedded-hal 1.0**: Uses `OutputPin` for step/direction/disable, `DelayNs` for idle lock
//! - **no_std compatible**: No allocation, fixed-capacity buffers throughout
//! - **Configuration-driven**: Engine settings from TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cnc_stepper::{BlockQueue, PinPort, PlannerBlock, Stepper, SystemConfig};
//! use cnc_stepper::units::UnitExt;
//!
//! // Load configuration from TOML
//! let config: SystemConfig = cnc_stepper::load_config("stepper.toml")?;
//!
//! // Wire the engine to pins and timers
//! let mut stepper = Stepper::builder()
//!     .from_config(&config)
//!     .planner(BlockQueue::new())
//!     .port(PinPort::new(step_pins, dir_pins, disable_pin, timers))
//!     .delay(delay)
//!     .build()?;
//! stepper.init()?;
//!
//! // Queue a move and start the cycle
//! stepper.planner_mut().push(
//!     PlannerBlock::builder()
//!         .steps([1600, -400, 0])
//!         .millimeters(20.6)
//!         .nominal_speed(1200.0_f32.mm_per_min())
//!         .acceleration(36_000.0_f32.mm_per_min2())
//!         .build()?,
//! )?;
//! stepper.queue();
//! stepper.cycle_start()?;
//!
//! // Main loop: keep segments flowing; the tick timer interrupt calls
//! // `stepper.tick()` and the pulse timer calls `stepper.on_pulse_reset()`
//! loop {
//!     stepper.prepare_segments();
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible in every module
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod motion;
pub mod planner;
pub mod segment;
pub mod stepper;

// Re-exports for ergonomic API
pub use axis::{Axis, PortBits, N_AXIS};
pub use config::{validate_config, StepperSettings, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Ramp, RampState, RateProfile};
pub use planner::{BlockBuilder, BlockQueue, Planner, PlannerBlock};
pub use segment::{FixedSegmentSize, SegmentFlag, SegmentSizing};
pub use stepper::{
    MachinePosition, PinPort, RunState, Stepper, StepperBuilder, StepperPort, TickTimer,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units;
pub use config::units::{
    Hertz, Microseconds, Milliseconds, MillimetersPerMinute, MillimetersPerMinuteSquared, Steps,
};
