//! Motion module for cnc-stepper.
//!
//! Provides the inverse-time rate conversion and the trapezoidal ramp used by
//! the execution engine.

mod ramp;
mod rate;

pub use ramp::{Ramp, RampState};
pub use rate::RateProfile;
