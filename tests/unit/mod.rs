//! Unit test harness for cnc-stepper.
//!
//! Exercises the public configuration surface the way an embedder would.

mod config_parsing;
mod config_validation;
