//! Configuration module for cnc-stepper.
//!
//! Provides the engine settings, loadable from TOML files (with `std` feature)
//! or constructed directly.

mod settings;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use settings::StepperSettings;
pub use system::SystemConfig;
pub use validation::{validate_config, validate_settings};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{
    Hertz, Microseconds, Milliseconds, MillimetersPerMinute, MillimetersPerMinuteSquared, Steps,
};
