//! Error types for cnc-stepper.
//!
//! Provides unified error handling across configuration, the hardware port and the
//! planner block queue. The real-time tick never returns these; it escalates port
//! faults to the alarm run state instead.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all cnc-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Step/direction port error
    Port(PortError),
    /// Planner block construction or queueing error
    Planner(PlannerError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Tick frequency must be non-zero
    InvalidTickFrequency(u32),
    /// Acceleration tick rate must be non-zero and not exceed the tick frequency
    InvalidAccelerationTicks {
        /// Configured acceleration ticks per second
        acceleration_ticks: u32,
        /// Configured tick frequency
        tick_frequency: u32,
    },
    /// Step pulse does not fit inside one tick period
    PulseWidthTooLong {
        /// Configured pulse width in microseconds
        width_us: u32,
        /// Tick period in microseconds
        period_us: u32,
    },
    /// Segment step cap must be at least one step
    InvalidSegmentStepCap(u32),
    /// Minimum step rate must be non-zero or the engine can stall
    InvalidMinimumStepRate(u32),
    /// Fixed-point scale must be positive and finite
    InvalidFixedPointScale(f32),
    /// Invert mask touches bits outside the six port lines
    InvalidInvertMask(u8),
    /// A required engine component was not supplied to the builder
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Step/direction port errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// A step pin write failed
    StepPin,
    /// A direction pin write failed
    DirectionPin,
    /// The driver disable pin write failed
    DisablePin,
}

/// Planner block errors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlannerError {
    /// The block queue has no free slot
    QueueFull,
    /// Block has no step events on any axis
    EmptyBlock,
    /// Block length must be positive and finite
    InvalidLength(f32),
    /// Speed must be positive and finite (entry speed may be zero)
    InvalidSpeed(f32),
    /// Entry speed exceeds the nominal speed
    EntryAboveNominal {
        /// Requested entry speed
        entry: f32,
        /// Requested nominal speed
        nominal: f32,
    },
    /// Acceleration must be positive and finite
    InvalidAcceleration(f32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Port(e) => write!(f, "Port error: {}", e),
            Error::Planner(e) => write!(f, "Planner error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTickFrequency(v) => {
                write!(f, "Invalid tick frequency: {} Hz. Must be > 0", v)
            }
            ConfigError::InvalidAccelerationTicks {
                acceleration_ticks,
                tick_frequency,
            } => write!(
                f,
                "Invalid acceleration tick rate: {}. Must be 1-{}",
                acceleration_ticks, tick_frequency
            ),
            ConfigError::PulseWidthTooLong { width_us, period_us } => write!(
                f,
                "Step pulse of {} us does not fit in a {} us tick period",
                width_us, period_us
            ),
            ConfigError::InvalidSegmentStepCap(v) => {
                write!(f, "Invalid segment step cap: {}. Must be > 0", v)
            }
            ConfigError::InvalidMinimumStepRate(v) => {
                write!(f, "Invalid minimum step rate: {}. Must be > 0", v)
            }
            ConfigError::InvalidFixedPointScale(v) => {
                write!(f, "Invalid fixed-point scale: {}. Must be > 0", v)
            }
            ConfigError::InvalidInvertMask(v) => {
                write!(f, "Invalid invert mask: {:#010b}. Only the low six bits are used", v)
            }
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::StepPin => write!(f, "step pin write failed"),
            PortError::DirectionPin => write!(f, "direction pin write failed"),
            PortError::DisablePin => write!(f, "driver disable pin write failed"),
        }
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::QueueFull => write!(f, "Planner block queue is full"),
            PlannerError::EmptyBlock => write!(f, "Block has no step events"),
            PlannerError::InvalidLength(v) => write!(f, "Invalid block length: {}. Must be > 0", v),
            PlannerError::InvalidSpeed(v) => write!(f, "Invalid speed: {}", v),
            PlannerError::EntryAboveNominal { entry, nominal } => {
                write!(f, "Entry speed {} exceeds nominal speed {}", entry, nominal)
            }
            PlannerError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PortError> for Error {
    fn from(e: PortError) -> Self {
        Error::Port(e)
    }
}

impl From<PlannerError> for Error {
    fn from(e: PlannerError) -> Self {
        Error::Planner(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PortError {}

#[cfg(feature = "std")]
impl std::error::Error for PlannerError {}
