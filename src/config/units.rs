//! Unit types for physical quantities.
//!
//! Provides type-safe representations of frequencies, durations, speeds,
//! accelerations and motor steps to prevent unit confusion at compile time.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Hertz(pub u32);

impl Hertz {
    /// Create a new Hertz value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Period of one cycle in whole microseconds (rounded down).
    #[inline]
    pub const fn period_us(self) -> u32 {
        if self.0 == 0 {
            u32::MAX
        } else {
            1_000_000 / self.0
        }
    }
}

/// Duration in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Microseconds(pub u32);

impl Microseconds {
    /// Create a new Microseconds value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Milliseconds(pub u32);

impl Milliseconds {
    /// Create a new Milliseconds value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Feed speed in millimeters per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct MillimetersPerMinute(pub f32);

impl MillimetersPerMinute {
    /// Create a new MillimetersPerMinute value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Square of the speed, the form the planner stores.
    #[inline]
    pub fn squared(self) -> f32 {
        self.0 * self.0
    }
}

/// Acceleration in millimeters per minute squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct MillimetersPerMinuteSquared(pub f32);

impl MillimetersPerMinuteSquared {
    /// Create a new MillimetersPerMinuteSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert from millimeters per second squared.
    #[inline]
    pub fn from_mm_per_sec2(value: f32) -> Self {
        Self(value * 3600.0)
    }
}

/// Motor position in steps (absolute from origin).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to MillimetersPerMinute.
    fn mm_per_min(self) -> MillimetersPerMinute;
    /// Convert to MillimetersPerMinuteSquared.
    fn mm_per_min2(self) -> MillimetersPerMinuteSquared;
}

impl UnitExt for f32 {
    #[inline]
    fn mm_per_min(self) -> MillimetersPerMinute {
        MillimetersPerMinute(self)
    }

    #[inline]
    fn mm_per_min2(self) -> MillimetersPerMinuteSquared {
        MillimetersPerMinuteSquared(self)
    }
}
