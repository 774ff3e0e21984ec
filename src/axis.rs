//! Axes and the step/direction port bit layout.

use core::ops::{BitAnd, BitOr, BitOrAssign, BitXor, Not};

use serde::Deserialize;

/// Number of axes driven by the engine.
pub const N_AXIS: usize = 3;

/// A machine axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// All axes in port order.
    pub const ALL: [Axis; N_AXIS] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of this axis into per-axis arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Bit image of the six port lines: one step and one direction line per axis.
///
/// Step lines occupy bits 0..3, direction lines bits 3..6. A set direction
/// bit means motion toward negative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct PortBits(pub u8);

impl PortBits {
    /// All step lines.
    pub const STEP_MASK: Self = Self(0b000_111);
    /// All direction lines.
    pub const DIRECTION_MASK: Self = Self(0b111_000);
    /// Every line the engine drives.
    pub const ALL: Self = Self(0b111_111);

    /// No line set.
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Step line of `axis`.
    #[inline]
    pub const fn step(axis: Axis) -> Self {
        Self(1 << axis.index())
    }

    /// Direction line of `axis`.
    #[inline]
    pub const fn direction(axis: Axis) -> Self {
        Self(1 << (axis.index() + N_AXIS))
    }

    /// Raw bit value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when no bit is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Step lines only.
    #[inline]
    pub const fn step_lines(self) -> Self {
        Self(self.0 & Self::STEP_MASK.0)
    }

    /// Direction lines only.
    #[inline]
    pub const fn direction_lines(self) -> Self {
        Self(self.0 & Self::DIRECTION_MASK.0)
    }
}

impl BitOr for PortBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PortBits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PortBits {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for PortBits {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for PortBits {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0 & Self::ALL.0)
    }
}
