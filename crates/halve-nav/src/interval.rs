//! Closed index intervals: the unit of bisection.
//!
//! An [`Interval`] is a pair of indices `[low, high]` in some scope's domain:
//! char offsets for the line scope, 1-based line numbers for the window and
//! buffer scopes. Both ends are inclusive, and `low <= high` always holds.
//! Every constructor and narrowing method re-establishes that ordering, so a
//! value of this type can never be inverted.
//!
//! The cursor always lands on the [`midpoint`](Interval::midpoint) after a
//! step, so the interval shrinks by half on every call.

use std::fmt;

/// A closed interval `[low, high]` with `low <= high`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    low: usize,
    high: usize,
}

impl Interval {
    /// Build an interval from two arbitrary indices, swapping if needed so
    /// that `low <= high`. Hosts can report boundaries in either order; this
    /// is where they get normalized.
    #[inline]
    #[must_use]
    pub const fn ordered(a: usize, b: usize) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// A zero-width interval at `index`.
    #[inline]
    #[must_use]
    pub const fn point(index: usize) -> Self {
        Self {
            low: index,
            high: index,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// The lower (inclusive) bound.
    #[inline]
    #[must_use]
    pub const fn low(self) -> usize {
        self.low
    }

    /// The upper (inclusive) bound.
    #[inline]
    #[must_use]
    pub const fn high(self) -> usize {
        self.high
    }

    /// `high - low`. A degenerate interval has width 0.
    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        self.high - self.low
    }

    /// True when both bounds coincide. Stepping inside a degenerate interval
    /// always returns the same index.
    #[inline]
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.low == self.high
    }

    /// True when `index` lies in `[low, high]`.
    #[inline]
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index >= self.low && index <= self.high
    }

    /// `floor((low + high) / 2)`, computed without overflow. Always lies in
    /// `[low, high]`.
    #[inline]
    #[must_use]
    pub const fn midpoint(self) -> usize {
        self.low + (self.high - self.low) / 2
    }

    // -- Narrowing ----------------------------------------------------------

    /// Replace the lower bound. If `low` ends up above the current upper
    /// bound the two are swapped.
    #[inline]
    #[must_use]
    pub const fn with_low(self, low: usize) -> Self {
        Self::ordered(low, self.high)
    }

    /// Replace the upper bound. If `high` ends up below the current lower
    /// bound the two are swapped.
    #[inline]
    #[must_use]
    pub const fn with_high(self, high: usize) -> Self {
        Self::ordered(self.low, high)
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interval[{}, {}]", self.low, self.high)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
