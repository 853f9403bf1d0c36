//! Ring positions and interval arithmetic.
//!
//! A point is the 32-bit hash of a key, placed on a logical circle of
//! size 2^32 where values wrap from the maximum back to zero.

use std::fmt;

/// Total size of the ring's key space (2^32, one past `u32::MAX`).
///
/// Held as a `u64` because the full span overflows a 32-bit counter.
pub const RING_SPAN: u64 = 1 << 32;

/// A position on the hash ring.
///
/// Newtype over `u32` so points sort, hash, and copy as plain integers
/// while keeping the ring arithmetic in one place.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Point(pub u32);

impl Point {
    /// Width of the arc `(prev, self]`.
    ///
    /// Callers guarantee `prev <= self`: the distribution walk visits
    /// points in ascending order starting from zero.
    #[inline]
    pub fn interval_from(self, prev: Point) -> u64 {
        u64::from(self.0) - u64::from(prev.0)
    }

    /// Width of the arc from `self` (exclusive) to the end of the ring.
    ///
    /// The last point on the ring is credited with this arc; lookups that
    /// land past it wrap back to the first point.
    #[inline]
    pub fn wraparound_interval(self) -> u64 {
        RING_SPAN - u64::from(self.0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
