use std::fmt::Debug;
use std::hash::Hash;

/// A domain item the caller wants mined.
///
/// Mirrors spec.md §3: the caller supplies equality, hashing and a total
/// order. Any type with these four derives already satisfies the bound —
/// there's nothing to implement by hand.
pub trait Item: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Item for T {}

/// A closed, inclusive validity interval: `start <= end`, both timestamps.
///
/// The unit of the timestamps is left to the caller (unix seconds, a
/// logical clock, ...); this crate only ever compares and intersects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeInterval {
    pub start: i64,
    pub end: i64,
}

impl TimeInterval {
    /// Builds an interval, swapping the bounds if they were given out of
    /// order so the `start <= end` invariant always holds.
    pub fn new(start: i64, end: i64) -> Self {
        if start <= end {
            TimeInterval { start, end }
        } else {
            TimeInterval {
                start: end,
                end: start,
            }
        }
    }

    /// A degenerate interval covering a single timestamp.
    pub fn at(timestamp: i64) -> Self {
        TimeInterval {
            start: timestamp,
            end: timestamp,
        }
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    pub fn includes(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// The overlap of two intervals, or `None` if they don't overlap.
    pub fn intersect(&self, other: &TimeInterval) -> Option<TimeInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(TimeInterval { start, end })
        } else {
            None
        }
    }
}
