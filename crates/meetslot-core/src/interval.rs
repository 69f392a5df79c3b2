//! Half-open time intervals.
//!
//! All timestamps carry an explicit UTC offset. Comparisons are on the
//! underlying instant, so intervals expressed in different offsets compose
//! correctly.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeRange {
    /// Create a validated range. `start` must be strictly before `end`.
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range starting at `start` and lasting `minutes`.
    pub fn starting_at(start: DateTime<FixedOffset>, minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(minutes),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this range overlaps another (touching ends do not overlap)
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Check if `other` lies entirely inside this range
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Overlap of two ranges, if non-empty
    pub fn intersect(&self, other: &TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(TimeRange { start, end })
    }

    /// Widen the range by `minutes` on both sides
    pub fn padded(&self, minutes: i64) -> TimeRange {
        TimeRange {
            start: self.start - Duration::minutes(minutes),
            end: self.end + Duration::minutes(minutes),
        }
    }
}

/// Merge overlapping or touching ranges. Output is sorted and disjoint.
pub fn merge(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted: Vec<TimeRange> = ranges.iter().filter(|r| !r.is_empty()).copied().collect();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                if range.end > last.end {
                    last.end = range.end;
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Free time inside `window` not covered by any of `busy`.
///
/// Sweeps a cursor from the window start over busy ranges sorted by start.
/// Overlapping busy ranges merge implicitly through the cursor advance.
pub fn complement(busy: &[TimeRange], window: &TimeRange) -> Vec<TimeRange> {
    let mut sorted: Vec<&TimeRange> = busy.iter().collect();
    sorted.sort_by_key(|r| r.start);

    let mut free = Vec::new();
    let mut cursor = window.start;

    for range in sorted {
        if range.start >= window.end {
            break;
        }
        if cursor < range.start {
            free.push(TimeRange {
                start: cursor,
                end: range.start,
            });
        }
        cursor = cursor.max(range.end);
        if cursor >= window.end {
            break;
        }
    }

    if cursor < window.end {
        free.push(TimeRange {
            start: cursor,
            end: window.end,
        });
    }

    free
}

/// Pairwise overlaps of two range lists, keeping those at least `min_minutes` long.
pub fn intersect_lists(a: &[TimeRange], b: &[TimeRange], min_minutes: i64) -> Vec<TimeRange> {
    let mut out = Vec::new();
    for left in a {
        for right in b {
            if let Some(overlap) = left.intersect(right) {
                if overlap.duration_minutes() >= min_minutes {
                    out.push(overlap);
                }
            }
        }
    }
    out.sort_by_key(|r| r.start);
    out
}

/// Total minutes of overlap between two range lists.
pub fn overlap_minutes(a: &[TimeRange], b: &[TimeRange]) -> i64 {
    intersect_lists(a, b, 0)
        .iter()
        .map(TimeRange::duration_minutes)
        .sum()
}
