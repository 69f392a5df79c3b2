use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::interval::TimeRange;

/// A committed block in a participant's calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub attendee_count: u32,
}

impl BusyInterval {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            summary: summary.into(),
            attendee_count: 0,
        }
    }

    /// `start < end`; anything else is dropped before use
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }

    /// Check if this interval overlaps a time range
    pub fn overlaps(&self, range: &TimeRange) -> bool {
        self.start < range.end && self.end > range.start
    }
}

/// A derived free block; never persisted across requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub available: bool,
}

impl FreeInterval {
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }
}

impl From<TimeRange> for FreeInterval {
    fn from(range: TimeRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
            available: true,
        }
    }
}
