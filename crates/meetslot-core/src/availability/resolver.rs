//! Per-participant free time.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interval::{complement, merge, TimeRange};
use crate::meeting::{BusyInterval, FreeInterval};

/// Busy and free time of one participant inside the bounding window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantAvailability {
    pub email: String,
    /// Valid busy intervals, sorted by start
    pub busy: Vec<BusyInterval>,
    /// Ordered, non-overlapping free intervals
    pub free: Vec<FreeInterval>,
}

impl ParticipantAvailability {
    pub fn free_ranges(&self) -> Vec<TimeRange> {
        self.free.iter().map(FreeInterval::range).collect()
    }

    pub fn free_minutes(&self) -> i64 {
        self.free.iter().map(|f| f.range().duration_minutes()).sum()
    }
}

/// Converts busy intervals plus a bounding window into free intervals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityResolver {
    /// Padding applied around each busy interval before the sweep
    buffer_minutes: i64,
}

impl AvailabilityResolver {
    pub fn new() -> Self {
        Self { buffer_minutes: 0 }
    }

    /// Keep `minutes` of distance from every existing commitment
    pub fn with_buffer(mut self, minutes: i64) -> Self {
        self.buffer_minutes = minutes.max(0);
        self
    }

    /// Resolve one participant's free time.
    ///
    /// Intervals with `start >= end` are dropped with a warning.
    pub fn resolve(
        &self,
        email: &str,
        busy: Vec<BusyInterval>,
        window: &TimeRange,
    ) -> ParticipantAvailability {
        let mut valid: Vec<BusyInterval> = Vec::with_capacity(busy.len());
        for interval in busy {
            if interval.is_valid() {
                valid.push(interval);
            } else {
                warn!(
                    target: "meetslot::availability",
                    participant = %email,
                    start = %interval.start,
                    end = %interval.end,
                    summary = %interval.summary,
                    "dropping busy interval with start >= end"
                );
            }
        }
        valid.sort_by_key(|b| b.start);

        // padding can make neighbouring commitments overlap
        let blocked = merge(
            &valid
                .iter()
                .map(|b| b.range().padded(self.buffer_minutes))
                .collect::<Vec<_>>(),
        );

        let free = complement(&blocked, window)
            .into_iter()
            .map(FreeInterval::from)
            .collect();

        ParticipantAvailability {
            email: email.to_string(),
            busy: valid,
            free,
        }
    }

    /// A participant with no known commitments
    pub fn fully_free(&self, email: &str, window: &TimeRange) -> ParticipantAvailability {
        self.resolve(email, Vec::new(), window)
    }
}

/// Convenience function to resolve free intervals without a buffer
pub fn free_intervals(busy: &[BusyInterval], window: &TimeRange) -> Vec<FreeInterval> {
    AvailabilityResolver::new()
        .resolve("", busy.to_vec(), window)
        .free
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(5 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 4, hour, minute, 0)
            .unwrap()
    }

    fn window() -> TimeRange {
        TimeRange::new(at(8, 0), at(18, 0)).unwrap()
    }

    #[test]
    fn no_busy_is_whole_window() {
        let free = free_intervals(&[], &window());
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].range(), window());
        assert!(free[0].available);
    }

    #[test]
    fn unsorted_overlapping_busy() {
        let busy = vec![
            BusyInterval::new(at(14, 0), at(15, 0), "c"),
            BusyInterval::new(at(9, 0), at(10, 30), "a"),
            BusyInterval::new(at(10, 0), at(11, 0), "b"),
        ];
        let ranges: Vec<TimeRange> = free_intervals(&busy, &window())
            .iter()
            .map(FreeInterval::range)
            .collect();
        assert_eq!(
            ranges,
            vec![
                TimeRange::new(at(8, 0), at(9, 0)).unwrap(),
                TimeRange::new(at(11, 0), at(14, 0)).unwrap(),
                TimeRange::new(at(15, 0), at(18, 0)).unwrap(),
            ]
        );
    }

    #[test]
    fn drops_inverted_intervals() {
        let busy = vec![BusyInterval::new(at(11, 0), at(10, 0), "broken")];
        let avail = AvailabilityResolver::new().resolve("a@x.com", busy, &window());
        assert!(avail.busy.is_empty());
        assert_eq!(avail.free_minutes(), 600);
    }

    #[test]
    fn buffer_pads_busy_intervals() {
        let busy = vec![BusyInterval::new(at(12, 0), at(13, 0), "Lunch")];
        let avail = AvailabilityResolver::new()
            .with_buffer(15)
            .resolve("a@x.com", busy, &window());
        let ranges = avail.free_ranges();
        assert_eq!(ranges[0].end, at(11, 45));
        assert_eq!(ranges[1].start, at(13, 15));
    }
}
