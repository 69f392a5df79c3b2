//! Candidate generation.
//!
//! Turns shared windows into a bounded list of concrete `(start, end)` pairs,
//! one per interesting hour. Hours are read in a single reference offset (the
//! offset of the requested window) so that "9:00" means the same wall-clock
//! hour for every window regardless of which participant's interval bounded it.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use tracing::debug;

use crate::interval::TimeRange;
use crate::meeting::TimePreference;

/// Morning hours considered for a morning preference
pub const MORNING_HOURS: [u32; 3] = [9, 10, 11];
/// Afternoon hours considered for an afternoon preference
pub const AFTERNOON_HOURS: [u32; 3] = [14, 15, 16];

/// Hours of the day a preference expands to
pub fn preferred_hours(preference: TimePreference) -> Vec<u32> {
    match preference {
        TimePreference::SpecificHour(hour) => vec![hour],
        TimePreference::Morning => MORNING_HOURS.to_vec(),
        TimePreference::Afternoon => AFTERNOON_HOURS.to_vec(),
        TimePreference::Flexible => MORNING_HOURS
            .iter()
            .chain(AFTERNOON_HOURS.iter())
            .copied()
            .collect(),
    }
}

/// Emits candidate slots inside shared windows.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    duration_minutes: i64,
    hours: Vec<u32>,
    offset: FixedOffset,
    max_candidates: usize,
}

impl CandidateGenerator {
    pub fn new(duration_minutes: i64, preference: TimePreference, offset: FixedOffset) -> Self {
        Self {
            duration_minutes,
            hours: preferred_hours(preference),
            offset,
            max_candidates: 64,
        }
    }

    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// Candidates sorted by start, without duplicates.
    ///
    /// For each day a window touches and each preferred hour, the hour is
    /// clipped forward to the window start if the window opens mid-hour. A
    /// candidate that would end after the window closes is discarded.
    ///
    /// The set never holds more than `max_candidates` starts, and a window
    /// stops being walked once its next day begins after the latest kept
    /// start, so work is bounded by the cap rather than the window length.
    pub fn generate(&self, shared: &[TimeRange]) -> Vec<TimeRange> {
        let mut starts: BTreeSet<DateTime<FixedOffset>> = BTreeSet::new();

        for window in shared {
            let first_day = window.start.with_timezone(&self.offset).date_naive();
            let last_day = window.end.with_timezone(&self.offset).date_naive();

            for day in first_day.iter_days().take_while(|d| *d <= last_day) {
                if self.is_full_before(&starts, day) {
                    break;
                }
                for &hour in &self.hours {
                    if let Some(start) = self.fit(window, day, hour) {
                        starts.insert(start);
                        if starts.len() > self.max_candidates {
                            starts.pop_last();
                        }
                    }
                }
            }
        }

        let candidates: Vec<TimeRange> = starts
            .into_iter()
            .map(|start| TimeRange::starting_at(start, self.duration_minutes))
            .collect();

        debug!(
            target: "meetslot::candidate",
            windows = shared.len(),
            candidates = candidates.len(),
            "generated candidates"
        );
        candidates
    }

    /// True when the set is at the cap and nothing on `day` could displace
    /// its latest start.
    fn is_full_before(&self, starts: &BTreeSet<DateTime<FixedOffset>>, day: NaiveDate) -> bool {
        if starts.len() < self.max_candidates {
            return false;
        }
        let Some(midnight) = day
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| self.offset.from_local_datetime(&naive).single())
        else {
            return false;
        };
        starts.last().map_or(true, |latest| midnight > *latest)
    }

    fn fit(&self, window: &TimeRange, day: NaiveDate, hour: u32) -> Option<DateTime<FixedOffset>> {
        let naive = day.and_hms_opt(hour, 0, 0)?;
        let hour_start = self.offset.from_local_datetime(&naive).single()?;
        let hour_end = hour_start + Duration::hours(1);

        if hour_end <= window.start || hour_start >= window.end {
            return None;
        }

        let start = hour_start.max(window.start.with_timezone(&self.offset));
        let end = start + Duration::minutes(self.duration_minutes);
        (end <= window.end).then_some(start)
    }
}
