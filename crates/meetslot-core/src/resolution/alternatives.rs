//! Fallback slots derived from the recommendation.

use chrono::{Duration, Timelike};
use serde::{Deserialize, Serialize};

use crate::interval::TimeRange;
use crate::meeting::CandidateSlot;
use crate::scoring::{compare_slots, ScoringContext, SlotScorer};

/// Maximum alternatives returned
pub const MAX_ALTERNATIVES: usize = 3;

const OFFSETS: [(i64, &str); 4] = [
    (60, "One hour later - minimal disruption"),
    (120, "Two hours later - afternoon alternative"),
    (-60, "One hour earlier - morning alternative"),
    (24 * 60, "Next day - same time slot"),
];

/// A backup slot with the offset that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub slot: CandidateSlot,
    pub reason: String,
}

/// Shifts the recommendation by fixed offsets and re-scores each shift.
pub struct AlternativeGenerator<'a> {
    scorer: &'a SlotScorer,
    earliest_hour: u32,
    latest_hour: u32,
}

impl<'a> AlternativeGenerator<'a> {
    pub fn new(scorer: &'a SlotScorer) -> Self {
        Self {
            scorer,
            earliest_hour: 9,
            latest_hour: 17,
        }
    }

    /// Accept start hours in `[earliest, latest]`
    pub fn with_hours(mut self, earliest: u32, latest: u32) -> Self {
        self.earliest_hour = earliest;
        self.latest_hour = latest;
        self
    }

    /// Up to [`MAX_ALTERNATIVES`] alternatives, best score first.
    pub fn generate(
        &self,
        recommended: &CandidateSlot,
        ctx: &ScoringContext<'_>,
    ) -> Vec<Alternative> {
        let duration = recommended.duration_minutes();
        let mut alternatives: Vec<Alternative> = OFFSETS
            .iter()
            .filter_map(|(offset, reason)| {
                let start = recommended.start + Duration::minutes(*offset);
                let hour = start.hour();
                if hour < self.earliest_hour || hour > self.latest_hour {
                    return None;
                }
                Some(Alternative {
                    slot: self
                        .scorer
                        .score(TimeRange::starting_at(start, duration), ctx),
                    reason: (*reason).to_string(),
                })
            })
            .collect();

        alternatives.sort_by(|a, b| compare_slots(&a.slot, &b.slot));
        alternatives.truncate(MAX_ALTERNATIVES);
        alternatives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{BusyInterval, MeetingRequirement, Participant};
    use crate::scoring::ScoringWeights;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, day, hour, 0, 0)
            .unwrap()
    }

    fn run(start_hour: u32, busy: Vec<Vec<BusyInterval>>) -> Vec<Alternative> {
        let people = vec![Participant::organizer("a@x.com")];
        let req = MeetingRequirement::new(30);
        let weights = ScoringWeights::default();
        let ctx = ScoringContext {
            participants: &people,
            busy: &busy,
            requirement: &req,
            weights: &weights,
        };
        let scorer = SlotScorer::new();
        let recommended = scorer.score(TimeRange::starting_at(at(4, start_hour), 30), &ctx);
        AlternativeGenerator::new(&scorer).generate(&recommended, &ctx)
    }

    #[test]
    fn at_most_three_sorted_by_score() {
        let alts = run(10, vec![Vec::new()]);
        assert_eq!(alts.len(), MAX_ALTERNATIVES);
        assert!(alts.windows(2).all(|w| w[0].slot.score >= w[1].slot.score));
        for alt in &alts {
            assert_eq!(alt.slot.duration_minutes(), 30);
        }
    }

    #[test]
    fn drops_offsets_outside_business_hours() {
        // 9:00 - 1h = 8:00 is rejected
        let alts = run(9, vec![Vec::new()]);
        assert!(alts.iter().all(|a| a.slot.start.hour() >= 9));
        assert!(!alts.iter().any(|a| a.reason.starts_with("One hour earlier")));
    }

    #[test]
    fn rescored_against_busy_intervals() {
        // 11:00 is busy: 100 - 30 + 5 + 20 = 95, below every free shift
        let busy = vec![vec![BusyInterval::new(at(4, 11), at(4, 12), "Review")]];
        let alts = run(10, busy);
        let starts: Vec<_> = alts.iter().map(|a| a.slot.start).collect();
        assert_eq!(starts, vec![at(4, 9), at(5, 10), at(4, 12)]);
        assert!(alts.iter().all(|a| a.slot.conflicts.is_empty()));
        assert_eq!(alts[2].slot.score, 105.0);
    }
}
