//! Slot scoring and ranking.
//!
//! A candidate starts at [`ScoringWeights::base_score`] and every rule in
//! [`rules::default_rules`] adds or subtracts from it. The final score is
//! clamped to be non-negative. Scoring is a pure function of its inputs.
//!
//! ## Rule order
//!
//! | # | Rule | Effect |
//! |---|------|--------|
//! | 1 | conflict penalty | `-penalty × weight` per overlapping commitment |
//! | 2 | time of day | preference match, business hours |
//! | 3 | day of week | Tue-Thu, Mon/Fri |
//! | 4 | urgency | urgent only, favors mornings |
//! | 5 | energy match | complex meetings in the morning |
//! | 6 | lunch penalty | starts in the 12:00 hour |
//! | 7 | preferred day | weekday listed in the requirement |

pub mod rules;
mod weights;

use std::cmp::Ordering;

pub use rules::{default_rules, Adjustment, ScoringRule};
pub use weights::ScoringWeights;

use crate::interval::TimeRange;
use crate::meeting::{BusyInterval, CandidateSlot, MeetingRequirement, Participant};

/// Everything a rule may look at.
///
/// `busy[i]` holds the busy intervals of `participants[i]`.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub participants: &'a [Participant],
    pub busy: &'a [Vec<BusyInterval>],
    pub requirement: &'a MeetingRequirement,
    pub weights: &'a ScoringWeights,
}

/// Applies the ordered rule set to candidates.
pub struct SlotScorer {
    rules: Vec<Box<dyn ScoringRule>>,
}

impl SlotScorer {
    /// Create a scorer with the default rule order
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create with a custom rule list
    pub fn with_rules(rules: Vec<Box<dyn ScoringRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Score a single candidate
    pub fn score(&self, candidate: TimeRange, ctx: &ScoringContext<'_>) -> CandidateSlot {
        let mut slot = CandidateSlot::unscored(candidate);
        let mut total = ctx.weights.base_score;

        for rule in &self.rules {
            for adjustment in rule.apply(&candidate, ctx) {
                total += adjustment.delta;
                slot.reasoning.push(adjustment.reason);
                if let Some(conflict) = adjustment.conflict {
                    slot.conflicts.push(conflict);
                }
            }
        }

        slot.score = total.max(0.0);
        slot
    }

    /// Score every candidate and return them best first
    pub fn score_all(&self, candidates: &[TimeRange], ctx: &ScoringContext<'_>) -> Vec<CandidateSlot> {
        let mut slots: Vec<CandidateSlot> =
            candidates.iter().map(|c| self.score(*c, ctx)).collect();
        rank_slots(&mut slots);
        slots
    }
}

impl Default for SlotScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordering used for ranking: score descending, then earliest start,
/// then fewest conflicts.
pub fn compare_slots(a: &CandidateSlot, b: &CandidateSlot) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.conflicts.len().cmp(&b.conflicts.len()))
}

/// Sort slots best first
pub fn rank_slots(slots: &mut [CandidateSlot]) {
    slots.sort_by(compare_slots);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{Complexity, Priority, TimePreference};
    use chrono::{DateTime, FixedOffset, TimeZone};

    // 2025-03-04 is a Tuesday
    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, day, hour, 0, 0)
            .unwrap()
    }

    fn slot(day: u32, hour: u32) -> TimeRange {
        TimeRange::starting_at(at(day, hour), 30)
    }

    fn score_one(
        candidate: TimeRange,
        participants: &[Participant],
        busy: &[Vec<BusyInterval>],
        requirement: &MeetingRequirement,
    ) -> CandidateSlot {
        let weights = ScoringWeights::default();
        let ctx = ScoringContext {
            participants,
            busy,
            requirement,
            weights: &weights,
        };
        SlotScorer::new().score(candidate, &ctx)
    }

    #[test]
    fn free_midweek_morning_scores_base_plus_bonuses() {
        let people = vec![Participant::organizer("a@x.com"), Participant::attendee("b@x.com")];
        let busy = vec![Vec::new(), Vec::new()];
        let req = MeetingRequirement::new(30).with_time_preference(TimePreference::Morning);

        let scored = score_one(slot(4, 10), &people, &busy, &req);
        // base 100 + morning 10 + business 5 + midweek 20
        assert_eq!(scored.score, 135.0);
        assert!(scored.conflicts.is_empty());
        assert_eq!(
            scored.reasoning,
            vec![
                "Morning preference bonus (+10)",
                "Business hours bonus (+5)",
                "Midweek bonus (+20)",
            ]
        );
    }

    #[test]
    fn conflict_severity_scales_with_weight() {
        let people = vec![
            Participant::organizer("a@x.com"),
            Participant::attendee("x@x.com").with_weight(8),
        ];
        let busy = vec![
            Vec::new(),
            vec![BusyInterval::new(at(4, 9), at(4, 10), "Standup")],
        ];
        let req = MeetingRequirement::new(30);

        let nine = score_one(slot(4, 9), &people, &busy, &req);
        assert_eq!(nine.conflicts.len(), 1);
        assert_eq!(nine.conflicts[0].participant_email, "x@x.com");
        assert_eq!(nine.conflicts[0].conflicting_summary, "Standup");
        assert_eq!(nine.conflicts[0].severity, 40);
        assert_eq!(nine.reasoning[0], "Conflict with x@x.com (Standup) - severity: 40");

        let ten = score_one(slot(4, 10), &people, &busy, &req);
        assert!(ten.conflicts.is_empty());
        assert!(ten.score > nine.score);
    }

    #[test]
    fn conflicts_are_reported_in_discovery_order_before_bonuses() {
        let people = vec![Participant::attendee("a@x.com"), Participant::attendee("b@x.com")];
        let busy = vec![
            vec![BusyInterval::new(at(4, 9), at(4, 11), "Review")],
            vec![BusyInterval::new(at(4, 8), at(4, 10), "Sync")],
        ];
        let scored = score_one(slot(4, 9), &people, &busy, &MeetingRequirement::new(30));
        assert_eq!(scored.conflicts[0].participant_email, "a@x.com");
        assert_eq!(scored.conflicts[1].participant_email, "b@x.com");
        assert!(scored.reasoning[0].starts_with("Conflict with a@x.com"));
        assert!(scored.reasoning[1].starts_with("Conflict with b@x.com"));
        assert!(scored.reasoning[2].starts_with("Business hours"));
    }

    #[test]
    fn urgent_prefers_early_hours() {
        let people = vec![Participant::organizer("a@x.com")];
        let busy = vec![Vec::new()];
        let req = MeetingRequirement::new(30).with_priority(Priority::Urgent);

        let nine = score_one(slot(4, 9), &people, &busy, &req);
        let fifteen = score_one(slot(4, 15), &people, &busy, &req);
        assert_eq!(nine.score, 100.0 + 5.0 + 20.0 + 15.0 + 30.0);
        assert_eq!(fifteen.score, 100.0 + 5.0 + 20.0 + 15.0 + 10.0);
        assert!(nine.score > fifteen.score);
    }

    #[test]
    fn lunch_and_complexity_rules() {
        let people = vec![Participant::organizer("a@x.com")];
        let busy = vec![Vec::new()];
        let req = MeetingRequirement::new(30).with_complexity(Complexity::Complex);

        let noon = score_one(slot(4, 12), &people, &busy, &req);
        assert_eq!(noon.score, 100.0 + 5.0 + 20.0 - 20.0);

        let ten = score_one(slot(4, 10), &people, &busy, &req);
        assert!(ten.reasoning.iter().any(|r| r.starts_with("Complex meeting morning bonus")));
    }

    #[test]
    fn preferred_day_and_weekend() {
        let people = vec![Participant::organizer("a@x.com")];
        let busy = vec![Vec::new()];
        let req = MeetingRequirement::new(30).with_preferred_days(vec![chrono::Weekday::Sat]);

        // 2025-03-08 is a Saturday
        let saturday = score_one(slot(8, 10), &people, &busy, &req);
        assert_eq!(saturday.score, 100.0 + 5.0 + 10.0);
    }

    #[test]
    fn score_is_clamped_at_zero() {
        let people = vec![Participant::attendee("a@x.com").with_weight(50)];
        let busy = vec![vec![BusyInterval::new(at(4, 18), at(4, 20), "Offsite")]];
        let scored = score_one(slot(4, 18), &people, &busy, &MeetingRequirement::new(30));
        assert_eq!(scored.score, 0.0);
        assert_eq!(scored.conflicts[0].severity, 250);
    }

    #[test]
    fn ranking_breaks_ties_by_start_then_conflicts() {
        let mut slots = vec![
            CandidateSlot { score: 50.0, ..CandidateSlot::unscored(slot(4, 11)) },
            CandidateSlot { score: 80.0, ..CandidateSlot::unscored(slot(4, 15)) },
            CandidateSlot { score: 50.0, ..CandidateSlot::unscored(slot(4, 9)) },
        ];
        rank_slots(&mut slots);
        let hours: Vec<u32> = slots.iter().map(|s| chrono::Timelike::hour(&s.start)).collect();
        assert_eq!(hours, vec![15, 9, 11]);
    }

    #[test]
    fn default_rule_order() {
        assert_eq!(
            SlotScorer::new().rule_names(),
            vec![
                "conflict_penalty",
                "time_of_day",
                "day_of_week",
                "urgency",
                "energy_match",
                "lunch_penalty",
                "preferred_day",
            ]
        );
    }
}
