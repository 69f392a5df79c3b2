//! Individual scoring rules.
//!
//! Each rule looks at one candidate and returns zero or more adjustments.
//! Rules are applied in a fixed order by [`super::SlotScorer`]; the order
//! only affects the reasoning trail since every term is additive.

use chrono::{Datelike, Timelike, Weekday};

use super::ScoringContext;
use crate::interval::TimeRange;
use crate::meeting::{Complexity, ConflictRecord, Priority, TimePreference};

/// One score change with its explanation
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub delta: f64,
    pub reason: String,
    pub conflict: Option<ConflictRecord>,
}

impl Adjustment {
    fn bonus(delta: f64, label: &str) -> Self {
        Self {
            delta,
            reason: format!("{label} ({delta:+})"),
            conflict: None,
        }
    }

    fn penalty(amount: f64, label: &str) -> Self {
        Self::bonus(-amount, label)
    }
}

/// A typed scoring rule.
pub trait ScoringRule: Send + Sync {
    /// Stable rule identifier
    fn name(&self) -> &'static str;

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment>;
}

/// Rules in their fixed application order.
pub fn default_rules() -> Vec<Box<dyn ScoringRule>> {
    vec![
        Box::new(ConflictPenalty),
        Box::new(TimeOfDayBonus),
        Box::new(DayOfWeekBonus),
        Box::new(UrgencyAdjustment),
        Box::new(EnergyMatch),
        Box::new(LunchPenalty),
        Box::new(PreferredDayBonus),
    ]
}

/// Penalize every participant commitment overlapping the candidate.
pub struct ConflictPenalty;

impl ScoringRule for ConflictPenalty {
    fn name(&self) -> &'static str {
        "conflict_penalty"
    }

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment> {
        let mut out = Vec::new();
        for (participant, busy) in ctx.participants.iter().zip(ctx.busy.iter()) {
            for interval in busy.iter().filter(|b| b.overlaps(candidate)) {
                let severity = (ctx.weights.conflict_penalty_per_weight
                    * f64::from(participant.priority_weight))
                .round() as i64;
                let summary = if interval.summary.is_empty() {
                    "busy".to_string()
                } else {
                    interval.summary.clone()
                };
                out.push(Adjustment {
                    delta: -(severity as f64),
                    reason: format!(
                        "Conflict with {} ({}) - severity: {}",
                        participant.email, summary, severity
                    ),
                    conflict: Some(ConflictRecord {
                        participant_email: participant.email.clone(),
                        conflicting_summary: summary,
                        severity,
                    }),
                });
            }
        }
        out
    }
}

/// Day-part preference match plus a general business-hours bonus.
pub struct TimeOfDayBonus;

impl ScoringRule for TimeOfDayBonus {
    fn name(&self) -> &'static str {
        "time_of_day"
    }

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment> {
        let hour = candidate.start.hour();
        let w = ctx.weights;
        let mut out = Vec::new();

        match ctx.requirement.time_preference {
            TimePreference::Morning if (9..=11).contains(&hour) => {
                out.push(Adjustment::bonus(w.preference_bonus, "Morning preference bonus"));
            }
            TimePreference::Afternoon if (14..=16).contains(&hour) => {
                out.push(Adjustment::bonus(w.preference_bonus, "Afternoon preference bonus"));
            }
            _ => {}
        }

        if (8..=16).contains(&hour) {
            out.push(Adjustment::bonus(w.business_hours_bonus, "Business hours bonus"));
        }
        out
    }
}

/// Prefer Tuesday to Thursday, then Monday and Friday.
pub struct DayOfWeekBonus;

impl ScoringRule for DayOfWeekBonus {
    fn name(&self) -> &'static str {
        "day_of_week"
    }

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment> {
        match candidate.start.weekday() {
            Weekday::Tue | Weekday::Wed | Weekday::Thu => {
                vec![Adjustment::bonus(ctx.weights.midweek_bonus, "Midweek bonus")]
            }
            Weekday::Mon | Weekday::Fri => {
                vec![Adjustment::bonus(ctx.weights.edge_weekday_bonus, "Monday/Friday bonus")]
            }
            Weekday::Sat | Weekday::Sun => Vec::new(),
        }
    }
}

/// Urgent meetings get a flat bonus and favor the morning.
pub struct UrgencyAdjustment;

impl ScoringRule for UrgencyAdjustment {
    fn name(&self) -> &'static str {
        "urgency"
    }

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment> {
        if ctx.requirement.priority != Priority::Urgent {
            return Vec::new();
        }
        let w = ctx.weights;
        let timing = if candidate.start.hour() <= 12 {
            Adjustment::bonus(w.urgent_early_bonus, "Urgent early-hour bonus")
        } else {
            Adjustment::bonus(w.urgent_late_bonus, "Urgent later-hour bonus")
        };
        vec![Adjustment::bonus(w.urgent_bonus, "Urgency bonus"), timing]
    }
}

/// Complex meetings fit the high-energy morning hours.
pub struct EnergyMatch;

impl ScoringRule for EnergyMatch {
    fn name(&self) -> &'static str {
        "energy_match"
    }

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment> {
        if ctx.requirement.complexity == Complexity::Complex
            && (9..=11).contains(&candidate.start.hour())
        {
            vec![Adjustment::bonus(
                ctx.weights.complex_morning_bonus,
                "Complex meeting morning bonus",
            )]
        } else {
            Vec::new()
        }
    }
}

pub struct LunchPenalty;

impl ScoringRule for LunchPenalty {
    fn name(&self) -> &'static str {
        "lunch_penalty"
    }

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment> {
        if candidate.start.hour() == 12 {
            vec![Adjustment::penalty(ctx.weights.lunch_penalty, "Lunch hour penalty")]
        } else {
            Vec::new()
        }
    }
}

pub struct PreferredDayBonus;

impl ScoringRule for PreferredDayBonus {
    fn name(&self) -> &'static str {
        "preferred_day"
    }

    fn apply(&self, candidate: &TimeRange, ctx: &ScoringContext<'_>) -> Vec<Adjustment> {
        let weekday = candidate.start.weekday();
        if ctx.requirement.preferred_days.contains(&weekday) {
            vec![Adjustment::bonus(
                ctx.weights.preferred_day_bonus,
                &format!("Preferred day bonus ({weekday})"),
            )]
        } else {
            Vec::new()
        }
    }
}
