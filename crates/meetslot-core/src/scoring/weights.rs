use serde::{Deserialize, Serialize};

/// Constants used by the slot scoring rules.
///
/// Defaults reproduce the fixed rule set; every field can be overridden from
/// the `[scoring]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Starting score of every candidate
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    /// Subtracted per unit of participant weight for each conflict
    #[serde(default = "default_conflict_penalty_per_weight")]
    pub conflict_penalty_per_weight: f64,
    /// Morning/afternoon preference match
    #[serde(default = "default_preference_bonus")]
    pub preference_bonus: f64,
    /// Any start hour in 8..=16
    #[serde(default = "default_business_hours_bonus")]
    pub business_hours_bonus: f64,
    /// Tuesday to Thursday
    #[serde(default = "default_midweek_bonus")]
    pub midweek_bonus: f64,
    /// Monday and Friday
    #[serde(default = "default_edge_weekday_bonus")]
    pub edge_weekday_bonus: f64,
    #[serde(default = "default_urgent_bonus")]
    pub urgent_bonus: f64,
    /// Urgent meeting starting at or before noon
    #[serde(default = "default_urgent_early_bonus")]
    pub urgent_early_bonus: f64,
    /// Urgent meeting starting after noon
    #[serde(default = "default_urgent_late_bonus")]
    pub urgent_late_bonus: f64,
    #[serde(default = "default_complex_morning_bonus")]
    pub complex_morning_bonus: f64,
    /// Subtracted for starts in the 12:00 hour
    #[serde(default = "default_lunch_penalty")]
    pub lunch_penalty: f64,
    #[serde(default = "default_preferred_day_bonus")]
    pub preferred_day_bonus: f64,
}

fn default_base_score() -> f64 {
    100.0
}
fn default_conflict_penalty_per_weight() -> f64 {
    5.0
}
fn default_preference_bonus() -> f64 {
    10.0
}
fn default_business_hours_bonus() -> f64 {
    5.0
}
fn default_midweek_bonus() -> f64 {
    20.0
}
fn default_edge_weekday_bonus() -> f64 {
    10.0
}
fn default_urgent_bonus() -> f64 {
    15.0
}
fn default_urgent_early_bonus() -> f64 {
    30.0
}
fn default_urgent_late_bonus() -> f64 {
    10.0
}
fn default_complex_morning_bonus() -> f64 {
    5.0
}
fn default_lunch_penalty() -> f64 {
    20.0
}
fn default_preferred_day_bonus() -> f64 {
    10.0
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            conflict_penalty_per_weight: default_conflict_penalty_per_weight(),
            preference_bonus: default_preference_bonus(),
            business_hours_bonus: default_business_hours_bonus(),
            midweek_bonus: default_midweek_bonus(),
            edge_weekday_bonus: default_edge_weekday_bonus(),
            urgent_bonus: default_urgent_bonus(),
            urgent_early_bonus: default_urgent_early_bonus(),
            urgent_late_bonus: default_urgent_late_bonus(),
            complex_morning_bonus: default_complex_morning_bonus(),
            lunch_penalty: default_lunch_penalty(),
            preferred_day_bonus: default_preferred_day_bonus(),
        }
    }
}
