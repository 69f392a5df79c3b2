use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::interval::TimeRange;

/// A participant commitment that overlaps a candidate slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub participant_email: String,
    pub conflicting_summary: String,
    /// `conflict_penalty_per_weight × participant weight`
    pub severity: i64,
}

/// A concrete start/end pair with its score and explanation.
///
/// `reasoning` order is part of the contract: conflicts in discovery order
/// first, bonuses and penalties after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub score: f64,
    pub conflicts: Vec<ConflictRecord>,
    pub reasoning: Vec<String>,
}

impl CandidateSlot {
    /// Unscored slot covering `range`
    pub fn unscored(range: TimeRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
            score: 0.0,
            conflicts: Vec::new(),
            reasoning: Vec::new(),
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
