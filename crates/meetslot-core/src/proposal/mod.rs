//! Proposals produced by successful resolution runs.
//!
//! A proposal moves through a small state machine:
//!
//! ```text
//! pending --confirm(slot_index)--> confirmed
//! pending --cancel-------------->  cancelled
//! ```
//!
//! Confirmed and cancelled are terminal.

mod store;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::meeting::{CandidateSlot, MeetingRequirement, Participant};

pub use store::ProposalStore;

/// Proposal lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Ranked slots for one meeting request, awaiting a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub requirement: MeetingRequirement,
    pub participants: Vec<Participant>,
    /// Index 0 is the best slot
    pub ranked_slots: Vec<CandidateSlot>,
    pub reasoning_summary: Vec<String>,
    pub status: ProposalStatus,
    /// Slot bound by confirmation
    pub confirmed_slot_index: Option<usize>,
    pub created_at: DateTime<Utc>,
}

impl Proposal {
    /// Create a pending proposal with a fresh id
    pub fn new(
        requirement: MeetingRequirement,
        participants: Vec<Participant>,
        ranked_slots: Vec<CandidateSlot>,
        reasoning_summary: Vec<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            requirement,
            participants,
            ranked_slots,
            reasoning_summary,
            status: ProposalStatus::Pending,
            confirmed_slot_index: None,
            created_at: Utc::now(),
        }
    }

    pub fn confirmed_slot(&self) -> Option<&CandidateSlot> {
        self.confirmed_slot_index
            .and_then(|i| self.ranked_slots.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_and_terminality() {
        assert_eq!(ProposalStatus::Pending.to_string(), "pending");
        assert_eq!(ProposalStatus::Cancelled.to_string(), "cancelled");
        assert!(!ProposalStatus::Pending.is_terminal());
        assert!(ProposalStatus::Confirmed.is_terminal());
        assert!(ProposalStatus::Cancelled.is_terminal());
    }

    #[test]
    fn new_proposals_are_pending_with_unique_ids() {
        let a = Proposal::new(MeetingRequirement::new(30), Vec::new(), Vec::new(), Vec::new());
        let b = Proposal::new(MeetingRequirement::new(30), Vec::new(), Vec::new(), Vec::new());
        assert_eq!(a.status, ProposalStatus::Pending);
        assert!(a.confirmed_slot().is_none());
        assert_ne!(a.id, b.id);
    }
}
