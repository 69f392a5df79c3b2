//! Strategy selection and the final recommendation.

use std::fmt;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::meeting::{
    authority_of, AuthorityLevel, CandidateSlot, Complexity, MeetingRequirement, Participant,
    Urgency,
};

/// Named conflict-resolution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    OverrideLowerPriority,
    FindImmediateAlternative,
    ExecutivePriority,
    CollaborativeOptimization,
}

impl ResolutionStrategy {
    /// Fixed lookup over (urgency, authority)
    pub fn select(urgency: Urgency, authority: AuthorityLevel) -> Self {
        match (urgency, authority) {
            (Urgency::High, AuthorityLevel::High) => Self::OverrideLowerPriority,
            (Urgency::High, _) => Self::FindImmediateAlternative,
            (_, AuthorityLevel::High) => Self::ExecutivePriority,
            _ => Self::CollaborativeOptimization,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverrideLowerPriority => "override-lower-priority",
            Self::FindImmediateAlternative => "find-immediate-alternative",
            Self::ExecutivePriority => "executive-priority",
            Self::CollaborativeOptimization => "collaborative-optimization",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            Self::OverrideLowerPriority => {
                "High priority urgent meeting - recommend displacing conflicting lower-priority items"
            }
            Self::FindImmediateAlternative => {
                "Urgent meeting - accepting best available slot even with minor conflicts"
            }
            Self::ExecutivePriority => {
                "Executive meeting - optimizing around the senior participant's free time"
            }
            Self::CollaborativeOptimization => {
                "Standard priority - picking the best conflict-free slot for all participants"
            }
        }
    }

    /// Pick the recommended slot from a ranked list.
    ///
    /// Falls back to the top-ranked slot when the strategy's own criterion
    /// matches nothing.
    fn pick<'a>(
        &self,
        ranked: &'a [CandidateSlot],
        participants: &[Participant],
    ) -> Option<&'a CandidateSlot> {
        let preferred = match self {
            Self::OverrideLowerPriority | Self::FindImmediateAlternative => None,
            Self::ExecutivePriority => {
                // first participant wins among equal weights
                let senior = participants.iter().fold(None::<&Participant>, |best, p| {
                    match best {
                        Some(b) if b.priority_weight >= p.priority_weight => Some(b),
                        _ => Some(p),
                    }
                });
                senior.and_then(|senior| {
                    ranked.iter().find(|slot| {
                        !slot
                            .conflicts
                            .iter()
                            .any(|c| c.participant_email == senior.email)
                    })
                })
            }
            Self::CollaborativeOptimization => ranked.iter().find(|slot| !slot.has_conflicts()),
        };
        preferred.or_else(|| ranked.first())
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recommendation and everything said about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub recommended: CandidateSlot,
    pub strategy: ResolutionStrategy,
    pub note: String,
    pub urgency: Urgency,
    pub authority: AuthorityLevel,
    pub priority_assessment: String,
    pub recommended_actions: Vec<String>,
    pub energy_note: String,
    pub preparation_minutes: u32,
    /// Human-readable trail explaining the pick
    pub reasoning: Vec<String>,
}

impl Resolution {
    pub fn conflicts_detected(&self) -> bool {
        self.recommended.has_conflicts()
    }
}

/// Interprets a ranked candidate list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictResolver;

impl ConflictResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build the recommendation. `None` when `ranked` is empty.
    pub fn resolve(
        &self,
        ranked: &[CandidateSlot],
        requirement: &MeetingRequirement,
        participants: &[Participant],
    ) -> Option<Resolution> {
        let urgency = requirement.priority.urgency();
        let authority = authority_of(participants);
        let strategy = ResolutionStrategy::select(urgency, authority);
        let recommended = strategy.pick(ranked, participants)?.clone();

        let mut reasoning = vec![format!(
            "Selected {} with score {}",
            recommended.start.to_rfc3339(),
            recommended.score
        )];
        if recommended.has_conflicts() {
            reasoning.push(format!("Detected {} conflicts", recommended.conflicts.len()));
            for conflict in &recommended.conflicts {
                reasoning.push(format!(
                    "- {}: {}",
                    conflict.participant_email, conflict.conflicting_summary
                ));
            }
        } else {
            reasoning.push("No conflicts detected".to_string());
        }

        let recommended_actions =
            recommended_actions(recommended.has_conflicts(), urgency == Urgency::High);
        let hour = recommended.start.hour();

        Some(Resolution {
            strategy,
            note: strategy.note().to_string(),
            urgency,
            authority,
            priority_assessment: format!(
                "Meeting priority: {}, Urgency: {}, Authority: {}, Strategy: {}",
                requirement.priority.as_str(),
                urgency.as_str(),
                authority.as_str(),
                strategy
            ),
            recommended_actions,
            energy_note: energy_note(hour, requirement.complexity),
            preparation_minutes: preparation_minutes(requirement.complexity),
            reasoning,
            recommended,
        })
    }
}

/// Next steps for the organizer, most pressing first
pub fn recommended_actions(conflicts: bool, high_urgency: bool) -> Vec<String> {
    let mut actions = Vec::new();
    if conflicts {
        if high_urgency {
            actions.push("Request conflict resolution from participants".to_string());
        }
        actions.push("Notify participants of potential conflicts".to_string());
    }
    actions.extend(
        [
            "Send calendar invitations",
            "Confirm participant availability",
            "Set up meeting preparation materials",
        ]
        .map(String::from),
    );
    actions
}

pub fn energy_note(hour: u32, complexity: Complexity) -> String {
    let mut note = match hour {
        9..=11 => "Morning slot - optimal for strategic discussions and complex topics",
        14..=16 => "Afternoon slot - good for operational discussions and follow-ups",
        _ => "Standard business hours - adequate for most meeting types",
    }
    .to_string();

    match (complexity, hour) {
        (Complexity::Complex, 9..=11) => {
            note.push_str(" | Excellent match: complex meeting in high-energy morning slot");
        }
        (Complexity::Simple, 14..=16) => {
            note.push_str(" | Good match: simple meeting in collaborative afternoon slot");
        }
        _ => {}
    }
    note
}

pub fn preparation_minutes(complexity: Complexity) -> u32 {
    match complexity {
        Complexity::Complex => 30,
        Complexity::Simple | Complexity::Moderate => 15,
    }
}
