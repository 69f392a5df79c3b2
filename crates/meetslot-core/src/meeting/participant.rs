//! Meeting participants and authority weights.

use serde::{Deserialize, Serialize};

/// Participant role in a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Organizer,
    Attendee,
    Optional,
}

impl Role {
    /// Authority weight used when none is supplied explicitly
    pub fn default_weight(&self) -> u32 {
        match self {
            Self::Organizer => 6,
            Self::Attendee => 5,
            Self::Optional => 3,
        }
    }
}

/// Coarse authority bucket derived from the highest participant weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityLevel {
    Low,
    Medium,
    High,
}

impl AuthorityLevel {
    pub fn from_weight(weight: u32) -> Self {
        if weight >= 8 {
            Self::High
        } else if weight >= 6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A meeting participant. Immutable for the duration of a resolution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub email: String,
    pub role: Role,
    /// Authority weight (>= 1); scales conflict severity
    pub priority_weight: u32,
    /// IANA name or offset label; informational only
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Participant {
    /// Create a participant with the role's default weight
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
            priority_weight: role.default_weight(),
            timezone: default_timezone(),
        }
    }

    pub fn organizer(email: impl Into<String>) -> Self {
        Self::new(email, Role::Organizer)
    }

    pub fn attendee(email: impl Into<String>) -> Self {
        Self::new(email, Role::Attendee)
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.priority_weight = weight.max(1);
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }
}

/// Infer an authority weight from the local part of an email address.
///
/// Title keywords map to weights: executive titles 10, management 8,
/// team members 6, everyone else 5.
pub fn authority_weight_from_email(email: &str) -> u32 {
    let local = email.split('@').next().unwrap_or(email).to_lowercase();
    let has_any = |titles: &[&str]| titles.iter().any(|t| local.contains(t));

    if has_any(&["admin", "ceo", "director", "head"]) {
        10
    } else if has_any(&["manager", "lead", "senior"]) {
        8
    } else if has_any(&["team", "dev", "engineer"]) {
        6
    } else {
        5
    }
}

/// Authority bucket of a participant list (max weight)
pub fn authority_of(participants: &[Participant]) -> AuthorityLevel {
    let max = participants
        .iter()
        .map(|p| p.priority_weight)
        .max()
        .unwrap_or(1);
    AuthorityLevel::from_weight(max)
}
