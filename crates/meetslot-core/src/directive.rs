//! Directive sources: whatever turns a request into a [`MeetingRequirement`].
//!
//! Free-text extraction lives outside this crate. [`StructuredDirective`] is
//! the structured form, with the defaults a scheduling request falls back to
//! when a field is omitted.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::meeting::{Complexity, MeetingRequirement, Priority, TimePreference};

/// Produces a validated meeting requirement.
pub trait DirectiveSource {
    fn requirement(&self) -> Result<MeetingRequirement>;
}

/// Structured scheduling directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDirective {
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
    #[serde(default)]
    pub priority: Priority,
    /// Weekday names, e.g. "tuesday" or "Tue"
    #[serde(default)]
    pub preferred_days: Vec<String>,
    #[serde(default)]
    pub time_preference: TimePreference,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default = "default_buffer")]
    pub buffer_minutes: i64,
}

fn default_duration() -> i64 {
    30
}

fn default_buffer() -> i64 {
    15
}

impl Default for StructuredDirective {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration(),
            priority: Priority::default(),
            preferred_days: Vec::new(),
            time_preference: TimePreference::default(),
            complexity: Complexity::default(),
            buffer_minutes: default_buffer(),
        }
    }
}

impl DirectiveSource for StructuredDirective {
    fn requirement(&self) -> Result<MeetingRequirement> {
        let preferred_days = self
            .preferred_days
            .iter()
            .map(|name| {
                name.trim().parse::<Weekday>().map_err(|_| {
                    ValidationError::invalid_value(
                        "preferred_days",
                        format!("'{name}' is not a weekday name"),
                    )
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let requirement = MeetingRequirement {
            duration_minutes: self.duration_minutes,
            priority: self.priority,
            preferred_days,
            time_preference: self.time_preference,
            complexity: self.complexity,
            buffer_minutes: self.buffer_minutes,
        };
        requirement.validate()?;
        Ok(requirement)
    }
}

/// A requirement that is already structured passes through after validation.
impl DirectiveSource for MeetingRequirement {
    fn requirement(&self) -> Result<MeetingRequirement> {
        self.validate()?;
        Ok(self.clone())
    }
}
