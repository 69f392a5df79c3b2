//! Meeting requirements supplied by a directive source.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_DURATION_MINUTES: i64 = 15;
pub const MAX_DURATION_MINUTES: i64 = 480;
pub const MAX_BUFFER_MINUTES: i64 = 60;

/// Meeting priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Urgency bucket used to pick a resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    High,
}

impl Priority {
    pub fn urgency(&self) -> Urgency {
        match self {
            Self::High | Self::Urgent => Urgency::High,
            Self::Low | Self::Medium => Urgency::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

/// Preferred part of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "hour")]
pub enum TimePreference {
    Morning,
    Afternoon,
    /// A specific start hour (0-23) was requested
    SpecificHour(u32),
    #[default]
    Flexible,
}

/// How demanding the meeting is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    #[default]
    Moderate,
    Complex,
}

/// Structured meeting requirement consumed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRequirement {
    pub duration_minutes: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub preferred_days: Vec<Weekday>,
    #[serde(default)]
    pub time_preference: TimePreference,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub buffer_minutes: i64,
}

impl MeetingRequirement {
    pub fn new(duration_minutes: i64) -> Self {
        Self {
            duration_minutes,
            priority: Priority::default(),
            preferred_days: Vec::new(),
            time_preference: TimePreference::default(),
            complexity: Complexity::default(),
            buffer_minutes: 0,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_time_preference(mut self, preference: TimePreference) -> Self {
        self.time_preference = preference;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_preferred_days(mut self, days: Vec<Weekday>) -> Self {
        self.preferred_days = days;
        self
    }

    pub fn with_buffer(mut self, minutes: i64) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    /// Check ranges before any computation happens
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(ValidationError::InvalidDuration {
                minutes: self.duration_minutes,
                min: MIN_DURATION_MINUTES,
                max: MAX_DURATION_MINUTES,
            });
        }
        if !(0..=MAX_BUFFER_MINUTES).contains(&self.buffer_minutes) {
            return Err(ValidationError::invalid_value(
                "buffer_minutes",
                format!("must be between 0 and {MAX_BUFFER_MINUTES}"),
            ));
        }
        if let TimePreference::SpecificHour(hour) = self.time_preference {
            if hour > 23 {
                return Err(ValidationError::invalid_value(
                    "time_preference",
                    format!("hour {hour} is not between 0 and 23"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_bounds() {
        assert!(MeetingRequirement::new(15).validate().is_ok());
        assert!(MeetingRequirement::new(480).validate().is_ok());
        assert!(matches!(
            MeetingRequirement::new(10).validate(),
            Err(ValidationError::InvalidDuration { minutes: 10, .. })
        ));
        assert!(MeetingRequirement::new(481).validate().is_err());
    }

    #[test]
    fn rejects_bad_hour_and_buffer() {
        let req = MeetingRequirement::new(30).with_time_preference(TimePreference::SpecificHour(24));
        assert!(req.validate().is_err());
        assert!(MeetingRequirement::new(30).with_buffer(61).validate().is_err());
        assert!(MeetingRequirement::new(30).with_buffer(-1).validate().is_err());
    }

    #[test]
    fn urgency_buckets() {
        assert_eq!(Priority::Urgent.urgency(), Urgency::High);
        assert_eq!(Priority::High.urgency(), Urgency::High);
        assert_eq!(Priority::Medium.urgency(), Urgency::Normal);
        assert_eq!(Priority::Low.urgency(), Urgency::Normal);
    }

    #[test]
    fn deserializes_with_defaults() {
        let req: MeetingRequirement = serde_json::from_str(
            r#"{"duration_minutes": 45, "time_preference": {"kind": "specific_hour", "hour": 11}}"#,
        )
        .unwrap();
        assert_eq!(req.priority, Priority::Medium);
        assert_eq!(req.time_preference, TimePreference::SpecificHour(11));
        assert_eq!(req.complexity, Complexity::Moderate);
        assert!(req.preferred_days.is_empty());
    }
}
