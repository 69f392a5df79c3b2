//! Calendar provider port.
//!
//! The engine only needs busy intervals per email address. Real providers
//! (Google, Exchange, CalDAV) live outside this crate and implement
//! [`CalendarProvider`]; [`StaticCalendarProvider`] serves fixtures and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::interval::TimeRange;
use crate::meeting::BusyInterval;

/// Source of busy intervals for a participant.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Busy intervals for `email` overlapping `window`
    async fn get_busy_intervals(
        &self,
        email: &str,
        window: &TimeRange,
    ) -> Result<Vec<BusyInterval>, ProviderError>;
}

/// In-memory calendar keyed by email.
///
/// Unknown emails have no busy intervals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCalendarProvider {
    calendars: HashMap<String, Vec<BusyInterval>>,
}

impl StaticCalendarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_busy(mut self, email: impl Into<String>, busy: Vec<BusyInterval>) -> Self {
        self.insert(email, busy);
        self
    }

    pub fn insert(&mut self, email: impl Into<String>, busy: Vec<BusyInterval>) {
        self.calendars.entry(email.into()).or_default().extend(busy);
    }

    /// Parse a JSON object mapping email to a list of busy intervals
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[async_trait]
impl CalendarProvider for StaticCalendarProvider {
    async fn get_busy_intervals(
        &self,
        email: &str,
        window: &TimeRange,
    ) -> Result<Vec<BusyInterval>, ProviderError> {
        Ok(self
            .calendars
            .get(email)
            .map(|busy| {
                // malformed intervals pass through so the engine can report them
                busy.iter()
                    .filter(|b| !b.is_valid() || b.overlaps(window))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[tokio::test]
    async fn returns_only_overlapping_intervals() {
        let provider = StaticCalendarProvider::new().with_busy(
            "a@x.com",
            vec![
                BusyInterval::new(ts("2025-03-04T09:00:00Z"), ts("2025-03-04T10:00:00Z"), "In"),
                BusyInterval::new(ts("2025-03-10T09:00:00Z"), ts("2025-03-10T10:00:00Z"), "Out"),
            ],
        );
        let window = TimeRange::new(ts("2025-03-04T00:00:00Z"), ts("2025-03-05T00:00:00Z")).unwrap();

        let busy = provider.get_busy_intervals("a@x.com", &window).await.unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].summary, "In");

        let unknown = provider.get_busy_intervals("z@x.com", &window).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[test]
    fn parses_fixture_json() {
        let provider = StaticCalendarProvider::from_json(
            r#"{"a@x.com": [{"start": "2025-03-04T09:00:00+05:30", "end": "2025-03-04T10:00:00+05:30", "summary": "Standup"}]}"#,
        )
        .unwrap();
        assert_eq!(provider.calendars["a@x.com"][0].summary, "Standup");
        assert_eq!(provider.calendars["a@x.com"][0].attendee_count, 0);
    }
}
