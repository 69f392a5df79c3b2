//! Shared free windows across participants.

use tracing::debug;

use super::ParticipantAvailability;
use crate::error::{NoCommonWindowError, NoCommonWindowReason};
use crate::interval::{intersect_lists, overlap_minutes, TimeRange};

/// Intersects free intervals of every participant.
///
/// Starts from the first participant's free time and narrows it with each
/// following participant. Windows shorter than the meeting are discarded at
/// every step. Cost is O(P·W²) for P participants with W intervals each.
#[derive(Debug, Clone, Copy)]
pub struct CommonWindowIntersector {
    duration_minutes: i64,
}

impl CommonWindowIntersector {
    pub fn new(duration_minutes: i64) -> Self {
        Self { duration_minutes }
    }

    /// Shared windows at least `duration_minutes` long, sorted by start.
    ///
    /// # Errors
    ///
    /// Returns [`NoCommonWindowError`] when no window is free for everyone.
    /// That is a normal outcome, not a failure of the computation.
    pub fn intersect(
        &self,
        participants: &[ParticipantAvailability],
    ) -> Result<Vec<TimeRange>, NoCommonWindowError> {
        let Some(first) = participants.first() else {
            return Err(self.no_window(participants, None));
        };

        let mut running: Vec<TimeRange> = first
            .free_ranges()
            .into_iter()
            .filter(|r| r.duration_minutes() >= self.duration_minutes)
            .collect();
        if running.is_empty() {
            return Err(self.no_window(participants, Some(&first.email)));
        }

        for participant in &participants[1..] {
            running = intersect_lists(&running, &participant.free_ranges(), self.duration_minutes);
            debug!(
                target: "meetslot::availability",
                participant = %participant.email,
                remaining = running.len(),
                "narrowed shared windows"
            );
            if running.is_empty() {
                return Err(self.no_window(participants, Some(&participant.email)));
            }
        }

        Ok(running)
    }

    fn no_window(
        &self,
        participants: &[ParticipantAvailability],
        exhausted_at: Option<&str>,
    ) -> NoCommonWindowError {
        let tightest = tightest_pair(participants);
        NoCommonWindowError {
            reason: NoCommonWindowReason::EmptyIntersection,
            exhausted_at: exhausted_at.map(str::to_string),
            tightest_overlap_minutes: tightest.as_ref().map(|t| t.2).unwrap_or(0),
            tightest_pair: tightest.map(|(a, b, _)| (a, b)),
            shared_window_count: 0,
        }
    }
}

/// Participant pair with the least overlapping free time.
///
/// Ties keep the first pair in input order.
pub fn tightest_pair(participants: &[ParticipantAvailability]) -> Option<(String, String, i64)> {
    let free: Vec<Vec<TimeRange>> = participants.iter().map(|p| p.free_ranges()).collect();
    let mut best: Option<(String, String, i64)> = None;

    for i in 0..participants.len() {
        for j in (i + 1)..participants.len() {
            let minutes = overlap_minutes(&free[i], &free[j]);
            if best.as_ref().map_or(true, |b| minutes < b.2) {
                best = Some((
                    participants[i].email.clone(),
                    participants[j].email.clone(),
                    minutes,
                ));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityResolver;
    use crate::meeting::BusyInterval;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 4, hour, 0, 0)
            .unwrap()
    }

    fn window() -> TimeRange {
        TimeRange::new(at(8), at(18)).unwrap()
    }

    fn person(email: &str, busy: &[(u32, u32)]) -> ParticipantAvailability {
        let busy = busy
            .iter()
            .map(|(s, e)| BusyInterval::new(at(*s), at(*e), "busy"))
            .collect();
        AvailabilityResolver::new().resolve(email, busy, &window())
    }

    #[test]
    fn shared_windows_respect_everyone() {
        let people = vec![
            person("a@x.com", &[(9, 10)]),
            person("b@x.com", &[(13, 15)]),
        ];
        let shared = CommonWindowIntersector::new(30).intersect(&people).unwrap();
        assert_eq!(
            shared,
            vec![
                TimeRange::new(at(8), at(9)).unwrap(),
                TimeRange::new(at(10), at(13)).unwrap(),
                TimeRange::new(at(15), at(18)).unwrap(),
            ]
        );
    }

    #[test]
    fn short_overlaps_are_discarded() {
        let people = vec![
            person("a@x.com", &[(8, 12), (13, 18)]),
            person("b@x.com", &[]),
        ];
        assert_eq!(
            CommonWindowIntersector::new(60).intersect(&people).unwrap(),
            vec![TimeRange::new(at(12), at(13)).unwrap()]
        );
        assert!(CommonWindowIntersector::new(90).intersect(&people).is_err());
    }

    #[test]
    fn morning_vs_afternoon_reports_partial_info() {
        let people = vec![
            person("a@x.com", &[(12, 18)]),
            person("b@x.com", &[(8, 12)]),
            person("c@x.com", &[]),
        ];
        let err = CommonWindowIntersector::new(30).intersect(&people).unwrap_err();
        assert_eq!(err.reason, NoCommonWindowReason::EmptyIntersection);
        assert_eq!(err.exhausted_at.as_deref(), Some("b@x.com"));
        assert_eq!(
            err.tightest_pair,
            Some(("a@x.com".to_string(), "b@x.com".to_string()))
        );
        assert_eq!(err.tightest_overlap_minutes, 0);
    }

    #[test]
    fn empty_participant_list_has_no_window() {
        assert!(CommonWindowIntersector::new(30).intersect(&[]).is_err());
    }
}
