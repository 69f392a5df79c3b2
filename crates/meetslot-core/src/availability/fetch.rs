//! Concurrent busy-interval fetching.
//!
//! One task per participant; each task owns its slot in the result vector,
//! so no shared counters or locks are involved. A failed, panicked or slow
//! fetch degrades to "no busy intervals" for that participant.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::CalendarProvider;
use crate::error::ProviderError;
use crate::interval::TimeRange;
use crate::meeting::{BusyInterval, Participant};

/// A participant's calendar could not be fetched and a default was used.
///
/// Attached to the resolution outcome; never returned as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDegradedWarning {
    pub participant_email: String,
    pub reason: String,
}

/// Result of one participant's fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub busy: Vec<BusyInterval>,
    pub warning: Option<ProviderDegradedWarning>,
}

impl FetchOutcome {
    fn degraded(email: &str, error: ProviderError) -> Self {
        warn!(
            target: "meetslot::availability",
            participant = %email,
            error = %error,
            "calendar fetch failed, treating participant as free"
        );
        Self {
            busy: Vec::new(),
            warning: Some(ProviderDegradedWarning {
                participant_email: email.to_string(),
                reason: error.to_string(),
            }),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

/// Fetch busy intervals for every participant concurrently.
///
/// `result[i]` belongs to `participants[i]`. Blocks until every fetch
/// completes or hits `timeout`.
pub async fn fetch_all(
    provider: Arc<dyn CalendarProvider>,
    participants: &[Participant],
    window: TimeRange,
    timeout: Duration,
) -> Vec<FetchOutcome> {
    let handles: Vec<_> = participants
        .iter()
        .map(|participant| {
            let provider = Arc::clone(&provider);
            let email = participant.email.clone();
            tokio::spawn(async move {
                let fetched =
                    tokio::time::timeout(timeout, provider.get_busy_intervals(&email, &window))
                        .await;
                match fetched {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout {
                        email,
                        timeout_secs: timeout.as_secs(),
                    }),
                }
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (participant, handle) in participants.iter().zip(handles) {
        let outcome = match handle.await {
            Ok(Ok(busy)) => {
                debug!(
                    target: "meetslot::availability",
                    participant = %participant.email,
                    busy = busy.len(),
                    "fetched busy intervals"
                );
                FetchOutcome {
                    busy,
                    warning: None,
                }
            }
            Ok(Err(error)) => FetchOutcome::degraded(&participant.email, error),
            Err(join_error) => FetchOutcome::degraded(
                &participant.email,
                ProviderError::TaskFailed {
                    email: participant.email.clone(),
                    message: join_error.to_string(),
                },
            ),
        };
        outcomes.push(outcome);
    }
    outcomes
}
