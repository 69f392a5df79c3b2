//! The slot resolution engine.
//!
//! A run goes: concurrent busy-interval fetch, per-participant free time,
//! shared windows, candidates, scoring, strategy, alternatives. Only the
//! fetch is async; everything after it is pure CPU work over collected data.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::availability::{
    fetch_all, tightest_pair, AvailabilityResolver, CommonWindowIntersector,
    ParticipantAvailability, ProviderDegradedWarning,
};
use crate::calendar::CalendarProvider;
use crate::candidate::CandidateGenerator;
use crate::config::{EngineConfig, ProviderFailurePolicy};
use crate::error::{NoCommonWindowError, NoCommonWindowReason, Result, ValidationError};
use crate::interval::TimeRange;
use crate::meeting::{BusyInterval, CandidateSlot, MeetingRequirement, Participant};
use crate::proposal::{Proposal, ProposalStore};
use crate::resolution::{Alternative, AlternativeGenerator, ConflictResolver, Resolution};
use crate::scoring::{ScoringContext, SlotScorer};

/// Everything a successful run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveOutcome {
    pub proposal_id: String,
    /// Best first, at most `scheduling.max_suggestions` unless the
    /// recommended slot ranks lower, in which case the list runs down to it
    pub ranked_slots: Vec<CandidateSlot>,
    pub reasoning: Vec<String>,
    pub resolution: Resolution,
    pub alternatives: Vec<Alternative>,
    pub warnings: Vec<ProviderDegradedWarning>,
}

/// Finds, ranks and records meeting slots.
///
/// The calendar provider and proposal store are injected so that hosts can
/// share one store between engines and swap providers in tests.
pub struct SlotResolutionEngine {
    provider: Arc<dyn CalendarProvider>,
    store: Arc<ProposalStore>,
    config: EngineConfig,
    scorer: SlotScorer,
}

impl SlotResolutionEngine {
    pub fn new(
        provider: Arc<dyn CalendarProvider>,
        store: Arc<ProposalStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            provider,
            store,
            config,
            scorer: SlotScorer::new(),
        }
    }

    pub fn with_scorer(mut self, scorer: SlotScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ProposalStore> {
        &self.store
    }

    /// Find and rank slots, and store them as a pending proposal.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`] for bad input, before any fetch happens
    /// - [`NoCommonWindowError`] when nothing fits every participant
    ///
    /// Provider failures never surface here; they become warnings.
    pub async fn resolve(
        &self,
        participants: &[Participant],
        requirement: &MeetingRequirement,
        window: TimeRange,
    ) -> Result<ResolveOutcome> {
        self.validate(participants, requirement, &window)?;
        info!(
            target: "meetslot::engine",
            participants = participants.len(),
            duration = requirement.duration_minutes,
            window_start = %window.start,
            window_end = %window.end,
            "resolving meeting slot"
        );

        let timeout = Duration::from_secs(self.config.provider.fetch_timeout_secs);
        let fetched = fetch_all(Arc::clone(&self.provider), participants, window, timeout).await;

        let resolver = AvailabilityResolver::new().with_buffer(requirement.buffer_minutes);
        let mut availability: Vec<ParticipantAvailability> = Vec::with_capacity(participants.len());
        let mut busy: Vec<Vec<BusyInterval>> = Vec::with_capacity(participants.len());
        let mut warnings = Vec::new();
        let mut excluded: HashSet<&str> = HashSet::new();

        for (participant, outcome) in participants.iter().zip(fetched) {
            if let Some(warning) = outcome.warning {
                if self.config.provider.failure_policy == ProviderFailurePolicy::Exclude {
                    excluded.insert(participant.email.as_str());
                }
                warnings.push(warning);
            }
            let avail = resolver.resolve(&participant.email, outcome.busy, &window);
            busy.push(avail.busy.clone());
            availability.push(avail);
        }

        let included: Vec<ParticipantAvailability> = availability
            .iter()
            .filter(|a| !excluded.contains(a.email.as_str()))
            .cloned()
            .collect();

        let intersector = CommonWindowIntersector::new(requirement.duration_minutes);
        let shared = if included.is_empty() {
            // nobody's calendar is known
            intersector.intersect(&[resolver.fully_free("", &window)])
        } else {
            intersector.intersect(&included)
        };
        let shared = match shared {
            Ok(shared) => shared,
            Err(err) => {
                info!(target: "meetslot::engine", reason = %err, "no common window");
                return Err(err.into());
            }
        };

        let candidates = CandidateGenerator::new(
            requirement.duration_minutes,
            requirement.time_preference,
            *window.start.offset(),
        )
        .with_max_candidates(self.config.scheduling.max_candidates)
        .generate(&shared);

        if candidates.is_empty() {
            let tightest = tightest_pair(&availability);
            let err = NoCommonWindowError {
                reason: NoCommonWindowReason::NoCandidateFits,
                exhausted_at: None,
                tightest_overlap_minutes: tightest.as_ref().map(|t| t.2).unwrap_or(0),
                tightest_pair: tightest.map(|(a, b, _)| (a, b)),
                shared_window_count: shared.len(),
            };
            info!(target: "meetslot::engine", reason = %err, "no candidate fits");
            return Err(err.into());
        }

        let ctx = ScoringContext {
            participants,
            busy: &busy,
            requirement,
            weights: &self.config.scoring,
        };
        let mut ranked = self.scorer.score_all(&candidates, &ctx);
        debug!(
            target: "meetslot::engine",
            shared = shared.len(),
            candidates = ranked.len(),
            "scored candidates"
        );

        let Some(resolution) = ConflictResolver::new().resolve(&ranked, requirement, participants)
        else {
            // score_all keeps every candidate, so this is unreachable in practice
            return Err(NoCommonWindowError {
                reason: NoCommonWindowReason::NoCandidateFits,
                exhausted_at: None,
                tightest_pair: None,
                tightest_overlap_minutes: 0,
                shared_window_count: shared.len(),
            }
            .into());
        };

        let alternatives = AlternativeGenerator::new(&self.scorer)
            .with_hours(
                self.config.scheduling.business_start_hour,
                self.config.scheduling.business_end_hour,
            )
            .generate(&resolution.recommended, &ctx);

        ranked.truncate(retained_len(
            &ranked,
            &resolution.recommended,
            self.config.scheduling.max_suggestions,
        ));

        let mut reasoning = vec![
            format!(
                "Found {} shared window(s) across {} participant(s)",
                shared.len(),
                participants.len()
            ),
            format!("Scored {} candidate slot(s)", candidates.len()),
        ];
        for warning in &warnings {
            reasoning.push(format!(
                "Calendar unavailable for {}; treated as {}",
                warning.participant_email,
                match self.config.provider.failure_policy {
                    ProviderFailurePolicy::FailOpen => "fully free",
                    ProviderFailurePolicy::Exclude => "excluded",
                }
            ));
        }
        reasoning.push(format!("Strategy: {}", resolution.strategy));
        reasoning.extend(resolution.reasoning.iter().cloned());

        let proposal = Proposal::new(
            requirement.clone(),
            participants.to_vec(),
            ranked.clone(),
            reasoning.clone(),
        );
        let proposal_id = self.store.insert(proposal)?;

        info!(
            target: "meetslot::engine",
            proposal_id = %proposal_id,
            strategy = %resolution.strategy,
            start = %resolution.recommended.start,
            score = resolution.recommended.score,
            warnings = warnings.len(),
            "resolution complete"
        );

        Ok(ResolveOutcome {
            proposal_id,
            ranked_slots: ranked,
            reasoning,
            resolution,
            alternatives,
            warnings,
        })
    }

    /// Confirm one of a proposal's ranked slots
    pub fn confirm(&self, proposal_id: &str, slot_index: usize) -> Result<CandidateSlot> {
        self.store.confirm(proposal_id, slot_index)
    }

    /// Cancel a pending proposal
    pub fn cancel(&self, proposal_id: &str) -> Result<()> {
        self.store.cancel(proposal_id)
    }

    fn validate(
        &self,
        participants: &[Participant],
        requirement: &MeetingRequirement,
        window: &TimeRange,
    ) -> Result<()> {
        if participants.is_empty() {
            return Err(ValidationError::EmptyCollection("participants".into()).into());
        }
        let max = self.config.scheduling.max_participants;
        if participants.len() > max {
            return Err(ValidationError::TooManyParticipants {
                count: participants.len(),
                max,
            }
            .into());
        }

        let mut seen = HashSet::new();
        for participant in participants {
            if participant.email.trim().is_empty() {
                return Err(ValidationError::invalid_value("email", "must not be empty").into());
            }
            if !seen.insert(participant.email.to_lowercase()) {
                return Err(ValidationError::DuplicateParticipant(participant.email.clone()).into());
            }
            if participant.priority_weight < 1 {
                return Err(ValidationError::invalid_value(
                    "priority_weight",
                    format!("{} has weight 0; weights start at 1", participant.email),
                )
                .into());
            }
        }

        requirement.validate()?;

        if window.is_empty() {
            return Err(ValidationError::InvalidTimeRange {
                start: window.start,
                end: window.end,
            }
            .into());
        }
        let max_days = self.config.scheduling.max_window_days;
        if window.duration_minutes() > max_days.saturating_mul(24 * 60) {
            return Err(ValidationError::invalid_value(
                "window",
                format!(
                    "spans {} minutes; at most {max_days} days are searched",
                    window.duration_minutes()
                ),
            )
            .into());
        }
        Ok(())
    }
}

/// How many ranked slots a proposal keeps.
///
/// Normally `max`, extended when the strategy picked a slot further down so
/// the recommendation can still be confirmed by index.
fn retained_len(ranked: &[CandidateSlot], recommended: &CandidateSlot, max: usize) -> usize {
    ranked
        .iter()
        .position(|slot| slot == recommended)
        .map_or(max, |index| max.max(index + 1))
        .min(ranked.len())
}
