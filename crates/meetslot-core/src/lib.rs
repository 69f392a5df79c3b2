//! # Meetslot Core Library
//!
//! This library finds, ranks and records meeting slots for a group of
//! participants. It follows a CLI-first philosophy: every operation is
//! available through the standalone `meetslot` binary, and hosts embed the
//! same [`SlotResolutionEngine`].
//!
//! ## Architecture
//!
//! - **Interval model**: half-open ranges with merge, complement and intersect
//! - **Availability**: concurrent busy-interval fetch, free time per participant,
//!   shared windows across everyone
//! - **Candidates and scoring**: concrete slots inside shared windows, scored by
//!   an ordered list of typed rules
//! - **Resolution**: strategy selection from urgency and authority, next actions,
//!   up to three alternatives
//! - **Proposals**: in-memory store with a pending/confirmed/cancelled lifecycle
//!
//! ## Key Components
//!
//! - [`SlotResolutionEngine`]: `resolve` / `confirm` / `cancel`
//! - [`CalendarProvider`]: source of busy intervals, injected into the engine
//! - [`DirectiveSource`]: source of the [`MeetingRequirement`]
//! - [`EngineConfig`]: TOML configuration

pub mod availability;
pub mod calendar;
pub mod candidate;
pub mod config;
pub mod directive;
pub mod engine;
pub mod error;
pub mod interval;
pub mod meeting;
pub mod proposal;
pub mod resolution;
pub mod scoring;

pub use availability::{AvailabilityResolver, CommonWindowIntersector, ProviderDegradedWarning};
pub use calendar::{CalendarProvider, StaticCalendarProvider};
pub use candidate::CandidateGenerator;
pub use config::{EngineConfig, ProviderFailurePolicy};
pub use directive::{DirectiveSource, StructuredDirective};
pub use engine::{ResolveOutcome, SlotResolutionEngine};
pub use error::{
    ConfigError, CoreError, NoCommonWindowError, NoCommonWindowReason, ProviderError,
    ValidationError,
};
pub use interval::TimeRange;
pub use meeting::{
    BusyInterval, CandidateSlot, Complexity, ConflictRecord, FreeInterval, MeetingRequirement,
    Participant, Priority, Role, TimePreference,
};
pub use proposal::{Proposal, ProposalStatus, ProposalStore};
pub use resolution::{Alternative, Resolution, ResolutionStrategy};
pub use scoring::{ScoringWeights, SlotScorer};
