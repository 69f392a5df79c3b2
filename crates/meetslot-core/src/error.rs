//! Core error types for meetslot-core.
//!
//! This module defines the error hierarchy returned by the slot resolution
//! engine. Every error is recoverable by the caller; none of them is fatal
//! to the host process.

use std::path::PathBuf;
use thiserror::Error;

use crate::proposal::ProposalStatus;

/// Core error type for meetslot-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any computation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No slot satisfies every participant
    #[error("No common window: {0}")]
    NoCommonWindow(#[from] NoCommonWindowError),

    /// Unknown proposal id
    #[error("Proposal not found: {id}")]
    ProposalNotFound { id: String },

    /// Proposal is not in a state that allows the requested action
    #[error("Cannot {action} proposal {id}: proposal is {from}")]
    InvalidStateTransition {
        id: String,
        from: ProposalStatus,
        action: &'static str,
    },

    /// A proposal lock was poisoned by a panicking holder
    #[error("Lock failed: {0}")]
    LockPoisoned(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Meeting duration outside the accepted range
    #[error("Invalid duration: {minutes} minutes (must be between {min} and {max})")]
    InvalidDuration { minutes: i64, min: i64, max: i64 },

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::FixedOffset>,
        end: chrono::DateTime<chrono::FixedOffset>,
    },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Same email listed twice
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),

    /// Participant list exceeds the configured maximum
    #[error("Too many participants: {count} (maximum: {max})")]
    TooManyParticipants { count: usize, max: usize },
}

impl ValidationError {
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Why no common window was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoCommonWindowReason {
    /// The running intersection became empty
    EmptyIntersection,
    /// Shared windows exist but no candidate hour fits inside any of them
    NoCandidateFits,
}

/// Normal empty-result outcome of the intersection step.
///
/// Carries the best partial information available so the caller can explain
/// why nothing fits.
#[derive(Error, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[error("{}", self.describe())]
pub struct NoCommonWindowError {
    pub reason: NoCommonWindowReason,
    /// Participant whose free time emptied the running intersection
    pub exhausted_at: Option<String>,
    /// Participant pair with the least pairwise overlap
    pub tightest_pair: Option<(String, String)>,
    /// Overlap of the tightest pair, in minutes
    pub tightest_overlap_minutes: i64,
    /// Shared windows that existed before candidate generation
    pub shared_window_count: usize,
}

impl NoCommonWindowError {
    fn describe(&self) -> String {
        let mut out = match self.reason {
            NoCommonWindowReason::EmptyIntersection => {
                "no window is free for every participant".to_string()
            }
            NoCommonWindowReason::NoCandidateFits => format!(
                "{} shared window(s) found but no candidate hour fits",
                self.shared_window_count
            ),
        };
        if let Some(email) = &self.exhausted_at {
            out.push_str(&format!("; intersection emptied at {email}"));
        }
        if let Some((a, b)) = &self.tightest_pair {
            out.push_str(&format!(
                "; least overlap between {a} and {b} ({} min)",
                self.tightest_overlap_minutes
            ));
        }
        out
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors reported by a calendar provider.
///
/// These never escape a resolution run: the engine converts them into a
/// [`crate::availability::ProviderDegradedWarning`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("calendar unavailable for {email}: {message}")]
    Unavailable { email: String, message: String },

    #[error("calendar fetch for {email} timed out after {timeout_secs}s")]
    Timeout { email: String, timeout_secs: u64 },

    #[error("calendar fetch task for {email} failed: {message}")]
    TaskFailed { email: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
