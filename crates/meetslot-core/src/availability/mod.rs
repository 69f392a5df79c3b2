//! Availability resolution.
//!
//! This module provides:
//! - Concurrent busy-interval fetching with fail-open timeouts
//! - Per-participant free interval computation
//! - Intersection of free time into shared windows

mod fetch;
mod intersect;
mod resolver;

pub use fetch::{fetch_all, FetchOutcome, ProviderDegradedWarning};
pub use intersect::{tightest_pair, CommonWindowIntersector};
pub use resolver::{free_intervals, AvailabilityResolver, ParticipantAvailability};
