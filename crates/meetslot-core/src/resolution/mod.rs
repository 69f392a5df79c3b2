//! Conflict resolution and fallback generation.
//!
//! - [`ConflictResolver`] picks a strategy from (urgency, authority) and the
//!   recommended slot, with a reasoning trail and next actions
//! - [`AlternativeGenerator`] derives up to three backups from the pick

mod alternatives;
mod strategy;

pub use alternatives::{Alternative, AlternativeGenerator, MAX_ALTERNATIVES};
pub use strategy::{
    energy_note, preparation_minutes, recommended_actions, ConflictResolver, Resolution,
    ResolutionStrategy,
};
