//! Meeting data model.
//!
//! - Participants and their authority weights
//! - Busy and free intervals
//! - Meeting requirements produced by a directive source
//! - Candidate slots and conflict records

mod busy;
mod participant;
mod requirement;
mod slot;

pub use busy::{BusyInterval, FreeInterval};
pub use participant::{
    authority_of, authority_weight_from_email, AuthorityLevel, Participant, Role,
};
pub use requirement::{
    Complexity, MeetingRequirement, Priority, TimePreference, Urgency, MAX_BUFFER_MINUTES,
    MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
};
pub use slot::{CandidateSlot, ConflictRecord};
