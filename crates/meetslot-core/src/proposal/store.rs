//! In-memory proposal store.
//!
//! The outer map lock is held only long enough to look up or insert an
//! entry; each proposal has its own mutex. Operations on different ids never
//! wait on each other, and racing operations on the same id are serialized.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info};

use super::{Proposal, ProposalStatus};
use crate::error::{CoreError, Result, ValidationError};
use crate::meeting::CandidateSlot;

#[derive(Debug, Default)]
pub struct ProposalStore {
    proposals: RwLock<HashMap<String, Arc<Mutex<Proposal>>>>,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a proposal and return its id
    pub fn insert(&self, proposal: Proposal) -> Result<String> {
        let id = proposal.id.clone();
        let mut proposals = self
            .proposals
            .write()
            .map_err(|e| CoreError::LockPoisoned(e.to_string()))?;
        proposals.insert(id.clone(), Arc::new(Mutex::new(proposal)));
        debug!(target: "meetslot::proposal", id = %id, "stored proposal");
        Ok(id)
    }

    /// Snapshot of a proposal
    pub fn get(&self, id: &str) -> Result<Proposal> {
        let entry = self.entry(id)?;
        let proposal = entry
            .lock()
            .map_err(|e| CoreError::LockPoisoned(e.to_string()))?;
        Ok(proposal.clone())
    }

    /// Bind a pending proposal to one of its ranked slots.
    ///
    /// # Errors
    ///
    /// - [`CoreError::ProposalNotFound`] for unknown ids
    /// - [`ValidationError::OutOfBounds`] when `slot_index` is out of range
    /// - [`CoreError::InvalidStateTransition`] when the proposal is not pending
    pub fn confirm(&self, id: &str, slot_index: usize) -> Result<CandidateSlot> {
        let entry = self.entry(id)?;
        let mut proposal = entry
            .lock()
            .map_err(|e| CoreError::LockPoisoned(e.to_string()))?;

        let Some(slot) = proposal.ranked_slots.get(slot_index).cloned() else {
            return Err(ValidationError::OutOfBounds {
                collection: "ranked_slots".to_string(),
                index: slot_index,
                len: proposal.ranked_slots.len(),
            }
            .into());
        };
        if proposal.status != ProposalStatus::Pending {
            return Err(CoreError::InvalidStateTransition {
                id: id.to_string(),
                from: proposal.status,
                action: "confirm",
            });
        }

        proposal.status = ProposalStatus::Confirmed;
        proposal.confirmed_slot_index = Some(slot_index);
        info!(
            target: "meetslot::proposal",
            id = %id,
            slot_index,
            start = %slot.start,
            "proposal confirmed"
        );
        Ok(slot)
    }

    /// Cancel a pending proposal
    pub fn cancel(&self, id: &str) -> Result<()> {
        let entry = self.entry(id)?;
        let mut proposal = entry
            .lock()
            .map_err(|e| CoreError::LockPoisoned(e.to_string()))?;

        if proposal.status != ProposalStatus::Pending {
            return Err(CoreError::InvalidStateTransition {
                id: id.to_string(),
                from: proposal.status,
                action: "cancel",
            });
        }
        proposal.status = ProposalStatus::Cancelled;
        info!(target: "meetslot::proposal", id = %id, "proposal cancelled");
        Ok(())
    }

    /// Number of stored proposals; a poisoned map lock still reports its contents
    pub fn len(&self) -> usize {
        self.proposals
            .read()
            .map(|p| p.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, id: &str) -> Result<Arc<Mutex<Proposal>>> {
        let proposals = self
            .proposals
            .read()
            .map_err(|e| CoreError::LockPoisoned(e.to_string()))?;
        proposals
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::ProposalNotFound { id: id.to_string() })
    }
}
