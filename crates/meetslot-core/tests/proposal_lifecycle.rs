//! Integration tests for the proposal lifecycle.
//!
//! Resolve creates a pending proposal; confirm and cancel move it to a
//! terminal state exactly once, even under concurrent callers.

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, FixedOffset, TimeZone};
use meetslot_core::{
    CoreError, EngineConfig, MeetingRequirement, Participant, ProposalStatus, ProposalStore,
    SlotResolutionEngine, StaticCalendarProvider, TimeRange, ValidationError,
};

fn at(hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2025, 3, 4, hour, 0, 0)
        .unwrap()
}

async fn resolved() -> (SlotResolutionEngine, String, usize) {
    let engine = SlotResolutionEngine::new(
        Arc::new(StaticCalendarProvider::new()),
        Arc::new(ProposalStore::new()),
        EngineConfig::default(),
    );
    let outcome = engine
        .resolve(
            &[
                Participant::organizer("alice@example.com"),
                Participant::attendee("bob@example.com"),
            ],
            &MeetingRequirement::new(30),
            TimeRange::new(at(8), at(18)).unwrap(),
        )
        .await
        .unwrap();
    let count = outcome.ranked_slots.len();
    (engine, outcome.proposal_id, count)
}

#[tokio::test]
async fn test_confirm_binds_chosen_slot() {
    let (engine, id, _) = resolved().await;
    let pending = engine.store().get(&id).unwrap();
    assert_eq!(pending.status, ProposalStatus::Pending);

    let slot = engine.confirm(&id, 1).unwrap();
    assert_eq!(slot, pending.ranked_slots[1]);

    let confirmed = engine.store().get(&id).unwrap();
    assert_eq!(confirmed.status, ProposalStatus::Confirmed);
    assert_eq!(confirmed.confirmed_slot_index, Some(1));
    assert_eq!(confirmed.ranked_slots, pending.ranked_slots);
}

#[tokio::test]
async fn test_confirm_out_of_range_is_validation_error() {
    let (engine, id, count) = resolved().await;

    let err = engine.confirm(&id, count).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::OutOfBounds { .. })
    ));
    // still confirmable afterwards
    assert!(engine.confirm(&id, 0).is_ok());
}

#[tokio::test]
async fn test_double_confirm_is_invalid_transition() {
    let (engine, id, _) = resolved().await;
    engine.confirm(&id, 0).unwrap();

    match engine.confirm(&id, 0).unwrap_err() {
        CoreError::InvalidStateTransition { from, action, .. } => {
            assert_eq!(from, ProposalStatus::Confirmed);
            assert_eq!(action, "confirm");
        }
        other => panic!("expected InvalidStateTransition, got {other}"),
    }
}

#[tokio::test]
async fn test_cancel_is_terminal() {
    let (engine, id, _) = resolved().await;
    engine.cancel(&id).unwrap();

    assert_eq!(
        engine.store().get(&id).unwrap().status,
        ProposalStatus::Cancelled
    );
    assert!(matches!(
        engine.confirm(&id, 0),
        Err(CoreError::InvalidStateTransition { .. })
    ));
    assert!(matches!(
        engine.cancel(&id),
        Err(CoreError::InvalidStateTransition { .. })
    ));
}

#[tokio::test]
async fn test_unknown_proposal() {
    let (engine, _, _) = resolved().await;
    assert!(matches!(
        engine.confirm("no-such-id", 0),
        Err(CoreError::ProposalNotFound { .. })
    ));
    assert!(matches!(
        engine.cancel("no-such-id"),
        Err(CoreError::ProposalNotFound { .. })
    ));
}

#[tokio::test]
async fn test_racing_confirms_succeed_once() {
    let (engine, id, count) = resolved().await;
    let store = Arc::clone(engine.store());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            let id = id.clone();
            thread::spawn(move || store.confirm(&id, i % count))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, CoreError::InvalidStateTransition { .. })));

    let winner = store.get(&id).unwrap();
    assert_eq!(winner.status, ProposalStatus::Confirmed);
    let chosen = winner.confirmed_slot().unwrap();
    assert!(results.iter().any(|r| r.as_ref().ok() == Some(chosen)));
}

#[tokio::test]
async fn test_proposals_are_independent() {
    let (engine, first, _) = resolved().await;
    let second = engine
        .resolve(
            &[Participant::organizer("carol@example.com")],
            &MeetingRequirement::new(30),
            TimeRange::new(at(8), at(18)).unwrap(),
        )
        .await
        .unwrap()
        .proposal_id;

    engine.cancel(&first).unwrap();
    engine.confirm(&second, 0).unwrap();

    assert_eq!(engine.store().len(), 2);
    assert_eq!(
        engine.store().get(&first).unwrap().status,
        ProposalStatus::Cancelled
    );
    assert_eq!(
        engine.store().get(&second).unwrap().status,
        ProposalStatus::Confirmed
    );
}
