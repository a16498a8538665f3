// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Coordinator scenario tests against the in-memory store.
//!
//! These exercise the cross-aggregate coupling: a case transition and its
//! paired counselor update must land together or not at all.

use super::helpers::{MemoryStore, seed_counselor_with_status};
use crate::{AssignmentCoordinator, CoreError};
use counsel_crm_domain::{
    CaseCategory, CaseId, CaseStatus, CounselorId, CounselorStatus, CounselorTeam, CustomerId,
    DomainError,
};

fn coordinator_with_customer() -> (AssignmentCoordinator<MemoryStore>, CustomerId) {
    let mut store = MemoryStore::new();
    let customer_id = store.seed_customer("Lee");
    (AssignmentCoordinator::new(store), customer_id)
}

#[test]
fn test_create_case_starts_waiting() {
    let (mut coordinator, customer_id) = coordinator_with_customer();

    let case = coordinator
        .create_case(
            customer_id,
            CaseCategory::Payment,
            String::from("Card declined"),
            None,
        )
        .unwrap();

    assert_eq!(case.status, CaseStatus::Waiting);
    assert_eq!(case.customer_id, customer_id);
    assert_eq!(case.counselor_id, None);
}

#[test]
fn test_create_case_rejects_unknown_customer() {
    let mut coordinator = AssignmentCoordinator::new(MemoryStore::new());

    let err = coordinator
        .create_case(
            CustomerId::new(999),
            CaseCategory::Other,
            String::from("No such customer"),
            None,
        )
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::CustomerNotFound(999))
    );
}

#[test]
fn test_create_case_rejects_blank_title_before_touching_store() {
    let (mut coordinator, customer_id) = coordinator_with_customer();

    let err = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("  "), None)
        .unwrap_err();

    assert_eq!(err, CoreError::DomainViolation(DomainError::EmptyTitle));
    assert!(coordinator.into_store().state.cases.is_empty());
}

#[test]
fn test_assign_marks_case_assigned_and_counselor_busy() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Complaint, String::from("t"), None)
        .unwrap();

    let assigned = coordinator.assign(case.id, counselor_id).unwrap();

    assert_eq!(assigned.status, CaseStatus::Assigned);
    assert_eq!(assigned.counselor_id, Some(counselor_id));
    assert!(assigned.assigned_at.is_some());

    let store = coordinator.into_store();
    assert_eq!(store.counselor(counselor_id).status, CounselorStatus::Busy);
    assert_eq!(store.case(case.id).status, CaseStatus::Assigned);
}

#[test]
fn test_assign_missing_case_fails_not_found() {
    let mut store = MemoryStore::new();
    let counselor_id = store.seed_counselor("Kim", CounselorTeam::General);
    let mut coordinator = AssignmentCoordinator::new(store);

    let err = coordinator
        .assign(CaseId::new(404), counselor_id)
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::CaseNotFound(404))
    );
}

#[test]
fn test_assign_missing_counselor_fails_not_found() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let err = coordinator
        .assign(case.id, CounselorId::new(404))
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::CounselorNotFound(404))
    );
}

#[test]
fn test_assign_to_busy_counselor_mutates_neither_aggregate() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id =
        seed_counselor_with_status(coordinator.store_mut(), "Kim", CounselorStatus::Busy);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let err = coordinator.assign(case.id, counselor_id).unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::CounselorUnavailable {
            counselor_id: counselor_id.value(),
        })
    );
    let store = coordinator.into_store();
    assert_eq!(store.case(case.id).status, CaseStatus::Waiting);
    assert_eq!(store.case(case.id).counselor_id, None);
    assert_eq!(store.counselor(counselor_id).status, CounselorStatus::Busy);
}

#[test]
fn test_assign_to_inactive_counselor_fails_unavailable() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    coordinator
        .store_mut()
        .state
        .counselors
        .get_mut(&counselor_id.value())
        .unwrap()
        .deactivate();
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let err = coordinator.assign(case.id, counselor_id).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::CounselorUnavailable { .. })
    ));
}

#[test]
fn test_racing_assigns_exactly_one_winner() {
    // Two assignment requests for the same waiting case. The store
    // serializes them; the loser must observe the winner's committed status
    // and fail with the transition error, not a generic conflict.
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let first = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let second = coordinator
        .store_mut()
        .seed_counselor("Park", CounselorTeam::General);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let winner = coordinator.assign(case.id, first);
    let loser = coordinator.assign(case.id, second);

    assert!(winner.is_ok());
    assert_eq!(
        loser.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition {
            from: CaseStatus::Assigned,
            to: CaseStatus::Assigned,
        })
    );
    // The losing counselor was never marked busy.
    let store = coordinator.into_store();
    assert_eq!(store.counselor(first).status, CounselorStatus::Busy);
    assert_eq!(
        store.counselor(second).status,
        CounselorStatus::Available
    );
}

#[test]
fn test_full_lifecycle_scenario() {
    // WAITING -> assign -> start -> hold -> start -> complete, with the
    // counselor freed at the end and the first-start timestamp preserved.
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let case = coordinator
        .create_case(
            customer_id,
            CaseCategory::TechnicalSupport,
            String::from("VPN will not connect"),
            Some(String::from("fails at step 3")),
        )
        .unwrap();

    let case_id = case.id;
    coordinator.assign(case_id, counselor_id).unwrap();

    let started = coordinator.start(case_id).unwrap();
    assert_eq!(started.status, CaseStatus::InProgress);
    let first_started_at = started.started_at.unwrap();

    let held = coordinator.hold(case_id).unwrap();
    assert_eq!(held.status, CaseStatus::OnHold);

    let resumed = coordinator.start(case_id).unwrap();
    assert_eq!(resumed.status, CaseStatus::InProgress);
    assert_eq!(resumed.started_at, Some(first_started_at));

    let completed = coordinator.complete(case_id).unwrap();
    assert_eq!(completed.status, CaseStatus::Completed);
    assert!(completed.completed_at.is_some());

    let store = coordinator.into_store();
    assert_eq!(
        store.counselor(counselor_id).status,
        CounselorStatus::Available
    );
}

#[test]
fn test_complete_releases_counselor_even_from_break() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();
    coordinator.assign(case.id, counselor_id).unwrap();
    coordinator.start(case.id).unwrap();

    // An administrative status change lands between start and complete.
    coordinator
        .store_mut()
        .state
        .counselors
        .get_mut(&counselor_id.value())
        .unwrap()
        .change_status(CounselorStatus::Break);

    coordinator.complete(case.id).unwrap();

    // Unconditional release: Break is overwritten. Accepted trade-off.
    assert_eq!(
        coordinator.into_store().counselor(counselor_id).status,
        CounselorStatus::Available
    );
}

#[test]
fn test_cancel_waiting_case_has_no_counselor_side_effect() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let cancelled = coordinator.cancel(case.id).unwrap();

    assert_eq!(cancelled.status, CaseStatus::Cancelled);
    assert_eq!(cancelled.counselor_id, None);
}

#[test]
fn test_cancel_assigned_case_releases_counselor() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();
    coordinator.assign(case.id, counselor_id).unwrap();

    coordinator.cancel(case.id).unwrap();

    assert_eq!(
        coordinator.into_store().counselor(counselor_id).status,
        CounselorStatus::Available
    );
}

#[test]
fn test_hold_keeps_counselor_busy() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();
    coordinator.assign(case.id, counselor_id).unwrap();
    coordinator.start(case.id).unwrap();

    coordinator.hold(case.id).unwrap();

    assert_eq!(
        coordinator.into_store().counselor(counselor_id).status,
        CounselorStatus::Busy
    );
}

#[test]
fn test_start_from_waiting_leaves_stored_case_untouched() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let err = coordinator.start(case.id).unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::InvalidStatusTransition {
            from: CaseStatus::Waiting,
            to: CaseStatus::InProgress,
        })
    );
    assert_eq!(
        coordinator.into_store().case(case.id).status,
        CaseStatus::Waiting
    );
}

#[test]
fn test_add_note_appends_regardless_of_status() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    // Note on a waiting case: allowed.
    coordinator
        .add_note(case.id, counselor_id, "intake details recorded")
        .unwrap();

    coordinator.cancel(case.id).unwrap();

    // Note on a terminal case: still allowed.
    let note = coordinator
        .add_note(case.id, counselor_id, "customer withdrew the request")
        .unwrap();
    assert_eq!(note.counselor_id, counselor_id);

    let stored = coordinator.into_store().case(case.id);
    assert_eq!(stored.notes.len(), 2);
}

#[test]
fn test_add_note_rejects_blank_content() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let counselor_id = coordinator
        .store_mut()
        .seed_counselor("Kim", CounselorTeam::General);
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let err = coordinator
        .add_note(case.id, counselor_id, "   ")
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::EmptyNoteContent)
    );
    assert!(coordinator.into_store().case(case.id).notes.is_empty());
}

#[test]
fn test_add_note_rejects_unknown_counselor() {
    let (mut coordinator, customer_id) = coordinator_with_customer();
    let case = coordinator
        .create_case(customer_id, CaseCategory::Other, String::from("t"), None)
        .unwrap();

    let err = coordinator
        .add_note(case.id, CounselorId::new(404), "text")
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::CounselorNotFound(404))
    );
}
