// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{reload_counselor, seed_counselor, store};
use counsel_crm::{CoreError, CounselorDirectory};
use counsel_crm_domain::{CounselorId, CounselorStatus, CounselorTeam, DomainError};

#[test]
fn test_created_counselor_is_active_and_available() {
    let mut store = store();
    let counselor = seed_counselor(&mut store, "EMP-001");

    assert!(counselor.active);
    assert_eq!(counselor.status, CounselorStatus::Available);
    assert_eq!(counselor.team, CounselorTeam::General);

    let stored = reload_counselor(&mut store, counselor.id);
    assert_eq!(stored, counselor);
}

#[test]
fn test_set_status_is_persisted() {
    let mut store = store();
    let counselor = seed_counselor(&mut store, "EMP-001");

    let mut directory = CounselorDirectory::new(&mut store);
    let updated = directory
        .set_status(counselor.id, CounselorStatus::Break)
        .expect("status change should succeed");
    assert_eq!(updated.status, CounselorStatus::Break);

    let stored = reload_counselor(&mut store, counselor.id);
    assert_eq!(stored.status, CounselorStatus::Break);
}

#[test]
fn test_deactivate_persists_offline_and_inactive() {
    let mut store = store();
    let counselor = seed_counselor(&mut store, "EMP-001");

    let mut directory = CounselorDirectory::new(&mut store);
    directory
        .set_status(counselor.id, CounselorStatus::Busy)
        .expect("status change should succeed");
    directory.deactivate(counselor.id).expect("deactivate should succeed");

    let stored = reload_counselor(&mut store, counselor.id);
    assert!(!stored.active);
    assert_eq!(stored.status, CounselorStatus::Offline);
}

#[test]
fn test_activate_does_not_restore_previous_status() {
    let mut store = store();
    let counselor = seed_counselor(&mut store, "EMP-001");

    let mut directory = CounselorDirectory::new(&mut store);
    directory.deactivate(counselor.id).expect("deactivate should succeed");
    let reactivated = directory.activate(counselor.id).expect("activate should succeed");

    assert!(reactivated.active);
    assert_eq!(reactivated.status, CounselorStatus::Offline);
}

#[test]
fn test_get_missing_counselor_fails() {
    let mut store = store();

    let err = CounselorDirectory::new(&mut store)
        .get(CounselorId::new(404))
        .expect_err("missing counselor must fail");

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::CounselorNotFound(404))
    );
}

#[test]
fn test_update_stamp_advances_on_save() {
    let mut store = store();
    let counselor = seed_counselor(&mut store, "EMP-001");

    let mut directory = CounselorDirectory::new(&mut store);
    let updated = directory
        .set_status(counselor.id, CounselorStatus::Break)
        .expect("status change should succeed");

    assert!(updated.stamps.updated_at >= counselor.stamps.updated_at);
    assert_eq!(updated.stamps.created_at, counselor.stamps.created_at);
}
