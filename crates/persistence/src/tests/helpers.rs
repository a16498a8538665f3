// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the persistence tests. Everything goes through the
//! public store surface so the tests exercise the same paths the
//! coordinators use.

use crate::Persistence;
use counsel_crm::{CounselorDirectory, CrmStore, UnitOfWork};
use counsel_crm_domain::{Case, Counselor, CounselorTeam, Customer, CustomerGrade};

pub fn store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory store should initialize")
}

pub fn seed_customer(store: &mut Persistence, phone: &str) -> Customer {
    store
        .create_customer("Dana Hart", phone, Some("dana@example.com"), CustomerGrade::Normal)
        .expect("customer insert should succeed")
}

pub fn seed_counselor(store: &mut Persistence, employee_code: &str) -> Counselor {
    let mut directory = CounselorDirectory::new(&mut *store);
    directory
        .create_counselor(
            "Kim Reyes".to_owned(),
            employee_code.to_owned(),
            Some("x4821".to_owned()),
            CounselorTeam::General,
        )
        .expect("counselor insert should succeed")
}

/// Reloads a case through a fresh unit of work.
pub fn reload_case(store: &mut Persistence, id: counsel_crm_domain::CaseId) -> Case {
    store
        .transaction(|tx| tx.case(id))
        .expect("case should reload")
}

/// Reloads a counselor through a fresh unit of work.
pub fn reload_counselor(
    store: &mut Persistence,
    id: counsel_crm_domain::CounselorId,
) -> Counselor {
    store
        .transaction(|tx| tx.counselor(id))
        .expect("counselor should reload")
}
