// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store used by the core test suite.
//!
//! `MemoryStore` implements the same contracts the Diesel layer does. Its
//! transaction clones the whole state and commits the clone only on `Ok`,
//! which gives the rollback-on-error guarantee the contract demands.

use crate::error::CoreError;
use crate::search::{CaseSearchCriteria, Page, PageRequest, search_ordering};
use crate::store::{
    CaseQueries, CounselorQueries, CrmStore, NewCase, NewCounselor, UnitOfWork,
};
use counsel_crm_domain::{
    AuditStamps, Case, CaseCategory, CaseId, CaseNote, CaseStatus, Counselor, CounselorId,
    CounselorStatus, CounselorTeam, Customer, CustomerGrade, CustomerId, DomainError, NoteId,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::macros::datetime;

pub const SEED_TIME: OffsetDateTime = datetime!(2024-01-01 00:00 UTC);

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub cases: BTreeMap<i64, Case>,
    pub counselors: BTreeMap<i64, Counselor>,
    pub customers: BTreeMap<i64, Customer>,
    next_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub state: MemoryState,
}

pub struct MemoryTx {
    state: MemoryState,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a customer directly, bypassing any unit of work.
    pub fn seed_customer(&mut self, name: &str) -> CustomerId {
        let id = CustomerId::new(self.state.next_id());
        let customer = Customer::new(
            id,
            String::from(name),
            format!("010-{:04}", id.value()),
            None,
            CustomerGrade::Normal,
            SEED_TIME,
        );
        self.state.customers.insert(id.value(), customer);
        id
    }

    /// Inserts an active, available counselor directly.
    pub fn seed_counselor(&mut self, name: &str, team: CounselorTeam) -> CounselorId {
        let id = CounselorId::new(self.state.next_id());
        let counselor = Counselor::new(
            id,
            String::from(name),
            format!("EMP-{:04}", id.value()),
            None,
            team,
            SEED_TIME,
        );
        self.state.counselors.insert(id.value(), counselor);
        id
    }

    /// Inserts a fully built case directly, preserving its timestamps.
    /// Used by search tests that need controlled creation times.
    pub fn seed_case(&mut self, case: Case) -> CaseId {
        let id = case.id;
        self.state.cases.insert(id.value(), case);
        id
    }

    pub fn case(&self, id: CaseId) -> Case {
        self.state.cases[&id.value()].clone()
    }

    pub fn counselor(&self, id: CounselorId) -> Counselor {
        self.state.counselors[&id.value()].clone()
    }
}

/// Builds a waiting case with a chosen id and creation time, for seeding.
pub fn case_at(
    id: i64,
    customer_id: CustomerId,
    category: CaseCategory,
    title: &str,
    created_at: OffsetDateTime,
) -> Case {
    Case {
        id: CaseId::new(id),
        customer_id,
        counselor_id: None,
        status: CaseStatus::Waiting,
        category,
        title: String::from(title),
        content: None,
        assigned_at: None,
        started_at: None,
        completed_at: None,
        stamps: AuditStamps::new(created_at),
        notes: Vec::new(),
    }
}

impl UnitOfWork for MemoryTx {
    fn case(&mut self, id: CaseId) -> Result<Case, CoreError> {
        self.state
            .cases
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::CaseNotFound(id.value()).into())
    }

    fn counselor(&mut self, id: CounselorId) -> Result<Counselor, CoreError> {
        self.state
            .counselors
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::CounselorNotFound(id.value()).into())
    }

    fn customer(&mut self, id: CustomerId) -> Result<Customer, CoreError> {
        self.state
            .customers
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::CustomerNotFound(id.value()).into())
    }

    fn insert_case(&mut self, draft: &NewCase) -> Result<Case, CoreError> {
        let case = Case {
            id: CaseId::new(self.state.next_id()),
            customer_id: draft.customer_id,
            counselor_id: None,
            status: CaseStatus::Waiting,
            category: draft.category,
            title: draft.title.clone(),
            content: draft.content.clone(),
            assigned_at: None,
            started_at: None,
            completed_at: None,
            stamps: AuditStamps::new(draft.created_at),
            notes: Vec::new(),
        };
        self.state.cases.insert(case.id.value(), case.clone());
        Ok(case)
    }

    fn save_case(&mut self, case: &Case) -> Result<Case, CoreError> {
        if !self.state.cases.contains_key(&case.id.value()) {
            return Err(DomainError::CaseNotFound(case.id.value()).into());
        }
        let mut saved = case.clone();
        saved.stamps.touch(OffsetDateTime::now_utc());
        self.state.cases.insert(saved.id.value(), saved.clone());
        Ok(saved)
    }

    fn insert_counselor(&mut self, draft: &NewCounselor) -> Result<Counselor, CoreError> {
        let counselor = Counselor::new(
            CounselorId::new(self.state.next_id()),
            draft.name.clone(),
            draft.employee_code.clone(),
            draft.extension.clone(),
            draft.team,
            draft.created_at,
        );
        self.state
            .counselors
            .insert(counselor.id.value(), counselor.clone());
        Ok(counselor)
    }

    fn save_counselor(&mut self, counselor: &Counselor) -> Result<Counselor, CoreError> {
        if !self.state.counselors.contains_key(&counselor.id.value()) {
            return Err(DomainError::CounselorNotFound(counselor.id.value()).into());
        }
        let mut saved = counselor.clone();
        saved.stamps.touch(OffsetDateTime::now_utc());
        self.state
            .counselors
            .insert(saved.id.value(), saved.clone());
        Ok(saved)
    }

    fn append_note(
        &mut self,
        case_id: CaseId,
        counselor_id: CounselorId,
        content: &str,
        created_at: OffsetDateTime,
    ) -> Result<CaseNote, CoreError> {
        let note = CaseNote {
            id: NoteId::new(self.state.next_id()),
            counselor_id,
            content: String::from(content),
            created_at,
        };
        let case = self
            .state
            .cases
            .get_mut(&case_id.value())
            .ok_or_else(|| CoreError::from(DomainError::CaseNotFound(case_id.value())))?;
        case.push_note(note.clone());
        Ok(note)
    }
}

impl CrmStore for MemoryStore {
    type Tx<'a> = MemoryTx;

    fn transaction<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self::Tx<'_>) -> Result<T, CoreError>,
    {
        let mut tx = MemoryTx {
            state: self.state.clone(),
        };
        let out = f(&mut tx)?;
        self.state = tx.state;
        Ok(out)
    }
}

impl CaseQueries for MemoryStore {
    fn search_cases(
        &mut self,
        criteria: &CaseSearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Case>, CoreError> {
        let mut matches: Vec<Case> = self
            .state
            .cases
            .values()
            .filter(|case| criteria.matches(case))
            .cloned()
            .collect();
        matches.sort_by(search_ordering);

        let total_count = matches.len() as i64;
        let items = matches
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();

        Ok(Page { items, total_count })
    }

    fn cases_by_status(&mut self, status: CaseStatus) -> Result<Vec<Case>, CoreError> {
        self.search_cases(
            &CaseSearchCriteria {
                status: Some(status),
                ..CaseSearchCriteria::none()
            },
            PageRequest::new(0, i64::MAX),
        )
        .map(|page| page.items)
    }

    fn cases_by_category(&mut self, category: CaseCategory) -> Result<Vec<Case>, CoreError> {
        self.search_cases(
            &CaseSearchCriteria {
                category: Some(category),
                ..CaseSearchCriteria::none()
            },
            PageRequest::new(0, i64::MAX),
        )
        .map(|page| page.items)
    }

    fn cases_by_counselor_and_status(
        &mut self,
        counselor_id: CounselorId,
        status: CaseStatus,
    ) -> Result<Vec<Case>, CoreError> {
        self.search_cases(
            &CaseSearchCriteria {
                counselor_id: Some(counselor_id),
                status: Some(status),
                ..CaseSearchCriteria::none()
            },
            PageRequest::new(0, i64::MAX),
        )
        .map(|page| page.items)
    }

    fn cases_by_customer(&mut self, customer_id: CustomerId) -> Result<Vec<Case>, CoreError> {
        self.search_cases(
            &CaseSearchCriteria {
                customer_id: Some(customer_id),
                ..CaseSearchCriteria::none()
            },
            PageRequest::new(0, i64::MAX),
        )
        .map(|page| page.items)
    }
}

impl CounselorQueries for MemoryStore {
    fn active_counselors(&mut self) -> Result<Vec<Counselor>, CoreError> {
        Ok(self
            .state
            .counselors
            .values()
            .filter(|c| c.active)
            .cloned()
            .collect())
    }

    fn available_counselors(&mut self) -> Result<Vec<Counselor>, CoreError> {
        Ok(self
            .state
            .counselors
            .values()
            .filter(|c| c.is_available_for_assignment())
            .cloned()
            .collect())
    }

    fn counselors_by_team(&mut self, team: CounselorTeam) -> Result<Vec<Counselor>, CoreError> {
        Ok(self
            .state
            .counselors
            .values()
            .filter(|c| c.active && c.team == team)
            .cloned()
            .collect())
    }
}

/// A counselor seeded into a given non-available status.
pub fn seed_counselor_with_status(
    store: &mut MemoryStore,
    name: &str,
    status: CounselorStatus,
) -> CounselorId {
    let id = store.seed_counselor(name, CounselorTeam::General);
    if let Some(counselor) = store.state.counselors.get_mut(&id.value()) {
        counselor.change_status(status);
    }
    id
}
