// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contracts the storage collaborator must satisfy.
//!
//! The core never talks to a database directly. Mutating operations run
//! inside a [`CrmStore::transaction`] unit of work: every read and write for
//! one coordinator call commits together or not at all, and the store must
//! guarantee that a concurrent caller can never observe an intermediate
//! state (e.g. a case marked assigned while its counselor is still
//! available).

use crate::error::CoreError;
use crate::search::{CaseSearchCriteria, Page, PageRequest};
use counsel_crm_domain::{
    Case, CaseCategory, CaseId, CaseNote, CaseStatus, Counselor, CounselorId, CounselorTeam,
    Customer, CustomerId,
};
use time::OffsetDateTime;

/// Input shape for opening a new case. Field validation happens in the
/// coordinator before this ever reaches a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
    /// The owning customer.
    pub customer_id: CustomerId,
    /// Immutable classification.
    pub category: CaseCategory,
    /// Non-empty title.
    pub title: String,
    /// Optional free-text body.
    pub content: Option<String>,
    /// Creation instant; seeds both audit stamps.
    pub created_at: OffsetDateTime,
}

/// Input shape for registering a new counselor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCounselor {
    /// Display name.
    pub name: String,
    /// Unique external employee code.
    pub employee_code: String,
    /// Optional extension/contact string.
    pub extension: Option<String>,
    /// Team classification.
    pub team: CounselorTeam,
    /// Creation instant; seeds both audit stamps.
    pub created_at: OffsetDateTime,
}

/// Per-aggregate reads and writes available inside one unit of work.
///
/// Lookups fail with `CoreError::DomainViolation` carrying the matching
/// not-found variant; inserts assign identifiers and return the persisted
/// aggregate.
pub trait UnitOfWork {
    /// Loads a case with its notes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CaseNotFound` if the id does not resolve.
    fn case(&mut self, id: CaseId) -> Result<Case, CoreError>;

    /// Loads a counselor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CounselorNotFound` if the id does not resolve.
    fn counselor(&mut self, id: CounselorId) -> Result<Counselor, CoreError>;

    /// Loads a customer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CustomerNotFound` if the id does not resolve.
    fn customer(&mut self, id: CustomerId) -> Result<Customer, CoreError>;

    /// Inserts a new case and assigns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_case(&mut self, draft: &NewCase) -> Result<Case, CoreError>;

    /// Persists a mutated case, advancing its update stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_case(&mut self, case: &Case) -> Result<Case, CoreError>;

    /// Inserts a new counselor and assigns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_counselor(&mut self, draft: &NewCounselor) -> Result<Counselor, CoreError>;

    /// Persists a mutated counselor, advancing its update stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_counselor(&mut self, counselor: &Counselor) -> Result<Counselor, CoreError>;

    /// Appends an immutable note to a case and assigns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the case does not exist or the write fails.
    fn append_note(
        &mut self,
        case_id: CaseId,
        counselor_id: CounselorId,
        content: &str,
        created_at: OffsetDateTime,
    ) -> Result<CaseNote, CoreError>;
}

/// The store itself: hands out atomic units of work.
pub trait CrmStore {
    /// The unit-of-work type handed to transaction closures.
    type Tx<'a>: UnitOfWork
    where
        Self: 'a;

    /// Runs `f` as one atomic unit of work.
    ///
    /// If `f` returns `Err`, every write it performed is rolled back and the
    /// error is returned unchanged; aggregates on disk are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a storage error if the transaction
    /// itself cannot commit.
    fn transaction<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self::Tx<'_>) -> Result<T, CoreError>;
}

impl<S: CrmStore> CrmStore for &mut S {
    type Tx<'a>
        = S::Tx<'a>
    where
        Self: 'a;

    fn transaction<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut S::Tx<'_>) -> Result<T, CoreError>,
    {
        (**self).transaction(f)
    }
}

/// Read-only case query surface exposed to external collaborators (for
/// example a reporting module). No mutation capability is granted here.
pub trait CaseQueries {
    /// Filtered, sorted, paginated search. See [`CaseSearchCriteria`] for
    /// the predicate semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn search_cases(
        &mut self,
        criteria: &CaseSearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Case>, CoreError>;

    /// All cases in the given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn cases_by_status(&mut self, status: CaseStatus) -> Result<Vec<Case>, CoreError>;

    /// All cases in the given category, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn cases_by_category(&mut self, category: CaseCategory) -> Result<Vec<Case>, CoreError>;

    /// All cases held by a counselor in the given status, newest first.
    ///
    /// This is how a counselor's current active case is confirmed: by
    /// querying the case store, never by traversing an owned collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn cases_by_counselor_and_status(
        &mut self,
        counselor_id: CounselorId,
        status: CaseStatus,
    ) -> Result<Vec<Case>, CoreError>;

    /// All cases for a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn cases_by_customer(&mut self, customer_id: CustomerId) -> Result<Vec<Case>, CoreError>;
}

/// Read-only counselor query surface.
pub trait CounselorQueries {
    /// All active counselors.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn active_counselors(&mut self) -> Result<Vec<Counselor>, CoreError>;

    /// Active counselors currently available for assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn available_counselors(&mut self) -> Result<Vec<Counselor>, CoreError>;

    /// Active counselors on the given team.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn counselors_by_team(&mut self, team: CounselorTeam) -> Result<Vec<Counselor>, CoreError>;
}
