// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment coordinator.
//!
//! Couples case lifecycle transitions to counselor availability. Every
//! operation is one unit of work: load, validate against the domain rules,
//! mutate, save. All validation failures are detected before any write, and
//! the transaction rolls back on error, so callers never observe a case
//! assigned without its counselor marked busy (or any other intermediate
//! state). There are no automatic retries; callers decide.

use crate::error::CoreError;
use crate::store::{CrmStore, NewCase, UnitOfWork};
use counsel_crm_domain::{
    Case, CaseCategory, CaseId, CaseNote, CounselorId, CounselorStatus, CustomerId, DomainError,
    validate_note_content, validate_title,
};
use time::OffsetDateTime;

/// Orchestrates case transitions together with the paired counselor
/// availability update.
pub struct AssignmentCoordinator<S> {
    store: S,
}

impl<S: CrmStore> AssignmentCoordinator<S> {
    /// Wraps a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Gives access to the underlying store (e.g. for the read-only query
    /// surface).
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwraps the coordinator back into its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Opens a new case in `Waiting` for an existing customer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The title is blank or too long
    /// - The customer id does not resolve
    pub fn create_case(
        &mut self,
        customer_id: CustomerId,
        category: CaseCategory,
        title: String,
        content: Option<String>,
    ) -> Result<Case, CoreError> {
        validate_title(&title)?;
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        self.store.transaction(|tx| {
            // Existence check only; the customer aggregate is not mutated.
            tx.customer(customer_id)?;

            tx.insert_case(&NewCase {
                customer_id,
                category,
                title: title.clone(),
                content: content.clone(),
                created_at: now,
            })
        })
    }

    /// Assigns a waiting case to an available counselor.
    ///
    /// On success the case is `Assigned` with `assigned_at` set and the
    /// counselor is `Busy`, committed together.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either id does not resolve
    /// - The counselor is inactive or not `Available`
    /// - The case cannot reach `Assigned` from its current status
    pub fn assign(
        &mut self,
        case_id: CaseId,
        counselor_id: CounselorId,
    ) -> Result<Case, CoreError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        self.store.transaction(|tx| {
            let mut case = tx.case(case_id)?;
            let mut counselor = tx.counselor(counselor_id)?;

            if !counselor.is_available_for_assignment() {
                return Err(DomainError::CounselorUnavailable {
                    counselor_id: counselor_id.value(),
                }
                .into());
            }

            case.assign(counselor.id, now)?;
            counselor.change_status(CounselorStatus::Busy);

            tx.save_counselor(&counselor)?;
            tx.save_case(&case)
        })
    }

    /// Starts (or resumes from hold) counseling on a case.
    ///
    /// The first-start timestamp is preserved across `OnHold` re-entries.
    /// No counselor side effect: the counselor is already `Busy` from
    /// assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the case id does not resolve or the case cannot
    /// reach `InProgress`.
    pub fn start(&mut self, case_id: CaseId) -> Result<Case, CoreError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        self.store.transaction(|tx| {
            let mut case = tx.case(case_id)?;
            case.start(now)?;
            tx.save_case(&case)
        })
    }

    /// Completes a case, releasing any attached counselor back to
    /// `Available`.
    ///
    /// The release is unconditional: a counselor manually set to `Break` or
    /// `Offline` in the meantime is still returned to `Available`. That
    /// matches the source system's behavior; see DESIGN.md.
    ///
    /// # Errors
    ///
    /// Returns an error if the case id does not resolve or the case cannot
    /// reach `Completed`.
    pub fn complete(&mut self, case_id: CaseId) -> Result<Case, CoreError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        self.store.transaction(|tx| {
            let mut case = tx.case(case_id)?;
            case.complete(now)?;
            release_counselor(tx, &case)?;
            tx.save_case(&case)
        })
    }

    /// Cancels a case, releasing any attached counselor back to `Available`
    /// (same unconditional release as [`Self::complete`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the case id does not resolve or the case cannot
    /// reach `Cancelled`.
    pub fn cancel(&mut self, case_id: CaseId) -> Result<Case, CoreError> {
        self.store.transaction(|tx| {
            let mut case = tx.case(case_id)?;
            case.cancel()?;
            release_counselor(tx, &case)?;
            tx.save_case(&case)
        })
    }

    /// Puts an in-progress case on hold. The counselor stays `Busy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the case id does not resolve or the case cannot
    /// reach `OnHold`.
    pub fn hold(&mut self, case_id: CaseId) -> Result<Case, CoreError> {
        self.store.transaction(|tx| {
            let mut case = tx.case(case_id)?;
            case.hold()?;
            tx.save_case(&case)
        })
    }

    /// Appends a note to a case. No status precondition.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The content is blank
    /// - The case or counselor id does not resolve
    pub fn add_note(
        &mut self,
        case_id: CaseId,
        counselor_id: CounselorId,
        content: &str,
    ) -> Result<CaseNote, CoreError> {
        validate_note_content(content)?;
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        self.store.transaction(|tx| {
            // Both ids must resolve before anything is written.
            tx.case(case_id)?;
            tx.counselor(counselor_id)?;

            tx.append_note(case_id, counselor_id, content, now)
        })
    }
}

/// Releases the counselor attached to `case`, if any, back to `Available`.
fn release_counselor<U: UnitOfWork + ?Sized>(tx: &mut U, case: &Case) -> Result<(), CoreError> {
    if let Some(counselor_id) = case.counselor_id {
        let mut counselor = tx.counselor(counselor_id)?;
        counselor.change_status(CounselorStatus::Available);
        tx.save_counselor(&counselor)?;
    }
    Ok(())
}
