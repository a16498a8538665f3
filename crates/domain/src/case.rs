// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The counseling case aggregate.
//!
//! A case is created in `Waiting` with no counselor and is mutated only
//! through the lifecycle methods here. Each method validates the requested
//! status transition before touching any field, so a failed call leaves the
//! aggregate exactly as it was.

use crate::case_status::CaseStatus;
use crate::error::DomainError;
use crate::types::{AuditStamps, CaseCategory, CaseId, CounselorId, CustomerId, NoteId};
use crate::validation::validate_title;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A note written against a case by a counselor.
///
/// Notes are immutable once written: they may only be appended, never edited,
/// removed, or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseNote {
    /// Identifier assigned by the persistence layer.
    pub id: NoteId,
    /// The counselor who wrote the note.
    pub counselor_id: CounselorId,
    /// The note text. Non-empty.
    pub content: String,
    /// When the note was written.
    pub created_at: OffsetDateTime,
}

/// A counseling case tracked from intake through resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Identifier assigned by the persistence layer. Immutable once created.
    pub id: CaseId,
    /// The owning customer. Immutable once created.
    pub customer_id: CustomerId,
    /// The assigned counselor, if any.
    pub counselor_id: Option<CounselorId>,
    /// Current lifecycle status.
    pub status: CaseStatus,
    /// Classification assigned at intake. Immutable.
    pub category: CaseCategory,
    /// Short description. Non-empty, at most 200 characters.
    pub title: String,
    /// Free-text body.
    pub content: Option<String>,
    /// When the case was first assigned. Set once, never cleared.
    pub assigned_at: Option<OffsetDateTime>,
    /// When counseling first began. Set once, never cleared.
    pub started_at: Option<OffsetDateTime>,
    /// When counseling completed. Set iff status is `Completed`.
    pub completed_at: Option<OffsetDateTime>,
    /// Audit timestamps.
    pub stamps: AuditStamps,
    /// Notes in append order.
    pub notes: Vec<CaseNote>,
}

impl Case {
    /// Opens a new case in `Waiting` with no counselor.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank or too long.
    pub fn open(
        id: CaseId,
        customer_id: CustomerId,
        category: CaseCategory,
        title: String,
        content: Option<String>,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        validate_title(&title)?;

        Ok(Self {
            id,
            customer_id,
            counselor_id: None,
            status: CaseStatus::Waiting,
            category,
            title,
            content,
            assigned_at: None,
            started_at: None,
            completed_at: None,
            stamps: AuditStamps::new(now),
            notes: Vec::new(),
        })
    }

    /// Assigns the case to a counselor.
    ///
    /// Availability of the counselor is not checked here; that is the
    /// coordinator's job, since it requires the counselor aggregate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the case cannot
    /// reach `Assigned` from its current status.
    pub fn assign(
        &mut self,
        counselor_id: CounselorId,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.transition_to(CaseStatus::Assigned)?;
        self.counselor_id = Some(counselor_id);
        self.assigned_at = Some(now);
        Ok(())
    }

    /// Starts (or resumes) counseling.
    ///
    /// The first-start timestamp is preserved: re-entering `InProgress` from
    /// `OnHold` does not overwrite an already-set `started_at`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the case cannot
    /// reach `InProgress` from its current status.
    pub fn start(&mut self, now: OffsetDateTime) -> Result<(), DomainError> {
        self.transition_to(CaseStatus::InProgress)?;
        self.started_at.get_or_insert(now);
        Ok(())
    }

    /// Completes the case.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the case cannot
    /// reach `Completed` from its current status.
    pub fn complete(&mut self, now: OffsetDateTime) -> Result<(), DomainError> {
        self.transition_to(CaseStatus::Completed)?;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Cancels the case. No timestamp is recorded for cancellation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the case cannot
    /// reach `Cancelled` from its current status.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition_to(CaseStatus::Cancelled)
    }

    /// Puts the case on hold.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the case cannot
    /// reach `OnHold` from its current status.
    pub fn hold(&mut self) -> Result<(), DomainError> {
        self.transition_to(CaseStatus::OnHold)
    }

    /// Appends a note. No status precondition: a case accepts notes as long
    /// as it exists.
    pub fn push_note(&mut self, note: CaseNote) {
        self.notes.push(note);
    }

    fn transition_to(&mut self, target: CaseStatus) -> Result<(), DomainError> {
        self.status.validate_transition(target)?;
        self.status = target;
        Ok(())
    }
}
