// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::case_status::CaseStatus;

/// Errors that can occur during domain validation.
///
/// Every variant maps to a stable machine-readable code via
/// [`DomainError::code`]; the outer layer translates codes into
/// protocol-specific responses. The core never logs or formats these for
/// users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The case id does not resolve.
    CaseNotFound(i64),
    /// The counselor id does not resolve.
    CounselorNotFound(i64),
    /// The customer id does not resolve.
    CustomerNotFound(i64),
    /// The requested status change is not permitted from the current status.
    InvalidStatusTransition {
        /// The case's current status.
        from: CaseStatus,
        /// The requested status.
        to: CaseStatus,
    },
    /// The assignment target is inactive or not available.
    CounselorUnavailable {
        /// The counselor that was requested.
        counselor_id: i64,
    },
    /// Case title is empty or blank.
    EmptyTitle,
    /// Case title exceeds the maximum length.
    TitleTooLong {
        /// The rejected length in characters.
        len: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// Note content is empty or blank.
    EmptyNoteContent,
    /// A persisted case status string could not be parsed.
    InvalidCaseStatus(String),
    /// A persisted case category string could not be parsed.
    InvalidCaseCategory(String),
    /// A persisted counselor status string could not be parsed.
    InvalidCounselorStatus(String),
    /// A persisted counselor team string could not be parsed.
    InvalidCounselorTeam(String),
    /// A persisted customer grade string could not be parsed.
    InvalidCustomerGrade(String),
}

impl DomainError {
    /// Returns the stable machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CaseNotFound(_) => "CS001",
            Self::InvalidStatusTransition { .. } => "CS002",
            Self::CounselorNotFound(_) => "CO001",
            Self::CounselorUnavailable { .. } => "CO002",
            Self::CustomerNotFound(_) => "CU001",
            Self::EmptyTitle
            | Self::TitleTooLong { .. }
            | Self::EmptyNoteContent
            | Self::InvalidCaseStatus(_)
            | Self::InvalidCaseCategory(_)
            | Self::InvalidCounselorStatus(_)
            | Self::InvalidCounselorTeam(_)
            | Self::InvalidCustomerGrade(_) => "C001",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CaseNotFound(id) => write!(f, "Case not found: {id}"),
            Self::CounselorNotFound(id) => write!(f, "Counselor not found: {id}"),
            Self::CustomerNotFound(id) => write!(f, "Customer not found: {id}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Invalid status transition: {from} -> {to}")
            }
            Self::CounselorUnavailable { counselor_id } => {
                write!(f, "Counselor {counselor_id} is not available")
            }
            Self::EmptyTitle => write!(f, "Case title cannot be empty"),
            Self::TitleTooLong { len, max } => {
                write!(f, "Case title too long: {len} characters (max {max})")
            }
            Self::EmptyNoteContent => write!(f, "Note content cannot be empty"),
            Self::InvalidCaseStatus(s) => write!(f, "Invalid case status: {s}"),
            Self::InvalidCaseCategory(s) => write!(f, "Invalid case category: {s}"),
            Self::InvalidCounselorStatus(s) => write!(f, "Invalid counselor status: {s}"),
            Self::InvalidCounselorTeam(s) => write!(f, "Invalid counselor team: {s}"),
            Self::InvalidCustomerGrade(s) => write!(f, "Invalid customer grade: {s}"),
        }
    }
}

impl std::error::Error for DomainError {}
