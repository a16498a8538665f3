// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The counselor aggregate.
//!
//! A counselor does not own or reference assigned cases; the relation is
//! discovered through the case's counselor-id back-reference. Counselors are
//! never hard-deleted, only deactivated.

use crate::error::DomainError;
use crate::types::{AuditStamps, CounselorId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Availability state of a counselor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounselorStatus {
    /// Ready to take a new case.
    Available,
    /// Working an active case.
    Busy,
    /// On break.
    Break,
    /// Offline.
    Offline,
}

impl CounselorStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Break => "break",
            Self::Offline => "offline",
        }
    }
}

impl FromStr for CounselorStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            "break" => Ok(Self::Break),
            "offline" => Ok(Self::Offline),
            _ => Err(DomainError::InvalidCounselorStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CounselorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Team classification of a counselor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounselorTeam {
    /// General counseling.
    General,
    /// Dedicated VIP handling.
    Vip,
    /// Complaint handling.
    Complaint,
    /// Technical support.
    Technical,
}

impl CounselorTeam {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Vip => "vip",
            Self::Complaint => "complaint",
            Self::Technical => "technical",
        }
    }
}

impl FromStr for CounselorTeam {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "vip" => Ok(Self::Vip),
            "complaint" => Ok(Self::Complaint),
            "technical" => Ok(Self::Technical),
            _ => Err(DomainError::InvalidCounselorTeam(s.to_string())),
        }
    }
}

impl std::fmt::Display for CounselorTeam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member who can be assigned to at most one active case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counselor {
    /// Identifier assigned by the persistence layer.
    pub id: CounselorId,
    /// Display name.
    pub name: String,
    /// Unique external employee code.
    pub employee_code: String,
    /// Optional extension or contact string.
    pub extension: Option<String>,
    /// Current availability state.
    pub status: CounselorStatus,
    /// Team classification.
    pub team: CounselorTeam,
    /// Eligibility gate. Deactivation is a flag, not removal.
    pub active: bool,
    /// Audit timestamps.
    pub stamps: AuditStamps,
}

impl Counselor {
    /// Creates a new active counselor in `Available`.
    #[must_use]
    pub const fn new(
        id: CounselorId,
        name: String,
        employee_code: String,
        extension: Option<String>,
        team: CounselorTeam,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name,
            employee_code,
            extension,
            status: CounselorStatus::Available,
            team,
            active: true,
            stamps: AuditStamps::new(now),
        }
    }

    /// True iff this counselor can accept a new assignment.
    #[must_use]
    pub fn is_available_for_assignment(&self) -> bool {
        self.active && self.status == CounselorStatus::Available
    }

    /// Sets the availability state unconditionally.
    pub fn change_status(&mut self, new_status: CounselorStatus) {
        self.status = new_status;
    }

    /// Marks the counselor eligible for assignment again.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Removes the counselor from service. Also forces the status to
    /// `Offline` so availability checks cannot see a stale `Available`.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.status = CounselorStatus::Offline;
    }
}
