// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case status tracking and transition logic.
//!
//! This module defines case lifecycle states and valid transitions.
//! Transitions are caller-initiated only; the system never advances a case
//! based on time alone. The legality rules live in one transition table so
//! the full rule set is auditable in a single place.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a counseling case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Created, not yet assigned to a counselor.
    Waiting,
    /// Assigned to a counselor, counseling not yet started.
    Assigned,
    /// Counseling is underway.
    InProgress,
    /// Counseling started but is paused.
    OnHold,
    /// Counseling finished. Terminal.
    Completed,
    /// Case cancelled. Terminal.
    Cancelled,
}

impl CaseStatus {
    /// All states, in declaration order. Useful for exhaustive checks.
    pub const ALL: [Self; 6] = [
        Self::Waiting,
        Self::Assigned,
        Self::InProgress,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// The transition table: every target legally reachable from this state.
    ///
    /// Terminal states return an empty slice.
    #[must_use]
    pub const fn allowed_transitions(&self) -> &'static [Self] {
        match self {
            Self::Waiting => &[Self::Assigned, Self::Cancelled],
            Self::Assigned => &[Self::InProgress, Self::Waiting, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::OnHold, Self::Cancelled],
            Self::OnHold => &[Self::InProgress, Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Returns true if this status is terminal (no outbound transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Checks if a transition from this state to `target` is valid.
    ///
    /// Pure and total over the full state space: no side effects, never
    /// panics.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Validates a transition from this state to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` carrying both the
    /// current and the requested status if the transition is not in the
    /// table.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: target,
            })
        }
    }
}

impl FromStr for CaseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "on_hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidCaseStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
