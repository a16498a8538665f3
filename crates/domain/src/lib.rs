// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod case;
mod case_status;
mod counselor;
mod customer;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use case::{Case, CaseNote};
pub use case_status::CaseStatus;
pub use counselor::{Counselor, CounselorStatus, CounselorTeam};
pub use customer::{Customer, CustomerGrade};
pub use error::DomainError;
pub use types::{AuditStamps, CaseCategory, CaseId, CounselorId, CustomerId, NoteId};
pub use validation::{MAX_TITLE_LEN, validate_note_content, validate_title};
