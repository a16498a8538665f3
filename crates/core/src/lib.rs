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

mod coordinator;
mod directory;
mod error;
mod search;
mod store;

#[cfg(test)]
mod tests;

pub use coordinator::AssignmentCoordinator;
pub use directory::CounselorDirectory;
pub use error::CoreError;
pub use search::{CaseSearchCriteria, CreatedInterval, Page, PageRequest, search_ordering};
pub use store::{
    CaseQueries, CounselorQueries, CrmStore, NewCase, NewCounselor, UnitOfWork,
};
