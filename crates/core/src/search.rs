// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Search criteria, pagination, and the shared predicate semantics.
//!
//! Every criterion present in the bag is ANDed; absent criteria impose no
//! constraint. The reference predicate lives here as
//! [`CaseSearchCriteria::matches`] so every store implementation (and its
//! tests) evaluates the same rules; the Diesel implementation mirrors it
//! clause for clause.

use counsel_crm_domain::{Case, CaseCategory, CaseStatus, CounselorId, CustomerId};
use std::cmp::Ordering;
use time::{Date, OffsetDateTime};

/// Optional-criteria bag for case search. All present criteria are ANDed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseSearchCriteria {
    /// Restrict to one customer.
    pub customer_id: Option<CustomerId>,
    /// Restrict to one counselor.
    pub counselor_id: Option<CounselorId>,
    /// Restrict to one status.
    pub status: Option<CaseStatus>,
    /// Restrict to one category.
    pub category: Option<CaseCategory>,
    /// Case-insensitive title substring. Blank means "no filter".
    pub title_keyword: Option<String>,
    /// Inclusive lower bound on the creation date (UTC).
    pub from_date: Option<Date>,
    /// Inclusive upper bound on the creation date (UTC); internally the
    /// predicate is `created_at < to_date + 1 day`.
    pub to_date: Option<Date>,
}

/// Half-open UTC interval `[lower, upper)` over creation timestamps.
/// Either bound may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedInterval {
    /// Inclusive lower bound.
    pub lower: Option<OffsetDateTime>,
    /// Exclusive upper bound (start of the day after `to_date`).
    pub upper: Option<OffsetDateTime>,
}

impl CaseSearchCriteria {
    /// An empty bag: matches every case.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// The effective title filter: trimmed, `None` when absent or blank.
    #[must_use]
    pub fn title_filter(&self) -> Option<&str> {
        self.title_keyword
            .as_deref()
            .map(str::trim)
            .filter(|kw| !kw.is_empty())
    }

    /// The effective creation-timestamp interval.
    ///
    /// A `to_date` at the end of the calendar (no next day) yields an
    /// unbounded upper end rather than an error.
    #[must_use]
    pub fn created_interval(&self) -> CreatedInterval {
        CreatedInterval {
            lower: self.from_date.map(|d| d.midnight().assume_utc()),
            upper: self
                .to_date
                .and_then(Date::next_day)
                .map(|d| d.midnight().assume_utc()),
        }
    }

    /// The reference predicate: true iff `case` satisfies every present
    /// criterion. Read-only, no side effects.
    #[must_use]
    pub fn matches(&self, case: &Case) -> bool {
        if let Some(customer_id) = self.customer_id
            && case.customer_id != customer_id
        {
            return false;
        }
        if let Some(counselor_id) = self.counselor_id
            && case.counselor_id != Some(counselor_id)
        {
            return false;
        }
        if let Some(status) = self.status
            && case.status != status
        {
            return false;
        }
        if let Some(category) = self.category
            && case.category != category
        {
            return false;
        }
        if let Some(keyword) = self.title_filter()
            && !case
                .title
                .to_lowercase()
                .contains(&keyword.to_lowercase())
        {
            return false;
        }

        let interval = self.created_interval();
        if let Some(lower) = interval.lower
            && case.stamps.created_at < lower
        {
            return false;
        }
        if let Some(upper) = interval.upper
            && case.stamps.created_at >= upper
        {
            return false;
        }

        true
    }
}

/// The fixed search sort order: creation time descending, id descending as
/// the stable tie-break. Newest first.
#[must_use]
pub fn search_ordering(a: &Case, b: &Case) -> Ordering {
    b.stamps
        .created_at
        .cmp(&a.stamps.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// A page request: skip `offset` matches, return at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of matching rows to skip.
    pub offset: i64,
    /// Maximum number of rows to return.
    pub limit: i64,
}

impl PageRequest {
    /// Default page size.
    pub const DEFAULT_LIMIT: i64 = 20;

    /// Creates a page request. Negative values are clamped to zero.
    #[must_use]
    pub const fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: if offset < 0 { 0 } else { offset },
            limit: if limit < 0 { 0 } else { limit },
        }
    }

    /// The first page at the default size.
    #[must_use]
    pub const fn first() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// One page of results plus the total count of ALL matches.
///
/// `total_count` is computed from the identical predicate set without
/// pagination, so it is independent of `offset` and `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The matching slice, already sorted.
    pub items: Vec<T>,
    /// Total number of matches across all pages.
    pub total_count: i64,
}
