// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{CaseNoteRow, CaseRow, to_micros};
use crate::diesel_schema::{case_notes, cases};
use crate::error::PersistenceError;
use counsel_crm::{CaseSearchCriteria, PageRequest};
use counsel_crm_domain::{Case, CaseCategory, CaseId, CaseNote, CaseStatus, CounselorId, CustomerId};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use std::collections::HashMap;
use tracing::debug;

type BoxedCaseQuery<'a> = cases::BoxedQuery<'a, Sqlite>;

/// Applies every present criterion as an ANDed clause.
///
/// Both the page statement and the count statement are built from this one
/// function, so the rows counted are exactly the rows paged. The clauses
/// mirror [`CaseSearchCriteria::matches`]: equality on customer, counselor,
/// status, and category; `LIKE %keyword%` on the title; a half-open
/// `[from, to + 1 day)` interval on the creation timestamp.
fn apply_case_filters<'a>(
    criteria: &CaseSearchCriteria,
    mut query: BoxedCaseQuery<'a>,
) -> Result<BoxedCaseQuery<'a>, PersistenceError> {
    if let Some(customer_id) = criteria.customer_id {
        query = query.filter(cases::customer_id.eq(customer_id.value()));
    }
    if let Some(counselor_id) = criteria.counselor_id {
        query = query.filter(cases::counselor_id.eq(counselor_id.value()));
    }
    if let Some(status) = criteria.status {
        query = query.filter(cases::status.eq(status.as_str()));
    }
    if let Some(category) = criteria.category {
        query = query.filter(cases::category.eq(category.as_str()));
    }
    if let Some(keyword) = criteria.title_filter() {
        query = query.filter(cases::title.like(format!("%{keyword}%")));
    }
    let interval = criteria.created_interval();
    if let Some(lower) = interval.lower {
        query = query.filter(cases::created_at.ge(to_micros(lower)?));
    }
    if let Some(upper) = interval.upper {
        query = query.filter(cases::created_at.lt(to_micros(upper)?));
    }
    Ok(query)
}

/// Loads the notes for a batch of case rows and assembles domain cases,
/// preserving the row order. Notes come back in append (id) order.
fn attach_notes(
    conn: &mut SqliteConnection,
    rows: Vec<CaseRow>,
) -> Result<Vec<Case>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.case_id).collect();
    let note_rows: Vec<CaseNoteRow> = case_notes::table
        .filter(case_notes::case_id.eq_any(&ids))
        .order(case_notes::note_id.asc())
        .load(conn)?;

    let mut by_case: HashMap<i64, Vec<CaseNote>> = HashMap::new();
    for note_row in note_rows {
        let case_id = note_row.case_id;
        by_case
            .entry(case_id)
            .or_default()
            .push(note_row.into_domain()?);
    }

    rows.into_iter()
        .map(|row| {
            let notes = by_case.remove(&row.case_id).unwrap_or_default();
            row.into_domain(notes)
        })
        .collect()
}

/// Loads one case with its notes.
///
/// # Errors
///
/// Returns `CaseNotFound` if the id does not resolve, or an error if the
/// query fails.
pub fn get_case(conn: &mut SqliteConnection, id: CaseId) -> Result<Case, PersistenceError> {
    let row: CaseRow = cases::table
        .filter(cases::case_id.eq(id.value()))
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::CaseNotFound(id.value()))?;
    let notes: Vec<CaseNote> = case_notes::table
        .filter(case_notes::case_id.eq(id.value()))
        .order(case_notes::note_id.asc())
        .load::<CaseNoteRow>(conn)?
        .into_iter()
        .map(CaseNoteRow::into_domain)
        .collect::<Result<_, _>>()?;
    row.into_domain(notes)
}

/// Runs the paginated search and returns the page plus the total match
/// count across all pages.
///
/// # Errors
///
/// Returns an error if either statement fails.
pub fn search_cases(
    conn: &mut SqliteConnection,
    criteria: &CaseSearchCriteria,
    page: PageRequest,
) -> Result<(Vec<Case>, i64), PersistenceError> {
    debug!(offset = page.offset, limit = page.limit, "Searching cases");

    let rows: Vec<CaseRow> = apply_case_filters(criteria, cases::table.into_boxed())?
        .order((cases::created_at.desc(), cases::case_id.desc()))
        .offset(page.offset)
        .limit(page.limit)
        .load(conn)?;

    let total: i64 = apply_case_filters(criteria, cases::table.into_boxed())?
        .count()
        .get_result(conn)?;

    Ok((attach_notes(conn, rows)?, total))
}

/// All cases matching one fixed criterion, newest first, without
/// pagination. The fixed list endpoints are thin wrappers over the same
/// filter builder the search uses.
fn list_cases(
    conn: &mut SqliteConnection,
    criteria: &CaseSearchCriteria,
) -> Result<Vec<Case>, PersistenceError> {
    let rows: Vec<CaseRow> = apply_case_filters(criteria, cases::table.into_boxed())?
        .order((cases::created_at.desc(), cases::case_id.desc()))
        .load(conn)?;
    attach_notes(conn, rows)
}

/// All cases in the given status, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn cases_by_status(
    conn: &mut SqliteConnection,
    status: CaseStatus,
) -> Result<Vec<Case>, PersistenceError> {
    list_cases(
        conn,
        &CaseSearchCriteria {
            status: Some(status),
            ..CaseSearchCriteria::none()
        },
    )
}

/// All cases in the given category, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn cases_by_category(
    conn: &mut SqliteConnection,
    category: CaseCategory,
) -> Result<Vec<Case>, PersistenceError> {
    list_cases(
        conn,
        &CaseSearchCriteria {
            category: Some(category),
            ..CaseSearchCriteria::none()
        },
    )
}

/// All cases held by a counselor in the given status, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn cases_by_counselor_and_status(
    conn: &mut SqliteConnection,
    counselor_id: CounselorId,
    status: CaseStatus,
) -> Result<Vec<Case>, PersistenceError> {
    list_cases(
        conn,
        &CaseSearchCriteria {
            counselor_id: Some(counselor_id),
            status: Some(status),
            ..CaseSearchCriteria::none()
        },
    )
}

/// All cases for a customer, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn cases_by_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<Vec<Case>, PersistenceError> {
    list_cases(
        conn,
        &CaseSearchCriteria {
            customer_id: Some(customer_id),
            ..CaseSearchCriteria::none()
        },
    )
}
