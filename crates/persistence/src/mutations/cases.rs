// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{NewCaseNoteRow, NewCaseRow, to_micros, to_micros_opt};
use crate::diesel_schema::{case_notes, cases};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use counsel_crm::NewCase;
use counsel_crm_domain::{Case, CaseId, CounselorId};
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::debug;

/// Inserts a new case in `waiting` status and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails or a timestamp cannot be stored.
pub fn insert_case(conn: &mut SqliteConnection, new: &NewCase) -> Result<i64, PersistenceError> {
    debug!(customer_id = new.customer_id.value(), "Inserting case");
    let created = to_micros(new.created_at)?;
    let row = NewCaseRow {
        customer_id: new.customer_id.value(),
        counselor_id: None,
        status: counsel_crm_domain::CaseStatus::Waiting.as_str().to_owned(),
        category: new.category.as_str().to_owned(),
        title: new.title.clone(),
        content: new.content.clone(),
        assigned_at: None,
        started_at: None,
        completed_at: None,
        created_at: created,
        updated_at: created,
    };
    diesel::insert_into(cases::table).values(&row).execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Writes the mutable portion of a case back to its row.
///
/// The owning customer, category, and creation time never change after
/// intake, so they are not part of the update set.
///
/// # Errors
///
/// Returns an error if the case row does not exist or the update fails.
pub fn update_case(conn: &mut SqliteConnection, case: &Case) -> Result<(), PersistenceError> {
    debug!(case_id = case.id.value(), status = case.status.as_str(), "Updating case");
    let updated = diesel::update(cases::table.filter(cases::case_id.eq(case.id.value())))
        .set((
            cases::counselor_id.eq(case.counselor_id.map(CounselorId::value)),
            cases::status.eq(case.status.as_str()),
            cases::title.eq(&case.title),
            cases::content.eq(case.content.as_deref()),
            cases::assigned_at.eq(to_micros_opt(case.assigned_at)?),
            cases::started_at.eq(to_micros_opt(case.started_at)?),
            cases::completed_at.eq(to_micros_opt(case.completed_at)?),
            cases::updated_at.eq(to_micros(case.stamps.updated_at)?),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::CaseNotFound(case.id.value()));
    }
    Ok(())
}

/// Appends a consultation note to a case and returns the note id.
///
/// # Errors
///
/// Returns an error if the insert fails, including foreign-key rejection
/// when the case or counselor row is missing.
pub fn insert_note(
    conn: &mut SqliteConnection,
    case_id: CaseId,
    counselor_id: CounselorId,
    content: &str,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    debug!(case_id = case_id.value(), counselor_id = counselor_id.value(), "Inserting note");
    let row = NewCaseNoteRow {
        case_id: case_id.value(),
        counselor_id: counselor_id.value(),
        content: content.to_owned(),
        created_at: to_micros(created_at)?,
    };
    diesel::insert_into(case_notes::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
