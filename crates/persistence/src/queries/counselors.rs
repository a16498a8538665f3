// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::CounselorRow;
use crate::diesel_schema::counselors;
use crate::error::PersistenceError;
use counsel_crm_domain::{Counselor, CounselorId, CounselorStatus, CounselorTeam};
use diesel::prelude::*;

fn rows_to_domain(rows: Vec<CounselorRow>) -> Result<Vec<Counselor>, PersistenceError> {
    rows.into_iter().map(CounselorRow::into_domain).collect()
}

/// Loads one counselor.
///
/// # Errors
///
/// Returns `CounselorNotFound` if the id does not resolve, or an error if
/// the query fails.
pub fn get_counselor(
    conn: &mut SqliteConnection,
    id: CounselorId,
) -> Result<Counselor, PersistenceError> {
    let row: CounselorRow = counselors::table
        .filter(counselors::counselor_id.eq(id.value()))
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::CounselorNotFound(id.value()))?;
    row.into_domain()
}

/// All active counselors, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_counselors(conn: &mut SqliteConnection) -> Result<Vec<Counselor>, PersistenceError> {
    let rows: Vec<CounselorRow> = counselors::table
        .filter(counselors::is_active.eq(1))
        .order(counselors::counselor_id.asc())
        .load(conn)?;
    rows_to_domain(rows)
}

/// Active counselors currently available for assignment, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn available_counselors(
    conn: &mut SqliteConnection,
) -> Result<Vec<Counselor>, PersistenceError> {
    let rows: Vec<CounselorRow> = counselors::table
        .filter(counselors::is_active.eq(1))
        .filter(counselors::status.eq(CounselorStatus::Available.as_str()))
        .order(counselors::counselor_id.asc())
        .load(conn)?;
    rows_to_domain(rows)
}

/// Active counselors on the given team, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn counselors_by_team(
    conn: &mut SqliteConnection,
    team: CounselorTeam,
) -> Result<Vec<Counselor>, PersistenceError> {
    let rows: Vec<CounselorRow> = counselors::table
        .filter(counselors::is_active.eq(1))
        .filter(counselors::team.eq(team.as_str()))
        .order(counselors::counselor_id.asc())
        .load(conn)?;
    rows_to_domain(rows)
}
