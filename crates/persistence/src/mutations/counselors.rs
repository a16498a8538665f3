// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{NewCounselorRow, to_micros};
use crate::diesel_schema::counselors;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use counsel_crm::NewCounselor;
use counsel_crm_domain::{Counselor, CounselorStatus};
use diesel::prelude::*;
use tracing::debug;

/// Inserts a new counselor in `available` status and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails, including the unique constraint on
/// `employee_code`.
pub fn insert_counselor(
    conn: &mut SqliteConnection,
    new: &NewCounselor,
) -> Result<i64, PersistenceError> {
    debug!(employee_code = %new.employee_code, "Inserting counselor");
    let created = to_micros(new.created_at)?;
    let row = NewCounselorRow {
        name: new.name.clone(),
        employee_code: new.employee_code.clone(),
        extension: new.extension.clone(),
        status: CounselorStatus::Available.as_str().to_owned(),
        team: new.team.as_str().to_owned(),
        is_active: 1,
        created_at: created,
        updated_at: created,
    };
    diesel::insert_into(counselors::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Writes the mutable portion of a counselor back to its row.
///
/// # Errors
///
/// Returns an error if the counselor row does not exist or the update fails.
pub fn update_counselor(
    conn: &mut SqliteConnection,
    counselor: &Counselor,
) -> Result<(), PersistenceError> {
    debug!(
        counselor_id = counselor.id.value(),
        status = counselor.status.as_str(),
        "Updating counselor"
    );
    let updated =
        diesel::update(counselors::table.filter(counselors::counselor_id.eq(counselor.id.value())))
            .set((
                counselors::name.eq(&counselor.name),
                counselors::extension.eq(counselor.extension.as_deref()),
                counselors::status.eq(counselor.status.as_str()),
                counselors::team.eq(counselor.team.as_str()),
                counselors::is_active.eq(i32::from(counselor.active)),
                counselors::updated_at.eq(to_micros(counselor.stamps.updated_at)?),
            ))
            .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::CounselorNotFound(counselor.id.value()));
    }
    Ok(())
}
