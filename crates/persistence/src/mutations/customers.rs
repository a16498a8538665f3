// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{NewCustomerRow, to_micros};
use crate::diesel_schema::customers;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use counsel_crm_domain::CustomerGrade;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::debug;

/// Inserts a new customer record and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails, including the unique constraint on
/// `phone_number`.
pub fn insert_customer(
    conn: &mut SqliteConnection,
    name: &str,
    phone_number: &str,
    email: Option<&str>,
    grade: CustomerGrade,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    debug!(phone_number, "Inserting customer");
    let created = to_micros(created_at)?;
    let row = NewCustomerRow {
        name: name.to_owned(),
        phone_number: phone_number.to_owned(),
        email: email.map(ToOwned::to_owned),
        grade: grade.as_str().to_owned(),
        created_at: created,
        updated_at: created,
    };
    diesel::insert_into(customers::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
