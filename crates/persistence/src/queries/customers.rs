// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::CustomerRow;
use crate::diesel_schema::customers;
use crate::error::PersistenceError;
use counsel_crm_domain::{Customer, CustomerId};
use diesel::prelude::*;

/// Loads one customer.
///
/// # Errors
///
/// Returns `CustomerNotFound` if the id does not resolve, or an error if
/// the query fails.
pub fn get_customer(
    conn: &mut SqliteConnection,
    id: CustomerId,
) -> Result<Customer, PersistenceError> {
    let row: CustomerRow = customers::table
        .filter(customers::customer_id.eq(id.value()))
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::CustomerNotFound(id.value()))?;
    row.into_domain()
}

/// Loads one customer by phone number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn customer_by_phone(
    conn: &mut SqliteConnection,
    phone_number: &str,
) -> Result<Option<Customer>, PersistenceError> {
    let row: Option<CustomerRow> = customers::table
        .filter(customers::phone_number.eq(phone_number))
        .first(conn)
        .optional()?;
    row.map(CustomerRow::into_domain).transpose()
}
