// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and conversions between rows and domain aggregates.
//!
//! Timestamps are persisted as microseconds since the Unix epoch (UTC).
//! Integer columns compare and sort exactly, which the search ordering and
//! the half-open date-range predicate depend on.

use crate::diesel_schema::{case_notes, cases, counselors, customers};
use crate::error::PersistenceError;
use counsel_crm_domain::{
    AuditStamps, Case, CaseCategory, CaseId, CaseNote, CaseStatus, Counselor, CounselorId,
    CounselorStatus, CounselorTeam, Customer, CustomerGrade, CustomerId, NoteId,
};
use diesel::prelude::*;
use time::OffsetDateTime;

/// Converts a domain timestamp to its epoch-microsecond column value.
///
/// # Errors
///
/// Returns an error if the timestamp does not fit in an `i64` (far outside
/// any realistic range).
pub fn to_micros(ts: OffsetDateTime) -> Result<i64, PersistenceError> {
    i64::try_from(ts.unix_timestamp_nanos() / 1_000)
        .map_err(|e| PersistenceError::SerializationError(format!("timestamp out of range: {e}")))
}

/// Converts an epoch-microsecond column value back to a domain timestamp.
///
/// # Errors
///
/// Returns an error if the value is outside the representable range.
pub fn from_micros(micros: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(micros) * 1_000)
        .map_err(|e| PersistenceError::SerializationError(format!("bad stored timestamp: {e}")))
}

fn from_micros_opt(micros: Option<i64>) -> Result<Option<OffsetDateTime>, PersistenceError> {
    micros.map(from_micros).transpose()
}

/// Converts a domain optional timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp does not fit in an `i64`.
pub fn to_micros_opt(ts: Option<OffsetDateTime>) -> Result<Option<i64>, PersistenceError> {
    ts.map(to_micros).transpose()
}

fn parse<T: std::str::FromStr<Err = counsel_crm_domain::DomainError>>(
    value: &str,
) -> Result<T, PersistenceError> {
    value
        .parse()
        .map_err(|e: counsel_crm_domain::DomainError| {
            PersistenceError::SerializationError(e.to_string())
        })
}

/// A row from the `cases` table.
#[derive(Debug, Clone, Queryable)]
pub struct CaseRow {
    pub case_id: i64,
    pub customer_id: i64,
    pub counselor_id: Option<i64>,
    pub status: String,
    pub category: String,
    pub title: String,
    pub content: Option<String>,
    pub assigned_at: Option<i64>,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CaseRow {
    /// Assembles the domain aggregate from this row and its notes.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum or timestamp value cannot be
    /// converted.
    pub fn into_domain(self, notes: Vec<CaseNote>) -> Result<Case, PersistenceError> {
        Ok(Case {
            id: CaseId::new(self.case_id),
            customer_id: CustomerId::new(self.customer_id),
            counselor_id: self.counselor_id.map(CounselorId::new),
            status: parse::<CaseStatus>(&self.status)?,
            category: parse::<CaseCategory>(&self.category)?,
            title: self.title,
            content: self.content,
            assigned_at: from_micros_opt(self.assigned_at)?,
            started_at: from_micros_opt(self.started_at)?,
            completed_at: from_micros_opt(self.completed_at)?,
            stamps: AuditStamps {
                created_at: from_micros(self.created_at)?,
                updated_at: from_micros(self.updated_at)?,
            },
            notes,
        })
    }
}

/// Insertable shape for the `cases` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = cases)]
pub struct NewCaseRow {
    pub customer_id: i64,
    pub counselor_id: Option<i64>,
    pub status: String,
    pub category: String,
    pub title: String,
    pub content: Option<String>,
    pub assigned_at: Option<i64>,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A row from the `case_notes` table.
#[derive(Debug, Clone, Queryable)]
pub struct CaseNoteRow {
    pub note_id: i64,
    pub case_id: i64,
    pub counselor_id: i64,
    pub content: String,
    pub created_at: i64,
}

impl CaseNoteRow {
    /// Converts this row to the domain note.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored timestamp cannot be converted.
    pub fn into_domain(self) -> Result<CaseNote, PersistenceError> {
        Ok(CaseNote {
            id: NoteId::new(self.note_id),
            counselor_id: CounselorId::new(self.counselor_id),
            content: self.content,
            created_at: from_micros(self.created_at)?,
        })
    }
}

/// Insertable shape for the `case_notes` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = case_notes)]
pub struct NewCaseNoteRow {
    pub case_id: i64,
    pub counselor_id: i64,
    pub content: String,
    pub created_at: i64,
}

/// A row from the `counselors` table.
#[derive(Debug, Clone, Queryable)]
pub struct CounselorRow {
    pub counselor_id: i64,
    pub name: String,
    pub employee_code: String,
    pub extension: Option<String>,
    pub status: String,
    pub team: String,
    pub is_active: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CounselorRow {
    /// Converts this row to the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum or timestamp value cannot be
    /// converted.
    pub fn into_domain(self) -> Result<Counselor, PersistenceError> {
        Ok(Counselor {
            id: CounselorId::new(self.counselor_id),
            name: self.name,
            employee_code: self.employee_code,
            extension: self.extension,
            status: parse::<CounselorStatus>(&self.status)?,
            team: parse::<CounselorTeam>(&self.team)?,
            active: self.is_active != 0,
            stamps: AuditStamps {
                created_at: from_micros(self.created_at)?,
                updated_at: from_micros(self.updated_at)?,
            },
        })
    }
}

/// Insertable shape for the `counselors` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = counselors)]
pub struct NewCounselorRow {
    pub name: String,
    pub employee_code: String,
    pub extension: Option<String>,
    pub status: String,
    pub team: String,
    pub is_active: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A row from the `customers` table.
#[derive(Debug, Clone, Queryable)]
pub struct CustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub grade: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CustomerRow {
    /// Converts this row to the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum or timestamp value cannot be
    /// converted.
    pub fn into_domain(self) -> Result<Customer, PersistenceError> {
        Ok(Customer {
            id: CustomerId::new(self.customer_id),
            name: self.name,
            phone_number: self.phone_number,
            email: self.email,
            grade: parse::<CustomerGrade>(&self.grade)?,
            stamps: AuditStamps {
                created_at: from_micros(self.created_at)?,
                updated_at: from_micros(self.updated_at)?,
            },
        })
    }
}

/// Insertable shape for the `customers` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub grade: String,
    pub created_at: i64,
    pub updated_at: i64,
}
