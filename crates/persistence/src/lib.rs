// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence for the counseling CRM, via Diesel.
//!
//! [`Persistence`] owns the connection and implements the storage contracts
//! the core coordinators run against. Every unit of work maps to one Diesel
//! transaction, so an assignment's case write and counselor write commit
//! together or roll back together.

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

pub mod data_models;
pub mod diesel_schema;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use counsel_crm::{
    CaseQueries, CaseSearchCriteria, CoreError, CounselorQueries, CrmStore, NewCase, NewCounselor,
    Page, PageRequest, UnitOfWork,
};
use counsel_crm_domain::{
    Case, CaseCategory, CaseId, CaseNote, CaseStatus, Counselor, CounselorId, CounselorTeam,
    Customer, CustomerGrade, CustomerId, DomainError, NoteId,
};
use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Distinguishes in-memory database names so parallel tests never share
/// state through SQLite's shared cache.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

fn to_core(err: PersistenceError) -> CoreError {
    match err {
        PersistenceError::CaseNotFound(id) => {
            CoreError::DomainViolation(DomainError::CaseNotFound(id))
        }
        PersistenceError::CounselorNotFound(id) => {
            CoreError::DomainViolation(DomainError::CounselorNotFound(id))
        }
        PersistenceError::CustomerNotFound(id) => {
            CoreError::DomainViolation(DomainError::CustomerNotFound(id))
        }
        other => CoreError::Storage(other.to_string()),
    }
}

/// A SQLite-backed store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Opens a fresh in-memory database with migrations applied.
    ///
    /// Each call gets its own uniquely named shared-cache database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail, or foreign
    /// key enforcement cannot be verified.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url = format!("file:memdb_crm_{id}?mode=memory&cache=shared");
        let mut conn = sqlite::initialize_database(&url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a file-backed database with migrations applied
    /// and WAL journaling enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail, or foreign
    /// key enforcement cannot be verified.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let mut conn = sqlite::initialize_database(path)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    /// Registers a new customer and returns the persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including the unique
    /// constraint on `phone_number`.
    pub fn create_customer(
        &mut self,
        name: &str,
        phone_number: &str,
        email: Option<&str>,
        grade: CustomerGrade,
    ) -> Result<Customer, PersistenceError> {
        let id = mutations::customers::insert_customer(
            &mut self.conn,
            name,
            phone_number,
            email,
            grade,
            OffsetDateTime::now_utc(),
        )?;
        queries::customers::get_customer(&mut self.conn, CustomerId::new(id))
    }

    /// Looks up a customer record by phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn customer_by_phone(
        &mut self,
        phone_number: &str,
    ) -> Result<Option<Customer>, PersistenceError> {
        queries::customers::customer_by_phone(&mut self.conn, phone_number)
    }

    /// Loads one customer record.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if the id does not resolve.
    pub fn customer(&mut self, id: CustomerId) -> Result<Customer, PersistenceError> {
        queries::customers::get_customer(&mut self.conn, id)
    }
}

/// Failure channel inside a Diesel transaction closure. `Core` carries the
/// caller's error through the rollback unchanged; `Db` is a commit or
/// rollback failure from Diesel itself.
enum TxFailure {
    Core(CoreError),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for TxFailure {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err)
    }
}

/// One unit of work: a borrow of the connection inside an open Diesel
/// transaction.
pub struct SqliteTx<'a> {
    conn: &'a mut SqliteConnection,
}

impl UnitOfWork for SqliteTx<'_> {
    fn case(&mut self, id: CaseId) -> Result<Case, CoreError> {
        queries::cases::get_case(self.conn, id).map_err(to_core)
    }

    fn counselor(&mut self, id: CounselorId) -> Result<Counselor, CoreError> {
        queries::counselors::get_counselor(self.conn, id).map_err(to_core)
    }

    fn customer(&mut self, id: CustomerId) -> Result<Customer, CoreError> {
        queries::customers::get_customer(self.conn, id).map_err(to_core)
    }

    fn insert_case(&mut self, draft: &NewCase) -> Result<Case, CoreError> {
        let id = mutations::cases::insert_case(self.conn, draft).map_err(to_core)?;
        queries::cases::get_case(self.conn, CaseId::new(id)).map_err(to_core)
    }

    fn save_case(&mut self, case: &Case) -> Result<Case, CoreError> {
        let mut persisted = case.clone();
        persisted.stamps.touch(OffsetDateTime::now_utc());
        mutations::cases::update_case(self.conn, &persisted).map_err(to_core)?;
        queries::cases::get_case(self.conn, persisted.id).map_err(to_core)
    }

    fn insert_counselor(&mut self, draft: &NewCounselor) -> Result<Counselor, CoreError> {
        let id = mutations::counselors::insert_counselor(self.conn, draft).map_err(to_core)?;
        queries::counselors::get_counselor(self.conn, CounselorId::new(id)).map_err(to_core)
    }

    fn save_counselor(&mut self, counselor: &Counselor) -> Result<Counselor, CoreError> {
        let mut persisted = counselor.clone();
        persisted.stamps.touch(OffsetDateTime::now_utc());
        mutations::counselors::update_counselor(self.conn, &persisted).map_err(to_core)?;
        queries::counselors::get_counselor(self.conn, persisted.id).map_err(to_core)
    }

    fn append_note(
        &mut self,
        case_id: CaseId,
        counselor_id: CounselorId,
        content: &str,
        created_at: OffsetDateTime,
    ) -> Result<CaseNote, CoreError> {
        let id = mutations::cases::insert_note(self.conn, case_id, counselor_id, content, created_at)
            .map_err(to_core)?;
        Ok(CaseNote {
            id: NoteId::new(id),
            counselor_id,
            content: content.to_owned(),
            created_at,
        })
    }
}

impl CrmStore for Persistence {
    type Tx<'a>
        = SqliteTx<'a>
    where
        Self: 'a;

    fn transaction<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self::Tx<'_>) -> Result<T, CoreError>,
    {
        self.conn
            .transaction::<T, TxFailure, _>(|conn| {
                let mut tx = SqliteTx { conn };
                f(&mut tx).map_err(TxFailure::Core)
            })
            .map_err(|failure| match failure {
                TxFailure::Core(err) => err,
                TxFailure::Db(err) => CoreError::Storage(err.to_string()),
            })
    }
}

impl CaseQueries for Persistence {
    fn search_cases(
        &mut self,
        criteria: &CaseSearchCriteria,
        page: PageRequest,
    ) -> Result<Page<Case>, CoreError> {
        let (items, total_count) =
            queries::cases::search_cases(&mut self.conn, criteria, page).map_err(to_core)?;
        Ok(Page { items, total_count })
    }

    fn cases_by_status(&mut self, status: CaseStatus) -> Result<Vec<Case>, CoreError> {
        queries::cases::cases_by_status(&mut self.conn, status).map_err(to_core)
    }

    fn cases_by_category(&mut self, category: CaseCategory) -> Result<Vec<Case>, CoreError> {
        queries::cases::cases_by_category(&mut self.conn, category).map_err(to_core)
    }

    fn cases_by_counselor_and_status(
        &mut self,
        counselor_id: CounselorId,
        status: CaseStatus,
    ) -> Result<Vec<Case>, CoreError> {
        queries::cases::cases_by_counselor_and_status(&mut self.conn, counselor_id, status)
            .map_err(to_core)
    }

    fn cases_by_customer(&mut self, customer_id: CustomerId) -> Result<Vec<Case>, CoreError> {
        queries::cases::cases_by_customer(&mut self.conn, customer_id).map_err(to_core)
    }
}

impl CounselorQueries for Persistence {
    fn active_counselors(&mut self) -> Result<Vec<Counselor>, CoreError> {
        queries::counselors::active_counselors(&mut self.conn).map_err(to_core)
    }

    fn available_counselors(&mut self) -> Result<Vec<Counselor>, CoreError> {
        queries::counselors::available_counselors(&mut self.conn).map_err(to_core)
    }

    fn counselors_by_team(&mut self, team: CounselorTeam) -> Result<Vec<Counselor>, CoreError> {
        queries::counselors::counselors_by_team(&mut self.conn, team).map_err(to_core)
    }
}
