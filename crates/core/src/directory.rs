// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative counselor operations.
//!
//! This is the second legal write path to a counselor's status field, next
//! to the coordinator's assign/complete/cancel transitions. The two paths do
//! not coordinate: an administrative `Break`/`Offline` set can be overwritten
//! by the coordinator's unconditional release on complete/cancel. That
//! trade-off is accepted, not masked; see DESIGN.md.

use crate::error::CoreError;
use crate::store::{CrmStore, NewCounselor, UnitOfWork};
use counsel_crm_domain::{Counselor, CounselorId, CounselorStatus, CounselorTeam};
use time::OffsetDateTime;

/// Administrative surface for counselor records.
pub struct CounselorDirectory<S> {
    store: S,
}

impl<S: CrmStore> CounselorDirectory<S> {
    /// Wraps a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Gives access to the underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwraps the directory back into its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers a new counselor, active and `Available`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (e.g. duplicate employee code).
    pub fn create_counselor(
        &mut self,
        name: String,
        employee_code: String,
        extension: Option<String>,
        team: CounselorTeam,
    ) -> Result<Counselor, CoreError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        self.store.transaction(|tx| {
            tx.insert_counselor(&NewCounselor {
                name: name.clone(),
                employee_code: employee_code.clone(),
                extension: extension.clone(),
                team,
                created_at: now,
            })
        })
    }

    /// Looks up a counselor.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not resolve.
    pub fn get(&mut self, id: CounselorId) -> Result<Counselor, CoreError> {
        self.store.transaction(|tx| tx.counselor(id))
    }

    /// Sets a counselor's availability status unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not resolve.
    pub fn set_status(
        &mut self,
        id: CounselorId,
        status: CounselorStatus,
    ) -> Result<Counselor, CoreError> {
        self.store.transaction(|tx| {
            let mut counselor = tx.counselor(id)?;
            counselor.change_status(status);
            tx.save_counselor(&counselor)
        })
    }

    /// Marks a counselor eligible for assignment again. Does not restore
    /// the pre-deactivation status.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not resolve.
    pub fn activate(&mut self, id: CounselorId) -> Result<Counselor, CoreError> {
        self.store.transaction(|tx| {
            let mut counselor = tx.counselor(id)?;
            counselor.activate();
            tx.save_counselor(&counselor)
        })
    }

    /// Removes a counselor from service (soft delete) and forces the status
    /// to `Offline`.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not resolve.
    pub fn deactivate(&mut self, id: CounselorId) -> Result<Counselor, CoreError> {
        self.store.transaction(|tx| {
            let mut counselor = tx.counselor(id)?;
            counselor.deactivate();
            tx.save_counselor(&counselor)
        })
    }
}
