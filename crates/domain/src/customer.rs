// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{AuditStamps, CustomerId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Customer grade classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerGrade {
    /// VIP customers.
    Vip,
    /// Premium customers.
    Premium,
    /// Regular customers.
    #[default]
    Normal,
    /// Newly registered customers.
    New,
}

impl CustomerGrade {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vip => "vip",
            Self::Premium => "premium",
            Self::Normal => "normal",
            Self::New => "new",
        }
    }
}

impl FromStr for CustomerGrade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vip" => Ok(Self::Vip),
            "premium" => Ok(Self::Premium),
            "normal" => Ok(Self::Normal),
            "new" => Ok(Self::New),
            _ => Err(DomainError::InvalidCustomerGrade(s.to_string())),
        }
    }
}

impl std::fmt::Display for CustomerGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer, as seen by the counseling core.
///
/// The core only validates existence when opening a case; customer profile
/// management lives in an outer layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Identifier assigned by the persistence layer.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Unique phone number.
    pub phone_number: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Grade classification.
    pub grade: CustomerGrade,
    /// Audit timestamps.
    pub stamps: AuditStamps,
}

impl Customer {
    /// Creates a new customer record.
    #[must_use]
    pub const fn new(
        id: CustomerId,
        name: String,
        phone_number: String,
        email: Option<String>,
        grade: CustomerGrade,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name,
            phone_number,
            email,
            grade,
            stamps: AuditStamps::new(now),
        }
    }
}
