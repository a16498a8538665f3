// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Generates a newtype wrapper around an `i64` database identifier.
///
/// Identifiers are assigned by the persistence layer and are immutable once
/// assigned. The newtypes exist so a case id can never be passed where a
/// counselor id is expected.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Identifier of a counseling case.
    CaseId
}

id_type! {
    /// Identifier of a counselor.
    CounselorId
}

id_type! {
    /// Identifier of a customer.
    CustomerId
}

id_type! {
    /// Identifier of a counsel note.
    NoteId
}

/// Classification of a counseling case.
///
/// The category is assigned at intake and is immutable for the life of the
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseCategory {
    /// Questions about a product.
    ProductInquiry,
    /// Contract-related requests.
    Contract,
    /// Payment and billing issues.
    Payment,
    /// Delivery and shipping issues.
    Delivery,
    /// Complaints.
    Complaint,
    /// Technical support requests.
    TechnicalSupport,
    /// Contract termination inquiries.
    Cancellation,
    /// Anything else.
    Other,
}

impl CaseCategory {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProductInquiry => "product_inquiry",
            Self::Contract => "contract",
            Self::Payment => "payment",
            Self::Delivery => "delivery",
            Self::Complaint => "complaint",
            Self::TechnicalSupport => "technical_support",
            Self::Cancellation => "cancellation",
            Self::Other => "other",
        }
    }
}

impl FromStr for CaseCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product_inquiry" => Ok(Self::ProductInquiry),
            "contract" => Ok(Self::Contract),
            "payment" => Ok(Self::Payment),
            "delivery" => Ok(Self::Delivery),
            "complaint" => Ok(Self::Complaint),
            "technical_support" => Ok(Self::TechnicalSupport),
            "cancellation" => Ok(Self::Cancellation),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidCaseCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit timestamp pair carried by every aggregate.
///
/// This is plain field composition, not a shared base type: each aggregate
/// embeds its own copy, and the persistence layer calls [`AuditStamps::touch`]
/// on every save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStamps {
    /// When the aggregate was created.
    pub created_at: OffsetDateTime,
    /// When the aggregate was last written.
    pub updated_at: OffsetDateTime,
}

impl AuditStamps {
    /// Creates a fresh pair with both stamps set to `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Advances the update stamp. The creation stamp never changes.
    pub fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }
}
