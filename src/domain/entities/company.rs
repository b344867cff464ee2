//! # Company
//!
//! A trading company, either a real tenant or a virtual company kept on
//! someone else's books.
//!
//! A virtual (managed) company cannot act for itself: orders against it are
//! registered directly by the managing side instead of going through
//! request and accept.

use crate::domain::value_objects::CompanyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A company that can appear on either side of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    name: String,
    managed_by: Option<CompanyId>,
}

impl Company {
    /// Creates a real company.
    #[must_use]
    pub fn new(id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            managed_by: None,
        }
    }

    /// Creates a virtual company managed by `manager`.
    #[must_use]
    pub fn managed(id: CompanyId, name: impl Into<String>, manager: CompanyId) -> Self {
        Self {
            id,
            name: name.into(),
            managed_by: Some(manager),
        }
    }

    /// Returns the company ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &CompanyId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the managing company, if virtual.
    #[inline]
    #[must_use]
    pub fn managed_by(&self) -> Option<&CompanyId> {
        self.managed_by.as_ref()
    }

    /// Returns true for a virtual company.
    #[inline]
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.managed_by.is_some()
    }

    /// Snapshot for embedding in an order.
    #[must_use]
    pub fn to_ref(&self) -> CompanyRef {
        CompanyRef {
            id: self.id.clone(),
            name: self.name.clone(),
            is_managed: self.is_managed(),
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The part of a company an order needs to carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyRef {
    /// Company ID.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Whether the company is virtual.
    pub is_managed: bool,
}

impl From<&Company> for CompanyRef {
    fn from(company: &Company) -> Self {
        company.to_ref()
    }
}
