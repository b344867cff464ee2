//! # Collaborator Traits
//!
//! Port definitions for the systems the workflow talks to.
//!
//! - [`OrderGateway`]: Executes transitions and edits against the
//!   authoritative order store
//! - [`CompanyDirectory`]: Current company and counterparty lookup
//! - [`PackagingCatalog`]: Packaging metadata used to build paper specs
//!
//! # Examples
//!
//! ```ignore
//! use paper_trade::infrastructure::persistence::traits::OrderGateway;
//!
//! async fn list_orders(gateway: &impl OrderGateway, company: &CompanyId) {
//!     let orders = gateway.find_by_company(company).await.unwrap();
//!     println!("{} orders", orders.len());
//! }
//! ```

use crate::domain::entities::company::Company;
use crate::domain::entities::order::{Order, TransitionReceipt};
use crate::domain::entities::price_spec::PriceSpec;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{
    CompanyId, OrderId, OrderOperation, Packaging, PackagingId,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Error type for collaborator operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// The stored entity changed since the caller loaded it.
    #[error("Version conflict: {entity_type} with id {id} has been modified")]
    VersionConflict {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
        /// Expected version.
        expected: u64,
        /// Actual version.
        actual: u64,
    },

    /// The authoritative store refused the change.
    #[error("Rejected by store: {0}")]
    Domain(#[from] DomainError),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a version conflict error.
    #[must_use]
    pub fn version_conflict(
        entity_type: &'static str,
        id: impl Into<String>,
        expected: u64,
        actual: u64,
    ) -> Self {
        Self::VersionConflict {
            entity_type,
            id: id.into(),
            expected,
            actual,
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a version conflict error.
    #[must_use]
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Result type for collaborator operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Snapshot returned by a gateway after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// Order as stored after the transition.
    pub order: Order,
    /// What the transition did.
    pub receipt: TransitionReceipt,
}

/// Authoritative order store.
///
/// Every mutating call carries the version the caller last saw. The
/// gateway applies the change only if the stored version still matches.
#[async_trait]
pub trait OrderGateway: Send + Sync + fmt::Debug {
    /// Stores a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the ID is taken.
    async fn create(&self, order: &Order) -> RepositoryResult<()>;

    /// Gets an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on store failure.
    async fn get(&self, id: OrderId) -> RepositoryResult<Option<Order>>;

    /// Executes a workflow operation.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if the order does not exist
    /// - `RepositoryError::VersionConflict` if the order changed since
    ///   `expected_version`
    /// - `RepositoryError::Domain` if the store refuses the transition
    async fn execute_transition(
        &self,
        id: OrderId,
        operation: OrderOperation,
        caller: &CompanyId,
        expected_version: u64,
    ) -> RepositoryResult<TransitionResult>;

    /// Persists a new canonical quantity.
    ///
    /// # Errors
    ///
    /// Same as [`OrderGateway::execute_transition`].
    async fn update_quantity(
        &self,
        id: OrderId,
        caller: &CompanyId,
        quantity: Decimal,
        expected_version: u64,
    ) -> RepositoryResult<Order>;

    /// Persists new pricing.
    ///
    /// # Errors
    ///
    /// Same as [`OrderGateway::execute_transition`].
    async fn update_price(
        &self,
        id: OrderId,
        caller: &CompanyId,
        price: PriceSpec,
        expected_version: u64,
    ) -> RepositoryResult<Order>;

    /// Orders where `company` is seller or buyer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on store failure.
    async fn find_by_company(&self, company: &CompanyId) -> RepositoryResult<Vec<Order>>;
}

/// Company identity and lookup.
#[async_trait]
pub trait CompanyDirectory: Send + Sync + fmt::Debug {
    /// The company the session acts for.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on lookup failure.
    async fn current_company(&self) -> RepositoryResult<Company>;

    /// Looks up a company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on lookup failure.
    async fn get(&self, id: &CompanyId) -> RepositoryResult<Option<Company>>;
}

/// Packaging metadata.
#[async_trait]
pub trait PackagingCatalog: Send + Sync + fmt::Debug {
    /// Looks up a packaging record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on lookup failure.
    async fn get(&self, id: &PackagingId) -> RepositoryResult<Option<Packaging>>;

    /// All packaging records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on lookup failure.
    async fn list(&self) -> RepositoryResult<Vec<(PackagingId, Packaging)>>;
}
