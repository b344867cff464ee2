//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - Illegal transitions, edits, pricing
//! ├── Infrastructure(InfrastructureError) - Collaborator failures
//! ├── Validation(String)                  - Input validation failures
//! ├── NotFound                            - Order, company or packaging missing
//! ├── StaleOrder                          - Order changed since it was loaded
//! └── TransitionInFlight                  - Another transition is pending
//! ```
//!
//! Illegal transitions and stale orders are never retryable: the caller must
//! refetch the order and recompute its legal operations.
//!
//! # Examples
//!
//! ```
//! use paper_trade::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::validation("quantity must be positive");
//! assert!(err.is_validation());
//!
//! let err: ApplicationError = InfrastructureError::configuration("bad level").into();
//! assert!(!err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::OrderId;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
///
/// Failures of settings or collaborators that carry no business meaning.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Settings could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl InfrastructureError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Repository(e) => matches!(e, RepositoryError::Connection(_)),
            Self::Configuration(_) => false,
        }
    }
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from collaborators.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// The order changed between fetch and transition.
    #[error("order {id} is stale: expected version {expected}, found {actual}")]
    StaleOrder {
        /// Order identifier.
        id: String,
        /// Version the caller saw.
        expected: u64,
        /// Version in the store.
        actual: u64,
    },

    /// A transition for the order is already pending.
    #[error("a transition for order {0} is already in flight")]
    TransitionInFlight(OrderId),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// An in-flight rejection may be retried once the pending transition
    /// settles; illegal transitions and stale orders may not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Infrastructure(e) => e.is_retryable(),
            Self::TransitionInFlight(_) => true,
            Self::Domain(_) | Self::Validation(_) | Self::NotFound { .. } => false,
            Self::StaleOrder { .. } => false,
        }
    }

    /// Returns true if this is an illegal transition.
    #[must_use]
    pub fn is_illegal_transition(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_illegal_transition())
    }

    /// Returns true if the order must be refetched.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleOrder { .. })
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::VersionConflict {
                id,
                expected,
                actual,
                ..
            } => Self::StaleOrder {
                id,
                expected,
                actual,
            },
            RepositoryError::NotFound { entity_type, id } => Self::not_found(entity_type, id),
            RepositoryError::Domain(e) => Self::Domain(e),
            other => Self::Infrastructure(InfrastructureError::Repository(other)),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
