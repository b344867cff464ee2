//! # Domain Errors
//!
//! Business rule violations raised by the order aggregate and pricing model.
//!
//! The conversion engines never return these: they degrade to zero instead.

use crate::domain::value_objects::{ArithmeticError, OrderOperation, OrderStatus, PartyRole};
use thiserror::Error;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The operation is not defined for the current status.
    #[error("illegal transition: cannot {operation} an order in {status}")]
    IllegalTransition {
        /// Attempted operation.
        operation: OrderOperation,
        /// Status at the time of the attempt.
        status: OrderStatus,
    },

    /// The operation is defined for the status but not for the caller's role.
    #[error("{role} may not {operation} an order in {status}")]
    NotPermitted {
        /// Attempted operation.
        operation: OrderOperation,
        /// Status at the time of the attempt.
        status: OrderStatus,
        /// Caller's role on the order.
        role: PartyRole,
    },

    /// The order can no longer be edited.
    #[error("order in {0} cannot be edited")]
    NotEditable(OrderStatus),

    /// The company is neither seller nor buyer on the order.
    #[error("company {0} is not a party to this order")]
    NotAParty(String),

    /// The field is derived under the current price authority.
    #[error("{0} is derived from the other price input and cannot be set")]
    DerivedPriceField(&'static str),

    /// Validation failed.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Arithmetic failure where degrading to zero is not acceptable.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Creates an illegal transition error.
    #[must_use]
    pub const fn illegal(operation: OrderOperation, status: OrderStatus) -> Self {
        Self::IllegalTransition { operation, status }
    }

    /// Returns true if this is an illegal transition.
    #[must_use]
    pub const fn is_illegal_transition(&self) -> bool {
        matches!(self, Self::IllegalTransition { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
