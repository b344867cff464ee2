//! # Order Transition
//!
//! The order approval state machine as a pure function of status,
//! operation, caller role and whether the counterparty is virtual.
//!
//! # Transition Table
//!
//! ```text
//! operation  from         guard                              to
//! ---------  -----------  ---------------------------------  ------------
//! request    *_PREPARING  real counterparty, caller starts   *_REQUESTED
//! accept     *_REQUESTED  caller answers                     ACCEPTED
//! accept     *_PREPARING  virtual counterparty, any party    ACCEPTED
//! accept     ACCEPTED     any party                          (no change)
//! reject     *_REQUESTED  caller answers                     *_REJECTED
//! reject     *_REJECTED   any party                          (no change)
//! reset      *_REJECTED   caller starts                      *_PREPARING
//! cancel     *_PREPARING  any party                          CANCELLED
//! cancel     ACCEPTED     virtual counterparty, any party    CANCELLED
//! cancel     CANCELLED    any party                          (no change)
//! ```
//!
//! Everything else is an illegal transition. A virtual counterparty never
//! receives a request: the initiator registers the deal directly.
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::services::order_transition::{transition, TransitionContext};
//! use paper_trade::domain::value_objects::{OrderOperation, OrderStatus, PartyRole};
//!
//! let ctx = TransitionContext::new(PartyRole::Seller, false);
//! let outcome = transition(OrderStatus::OfferPreparing, OrderOperation::Request, &ctx).unwrap();
//! assert_eq!(outcome.to, OrderStatus::OfferRequested);
//! assert!(outcome.changed);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{ExposedAction, OrderOperation, OrderStatus, PartyRole};
use serde::{Deserialize, Serialize};

/// Facts about the caller and counterparty a transition depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionContext {
    /// Caller's role on the order.
    pub caller: PartyRole,
    /// Whether the counterparty is managed by another company.
    pub counterparty_managed: bool,
}

impl TransitionContext {
    /// Creates a transition context.
    #[must_use]
    pub const fn new(caller: PartyRole, counterparty_managed: bool) -> Self {
        Self {
            caller,
            counterparty_managed,
        }
    }
}

/// Result of a legal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    /// Status before.
    pub from: OrderStatus,
    /// Status after.
    pub to: OrderStatus,
    /// False for idempotent repeats.
    pub changed: bool,
}

impl TransitionOutcome {
    const fn moved(from: OrderStatus, to: OrderStatus) -> Self {
        Self {
            from,
            to,
            changed: true,
        }
    }

    const fn unchanged(status: OrderStatus) -> Self {
        Self {
            from: status,
            to: status,
            changed: false,
        }
    }
}

/// Applies `operation` to `status`.
///
/// # Errors
///
/// - `DomainError::IllegalTransition` if the operation is undefined for the
///   status (including request or register against the wrong kind of
///   counterparty).
/// - `DomainError::NotPermitted` if it is defined but the caller's role
///   may not perform it.
pub fn transition(
    status: OrderStatus,
    operation: OrderOperation,
    ctx: &TransitionContext,
) -> DomainResult<TransitionOutcome> {
    let illegal = || DomainError::illegal(operation, status);
    let guard = |allowed: bool| {
        if allowed {
            Ok(())
        } else {
            Err(DomainError::NotPermitted {
                operation,
                status,
                role: ctx.caller,
            })
        }
    };
    let is_party = ctx.caller.is_party();

    match (operation, status) {
        (OrderOperation::Request, s) if s.is_preparing() => {
            let path = s.path().ok_or_else(illegal)?;
            if ctx.counterparty_managed {
                return Err(illegal());
            }
            guard(ctx.caller == PartyRole::initiator_of(path))?;
            Ok(TransitionOutcome::moved(s, OrderStatus::requested(path)))
        }

        (OrderOperation::Accept, s) if s.is_requested() => {
            let path = s.path().ok_or_else(illegal)?;
            guard(ctx.caller == PartyRole::receiver_of(path))?;
            Ok(TransitionOutcome::moved(s, OrderStatus::Accepted))
        }
        (OrderOperation::Accept, s) if s.is_preparing() => {
            if !ctx.counterparty_managed {
                return Err(illegal());
            }
            guard(is_party)?;
            Ok(TransitionOutcome::moved(s, OrderStatus::Accepted))
        }
        (OrderOperation::Accept, OrderStatus::Accepted) => {
            guard(is_party)?;
            Ok(TransitionOutcome::unchanged(status))
        }

        (OrderOperation::Reject, s) if s.is_requested() => {
            let path = s.path().ok_or_else(illegal)?;
            guard(ctx.caller == PartyRole::receiver_of(path))?;
            Ok(TransitionOutcome::moved(s, OrderStatus::rejected(path)))
        }
        (OrderOperation::Reject, s) if s.is_rejected() => {
            guard(is_party)?;
            Ok(TransitionOutcome::unchanged(s))
        }

        (OrderOperation::Reset, s) if s.is_rejected() => {
            let path = s.path().ok_or_else(illegal)?;
            guard(ctx.caller == PartyRole::initiator_of(path))?;
            Ok(TransitionOutcome::moved(s, OrderStatus::preparing(path)))
        }

        (OrderOperation::Cancel, s) if s.is_preparing() => {
            guard(is_party)?;
            Ok(TransitionOutcome::moved(s, OrderStatus::Cancelled))
        }
        (OrderOperation::Cancel, OrderStatus::Accepted) => {
            if !ctx.counterparty_managed {
                return Err(illegal());
            }
            guard(is_party)?;
            Ok(TransitionOutcome::moved(status, OrderStatus::Cancelled))
        }
        (OrderOperation::Cancel, OrderStatus::Cancelled) => {
            guard(is_party)?;
            Ok(TransitionOutcome::unchanged(status))
        }

        _ => Err(illegal()),
    }
}

/// Actions the caller could take right now that would change the status.
///
/// `accept` out of a preparing status is reported as
/// [`ExposedAction::Register`].
#[must_use]
pub fn legal_operations(status: OrderStatus, ctx: &TransitionContext) -> Vec<ExposedAction> {
    OrderOperation::ALL
        .into_iter()
        .filter(|op| transition(status, *op, ctx).is_ok_and(|outcome| outcome.changed))
        .map(|op| match op {
            OrderOperation::Request => ExposedAction::Request,
            OrderOperation::Accept if status.is_preparing() => ExposedAction::Register,
            OrderOperation::Accept => ExposedAction::Accept,
            OrderOperation::Reject => ExposedAction::Reject,
            OrderOperation::Reset => ExposedAction::Reset,
            OrderOperation::Cancel => ExposedAction::Cancel,
        })
        .collect()
}
