//! # Order Status
//!
//! Order approval lifecycle states and the operations that move between them.
//!
//! # State Machine
//!
//! ```text
//! OFFER_PREPARING ─request→ OFFER_REQUESTED ─accept→ ACCEPTED
//!       │  ↑                     │                    │
//!       │  └──reset── OFFER_REJECTED ←─reject─┘       │ (virtual counterparty)
//!       ├─cancel→ CANCELLED ←─────────────────────────┘
//!       └─accept (virtual counterparty only)→ ACCEPTED
//! ```
//!
//! The `ORDER_*` path mirrors the `OFFER_*` path with buyer and seller swapped.
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::value_objects::order_status::OrderStatus;
//! use paper_trade::domain::value_objects::enums::TradePath;
//!
//! let status = OrderStatus::preparing(TradePath::Offer);
//! assert_eq!(status, OrderStatus::OfferPreparing);
//! assert!(status.is_preparing());
//! assert_eq!(status.path(), Some(TradePath::Offer));
//! ```

use crate::domain::value_objects::enums::{ParseEnumError, TradePath};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum OrderStatus {
    /// Seller is drafting an offer.
    OfferPreparing = 0,
    /// Buyer is drafting an order.
    OrderPreparing = 1,
    /// Offer sent to the buyer.
    OfferRequested = 2,
    /// Order sent to the seller.
    OrderRequested = 3,
    /// Buyer rejected the offer.
    OfferRejected = 4,
    /// Seller rejected the order.
    OrderRejected = 5,
    /// Both sides agreed.
    Accepted = 6,
    /// Withdrawn.
    Cancelled = 7,
}

impl OrderStatus {
    /// Every status.
    pub const ALL: [Self; 8] = [
        Self::OfferPreparing,
        Self::OrderPreparing,
        Self::OfferRequested,
        Self::OrderRequested,
        Self::OfferRejected,
        Self::OrderRejected,
        Self::Accepted,
        Self::Cancelled,
    ];

    /// Preparing status for a path.
    #[must_use]
    pub const fn preparing(path: TradePath) -> Self {
        match path {
            TradePath::Offer => Self::OfferPreparing,
            TradePath::Order => Self::OrderPreparing,
        }
    }

    /// Requested status for a path.
    #[must_use]
    pub const fn requested(path: TradePath) -> Self {
        match path {
            TradePath::Offer => Self::OfferRequested,
            TradePath::Order => Self::OrderRequested,
        }
    }

    /// Rejected status for a path.
    #[must_use]
    pub const fn rejected(path: TradePath) -> Self {
        match path {
            TradePath::Offer => Self::OfferRejected,
            TradePath::Order => Self::OrderRejected,
        }
    }

    /// Path this status belongs to; `None` for the shared terminal states.
    #[must_use]
    pub const fn path(self) -> Option<TradePath> {
        match self {
            Self::OfferPreparing | Self::OfferRequested | Self::OfferRejected => {
                Some(TradePath::Offer)
            }
            Self::OrderPreparing | Self::OrderRequested | Self::OrderRejected => {
                Some(TradePath::Order)
            }
            Self::Accepted | Self::Cancelled => None,
        }
    }

    /// Returns true for `*_PREPARING`.
    #[inline]
    #[must_use]
    pub const fn is_preparing(self) -> bool {
        matches!(self, Self::OfferPreparing | Self::OrderPreparing)
    }

    /// Returns true for `*_REQUESTED`.
    #[inline]
    #[must_use]
    pub const fn is_requested(self) -> bool {
        matches!(self, Self::OfferRequested | Self::OrderRequested)
    }

    /// Returns true for `*_REJECTED`.
    #[inline]
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::OfferRejected | Self::OrderRejected)
    }

    /// Returns true if quantity and price may still be edited.
    #[inline]
    #[must_use]
    pub const fn is_editable(self) -> bool {
        self.is_preparing()
    }

    /// Returns the numeric value of this status.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OfferPreparing => "OFFER_PREPARING",
            Self::OrderPreparing => "ORDER_PREPARING",
            Self::OfferRequested => "OFFER_REQUESTED",
            Self::OrderRequested => "ORDER_REQUESTED",
            Self::OfferRejected => "OFFER_REJECTED",
            Self::OrderRejected => "ORDER_REJECTED",
            Self::Accepted => "ACCEPTED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::InvalidValue("OrderStatus", s.to_string()))
    }
}

/// Operation a party may invoke on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderOperation {
    /// Send a prepared offer/order to the counterparty.
    Request,
    /// Approve (or register, for a virtual counterparty).
    Accept,
    /// Decline a request.
    Reject,
    /// Reopen a rejected request for editing.
    Reset,
    /// Withdraw.
    Cancel,
}

impl OrderOperation {
    /// Every operation.
    pub const ALL: [Self; 5] = [
        Self::Request,
        Self::Accept,
        Self::Reject,
        Self::Reset,
        Self::Cancel,
    ];
}

impl fmt::Display for OrderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Request => "request",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Reset => "reset",
            Self::Cancel => "cancel",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderOperation {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::InvalidValue("OrderOperation", s.to_string()))
    }
}

/// Operation as exposed to the user.
///
/// `Register` is `accept` invoked straight from a preparing status against a
/// virtual counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExposedAction {
    /// Send to the counterparty.
    Request,
    /// Finalize against a virtual counterparty.
    Register,
    /// Approve a request.
    Accept,
    /// Decline a request.
    Reject,
    /// Reopen after rejection.
    Reset,
    /// Withdraw.
    Cancel,
}

impl ExposedAction {
    /// The state machine operation behind this action.
    #[must_use]
    pub const fn operation(self) -> OrderOperation {
        match self {
            Self::Request => OrderOperation::Request,
            Self::Register | Self::Accept => OrderOperation::Accept,
            Self::Reject => OrderOperation::Reject,
            Self::Reset => OrderOperation::Reset,
            Self::Cancel => OrderOperation::Cancel,
        }
    }
}

/// Role of a company relative to a given order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyRole {
    /// Source company, supplying the stock.
    Seller,
    /// Destination company, receiving the stock.
    Buyer,
    /// Not a party to the order.
    Outsider,
}

impl PartyRole {
    /// Role that opens deals on `path`.
    #[must_use]
    pub const fn initiator_of(path: TradePath) -> Self {
        match path {
            TradePath::Offer => Self::Seller,
            TradePath::Order => Self::Buyer,
        }
    }

    /// Role that answers requests on `path`.
    #[must_use]
    pub const fn receiver_of(path: TradePath) -> Self {
        match path {
            TradePath::Offer => Self::Buyer,
            TradePath::Order => Self::Seller,
        }
    }

    /// Returns true for seller or buyer.
    #[inline]
    #[must_use]
    pub const fn is_party(self) -> bool {
        !matches!(self, Self::Outsider)
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seller => write!(f, "SELLER"),
            Self::Buyer => write!(f, "BUYER"),
            Self::Outsider => write!(f, "OUTSIDER"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod status {
        use super::*;

        #[test]
        fn path_of_each_status() {
            assert_eq!(OrderStatus::OfferRequested.path(), Some(TradePath::Offer));
            assert_eq!(OrderStatus::OrderRejected.path(), Some(TradePath::Order));
            assert_eq!(OrderStatus::Accepted.path(), None);
            assert_eq!(OrderStatus::Cancelled.path(), None);
        }

        #[test]
        fn constructors_match_path() {
            for path in [TradePath::Offer, TradePath::Order] {
                assert_eq!(OrderStatus::preparing(path).path(), Some(path));
                assert_eq!(OrderStatus::requested(path).path(), Some(path));
                assert_eq!(OrderStatus::rejected(path).path(), Some(path));
            }
        }

        #[test]
        fn only_preparing_is_editable() {
            for status in OrderStatus::ALL {
                assert_eq!(status.is_editable(), status.is_preparing());
            }
        }

        #[test]
        fn display_and_parse() {
            for status in OrderStatus::ALL {
                assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
            }
            assert!("PENDING".parse::<OrderStatus>().is_err());
        }

        #[test]
        fn serde_names() {
            assert_eq!(
                serde_json::to_string(&OrderStatus::OfferPreparing).unwrap(),
                "\"OFFER_PREPARING\""
            );
        }
    }

    mod operations {
        use super::*;

        #[test]
        fn parse_operation() {
            assert_eq!(
                "ACCEPT".parse::<OrderOperation>().unwrap(),
                OrderOperation::Accept
            );
            assert!("approve".parse::<OrderOperation>().is_err());
        }

        #[test]
        fn register_maps_to_accept() {
            assert_eq!(ExposedAction::Register.operation(), OrderOperation::Accept);
            assert_eq!(ExposedAction::Accept.operation(), OrderOperation::Accept);
        }
    }

    mod roles {
        use super::*;

        #[test]
        fn initiator_and_receiver() {
            assert_eq!(PartyRole::initiator_of(TradePath::Offer), PartyRole::Seller);
            assert_eq!(PartyRole::receiver_of(TradePath::Offer), PartyRole::Buyer);
            assert_eq!(PartyRole::initiator_of(TradePath::Order), PartyRole::Buyer);
            assert_eq!(PartyRole::receiver_of(TradePath::Order), PartyRole::Seller);
            assert!(!PartyRole::Outsider.is_party());
        }
    }
}
