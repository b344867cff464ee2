//! # Order Events
//!
//! Domain events for the order lifecycle.
//!
//! # Event Flow
//!
//! ```text
//! OrderCreated -> OrderStatusChanged* (request, accept, reject, reset, cancel)
//!              -> OrderRepriced* (quantity or price edits while preparing)
//! ```
//!
//! Idempotent repeats produce no event.

use crate::domain::entities::order::{Order, TransitionReceipt};
use crate::domain::events::domain_event::{DomainEvent, EventMetadata, EventType};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{
    CompanyId, EventId, OrderId, OrderOperation, OrderStatus, OrderType, TradePath,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event emitted when an order is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Who opened it.
    pub path: TradePath,
    /// Kind of order.
    pub order_type: OrderType,
    /// Seller.
    pub src_company: CompanyId,
    /// Buyer.
    pub dst_company: CompanyId,
}

impl OrderCreated {
    /// Creates the event for a freshly opened order.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        Self {
            metadata: EventMetadata::for_order(order.id()),
            path: order.path(),
            order_type: order.order_type(),
            src_company: order.src_company().id.clone(),
            dst_company: order.dst_company().id.clone(),
        }
    }
}

impl DomainEvent for OrderCreated {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn order_id(&self) -> OrderId {
        self.metadata.order_id
    }

    fn timestamp(&self) -> Timestamp {
        self.metadata.timestamp
    }

    fn event_type(&self) -> EventType {
        EventType::Order
    }

    fn event_name(&self) -> &'static str {
        "OrderCreated"
    }
}

/// Event emitted when a transition changed the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Operation applied.
    pub operation: OrderOperation,
    /// Status before.
    pub from: OrderStatus,
    /// Status after.
    pub to: OrderStatus,
    /// Company that invoked the operation.
    pub actor: CompanyId,
}

impl OrderStatusChanged {
    /// Creates the event from a receipt; `None` if nothing changed.
    #[must_use]
    pub fn from_receipt(
        order_id: OrderId,
        receipt: &TransitionReceipt,
        actor: CompanyId,
    ) -> Option<Self> {
        receipt.changed.then(|| Self {
            metadata: EventMetadata::for_order(order_id),
            operation: receipt.operation,
            from: receipt.from,
            to: receipt.to,
            actor,
        })
    }
}

impl DomainEvent for OrderStatusChanged {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn order_id(&self) -> OrderId {
        self.metadata.order_id
    }

    fn timestamp(&self) -> Timestamp {
        self.metadata.timestamp
    }

    fn event_type(&self) -> EventType {
        EventType::Order
    }

    fn event_name(&self) -> &'static str {
        "OrderStatusChanged"
    }
}

/// Event emitted when quantity or pricing was edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRepriced {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Canonical quantity after the edit.
    pub quantity: Decimal,
    /// Supply amount after the edit.
    pub supply_amount: Decimal,
    /// Company that made the edit.
    pub actor: CompanyId,
}

impl OrderRepriced {
    /// Creates the event from the edited order.
    #[must_use]
    pub fn for_order(order: &Order, actor: CompanyId) -> Self {
        Self {
            metadata: EventMetadata::for_order(order.id()),
            quantity: order.quantity(),
            supply_amount: order.supply_amount(),
            actor,
        }
    }
}

impl DomainEvent for OrderRepriced {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn order_id(&self) -> OrderId {
        self.metadata.order_id
    }

    fn timestamp(&self) -> Timestamp {
        self.metadata.timestamp
    }

    fn event_type(&self) -> EventType {
        EventType::Pricing
    }

    fn event_name(&self) -> &'static str {
        "OrderRepriced"
    }
}
