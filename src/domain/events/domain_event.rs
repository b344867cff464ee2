//! # Domain Event Trait
//!
//! Base trait for all domain events.
//!
//! This module provides the [`DomainEvent`] trait that all domain events
//! must implement, along with common event metadata.

use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{EventId, OrderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Order lifecycle events.
    Order,
    /// Quantity and price edits.
    Pricing,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order => write!(f, "ORDER"),
            Self::Pricing => write!(f, "PRICING"),
        }
    }
}

/// Trait for all domain events.
///
/// Domain events are immutable records of something that happened to an
/// order, emitted after the change has been persisted.
pub trait DomainEvent: Send + Sync + fmt::Debug {
    /// Returns the unique identifier for this event.
    fn event_id(&self) -> EventId;

    /// Returns the order this event relates to.
    fn order_id(&self) -> OrderId;

    /// Returns when this event occurred.
    fn timestamp(&self) -> Timestamp;

    /// Returns the category of this event.
    fn event_type(&self) -> EventType;

    /// Returns the human-readable name of this event.
    fn event_name(&self) -> &'static str;
}

/// Common metadata for all domain events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique identifier for this event.
    pub event_id: EventId,
    /// The order this event relates to.
    pub order_id: OrderId,
    /// When this event occurred.
    pub timestamp: Timestamp,
}

impl EventMetadata {
    /// Creates metadata for an order with a generated event ID.
    #[must_use]
    pub fn for_order(order_id: OrderId) -> Self {
        Self {
            event_id: EventId::new_v4(),
            order_id,
            timestamp: Timestamp::now(),
        }
    }

    /// Creates event metadata with specific values (for reconstruction).
    #[must_use]
    pub fn from_parts(event_id: EventId, order_id: OrderId, timestamp: Timestamp) -> Self {
        Self {
            event_id,
            order_id,
            timestamp,
        }
    }
}
