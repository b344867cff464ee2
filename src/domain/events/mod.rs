//! # Domain Events
//!
//! Records of order changes, emitted by the workflow service after a
//! change has been persisted.
//!
//! - [`OrderCreated`]
//! - [`OrderStatusChanged`]
//! - [`OrderRepriced`]

pub mod domain_event;
pub mod order_events;

pub use domain_event::{DomainEvent, EventMetadata, EventType};
pub use order_events::{OrderCreated, OrderRepriced, OrderStatusChanged};
