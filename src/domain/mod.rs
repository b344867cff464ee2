//! # Domain Layer
//!
//! Paper specs, conversion engines and the order aggregate. Nothing in this
//! layer performs I/O.
//!
//! - [`value_objects`]: Identifiers, units, statuses and the paper spec
//! - [`services`]: Quantity and price engines, the transition function
//! - [`entities`]: Company, pricing and the order aggregate
//! - [`events`]: Order lifecycle events
//! - [`errors`]: Domain error type

pub mod entities;
pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;
