//! # Domain Services
//!
//! Stateless business logic that doesn't naturally belong to a single
//! entity or value object.
//!
//! ## Services
//!
//! - [`quantity_conversion`]: Canonical quantity to display units
//! - [`price_conversion`]: Unit price bases, discounts and supply amount
//! - [`order_transition`]: Order approval state machine

pub mod order_transition;
pub mod price_conversion;
pub mod quantity_conversion;

pub use order_transition::{legal_operations, transition, TransitionContext, TransitionOutcome};
pub use price_conversion::{
    convert_price, convert_raw_price, supply_amount, supported_price_units, Discount,
    OfficialQuote, PriceConversion,
};
pub use quantity_conversion::{
    canonical_quantity, convert_quantity, convert_raw_quantity, supported_units, Quantity,
};
