//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`OrderId`], [`PlanId`], [`EventId`]: UUID-based identifiers
//! - [`CompanyId`], [`PackagingId`]: String-based identifiers
//!
//! ## Paper
//!
//! - [`PaperSpec`]: Grammage, sheet size and packaging
//! - [`Packaging`]: Tagged packaging variant
//! - [`QuantityUnit`], [`PriceUnit`]: Display and pricing units
//!
//! ## Arithmetic
//!
//! - [`CheckedArithmetic`]: Trait for safe decimal operations
//! - [`finite_or_zero`]: Non-finite input guard
//!
//! ## Workflow
//!
//! - [`OrderStatus`], [`OrderOperation`], [`PartyRole`]

pub mod arithmetic;
pub mod enums;
pub mod ids;
pub mod order_status;
pub mod paper_spec;
pub mod timestamp;
pub mod units;

pub use arithmetic::{
    finite_or_zero, input_or_zero, or_zero, ArithmeticError, ArithmeticResult, CheckedArithmetic,
};
pub use enums::{
    DiscountRateUnit, DiscountType, OfficialPriceType, OrderType, ParseEnumError, TradePath,
};
pub use ids::{CompanyId, EventId, OrderId, PackagingId, PlanId};
pub use order_status::{ExposedAction, OrderOperation, OrderStatus, PartyRole};
pub use paper_spec::{Packaging, PackagingType, PaperSpec};
pub use timestamp::Timestamp;
pub use units::{recommended_precision, PriceUnit, QuantityUnit, UnitValue};
