//! # Domain Entities
//!
//! Aggregate roots and entities representing core business concepts.
//!
//! ## Aggregates
//!
//! - [`Order`]: Trade order with approval workflow
//!
//! ## Entities
//!
//! - [`Company`]: Trading company, real or virtual
//! - [`PriceSpec`]: Order pricing with explicit price authority

pub mod company;
pub mod order;
pub mod price_spec;

pub use company::{Company, CompanyRef};
pub use order::{
    AffectedResource, AffectedResources, Order, OrderPayload, PaperLine, TransitionReceipt,
};
pub use price_spec::{PriceAuthority, PriceSpec};
