//! # Paper Trade
//!
//! Conversion engines and the trade-order approval workflow for a paper
//! distribution platform.
//!
//! ## Layers
//!
//! - [`domain`]: Paper specs, unit and price conversion, the order aggregate
//!   and its status machine
//! - [`application`]: The workflow service that runs order operations
//!   against the authoritative store
//! - [`infrastructure`]: Collaborator ports, in-memory implementations,
//!   configuration and tracing setup
//!
//! ## Conversions
//!
//! ```
//! use paper_trade::domain::services::{convert_quantity, supply_amount};
//! use paper_trade::domain::value_objects::{Packaging, PaperSpec, PriceUnit, QuantityUnit};
//! use rust_decimal::Decimal;
//!
//! let spec = PaperSpec::new(
//!     Decimal::new(80, 0),
//!     Decimal::new(636, 0),
//!     Decimal::new(939, 0),
//!     Packaging::Ream { pack_a: 250 },
//! );
//!
//! // 1 000 sheets are 2 reams
//! let quantity = convert_quantity(&spec, Decimal::new(1_000, 0));
//! assert_eq!(quantity.value_in(QuantityUnit::Ream), Some(Decimal::new(2, 0)));
//!
//! // priced per ream
//! let amount = supply_amount(&spec, Decimal::new(1_000, 0), Decimal::new(5_000, 0), PriceUnit::WonPerReam);
//! assert_eq!(amount, Decimal::new(10_000, 0));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
