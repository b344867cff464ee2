//! # Domain Enums
//!
//! Enumeration types for the trade-order domain:
//!
//! - [`TradePath`] - Who opened the deal (seller offer or buyer order)
//! - [`OrderType`] - Kind of trade order
//! - [`OfficialPriceType`] - Which official price list drives pricing
//! - [`DiscountType`] - Origin of the discount rate
//! - [`DiscountRateUnit`] - Percent or absolute per-unit discount
//!
//! All enums implement `Display`, `FromStr` and Serde traits.

use crate::domain::value_objects::units::PriceUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which party opened the deal.
///
/// Offers are opened by the seller (source company), orders by the buyer
/// (destination company). The path never changes over an order's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradePath {
    /// Seller-initiated.
    Offer,
    /// Buyer-initiated.
    Order,
}

impl fmt::Display for TradePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offer => write!(f, "OFFER"),
            Self::Order => write!(f, "ORDER"),
        }
    }
}

/// Kind of trade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Regular stock trade.
    #[default]
    Normal,
    /// Stock held on deposit for the counterparty.
    Deposit,
    /// Outsourced conversion work.
    OutsourceProcess,
    /// Miscellaneous trade carrying stock.
    Etc,
    /// Return of previously traded stock.
    Return,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "NORMAL",
            Self::Deposit => "DEPOSIT",
            Self::OutsourceProcess => "OUTSOURCE_PROCESS",
            Self::Etc => "ETC",
            Self::Return => "RETURN",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "NORMAL" => Ok(Self::Normal),
            "DEPOSIT" => Ok(Self::Deposit),
            "OUTSOURCE_PROCESS" => Ok(Self::OutsourceProcess),
            "ETC" => Ok(Self::Etc),
            "RETURN" => Ok(Self::Return),
            _ => Err(ParseEnumError::InvalidValue("OrderType", s.to_string())),
        }
    }
}

/// Official price list selector.
///
/// `ManualDefault` makes the discount rate the authoritative input; every
/// other selector makes the unit price authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfficialPriceType {
    /// No official price.
    #[default]
    None,
    /// Manually entered official price, unit price entered directly.
    ManualNone,
    /// Manually entered official price, unit price derived from the discount.
    ManualDefault,
    /// Retail price list.
    Retail,
    /// Wholesale price list.
    Wholesale,
}

impl OfficialPriceType {
    /// Returns true if an official price participates in pricing.
    #[inline]
    #[must_use]
    pub const fn has_official_price(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for OfficialPriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::ManualNone => "MANUAL_NONE",
            Self::ManualDefault => "MANUAL_DEFAULT",
            Self::Retail => "RETAIL",
            Self::Wholesale => "WHOLESALE",
        };
        f.write_str(s)
    }
}

impl FromStr for OfficialPriceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "MANUAL_NONE" => Ok(Self::ManualNone),
            "MANUAL_DEFAULT" => Ok(Self::ManualDefault),
            "RETAIL" => Ok(Self::Retail),
            "WHOLESALE" => Ok(Self::Wholesale),
            _ => Err(ParseEnumError::InvalidValue(
                "OfficialPriceType",
                s.to_string(),
            )),
        }
    }
}

/// Where a discount rate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// No discount.
    #[default]
    None,
    /// Entered by hand.
    Manual,
    /// Company default discount.
    Default,
    /// Special (negotiated) discount.
    Special,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::Manual => "MANUAL",
            Self::Default => "DEFAULT",
            Self::Special => "SPECIAL",
        };
        f.write_str(s)
    }
}

/// Unit of a discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountRateUnit {
    /// Percentage of the official price.
    #[default]
    Percent,
    /// Absolute won per ton.
    WonPerTon,
    /// Absolute won per box.
    WonPerBox,
    /// Absolute won per ream.
    WonPerReam,
}

impl DiscountRateUnit {
    /// Returns the price unit of an absolute discount, `None` for percent.
    #[must_use]
    pub const fn price_unit(self) -> Option<PriceUnit> {
        match self {
            Self::Percent => None,
            Self::WonPerTon => Some(PriceUnit::WonPerTon),
            Self::WonPerBox => Some(PriceUnit::WonPerBox),
            Self::WonPerReam => Some(PriceUnit::WonPerReam),
        }
    }
}

impl fmt::Display for DiscountRateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Percent => "PERCENT",
            Self::WonPerTon => "WON_PER_TON",
            Self::WonPerBox => "WON_PER_BOX",
            Self::WonPerReam => "WON_PER_REAM",
        };
        f.write_str(s)
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {enum_name} value: '{value}'")
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
