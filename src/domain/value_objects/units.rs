//! # Units
//!
//! Quantity and price units, plus the display precision lookup.
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::value_objects::units::{recommended_precision, QuantityUnit};
//!
//! assert_eq!(recommended_precision(QuantityUnit::Sheet), 0);
//! assert_eq!(recommended_precision(QuantityUnit::Ton), 3);
//! assert_eq!(recommended_precision(QuantityUnit::Meter), 1);
//! ```

use crate::domain::value_objects::arithmetic::round_half_up;
use crate::domain::value_objects::enums::ParseEnumError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unit a paper quantity can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuantityUnit {
    /// Individual sheets.
    Sheet,
    /// Reams of 500 sheets.
    Ream,
    /// Boxes.
    Box,
    /// Grams.
    Gram,
    /// Metric tons.
    Ton,
    /// Linear metres of rolled stock.
    Meter,
}

impl QuantityUnit {
    /// Every quantity unit.
    pub const ALL: [Self; 6] = [
        Self::Sheet,
        Self::Ream,
        Self::Box,
        Self::Gram,
        Self::Ton,
        Self::Meter,
    ];

    /// Short display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Sheet => "매",
            Self::Ream => "R",
            Self::Box => "BOX",
            Self::Gram => "g",
            Self::Ton => "T",
            Self::Meter => "m",
        }
    }
}

impl fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sheet => "SHEET",
            Self::Ream => "REAM",
            Self::Box => "BOX",
            Self::Gram => "GRAM",
            Self::Ton => "TON",
            Self::Meter => "METER",
        };
        f.write_str(s)
    }
}

impl FromStr for QuantityUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SHEET" => Ok(Self::Sheet),
            "REAM" => Ok(Self::Ream),
            "BOX" => Ok(Self::Box),
            "GRAM" => Ok(Self::Gram),
            "TON" => Ok(Self::Ton),
            "METER" => Ok(Self::Meter),
            _ => Err(ParseEnumError::InvalidValue("QuantityUnit", s.to_string())),
        }
    }
}

/// Recommended number of decimals when displaying a value in `unit`.
///
/// Boxes are counted whole, so `Box` is 0. The three-decimal rule covers
/// reams, including a box order shown in reams.
#[must_use]
pub const fn recommended_precision(unit: QuantityUnit) -> u32 {
    match unit {
        QuantityUnit::Sheet | QuantityUnit::Box | QuantityUnit::Gram => 0,
        QuantityUnit::Ream | QuantityUnit::Ton => 3,
        QuantityUnit::Meter => 1,
    }
}

/// A value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitValue {
    /// The value.
    pub value: Decimal,
    /// The unit of `value`.
    pub unit: QuantityUnit,
}

impl UnitValue {
    /// Creates a unit value.
    #[must_use]
    pub const fn new(value: Decimal, unit: QuantityUnit) -> Self {
        Self { value, unit }
    }

    /// Returns the value rounded to the unit's recommended precision.
    #[must_use]
    pub fn display_value(&self) -> Decimal {
        round_half_up(self.value, recommended_precision(self.unit))
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_value(), self.unit.symbol())
    }
}

/// Basis a unit price is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceUnit {
    /// Won per metric ton.
    #[default]
    WonPerTon,
    /// Won per box.
    WonPerBox,
    /// Won per ream.
    WonPerReam,
}

impl PriceUnit {
    /// Every price unit.
    pub const ALL: [Self; 3] = [Self::WonPerTon, Self::WonPerBox, Self::WonPerReam];
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WonPerTon => "WON_PER_TON",
            Self::WonPerBox => "WON_PER_BOX",
            Self::WonPerReam => "WON_PER_REAM",
        };
        f.write_str(s)
    }
}

impl FromStr for PriceUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WON_PER_TON" => Ok(Self::WonPerTon),
            "WON_PER_BOX" => Ok(Self::WonPerBox),
            "WON_PER_REAM" => Ok(Self::WonPerReam),
            _ => Err(ParseEnumError::InvalidValue("PriceUnit", s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn precision_lookup() {
        assert_eq!(recommended_precision(QuantityUnit::Sheet), 0);
        assert_eq!(recommended_precision(QuantityUnit::Ream), 3);
        assert_eq!(recommended_precision(QuantityUnit::Box), 0);
        assert_eq!(recommended_precision(QuantityUnit::Gram), 0);
        assert_eq!(recommended_precision(QuantityUnit::Ton), 3);
        assert_eq!(recommended_precision(QuantityUnit::Meter), 1);
    }

    #[test]
    fn display_value_rounds() {
        let reams = UnitValue::new(Decimal::new(12345, 4), QuantityUnit::Ream);
        assert_eq!(reams.display_value(), Decimal::new(1235, 3));
        assert_eq!(reams.to_string(), "1.235 R");
    }

    #[test]
    fn box_counts_are_whole() {
        let boxes = UnitValue::new(Decimal::new(195, 1), QuantityUnit::Box);
        assert_eq!(boxes.display_value(), Decimal::new(20, 0));
        let boxes = UnitValue::new(Decimal::new(1234, 3), QuantityUnit::Box);
        assert_eq!(boxes.display_value(), Decimal::ONE);
    }

    #[test]
    fn parse_units() {
        assert_eq!("ream".parse::<QuantityUnit>().unwrap(), QuantityUnit::Ream);
        assert_eq!(
            "WON_PER_BOX".parse::<PriceUnit>().unwrap(),
            PriceUnit::WonPerBox
        );
        assert!("furlong".parse::<QuantityUnit>().is_err());
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for unit in QuantityUnit::ALL {
            assert_eq!(unit.to_string().parse::<QuantityUnit>().unwrap(), unit);
        }
        for unit in PriceUnit::ALL {
            assert_eq!(unit.to_string().parse::<PriceUnit>().unwrap(), unit);
        }
    }
}
