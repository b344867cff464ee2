//! # Price Specification
//!
//! The pricing attached to an order: a unit price and, optionally, the
//! official price and discount it was derived from.
//!
//! # Authority
//!
//! Exactly one side is authoritative per edit cycle, chosen by
//! [`OfficialPriceType`]:
//!
//! ```text
//! MANUAL_DEFAULT → discount is the input, unit price is derived
//! anything else  → unit price is the input, discount is derived
//! ```
//!
//! Every setter re-derives the other side before returning, so the two
//! never disagree, and writing the derived side is refused.
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::entities::price_spec::{PriceAuthority, PriceSpec};
//! use paper_trade::domain::value_objects::{
//!     DiscountRateUnit, OfficialPriceType, Packaging, PaperSpec, PriceUnit,
//! };
//! use rust_decimal::Decimal;
//!
//! let paper = PaperSpec::new(
//!     Decimal::new(100, 0),
//!     Decimal::new(500, 0),
//!     Decimal::new(700, 0),
//!     Packaging::Box { pack_a: 2, pack_b: 250 },
//! );
//!
//! let mut price = PriceSpec::direct(Decimal::new(900_000, 0), PriceUnit::WonPerTon);
//! price.set_official_price(&paper, Decimal::new(1_000_000, 0), PriceUnit::WonPerTon);
//! price.set_official_price_type(&paper, OfficialPriceType::ManualDefault);
//! assert_eq!(price.authority(), PriceAuthority::Discount);
//! assert_eq!(price.discount_rate(), Decimal::new(10, 0));
//!
//! price.set_discount_rate(&paper, Decimal::new(20, 0)).unwrap();
//! assert_eq!(price.unit_price(), Decimal::new(800_000, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::price_conversion::{
    Discount, OfficialQuote, PriceConversion, convert_price, discount_rate_for,
    discounted_unit_price, supply_amount,
};
use crate::domain::value_objects::arithmetic::non_negative;
use crate::domain::value_objects::{
    DiscountRateUnit, DiscountType, OfficialPriceType, PaperSpec, PriceUnit,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which price input owns the current edit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceAuthority {
    /// Unit price is entered; discount is derived.
    UnitPrice,
    /// Discount is entered; unit price is derived.
    Discount,
}

impl PriceAuthority {
    /// Authority implied by an official price selector.
    #[must_use]
    pub const fn for_official_price_type(official_price_type: OfficialPriceType) -> Self {
        match official_price_type {
            OfficialPriceType::ManualDefault => Self::Discount,
            OfficialPriceType::None
            | OfficialPriceType::ManualNone
            | OfficialPriceType::Retail
            | OfficialPriceType::Wholesale => Self::UnitPrice,
        }
    }
}

/// Pricing of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSpec {
    unit_price: Decimal,
    unit_price_unit: PriceUnit,
    official_price_type: OfficialPriceType,
    official_price: Decimal,
    official_price_unit: PriceUnit,
    discount_type: DiscountType,
    discount_rate: Decimal,
    discount_rate_unit: DiscountRateUnit,
}

impl PriceSpec {
    /// A unit price with no official price behind it.
    #[must_use]
    pub fn direct(unit_price: Decimal, unit_price_unit: PriceUnit) -> Self {
        Self {
            unit_price: non_negative(unit_price),
            unit_price_unit,
            official_price_type: OfficialPriceType::None,
            official_price: Decimal::ZERO,
            official_price_unit: PriceUnit::WonPerTon,
            discount_type: DiscountType::None,
            discount_rate: Decimal::ZERO,
            discount_rate_unit: DiscountRateUnit::Percent,
        }
    }

    /// A unit price derived from an official price and a discount.
    #[must_use]
    pub fn from_discount(
        paper: &PaperSpec,
        official_price: Decimal,
        official_price_unit: PriceUnit,
        discount_type: DiscountType,
        discount_rate: Decimal,
        discount_rate_unit: DiscountRateUnit,
        unit_price_unit: PriceUnit,
    ) -> Self {
        let mut spec = Self {
            unit_price: Decimal::ZERO,
            unit_price_unit,
            official_price_type: OfficialPriceType::ManualDefault,
            official_price: non_negative(official_price),
            official_price_unit,
            discount_type,
            discount_rate,
            discount_rate_unit,
        };
        spec.recompute(paper);
        spec
    }

    // ========== Accessors ==========

    /// Returns the unit price.
    #[inline]
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Returns the unit price basis.
    #[inline]
    #[must_use]
    pub fn unit_price_unit(&self) -> PriceUnit {
        self.unit_price_unit
    }

    /// Returns the official price selector.
    #[inline]
    #[must_use]
    pub fn official_price_type(&self) -> OfficialPriceType {
        self.official_price_type
    }

    /// Returns the official price.
    #[inline]
    #[must_use]
    pub fn official_price(&self) -> Decimal {
        self.official_price
    }

    /// Returns the official price basis.
    #[inline]
    #[must_use]
    pub fn official_price_unit(&self) -> PriceUnit {
        self.official_price_unit
    }

    /// Returns the discount type.
    #[inline]
    #[must_use]
    pub fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    /// Returns the discount rate.
    #[inline]
    #[must_use]
    pub fn discount_rate(&self) -> Decimal {
        self.discount_rate
    }

    /// Returns the discount rate unit.
    #[inline]
    #[must_use]
    pub fn discount_rate_unit(&self) -> DiscountRateUnit {
        self.discount_rate_unit
    }

    /// Returns which input is authoritative.
    #[inline]
    #[must_use]
    pub fn authority(&self) -> PriceAuthority {
        PriceAuthority::for_official_price_type(self.official_price_type)
    }

    // ========== Edits ==========

    /// Sets the unit price and re-derives the discount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DerivedPriceField` if the discount is authoritative.
    pub fn set_unit_price(&mut self, paper: &PaperSpec, unit_price: Decimal) -> DomainResult<()> {
        if self.authority() == PriceAuthority::Discount {
            return Err(DomainError::DerivedPriceField("unit price"));
        }
        self.unit_price = non_negative(unit_price);
        self.recompute(paper);
        Ok(())
    }

    /// Sets the discount rate and re-derives the unit price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DerivedPriceField` if the unit price is authoritative.
    pub fn set_discount_rate(&mut self, paper: &PaperSpec, rate: Decimal) -> DomainResult<()> {
        if self.authority() == PriceAuthority::UnitPrice {
            return Err(DomainError::DerivedPriceField("discount rate"));
        }
        self.discount_rate = rate;
        self.recompute(paper);
        Ok(())
    }

    /// Changes the discount type.
    pub fn set_discount_type(&mut self, discount_type: DiscountType) {
        self.discount_type = discount_type;
    }

    /// Changes the discount unit, carrying an authoritative discount over
    /// into the new unit so the unit price stays put.
    pub fn set_discount_rate_unit(&mut self, paper: &PaperSpec, unit: DiscountRateUnit) {
        if self.authority() == PriceAuthority::Discount && self.discount_rate_unit != unit {
            self.discount_rate = discount_rate_for(
                paper,
                self.official_quote(),
                self.unit_price,
                self.unit_price_unit,
                unit,
            );
        }
        self.discount_rate_unit = unit;
        self.recompute(paper);
    }

    /// Switches the official price selector and re-derives the other side.
    ///
    /// Handing authority to the discount first captures the discount implied
    /// by the current unit price, so the switch alone never moves the price.
    pub fn set_official_price_type(&mut self, paper: &PaperSpec, official: OfficialPriceType) {
        let next = PriceAuthority::for_official_price_type(official);
        if next == PriceAuthority::Discount && self.authority() != PriceAuthority::Discount {
            self.discount_rate = discount_rate_for(
                paper,
                self.official_quote(),
                self.unit_price,
                self.unit_price_unit,
                self.discount_rate_unit,
            );
        }
        self.official_price_type = official;
        self.recompute(paper);
    }

    /// Changes the official price and re-derives the other side.
    pub fn set_official_price(&mut self, paper: &PaperSpec, price: Decimal, unit: PriceUnit) {
        self.official_price = non_negative(price);
        self.official_price_unit = unit;
        self.recompute(paper);
    }

    /// Re-expresses the unit price in another basis.
    pub fn set_unit_price_unit(&mut self, paper: &PaperSpec, unit: PriceUnit) {
        if self.authority() == PriceAuthority::UnitPrice {
            self.unit_price = convert_price(&PriceConversion {
                src_unit: self.unit_price_unit,
                dst_unit: unit,
                orig_price: self.unit_price,
                spec: paper,
            });
        }
        self.unit_price_unit = unit;
        self.recompute(paper);
    }

    /// Re-derives the non-authoritative side from the authoritative one.
    ///
    /// A discount larger than the official price is capped at it, leaving a
    /// zero unit price and a rate that still describes it.
    pub fn recompute(&mut self, paper: &PaperSpec) {
        if !self.official_price_type.has_official_price() {
            self.discount_rate = Decimal::ZERO;
            return;
        }
        match self.authority() {
            PriceAuthority::Discount => {
                let derived = discounted_unit_price(
                    paper,
                    self.official_quote(),
                    Discount {
                        rate: self.discount_rate,
                        unit: self.discount_rate_unit,
                    },
                    self.unit_price_unit,
                );
                if derived < Decimal::ZERO {
                    self.unit_price = Decimal::ZERO;
                    self.discount_rate = discount_rate_for(
                        paper,
                        self.official_quote(),
                        Decimal::ZERO,
                        self.unit_price_unit,
                        self.discount_rate_unit,
                    );
                } else {
                    self.unit_price = derived;
                }
            }
            PriceAuthority::UnitPrice => {
                self.discount_rate = discount_rate_for(
                    paper,
                    self.official_quote(),
                    self.unit_price,
                    self.unit_price_unit,
                    self.discount_rate_unit,
                );
            }
        }
    }

    /// Total amount for a canonical quantity of `paper`.
    #[must_use]
    pub fn supply_amount(&self, paper: &PaperSpec, canonical: Decimal) -> Decimal {
        supply_amount(paper, canonical, self.unit_price, self.unit_price_unit)
    }

    fn official_quote(&self) -> OfficialQuote {
        OfficialQuote {
            price: self.official_price,
            unit: self.official_price_unit,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Packaging;

    fn paper() -> PaperSpec {
        PaperSpec::new(
            Decimal::new(100, 0),
            Decimal::new(500, 0),
            Decimal::new(700, 0),
            Packaging::Box {
                pack_a: 2,
                pack_b: 250,
            },
        )
    }

    fn retail_priced() -> PriceSpec {
        let paper = paper();
        let mut price = PriceSpec::direct(Decimal::new(900_000, 0), PriceUnit::WonPerTon);
        price.set_official_price(&paper, Decimal::new(1_200_000, 0), PriceUnit::WonPerTon);
        price.set_official_price_type(&paper, OfficialPriceType::Retail);
        price
    }

    mod authority {
        use super::*;

        #[test]
        fn selector_decides_authority() {
            assert_eq!(
                PriceAuthority::for_official_price_type(OfficialPriceType::ManualDefault),
                PriceAuthority::Discount
            );
            for t in [
                OfficialPriceType::None,
                OfficialPriceType::ManualNone,
                OfficialPriceType::Retail,
                OfficialPriceType::Wholesale,
            ] {
                assert_eq!(
                    PriceAuthority::for_official_price_type(t),
                    PriceAuthority::UnitPrice
                );
            }
        }

        #[test]
        fn derived_unit_price_cannot_be_set() {
            let paper = paper();
            let mut price = PriceSpec::from_discount(
                &paper,
                Decimal::new(1_000_000, 0),
                PriceUnit::WonPerTon,
                DiscountType::Manual,
                Decimal::new(10, 0),
                DiscountRateUnit::Percent,
                PriceUnit::WonPerTon,
            );
            let result = price.set_unit_price(&paper, Decimal::ONE);
            assert!(matches!(result, Err(DomainError::DerivedPriceField(_))));
            assert_eq!(price.unit_price(), Decimal::new(900_000, 0));
        }

        #[test]
        fn derived_discount_cannot_be_set() {
            let paper = paper();
            let mut price = retail_priced();
            let result = price.set_discount_rate(&paper, Decimal::new(50, 0));
            assert!(matches!(result, Err(DomainError::DerivedPriceField(_))));
        }
    }

    mod derivation {
        use super::*;

        #[test]
        fn unit_price_drives_discount() {
            let paper = paper();
            let mut price = retail_priced();
            assert_eq!(price.discount_rate(), Decimal::new(25, 0));

            price
                .set_unit_price(&paper, Decimal::new(600_000, 0))
                .unwrap();
            assert_eq!(price.discount_rate(), Decimal::new(50, 0));
        }

        #[test]
        fn discount_drives_unit_price() {
            let paper = paper();
            let mut price = PriceSpec::from_discount(
                &paper,
                Decimal::new(1_200_000, 0),
                PriceUnit::WonPerTon,
                DiscountType::Default,
                Decimal::new(10, 0),
                DiscountRateUnit::Percent,
                PriceUnit::WonPerBox,
            );
            assert_eq!(price.unit_price(), Decimal::new(18_900, 0));

            price.set_discount_rate(&paper, Decimal::ZERO).unwrap();
            assert_eq!(price.unit_price(), Decimal::new(21_000, 0));
        }

        #[test]
        fn switching_selector_rederives() {
            let paper = paper();
            let mut price = retail_priced();
            price.set_official_price_type(&paper, OfficialPriceType::ManualDefault);
            // discount of 25 % now owns the cycle and reproduces the same unit price
            assert_eq!(price.authority(), PriceAuthority::Discount);
            assert_eq!(price.unit_price(), Decimal::new(900_000, 0));

            price.set_discount_rate(&paper, Decimal::new(50, 0)).unwrap();
            price.set_official_price_type(&paper, OfficialPriceType::Wholesale);
            assert_eq!(price.unit_price(), Decimal::new(600_000, 0));
            assert_eq!(price.discount_rate(), Decimal::new(50, 0));
        }

        #[test]
        fn no_official_price_means_no_discount() {
            let paper = paper();
            let mut price = retail_priced();
            price.set_official_price_type(&paper, OfficialPriceType::None);
            assert_eq!(price.discount_rate(), Decimal::ZERO);
            assert_eq!(price.unit_price(), Decimal::new(900_000, 0));
        }

        #[test]
        fn official_price_change_rederives() {
            let paper = paper();
            let mut price = retail_priced();
            price.set_official_price(&paper, Decimal::new(1_800_000, 0), PriceUnit::WonPerTon);
            assert_eq!(price.discount_rate(), Decimal::new(50, 0));
        }

        #[test]
        fn unit_change_converts_authoritative_price() {
            let paper = paper();
            let mut price = retail_priced();
            price.set_unit_price_unit(&paper, PriceUnit::WonPerBox);
            assert_eq!(price.unit_price(), Decimal::new(15_750, 0));
            assert_eq!(price.discount_rate(), Decimal::new(25, 0));
        }

        #[test]
        fn discount_unit_change_keeps_unit_price() {
            let paper = paper();
            let mut price = PriceSpec::from_discount(
                &paper,
                Decimal::new(1_200_000, 0),
                PriceUnit::WonPerTon,
                DiscountType::Special,
                Decimal::new(25, 0),
                DiscountRateUnit::Percent,
                PriceUnit::WonPerTon,
            );
            price.set_discount_rate_unit(&paper, DiscountRateUnit::WonPerTon);
            assert_eq!(price.discount_rate(), Decimal::new(300_000, 0));
            assert_eq!(price.unit_price(), Decimal::new(900_000, 0));
        }

        #[test]
        fn discount_over_official_clamps_to_zero() {
            let paper = paper();
            let price = PriceSpec::from_discount(
                &paper,
                Decimal::new(1_000, 0),
                PriceUnit::WonPerTon,
                DiscountType::Manual,
                Decimal::new(150, 0),
                DiscountRateUnit::Percent,
                PriceUnit::WonPerTon,
            );
            assert_eq!(price.unit_price(), Decimal::ZERO);
            assert_eq!(price.discount_rate(), Decimal::new(100, 0));
        }

        #[test]
        fn absolute_discount_over_official_is_capped() {
            let paper = paper();
            let mut price = PriceSpec::from_discount(
                &paper,
                Decimal::new(1_000, 0),
                PriceUnit::WonPerTon,
                DiscountType::Manual,
                Decimal::new(5_000, 0),
                DiscountRateUnit::WonPerTon,
                PriceUnit::WonPerTon,
            );
            assert_eq!(price.unit_price(), Decimal::ZERO);
            assert_eq!(price.discount_rate(), Decimal::new(1_000, 0));

            // the capped rate stays put on the next edit
            price.recompute(&paper);
            assert_eq!(price.unit_price(), Decimal::ZERO);
            assert_eq!(price.discount_rate(), Decimal::new(1_000, 0));
        }
    }

    #[test]
    fn supply_amount_uses_unit_price() {
        let price = PriceSpec::direct(Decimal::new(20_000, 0), PriceUnit::WonPerBox);
        assert_eq!(
            price.supply_amount(&paper(), Decimal::new(3, 0)),
            Decimal::new(60_000, 0)
        );
    }

    #[test]
    fn serde_roundtrip() {
        let price = retail_priced();
        let json = serde_json::to_string(&price).unwrap();
        let back: PriceSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
