//! # Price Conversion
//!
//! Converts unit prices between per-ton, per-box and per-ream bases, derives
//! discounted unit prices from an official price, and totals a trade.
//!
//! There is no independent box or ream price: both are a ton price scaled
//! by the weight of one box or ream of the given [`PaperSpec`].
//!
//! ```text
//! price_per_box  = price_per_ton × tons_per_box
//! price_per_ream = price_per_ton × tons_per_ream
//! ```
//!
//! Zero weights, zero official prices and overflow all yield zero.
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::services::price_conversion::{convert_price, PriceConversion};
//! use paper_trade::domain::value_objects::{Packaging, PaperSpec, PriceUnit};
//! use rust_decimal::Decimal;
//!
//! let spec = PaperSpec::new(
//!     Decimal::new(100, 0),
//!     Decimal::new(500, 0),
//!     Decimal::new(700, 0),
//!     Packaging::Box { pack_a: 2, pack_b: 250 },
//! );
//!
//! // One box weighs 17.5 kg.
//! let per_box = convert_price(&PriceConversion {
//!     src_unit: PriceUnit::WonPerTon,
//!     dst_unit: PriceUnit::WonPerBox,
//!     orig_price: Decimal::new(1_000_000, 0),
//!     spec: &spec,
//! });
//! assert_eq!(per_box, Decimal::new(17_500, 0));
//! ```

use crate::domain::services::quantity_conversion::{GRAMS_PER_TON, SHEETS_PER_REAM, convert_quantity};
use crate::domain::value_objects::arithmetic::{input_or_zero, or_zero};
use crate::domain::value_objects::{
    CheckedArithmetic, DiscountRateUnit, Packaging, PaperSpec, PriceUnit, QuantityUnit,
};
use rust_decimal::Decimal;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A single price conversion request.
#[derive(Debug, Clone, Copy)]
pub struct PriceConversion<'a> {
    /// Basis of `orig_price`.
    pub src_unit: PriceUnit,
    /// Basis to convert into.
    pub dst_unit: PriceUnit,
    /// Price in `src_unit`.
    pub orig_price: Decimal,
    /// Paper the price applies to.
    pub spec: &'a PaperSpec,
}

/// An official list price and the basis it is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfficialQuote {
    /// Official price.
    pub price: Decimal,
    /// Basis of `price`.
    pub unit: PriceUnit,
}

/// A discount and the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    /// Discount rate (percent) or absolute amount.
    pub rate: Decimal,
    /// Unit of `rate`.
    pub unit: DiscountRateUnit,
}

/// Price bases that make sense for the given packaging.
#[must_use]
pub fn supported_price_units(packaging: Packaging) -> &'static [PriceUnit] {
    match packaging {
        Packaging::Roll { .. } => &[PriceUnit::WonPerTon],
        Packaging::Ream { .. } | Packaging::Skid { .. } => {
            &[PriceUnit::WonPerTon, PriceUnit::WonPerReam]
        }
        Packaging::Box { .. } => &[
            PriceUnit::WonPerTon,
            PriceUnit::WonPerBox,
            PriceUnit::WonPerReam,
        ],
    }
}

/// Weight of one pricing unit in tons.
///
/// Zero for bases that do not apply to the spec (a box of rolled stock).
#[must_use]
pub fn tons_per_unit(spec: &PaperSpec, unit: PriceUnit) -> Decimal {
    let grams = match unit {
        PriceUnit::WonPerTon => return Decimal::ONE,
        PriceUnit::WonPerReam => spec.weight_per_sheet().safe_mul(SHEETS_PER_REAM),
        PriceUnit::WonPerBox => spec.sheets_per_box().safe_mul(spec.weight_per_sheet()),
    };
    or_zero(grams.and_then(|g| g.safe_div(GRAMS_PER_TON)))
}

/// Converts a unit price between bases.
#[must_use]
pub fn convert_price(conversion: &PriceConversion<'_>) -> Decimal {
    let PriceConversion {
        src_unit,
        dst_unit,
        orig_price,
        spec,
    } = *conversion;
    if src_unit == dst_unit {
        return orig_price;
    }
    let ton_price = orig_price.safe_div(tons_per_unit(spec, src_unit));
    or_zero(ton_price.and_then(|p| p.safe_mul(tons_per_unit(spec, dst_unit))))
}

/// [`convert_price`] for raw form input.
#[must_use]
pub fn convert_raw_price(
    spec: &PaperSpec,
    src_unit: PriceUnit,
    dst_unit: PriceUnit,
    orig_price: Option<f64>,
) -> Decimal {
    convert_price(&PriceConversion {
        src_unit,
        dst_unit,
        orig_price: input_or_zero(orig_price),
        spec,
    })
}

fn to_basis(spec: &PaperSpec, price: Decimal, from: PriceUnit, to: PriceUnit) -> Decimal {
    convert_price(&PriceConversion {
        src_unit: from,
        dst_unit: to,
        orig_price: price,
        spec,
    })
}

/// Derives a unit price from an official price and a discount.
///
/// ```text
/// percent:  official(→unit) × (1 − rate / 100)
/// absolute: official(→unit) − rate(→unit)
/// ```
#[must_use]
pub fn discounted_unit_price(
    spec: &PaperSpec,
    official: OfficialQuote,
    discount: Discount,
    unit_price_unit: PriceUnit,
) -> Decimal {
    let base = to_basis(spec, official.price, official.unit, unit_price_unit);
    match discount.unit.price_unit() {
        None => {
            let factor = Decimal::ONE.safe_sub(or_zero(discount.rate.safe_div(ONE_HUNDRED)));
            or_zero(factor.and_then(|f| base.safe_mul(f)))
        }
        Some(unit) => {
            let amount = to_basis(spec, discount.rate, unit, unit_price_unit);
            or_zero(base.safe_sub(amount))
        }
    }
}

/// Recovers the discount that turns an official price into `unit_price`.
///
/// ```text
/// percent:  (1 − unit / official(→unit)) × 100
/// absolute: (official(→unit) − unit)(→discount unit)
/// ```
///
/// A zero official price yields a zero discount.
#[must_use]
pub fn discount_rate_for(
    spec: &PaperSpec,
    official: OfficialQuote,
    unit_price: Decimal,
    unit_price_unit: PriceUnit,
    discount_unit: DiscountRateUnit,
) -> Decimal {
    let base = to_basis(spec, official.price, official.unit, unit_price_unit);
    if base.is_zero() {
        return Decimal::ZERO;
    }
    match discount_unit.price_unit() {
        None => {
            let ratio = unit_price.safe_div(base);
            or_zero(
                ratio
                    .and_then(|r| Decimal::ONE.safe_sub(r))
                    .and_then(|r| r.safe_mul(ONE_HUNDRED)),
            )
        }
        Some(unit) => {
            let amount = or_zero(base.safe_sub(unit_price));
            to_basis(spec, amount, unit_price_unit, unit)
        }
    }
}

/// Canonical quantity expressed in a price basis (tons, boxes or reams).
#[must_use]
pub fn quantity_in_price_basis(spec: &PaperSpec, canonical: Decimal, unit: PriceUnit) -> Decimal {
    let quantity = convert_quantity(spec, canonical);
    match unit {
        PriceUnit::WonPerTon => quantity.tons(),
        PriceUnit::WonPerBox => quantity.value_in(QuantityUnit::Box).unwrap_or(Decimal::ZERO),
        PriceUnit::WonPerReam => match spec.packaging() {
            Packaging::Box { .. } => or_zero(
                canonical
                    .safe_mul(spec.sheets_per_box())
                    .and_then(|sheets| sheets.safe_div(SHEETS_PER_REAM)),
            ),
            _ => quantity.value_in(QuantityUnit::Ream).unwrap_or(Decimal::ZERO),
        },
    }
}

/// Total trade amount: unit price × quantity in the price basis.
#[must_use]
pub fn supply_amount(
    spec: &PaperSpec,
    canonical: Decimal,
    unit_price: Decimal,
    unit_price_unit: PriceUnit,
) -> Decimal {
    or_zero(unit_price.safe_mul(quantity_in_price_basis(spec, canonical, unit_price_unit)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn box_spec() -> PaperSpec {
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

    fn ream_spec() -> PaperSpec {
        PaperSpec::new(
            Decimal::new(80, 0),
            Decimal::new(636, 0),
            Decimal::new(939, 0),
            Packaging::Ream { pack_a: 250 },
        )
    }

    fn roll_spec() -> PaperSpec {
        PaperSpec::new(
            Decimal::new(80, 0),
            Decimal::new(1000, 0),
            Decimal::ZERO,
            Packaging::Roll {
                pack_a: 0,
                pack_b: 0,
            },
        )
    }

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() <= Decimal::new(1, 9)
    }

    mod conversion {
        use super::*;

        #[test]
        fn ton_to_box() {
            let spec = box_spec();
            let price = to_basis(
                &spec,
                Decimal::new(1_000_000, 0),
                PriceUnit::WonPerTon,
                PriceUnit::WonPerBox,
            );
            assert_eq!(price, Decimal::new(17_500, 0));
        }

        #[test]
        fn ton_to_ream() {
            let spec = box_spec();
            // a ream of 35 g sheets is 17.5 kg
            let price = to_basis(
                &spec,
                Decimal::new(1_000_000, 0),
                PriceUnit::WonPerTon,
                PriceUnit::WonPerReam,
            );
            assert_eq!(price, Decimal::new(17_500, 0));
        }

        #[test]
        fn same_unit_is_identity() {
            let price = Decimal::new(12_345, 0);
            for unit in PriceUnit::ALL {
                assert_eq!(to_basis(&roll_spec(), price, unit, unit), price);
            }
        }

        #[test]
        fn all_pairs_roundtrip() {
            let spec = box_spec();
            let price = Decimal::new(987_654, 0);
            for src in PriceUnit::ALL {
                for dst in PriceUnit::ALL {
                    let there = to_basis(&spec, price, src, dst);
                    let back = to_basis(&spec, there, dst, src);
                    assert!(close(back, price), "{src} -> {dst}: {back}");
                }
            }
        }

        #[test]
        fn box_price_on_ream_stock_is_zero() {
            let price = to_basis(
                &ream_spec(),
                Decimal::new(1_000_000, 0),
                PriceUnit::WonPerTon,
                PriceUnit::WonPerBox,
            );
            assert_eq!(price, Decimal::ZERO);
            let back = to_basis(
                &ream_spec(),
                Decimal::new(1_000, 0),
                PriceUnit::WonPerBox,
                PriceUnit::WonPerTon,
            );
            assert_eq!(back, Decimal::ZERO);
        }

        #[test]
        fn ream_price_on_roll_is_zero() {
            let price = to_basis(
                &roll_spec(),
                Decimal::new(1_000, 0),
                PriceUnit::WonPerReam,
                PriceUnit::WonPerTon,
            );
            assert_eq!(price, Decimal::ZERO);
        }

        #[test]
        fn raw_non_finite_price_is_zero() {
            let spec = box_spec();
            for raw in [Some(f64::NAN), Some(f64::INFINITY), None] {
                let price =
                    convert_raw_price(&spec, PriceUnit::WonPerTon, PriceUnit::WonPerBox, raw);
                assert_eq!(price, Decimal::ZERO);
            }
        }

        #[test]
        fn supported_units_per_packaging() {
            assert_eq!(
                supported_price_units(roll_spec().packaging()),
                &[PriceUnit::WonPerTon]
            );
            assert_eq!(
                supported_price_units(box_spec().packaging()),
                &[
                    PriceUnit::WonPerTon,
                    PriceUnit::WonPerBox,
                    PriceUnit::WonPerReam
                ]
            );
            // every listed basis has a weight for the packaging
            for &unit in supported_price_units(box_spec().packaging()) {
                assert!(tons_per_unit(&box_spec(), unit) > Decimal::ZERO, "{unit}");
            }
            assert!(!supported_price_units(ream_spec().packaging()).contains(&PriceUnit::WonPerBox));
        }
    }

    mod discount {
        use super::*;

        fn official() -> OfficialQuote {
            OfficialQuote {
                price: Decimal::new(1_200_000, 0),
                unit: PriceUnit::WonPerTon,
            }
        }

        #[test]
        fn percent_discount() {
            let price = discounted_unit_price(
                &box_spec(),
                official(),
                Discount {
                    rate: Decimal::new(25, 0),
                    unit: DiscountRateUnit::Percent,
                },
                PriceUnit::WonPerTon,
            );
            assert_eq!(price, Decimal::new(900_000, 0));
        }

        #[test]
        fn percent_discount_in_box_basis() {
            // 1,200,000/t × 0.0175 t = 21,000 per box, less 10 %
            let price = discounted_unit_price(
                &box_spec(),
                official(),
                Discount {
                    rate: Decimal::new(10, 0),
                    unit: DiscountRateUnit::Percent,
                },
                PriceUnit::WonPerBox,
            );
            assert_eq!(price, Decimal::new(18_900, 0));
        }

        #[test]
        fn absolute_discount_is_converted() {
            // 100,000/t off → 1,750 per box off
            let price = discounted_unit_price(
                &box_spec(),
                official(),
                Discount {
                    rate: Decimal::new(100_000, 0),
                    unit: DiscountRateUnit::WonPerTon,
                },
                PriceUnit::WonPerBox,
            );
            assert_eq!(price, Decimal::new(19_250, 0));
        }

        #[test]
        fn percent_inverse() {
            let spec = box_spec();
            for rate in [0_i64, 5, 33, 50, 99] {
                let rate = Decimal::from(rate);
                let unit_price = discounted_unit_price(
                    &spec,
                    official(),
                    Discount {
                        rate,
                        unit: DiscountRateUnit::Percent,
                    },
                    PriceUnit::WonPerReam,
                );
                let back = discount_rate_for(
                    &spec,
                    official(),
                    unit_price,
                    PriceUnit::WonPerReam,
                    DiscountRateUnit::Percent,
                );
                assert!(close(back, rate), "{rate}: {back}");
            }
        }

        #[test]
        fn absolute_inverse() {
            let spec = box_spec();
            let discount = Discount {
                rate: Decimal::new(350, 0),
                unit: DiscountRateUnit::WonPerBox,
            };
            let unit_price =
                discounted_unit_price(&spec, official(), discount, PriceUnit::WonPerTon);
            let back = discount_rate_for(
                &spec,
                official(),
                unit_price,
                PriceUnit::WonPerTon,
                DiscountRateUnit::WonPerBox,
            );
            assert!(close(back, discount.rate), "{back}");
        }

        #[test]
        fn zero_official_price_gives_zero_discount() {
            let rate = discount_rate_for(
                &box_spec(),
                OfficialQuote {
                    price: Decimal::ZERO,
                    unit: PriceUnit::WonPerTon,
                },
                Decimal::new(1_000, 0),
                PriceUnit::WonPerTon,
                DiscountRateUnit::Percent,
            );
            assert_eq!(rate, Decimal::ZERO);
        }
    }

    mod amount {
        use super::*;

        #[test]
        fn box_basis() {
            let amount = supply_amount(
                &box_spec(),
                Decimal::new(10, 0),
                Decimal::new(20_000, 0),
                PriceUnit::WonPerBox,
            );
            assert_eq!(amount, Decimal::new(200_000, 0));
        }

        #[test]
        fn ton_basis_for_box() {
            // 10 boxes = 0.175 t
            let amount = supply_amount(
                &box_spec(),
                Decimal::new(10, 0),
                Decimal::new(1_000_000, 0),
                PriceUnit::WonPerTon,
            );
            assert_eq!(amount, Decimal::new(175_000, 0));
        }

        #[test]
        fn ream_basis_for_box() {
            // 10 boxes × 500 sheets = 10 reams
            let amount = supply_amount(
                &box_spec(),
                Decimal::new(10, 0),
                Decimal::new(15_000, 0),
                PriceUnit::WonPerReam,
            );
            assert_eq!(amount, Decimal::new(150_000, 0));
        }

        #[test]
        fn ream_basis_for_sheets() {
            let amount = supply_amount(
                &ream_spec(),
                Decimal::new(1_250, 0),
                Decimal::new(10_000, 0),
                PriceUnit::WonPerReam,
            );
            assert_eq!(amount, Decimal::new(25_000, 0));
        }

        #[test]
        fn roll_ton_basis() {
            let amount = supply_amount(
                &roll_spec(),
                Decimal::new(5_000_000, 0),
                Decimal::new(900_000, 0),
                PriceUnit::WonPerTon,
            );
            assert_eq!(amount, Decimal::new(4_500_000, 0));
        }

        #[test]
        fn inapplicable_basis_is_zero() {
            let amount = supply_amount(
                &roll_spec(),
                Decimal::new(5_000_000, 0),
                Decimal::new(900_000, 0),
                PriceUnit::WonPerBox,
            );
            assert_eq!(amount, Decimal::ZERO);
        }
    }
}
