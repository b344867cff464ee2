//! # Quantity Conversion
//!
//! Maps a [`PaperSpec`] and one canonical quantity to every displayable unit,
//! and back from a value typed in any supported unit.
//!
//! # Dispatch
//!
//! ```text
//! packaging │ canonical │ unpacked │ packed
//! ──────────┼───────────┼──────────┼──────────────
//! ROLL      │ grams     │ -        │ metres
//! REAM      │ sheets    │ sheets   │ reams
//! SKID      │ sheets    │ sheets   │ reams
//! BOX       │ boxes     │ -        │ boxes
//! ```
//!
//! Nothing in here fails. Missing, non-finite or overflowing figures degrade
//! to zero because the engine sits behind live, partially filled forms.
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::services::quantity_conversion::{convert_quantity, grams_to_ton};
//! use paper_trade::domain::value_objects::{Packaging, PaperSpec, QuantityUnit};
//! use rust_decimal::Decimal;
//!
//! let spec = PaperSpec::new(
//!     Decimal::new(100, 0),
//!     Decimal::new(500, 0),
//!     Decimal::new(700, 0),
//!     Packaging::Box { pack_a: 2, pack_b: 250 },
//! );
//! let quantity = convert_quantity(&spec, Decimal::new(10, 0));
//!
//! assert!(quantity.unpacked.is_none());
//! assert_eq!(quantity.packed.unwrap().unit, QuantityUnit::Box);
//! assert_eq!(quantity.grams, Decimal::new(175_000, 0));
//! assert_eq!(grams_to_ton(quantity.grams), Decimal::new(175, 3));
//! ```

use crate::domain::value_objects::arithmetic::{input_or_zero, non_negative, or_zero, round_half_up};
use crate::domain::value_objects::{CheckedArithmetic, Packaging, PaperSpec, QuantityUnit, UnitValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sheets per ream.
pub const SHEETS_PER_REAM: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Grams per metric ton.
pub const GRAMS_PER_TON: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Every representation of one canonical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// Total weight in grams.
    pub grams: Decimal,
    /// Large unit: reams, boxes or rolled metres.
    pub packed: Option<UnitValue>,
    /// Small unit: sheets.
    pub unpacked: Option<UnitValue>,
}

impl Quantity {
    /// A zero quantity for `spec`.
    #[must_use]
    pub fn zero(spec: &PaperSpec) -> Self {
        convert_quantity(spec, Decimal::ZERO)
    }

    /// Total weight in tons.
    #[must_use]
    pub fn tons(&self) -> Decimal {
        grams_to_ton(self.grams)
    }

    /// Returns the value in `unit` if this quantity carries it.
    ///
    /// Grams and tons are always available; the other units only when they
    /// appear as the packed or unpacked representation.
    #[must_use]
    pub fn value_in(&self, unit: QuantityUnit) -> Option<Decimal> {
        match unit {
            QuantityUnit::Gram => Some(self.grams),
            QuantityUnit::Ton => Some(self.tons()),
            _ => [self.packed, self.unpacked]
                .into_iter()
                .flatten()
                .find(|v| v.unit == unit)
                .map(|v| v.value),
        }
    }
}

/// Converts grams to tons.
#[must_use]
pub fn grams_to_ton(grams: Decimal) -> Decimal {
    or_zero(grams.safe_div(GRAMS_PER_TON))
}

/// Converts tons to grams.
#[must_use]
pub fn ton_to_grams(tons: Decimal) -> Decimal {
    or_zero(tons.safe_mul(GRAMS_PER_TON))
}

/// Converts reams to a whole number of sheets.
#[must_use]
pub fn ream_to_sheets(reams: Decimal) -> Decimal {
    round_half_up(or_zero(reams.safe_mul(SHEETS_PER_REAM)), 0)
}

/// Converts sheets to reams, rounding the sheets first.
#[must_use]
pub fn sheets_to_ream(sheets: Decimal) -> Decimal {
    or_zero(round_half_up(sheets, 0).safe_div(SHEETS_PER_REAM))
}

/// Units a value may be typed in for the given packaging.
#[must_use]
pub fn supported_units(packaging: Packaging) -> &'static [QuantityUnit] {
    match packaging {
        Packaging::Roll { .. } => &[QuantityUnit::Gram, QuantityUnit::Ton, QuantityUnit::Meter],
        Packaging::Ream { .. } | Packaging::Skid { .. } => &[
            QuantityUnit::Sheet,
            QuantityUnit::Ream,
            QuantityUnit::Gram,
            QuantityUnit::Ton,
        ],
        Packaging::Box { .. } => &[QuantityUnit::Box, QuantityUnit::Gram, QuantityUnit::Ton],
    }
}

/// Converts a canonical quantity into all of its representations.
///
/// The canonical unit is fixed by the packaging type: grams for rolls,
/// sheets for ream and skid stock, boxes for boxed stock. Sheet counts are
/// rounded to whole sheets before anything is derived from them. A negative
/// quantity is treated as zero.
#[must_use]
pub fn convert_quantity(spec: &PaperSpec, canonical: Decimal) -> Quantity {
    let canonical = non_negative(canonical);
    match spec.packaging() {
        Packaging::Roll { .. } => {
            let grams = canonical;
            let meters = or_zero(grams.safe_div(spec.weight_per_meter()));
            Quantity {
                grams,
                packed: Some(UnitValue::new(meters, QuantityUnit::Meter)),
                unpacked: None,
            }
        }
        Packaging::Ream { .. } | Packaging::Skid { .. } => {
            let sheets = round_half_up(canonical, 0);
            let grams = or_zero(sheets.safe_mul(spec.weight_per_sheet()));
            Quantity {
                grams,
                packed: Some(UnitValue::new(sheets_to_ream(sheets), QuantityUnit::Ream)),
                unpacked: Some(UnitValue::new(sheets, QuantityUnit::Sheet)),
            }
        }
        Packaging::Box { .. } => {
            let boxes = canonical;
            let grams = or_zero(
                boxes
                    .safe_mul(spec.sheets_per_box())
                    .and_then(|sheets| sheets.safe_mul(spec.weight_per_sheet())),
            );
            Quantity {
                grams,
                packed: Some(UnitValue::new(boxes, QuantityUnit::Box)),
                unpacked: None,
            }
        }
    }
}

/// [`convert_quantity`] for raw form input; missing or non-finite input is zero.
#[must_use]
pub fn convert_raw_quantity(spec: &PaperSpec, canonical: Option<f64>) -> Quantity {
    convert_quantity(spec, input_or_zero(canonical))
}

/// Recovers the canonical quantity from a value typed in `unit`.
///
/// Returns `None` if the packaging does not support `unit`. Negative values
/// come back as zero.
#[must_use]
pub fn canonical_quantity(spec: &PaperSpec, unit: QuantityUnit, value: Decimal) -> Option<Decimal> {
    let canonical = match (spec.packaging(), unit) {
        (Packaging::Roll { .. }, QuantityUnit::Gram) => value,
        (Packaging::Roll { .. }, QuantityUnit::Ton) => ton_to_grams(value),
        (Packaging::Roll { .. }, QuantityUnit::Meter) => {
            or_zero(value.safe_mul(spec.weight_per_meter()))
        }

        (Packaging::Ream { .. } | Packaging::Skid { .. }, QuantityUnit::Sheet) => {
            round_half_up(value, 0)
        }
        (Packaging::Ream { .. } | Packaging::Skid { .. }, QuantityUnit::Ream) => {
            ream_to_sheets(value)
        }
        (Packaging::Ream { .. } | Packaging::Skid { .. }, QuantityUnit::Gram) => {
            round_half_up(or_zero(value.safe_div(spec.weight_per_sheet())), 0)
        }
        (Packaging::Ream { .. } | Packaging::Skid { .. }, QuantityUnit::Ton) => round_half_up(
            or_zero(ton_to_grams(value).safe_div(spec.weight_per_sheet())),
            0,
        ),

        (Packaging::Box { .. }, QuantityUnit::Box) => value,
        (Packaging::Box { .. }, QuantityUnit::Gram) => or_zero(value.safe_div(box_weight(spec))),
        (Packaging::Box { .. }, QuantityUnit::Ton) => {
            or_zero(ton_to_grams(value).safe_div(box_weight(spec)))
        }

        _ => return None,
    };
    Some(non_negative(canonical))
}

/// Converts a value typed in `unit` into all representations.
///
/// Returns `None` if the packaging does not support `unit`.
#[must_use]
pub fn convert_quantity_with(
    spec: &PaperSpec,
    unit: QuantityUnit,
    value: Decimal,
) -> Option<Quantity> {
    canonical_quantity(spec, unit, value).map(|canonical| convert_quantity(spec, canonical))
}

/// [`convert_quantity_with`] for raw form input.
#[must_use]
pub fn convert_raw_quantity_with(
    spec: &PaperSpec,
    unit: QuantityUnit,
    value: Option<f64>,
) -> Option<Quantity> {
    convert_quantity_with(spec, unit, input_or_zero(value))
}

fn box_weight(spec: &PaperSpec) -> Decimal {
    or_zero(spec.sheets_per_box().safe_mul(spec.weight_per_sheet()))
}
