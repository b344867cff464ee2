//! # Paper Specification
//!
//! The physical description of a paper lot: basis weight, sheet size and
//! packaging. A [`PaperSpec`] decides how a canonical quantity is interpreted
//! and displayed; it never changes how the quantity is stored.
//!
//! # Canonical Units
//!
//! ```text
//! ROLL        → grams
//! REAM, SKID  → sheets
//! BOX         → boxes
//! ```
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::value_objects::paper_spec::{Packaging, PaperSpec};
//! use paper_trade::domain::value_objects::units::QuantityUnit;
//! use rust_decimal::Decimal;
//!
//! let spec = PaperSpec::new(
//!     Decimal::new(100, 0),
//!     Decimal::new(500, 0),
//!     Decimal::new(700, 0),
//!     Packaging::Box { pack_a: 2, pack_b: 250 },
//! );
//!
//! assert_eq!(spec.canonical_unit(), QuantityUnit::Box);
//! assert_eq!(spec.weight_per_sheet(), Decimal::new(35, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{
    input_or_zero, non_negative, or_zero, CheckedArithmetic,
};
use crate::domain::value_objects::units::QuantityUnit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// mm² × g/m² → grams for a single sheet.
const MM2_TO_M2: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// mm → m for the width of rolled stock.
const MM_TO_M: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Packaging type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackagingType {
    /// Rolled stock, measured by weight.
    Roll,
    /// Ream-wrapped sheets.
    Ream,
    /// Sheets stacked on a skid.
    Skid,
    /// Boxed sheets.
    Box,
}

impl fmt::Display for PackagingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Roll => "ROLL",
            Self::Ream => "REAM",
            Self::Skid => "SKID",
            Self::Box => "BOX",
        };
        f.write_str(s)
    }
}

/// How a paper lot is packed.
///
/// `pack_a`/`pack_b` carry display information for every type; only
/// [`Packaging::Box`] uses them in the math (`pack_a × pack_b` sheets per box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Packaging {
    /// Rolled stock.
    Roll {
        /// Display-only pack figure.
        pack_a: u32,
        /// Display-only pack figure.
        pack_b: u32,
    },
    /// Ream-wrapped sheets.
    Ream {
        /// Sheets per sub-pack, display only.
        pack_a: u32,
    },
    /// Sheets on a skid.
    Skid {
        /// Skid multiplier, display only.
        pack_a: u32,
        /// Skid multiplier, display only.
        pack_b: u32,
    },
    /// Boxed sheets.
    Box {
        /// Sheets per bundle.
        pack_a: u32,
        /// Bundles per box.
        pack_b: u32,
    },
}

impl Packaging {
    /// Returns the packaging type discriminant.
    #[must_use]
    pub const fn packaging_type(&self) -> PackagingType {
        match self {
            Self::Roll { .. } => PackagingType::Roll,
            Self::Ream { .. } => PackagingType::Ream,
            Self::Skid { .. } => PackagingType::Skid,
            Self::Box { .. } => PackagingType::Box,
        }
    }

    /// Returns `(pack_a, pack_b)`; ream packaging reports `pack_b = 0`.
    #[must_use]
    pub const fn packs(&self) -> (u32, u32) {
        match *self {
            Self::Roll { pack_a, pack_b }
            | Self::Skid { pack_a, pack_b }
            | Self::Box { pack_a, pack_b } => (pack_a, pack_b),
            Self::Ream { pack_a } => (pack_a, 0),
        }
    }

    /// Builds a packaging value from a catalog record's type and packs.
    #[must_use]
    pub const fn from_parts(packaging_type: PackagingType, pack_a: u32, pack_b: u32) -> Self {
        match packaging_type {
            PackagingType::Roll => Self::Roll { pack_a, pack_b },
            PackagingType::Ream => Self::Ream { pack_a },
            PackagingType::Skid => Self::Skid { pack_a, pack_b },
            PackagingType::Box => Self::Box { pack_a, pack_b },
        }
    }
}

/// Physical paper specification.
///
/// Sizes are in millimetres, grammage in g/m². `size_y` is zero for rolled
/// stock, where the width alone defines the cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaperSpec {
    grammage: Decimal,
    size_x: Decimal,
    size_y: Decimal,
    packaging: Packaging,
}

impl PaperSpec {
    /// Creates a spec, clamping negative figures to zero.
    #[must_use]
    pub fn new(grammage: Decimal, size_x: Decimal, size_y: Decimal, packaging: Packaging) -> Self {
        Self {
            grammage: non_negative(grammage),
            size_x: non_negative(size_x),
            size_y: non_negative(size_y),
            packaging,
        }
    }

    /// Creates a spec from raw form input.
    ///
    /// Missing or non-finite figures become zero.
    #[must_use]
    pub fn from_input(
        grammage: Option<f64>,
        size_x: Option<f64>,
        size_y: Option<f64>,
        packaging: Packaging,
    ) -> Self {
        Self::new(
            input_or_zero(grammage),
            input_or_zero(size_x),
            input_or_zero(size_y),
            packaging,
        )
    }

    /// Creates a spec, rejecting figures the engines would silently zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if grammage or width is not
    /// positive, if a sheet packaging has no length, or if a box has no sheets.
    pub fn try_new(
        grammage: Decimal,
        size_x: Decimal,
        size_y: Decimal,
        packaging: Packaging,
    ) -> DomainResult<Self> {
        if grammage <= Decimal::ZERO {
            return Err(DomainError::validation("grammage must be positive"));
        }
        if size_x <= Decimal::ZERO {
            return Err(DomainError::validation("size_x must be positive"));
        }
        if size_y < Decimal::ZERO {
            return Err(DomainError::validation("size_y must not be negative"));
        }
        match packaging {
            Packaging::Roll { .. } => {}
            Packaging::Ream { .. } | Packaging::Skid { .. } if size_y.is_zero() => {
                return Err(DomainError::validation("sheet stock requires size_y"));
            }
            Packaging::Box { pack_a, pack_b } if size_y.is_zero() || pack_a == 0 || pack_b == 0 => {
                return Err(DomainError::validation(
                    "box stock requires size_y and non-zero packs",
                ));
            }
            _ => {}
        }
        Ok(Self::new(grammage, size_x, size_y, packaging))
    }

    /// Returns the grammage in g/m².
    #[inline]
    #[must_use]
    pub fn grammage(&self) -> Decimal {
        self.grammage
    }

    /// Returns the width in mm.
    #[inline]
    #[must_use]
    pub fn size_x(&self) -> Decimal {
        self.size_x
    }

    /// Returns the length in mm (zero for rolls).
    #[inline]
    #[must_use]
    pub fn size_y(&self) -> Decimal {
        self.size_y
    }

    /// Returns the packaging.
    #[inline]
    #[must_use]
    pub fn packaging(&self) -> Packaging {
        self.packaging
    }

    /// Returns the packaging type.
    #[inline]
    #[must_use]
    pub fn packaging_type(&self) -> PackagingType {
        self.packaging.packaging_type()
    }

    /// Returns the unit the canonical quantity is stored in.
    #[must_use]
    pub const fn canonical_unit(&self) -> QuantityUnit {
        match self.packaging {
            Packaging::Roll { .. } => QuantityUnit::Gram,
            Packaging::Ream { .. } | Packaging::Skid { .. } => QuantityUnit::Sheet,
            Packaging::Box { .. } => QuantityUnit::Box,
        }
    }

    /// Weight of a single sheet in grams.
    ///
    /// ```text
    /// grammage × size_x × size_y / 1_000_000
    /// ```
    ///
    /// Every other weight figure is derived from this value.
    #[must_use]
    pub fn weight_per_sheet(&self) -> Decimal {
        or_zero(
            self.grammage
                .safe_mul(self.size_x)
                .and_then(|v| v.safe_mul(self.size_y))
                .and_then(|v| v.safe_div(MM2_TO_M2)),
        )
    }

    /// Weight of one linear metre of rolled stock in grams.
    #[must_use]
    pub fn weight_per_meter(&self) -> Decimal {
        or_zero(
            self.grammage
                .safe_mul(self.size_x)
                .and_then(|v| v.safe_div(MM_TO_M)),
        )
    }

    /// Sheets per box; zero for anything that is not boxed.
    #[must_use]
    pub fn sheets_per_box(&self) -> Decimal {
        match self.packaging {
            Packaging::Box { pack_a, pack_b } => {
                Decimal::from(u64::from(pack_a) * u64::from(pack_b))
            }
            Packaging::Roll { .. } | Packaging::Ream { .. } | Packaging::Skid { .. } => {
                Decimal::ZERO
            }
        }
    }
}

impl fmt::Display for PaperSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size_y.is_zero() {
            write!(f, "{}g {}mm {}", self.grammage, self.size_x, self.packaging_type())
        } else {
            write!(
                f,
                "{}g {}x{}mm {}",
                self.grammage,
                self.size_x,
                self.size_y,
                self.packaging_type()
            )
        }
    }
}
