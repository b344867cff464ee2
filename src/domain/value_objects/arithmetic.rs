//! # Checked Arithmetic
//!
//! Safe decimal arithmetic and the numeric guards used by the conversion engines.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`finite_or_zero`] / [`input_or_zero`] - Coerce raw form input into a [`Decimal`]
//! - [`round_half_up`] - Rounding used at the sheet/ream boundary
//!
//! The conversion engines back partially filled forms, so every failure in here
//! is expected to be folded into zero by the caller through [`or_zero`].
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::value_objects::arithmetic::{finite_or_zero, CheckedArithmetic, or_zero};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(finite_or_zero(f64::NAN), Decimal::ZERO);
//! assert_eq!(or_zero(Decimal::ONE.safe_div(Decimal::ZERO)), Decimal::ZERO);
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Trait for checked arithmetic operations.
///
/// Provides safe arithmetic methods that return `Result` instead of
/// panicking on overflow, underflow, or division by zero.
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Folds an arithmetic result into zero on failure.
#[inline]
#[must_use]
pub fn or_zero(result: ArithmeticResult<Decimal>) -> Decimal {
    result.unwrap_or(Decimal::ZERO)
}

/// Converts a raw floating point input into a decimal.
///
/// `NaN`, `±Infinity` and values outside the decimal range become zero.
///
/// # Examples
///
/// ```
/// use paper_trade::domain::value_objects::arithmetic::finite_or_zero;
/// use rust_decimal::Decimal;
///
/// assert_eq!(finite_or_zero(f64::INFINITY), Decimal::ZERO);
/// assert_eq!(finite_or_zero(2.5), Decimal::new(25, 1));
/// ```
#[must_use]
pub fn finite_or_zero(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Same as [`finite_or_zero`], treating a missing value as zero.
#[inline]
#[must_use]
pub fn input_or_zero(value: Option<f64>) -> Decimal {
    value.map_or(Decimal::ZERO, finite_or_zero)
}

/// Clamps negative values to zero.
#[inline]
#[must_use]
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Rounds to `dp` decimal places, halves away from zero.
#[inline]
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod arithmetic_error {
        use super::*;

        #[test]
        fn display_formats_correctly() {
            assert_eq!(ArithmeticError::Overflow.to_string(), "arithmetic overflow");
            assert_eq!(
                ArithmeticError::Underflow.to_string(),
                "arithmetic underflow"
            );
            assert_eq!(
                ArithmeticError::DivisionByZero.to_string(),
                "division by zero"
            );
        }
    }

    mod checked_arithmetic_decimal {
        use super::*;

        #[test]
        fn safe_mul_works() {
            let a = Decimal::new(10, 0);
            let b = Decimal::new(5, 0);
            assert_eq!(a.safe_mul(b).unwrap(), Decimal::new(50, 0));
        }

        #[test]
        fn safe_mul_overflow_fails() {
            assert_eq!(
                Decimal::MAX.safe_mul(Decimal::TWO),
                Err(ArithmeticError::Overflow)
            );
        }

        #[test]
        fn safe_div_by_zero_fails() {
            let a = Decimal::new(100, 0);
            assert_eq!(a.safe_div(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
        }

        #[test]
        fn or_zero_folds_errors() {
            assert_eq!(or_zero(Err(ArithmeticError::Overflow)), Decimal::ZERO);
            assert_eq!(or_zero(Ok(Decimal::ONE)), Decimal::ONE);
        }
    }

    mod guards {
        use super::*;

        #[test]
        fn non_finite_inputs_become_zero() {
            assert_eq!(finite_or_zero(f64::NAN), Decimal::ZERO);
            assert_eq!(finite_or_zero(f64::INFINITY), Decimal::ZERO);
            assert_eq!(finite_or_zero(f64::NEG_INFINITY), Decimal::ZERO);
            assert_eq!(input_or_zero(None), Decimal::ZERO);
        }

        #[test]
        fn out_of_range_input_becomes_zero() {
            assert_eq!(finite_or_zero(1e300), Decimal::ZERO);
        }

        #[test]
        fn finite_inputs_are_kept() {
            assert_eq!(finite_or_zero(80.0), Decimal::new(80, 0));
            assert_eq!(input_or_zero(Some(0.5)), Decimal::new(5, 1));
        }

        #[test]
        fn round_half_up_rounds_midpoint_away_from_zero() {
            assert_eq!(round_half_up(Decimal::new(25, 1), 0), Decimal::new(3, 0));
            assert_eq!(round_half_up(Decimal::new(35, 1), 0), Decimal::new(4, 0));
            assert_eq!(round_half_up(Decimal::new(12345, 4), 3), Decimal::new(1235, 3));
        }

        #[test]
        fn non_negative_clamps() {
            assert_eq!(non_negative(Decimal::new(-3, 0)), Decimal::ZERO);
            assert_eq!(non_negative(Decimal::new(3, 0)), Decimal::new(3, 0));
        }
    }
}
