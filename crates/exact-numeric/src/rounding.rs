use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How a value is brought onto a coarser decimal grid.
///
/// The names follow the rounding modes of general decimal arithmetic:
/// "away from zero" is `Up`, "toward zero" is `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Midpoints round away from zero.
    #[default]
    HalfUp,
    /// Midpoints round to the even neighbour.
    HalfEven,
    /// Midpoints round toward zero.
    HalfDown,
    Down,
    Up,
    Floor,
    Ceiling,
    /// Truncate, then step away from zero when the result is inexact and its
    /// last digit is 0 or 5. A value rounded this way to `d` digits can be
    /// rounded again to fewer than `d` digits under any mode without double
    /// rounding error.
    ZeroFiveUp,
}

/// Divides `numerator` by `denominator` and rounds the quotient to an integer.
///
/// `denominator` must be non-zero.
pub(crate) fn round_div(numerator: &BigInt, denominator: &BigInt, mode: RoundingMode) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return quotient;
    }

    let negative = (numerator.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus);
    let twice_remainder = remainder.abs() * 2u8;
    let divisor = denominator.abs();
    let away_from_zero = match mode {
        RoundingMode::Down => false,
        RoundingMode::Up => true,
        RoundingMode::Floor => negative,
        RoundingMode::Ceiling => !negative,
        RoundingMode::HalfUp => twice_remainder >= divisor,
        RoundingMode::HalfDown => twice_remainder > divisor,
        RoundingMode::HalfEven => match twice_remainder.cmp(&divisor) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => !(&quotient % 2u8).is_zero(),
        },
        RoundingMode::ZeroFiveUp => {
            let last_digit = quotient.abs() % 10u8;
            last_digit.is_zero() || last_digit == BigInt::from(5u8)
        }
    };

    match (away_from_zero, negative) {
        (false, _) => quotient,
        (true, true) => quotient - 1u8,
        (true, false) => quotient + 1u8,
    }
}

#[cfg(test)]
#[path = "rounding_test.rs"]
mod tests;
