//! Natural logarithm and exponential on [`Decimal`].
//!
//! Both work on fixed-point big integers: a value `v` carried at `d` digits is
//! the integer `v * 10^d`. Each routine widens its internal precision by enough
//! digits to cover range reduction, then rounds once to the caller's places.

use crate::decimal::{digit_sum, pow10, Decimal, NumericError};
use crate::rounding::{round_div, RoundingMode};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Digits carried past the requested places to absorb series truncation.
const SERIES_GUARD: u32 = 10;

/// Results whose decimal exponent exceeds this are reported as overflow.
pub(crate) const MAX_RESULT_DIGITS: f64 = 1_000_000.0;

impl Decimal {
    /// Natural logarithm rounded to `fraction_digits` places.
    pub fn ln(&self, fraction_digits: u32, mode: RoundingMode) -> Result<Decimal, NumericError> {
        if !self.is_positive() {
            return Err(NumericError::InvalidOperation(format!(
                "logarithm of non-positive value {self}"
            )));
        }

        // x = a * 2^shift with a in (1/2, 2), so ln x = ln a + shift * ln 2.
        let denominator = pow10(self.scale());
        let shift = self.mantissa().bits() as i64 - denominator.bits() as i64;
        let guard = SERIES_GUARD + digit_count(shift.unsigned_abs());
        let internal = digit_sum(&[fraction_digits, guard])?;
        let one = pow10(internal);

        let mut numerator = self.mantissa() * &one;
        let mut divisor = denominator;
        if shift >= 0 {
            divisor <<= shift as usize;
        } else {
            numerator <<= shift.unsigned_abs() as usize;
        }
        let reduced = numerator / divisor;

        // ln a = 2 atanh((a - 1) / (a + 1)); |z| < 1/3 on the reduced range.
        let z = ((&reduced - &one) * &one) / (&reduced + &one);
        let mut sum = atanh_fixed(&z, &one) * 2u8;
        if shift != 0 {
            sum += ln2_fixed(&one) * BigInt::from(shift);
        }

        Ok(Decimal::from_bigint_with_scale(
            round_div(&sum, &pow10(guard), mode),
            fraction_digits,
        ))
    }

    /// `e^self` rounded to `fraction_digits` places.
    pub fn exp(&self, fraction_digits: u32, mode: RoundingMode) -> Result<Decimal, NumericError> {
        if self.is_zero() {
            return Ok(Decimal::one().quantize(fraction_digits, mode));
        }

        let result_log10 = self.to_f64() * std::f64::consts::LOG10_E;
        if result_log10 > MAX_RESULT_DIGITS {
            return Err(NumericError::Overflow);
        }
        if result_log10 < -(f64::from(fraction_digits) + 2.0) {
            return Ok(Decimal::zero().quantize(fraction_digits, mode));
        }

        // e^t = (e^(t / 2^k))^2^k with t / 2^k < 1/2. Squaring k times
        // multiplies the relative error by 2^k, hence the extra digits.
        let integer_part = self.abs().to_fixed(0);
        let halvings = integer_part.bits() as u32 + 1;
        let magnitude = result_log10.abs().ceil() as u32 + 1;
        let internal = digit_sum(&[fraction_digits, magnitude, halvings * 3 / 10, SERIES_GUARD])?;
        let one = pow10(internal);

        let reduced = self.abs().to_fixed(internal) >> halvings as usize;
        let mut sum = one.clone();
        let mut term = one.clone();
        let mut n = 1u32;
        loop {
            term = &term * &reduced / (&one * n);
            if term.is_zero() {
                break;
            }
            sum += &term;
            n += 1;
        }
        for _ in 0..halvings {
            sum = &sum * &sum / &one;
        }

        let mantissa = if self.is_negative() {
            // sum = e^|t| * 10^internal, so 10^fd / e^|t| = 10^(fd + internal) / sum.
            round_div(&pow10(digit_sum(&[fraction_digits, internal])?), &sum, mode)
        } else {
            round_div(&sum, &pow10(internal - fraction_digits), mode)
        };
        Ok(Decimal::from_bigint_with_scale(mantissa, fraction_digits))
    }
}

/// atanh(z) for fixed-point `z` with |z| well below 1.
fn atanh_fixed(z: &BigInt, one: &BigInt) -> BigInt {
    let z_squared = z * z / one;
    let mut power = z.clone();
    let mut sum = z.clone();
    let mut n = 1u32;
    loop {
        power = &power * &z_squared / one;
        let term = &power / (2 * n + 1);
        if term.is_zero() {
            break;
        }
        sum += term;
        n += 1;
    }
    sum
}

/// ln 2 = 2 atanh(1/3).
fn ln2_fixed(one: &BigInt) -> BigInt {
    atanh_fixed(&(one / 3u8), one) * 2u8
}

fn digit_count(value: u64) -> u32 {
    value.checked_ilog10().map_or(1, |log| log + 1)
}

#[cfg(test)]
#[path = "transcendental_test.rs"]
mod tests;
