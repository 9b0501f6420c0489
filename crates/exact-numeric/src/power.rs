use crate::decimal::{digit_sum, Decimal, NumericError};
use crate::rounding::RoundingMode;
use crate::transcendental::MAX_RESULT_DIGITS;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

/// Extra digits for `ln(base)` beyond what the result magnitude requires.
const LOG_GUARD: u32 = 5;

impl Decimal {
    /// `self ^ exponent`.
    ///
    /// Integral exponents (by value, so `2.00` counts) are computed exactly and
    /// only rounded to `fraction_digits` when the exact result is finer than
    /// that. Other exponents go through `exp(exponent * ln(self))` and are
    /// only defined for non-negative bases.
    pub fn pow(
        &self,
        exponent: &Decimal,
        fraction_digits: u32,
        mode: RoundingMode,
    ) -> Result<Decimal, NumericError> {
        if let Some(integer) = exponent.to_integer() {
            return self.powi(&integer, fraction_digits, mode);
        }
        if self.is_negative() {
            return Err(NumericError::InvalidOperation(format!(
                "negative base {self} with non-integral exponent {exponent}"
            )));
        }
        if self.is_zero() {
            if exponent.is_negative() {
                return Err(NumericError::DivisionByZero);
            }
            return Ok(Decimal::zero().quantize(fraction_digits, mode));
        }
        self.pow_fractional(exponent, fraction_digits, mode)
    }

    fn powi(
        &self,
        exponent: &BigInt,
        fraction_digits: u32,
        mode: RoundingMode,
    ) -> Result<Decimal, NumericError> {
        if self.is_zero() {
            if exponent.is_zero() {
                return Err(NumericError::InvalidOperation("0 ** 0 is undefined".to_string()));
            }
            if exponent.is_negative() {
                return Err(NumericError::DivisionByZero);
            }
            return Ok(Decimal::zero());
        }
        if exponent.is_zero() {
            return Ok(Decimal::one());
        }

        let base = self.normalized();
        if base.abs() == Decimal::one() {
            let odd = !(exponent % 2u8).is_zero();
            return Ok(if base.is_negative() && odd {
                Decimal::one().neg()
            } else {
                Decimal::one()
            });
        }

        let result_log10 = base.log10_abs() * exponent.to_f64().unwrap_or(f64::INFINITY);
        if result_log10 > MAX_RESULT_DIGITS {
            return Err(NumericError::Overflow);
        }
        if result_log10 < -(f64::from(fraction_digits) + 2.0) {
            return Ok(Decimal::zero().quantize(fraction_digits, mode));
        }

        let magnitude = exponent.abs().to_u32().ok_or(NumericError::Overflow)?;
        let scale = base
            .scale()
            .checked_mul(magnitude)
            .ok_or(NumericError::Overflow)?;
        let exact = Decimal::from_bigint_with_scale(base.mantissa().pow(magnitude), scale);

        if exponent.is_negative() {
            return Decimal::one().div(&exact, fraction_digits, mode);
        }
        if exact.scale() > fraction_digits {
            return Ok(exact.quantize(fraction_digits, mode));
        }
        Ok(exact)
    }

    fn pow_fractional(
        &self,
        exponent: &Decimal,
        fraction_digits: u32,
        mode: RoundingMode,
    ) -> Result<Decimal, NumericError> {
        if *self == Decimal::one() {
            return Ok(Decimal::one().quantize(fraction_digits, mode));
        }
        let exponent_value = exponent.to_f64();
        let result_log10 = exponent_value * self.log10_abs();
        if result_log10.is_nan() || result_log10 > MAX_RESULT_DIGITS {
            return Err(NumericError::Overflow);
        }
        if result_log10 < -(f64::from(fraction_digits) + 2.0) {
            return Ok(Decimal::zero().quantize(fraction_digits, mode));
        }

        // An error e in ln(self) becomes exponent * e in the product and
        // roughly result * exponent * e in the final value.
        let magnitude = result_log10.max(0.0).ceil() as u32 + 1;
        let exponent_digits = exponent_value.abs().log10().max(0.0).ceil() as u32 + 1;
        let ln_digits = digit_sum(&[fraction_digits, magnitude, exponent_digits, LOG_GUARD])?;

        let ln_base = self.ln(ln_digits, RoundingMode::HalfEven)?;
        let product = exponent.mul(&ln_base)?;
        product.exp(fraction_digits, mode)
    }
}

#[cfg(test)]
#[path = "power_test.rs"]
mod tests;
