use crate::rounding::{round_div, RoundingMode};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::str::FromStr;

/// An exact decimal value `mantissa * 10^-scale`.
///
/// Unlike most arbitrary precision decimals the scale is kept as given:
/// `1.50` and `1.5` compare equal but render differently, which is what lets a
/// value quantized to `n` places print exactly `n` fraction digits.
#[derive(Debug, Clone)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum NumericError {
    #[error("invalid decimal literal: {0}")]
    InvalidDecimalLiteral(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("numeric overflow")]
    Overflow,
}

impl Decimal {
    pub fn new(mantissa: impl Into<BigInt>, scale: u32) -> Self {
        Self::from_bigint_with_scale(mantissa.into(), scale)
    }

    pub fn zero() -> Self {
        Self::from_bigint_with_scale(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Self::from_bigint_with_scale(BigInt::from(1u8), 0)
    }

    pub fn from_int(value: i128) -> Self {
        Self::from_bigint_with_scale(BigInt::from(value), 0)
    }

    pub fn from_bigint_with_scale(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Parses plain (`-12.340`) or scientific (`1.5e-3`) notation.
    ///
    /// Fraction digits are kept, so `"12.340"` has scale 3.
    pub fn parse(input: &str) -> Result<Self, NumericError> {
        let parsed = BigDecimal::from_str(input)
            .map_err(|_| NumericError::InvalidDecimalLiteral(input.to_string()))?;
        Self::from_bigdecimal(parsed)
            .map_err(|_| NumericError::InvalidDecimalLiteral(input.to_string()))
    }

    pub fn from_bigdecimal(value: BigDecimal) -> Result<Self, NumericError> {
        let (mantissa, exponent) = value.into_bigint_and_exponent();
        if exponent >= 0 {
            let scale = u32::try_from(exponent).map_err(|_| NumericError::Overflow)?;
            return Ok(Self::from_bigint_with_scale(mantissa, scale));
        }
        let shift = u32::try_from(-exponent).map_err(|_| NumericError::Overflow)?;
        Ok(Self::from_bigint_with_scale(mantissa * pow10(shift), 0))
    }

    pub fn to_bigdecimal(&self) -> BigDecimal {
        BigDecimal::new(self.mantissa.clone(), i64::from(self.scale))
    }

    pub fn add(&self, other: &Decimal) -> Result<Decimal, NumericError> {
        let scale = self.scale.max(other.scale);
        Ok(Self::from_bigint_with_scale(
            self.mantissa_at(scale) + other.mantissa_at(scale),
            scale,
        ))
    }

    pub fn sub(&self, other: &Decimal) -> Result<Decimal, NumericError> {
        let scale = self.scale.max(other.scale);
        Ok(Self::from_bigint_with_scale(
            self.mantissa_at(scale) - other.mantissa_at(scale),
            scale,
        ))
    }

    pub fn mul(&self, other: &Decimal) -> Result<Decimal, NumericError> {
        let scale = self
            .scale
            .checked_add(other.scale)
            .ok_or(NumericError::Overflow)?;
        Ok(Self::from_bigint_with_scale(
            &self.mantissa * &other.mantissa,
            scale,
        ))
    }

    /// Quotient rounded to `fraction_digits` places.
    pub fn div(
        &self,
        other: &Decimal,
        fraction_digits: u32,
        mode: RoundingMode,
    ) -> Result<Decimal, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        // self / other = (a / 10^sa) / (b / 10^sb); scaled by 10^fd that is
        // a * 10^(sb + fd) / (b * 10^sa).
        let shift = other
            .scale
            .checked_add(fraction_digits)
            .ok_or(NumericError::Overflow)?;
        let numerator = &self.mantissa * pow10(shift);
        let denominator = &other.mantissa * pow10(self.scale);
        Ok(Self::from_bigint_with_scale(
            round_div(&numerator, &denominator, mode),
            fraction_digits,
        ))
    }

    /// Rounds (or zero-pads) to exactly `places` fraction digits.
    pub fn quantize(&self, places: u32, mode: RoundingMode) -> Decimal {
        if places >= self.scale {
            return Self::from_bigint_with_scale(self.mantissa_at(places), places);
        }
        let divisor = pow10(self.scale - places);
        Self::from_bigint_with_scale(round_div(&self.mantissa, &divisor, mode), places)
    }

    /// Same value with trailing fraction zeros removed.
    pub fn normalized(&self) -> Decimal {
        if self.mantissa.is_zero() {
            return Self::zero();
        }
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 && (&mantissa % 10u8).is_zero() {
            mantissa /= 10u8;
            scale -= 1;
        }
        Self::from_bigint_with_scale(mantissa, scale)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    pub fn is_positive(&self) -> bool {
        self.mantissa.sign() == Sign::Plus
    }

    pub fn is_integral(&self) -> bool {
        self.scale == 0 || (&self.mantissa % pow10(self.scale)).is_zero()
    }

    /// The integer value, if there is no fractional part.
    pub fn to_integer(&self) -> Option<BigInt> {
        if !self.is_integral() {
            return None;
        }
        Some(&self.mantissa / pow10(self.scale))
    }

    pub fn abs(&self) -> Self {
        Self::from_bigint_with_scale(self.mantissa.abs(), self.scale)
    }

    pub fn neg(&self) -> Self {
        Self::from_bigint_with_scale(-self.mantissa.clone(), self.scale)
    }

    /// Nearest `f64`, saturating to infinity for out-of-range magnitudes.
    pub fn to_f64(&self) -> f64 {
        match self.to_bigdecimal().to_f64() {
            Some(value) => value,
            None if self.is_negative() => f64::NEG_INFINITY,
            None => f64::INFINITY,
        }
    }

    /// Approximate `log10(|self|)`; `self` must be non-zero.
    pub(crate) fn log10_abs(&self) -> f64 {
        let magnitude = self.mantissa.abs();
        let bits = magnitude.bits();
        let mantissa_log10 = if bits <= 1000 {
            magnitude.to_f64().map_or(f64::INFINITY, f64::log10)
        } else {
            let dropped = bits - 64;
            let top = (magnitude >> dropped).to_f64().unwrap_or(f64::INFINITY);
            top.log10() + dropped as f64 * std::f64::consts::LOG10_2
        };
        mantissa_log10 - f64::from(self.scale)
    }

    /// `self` as a fixed-point integer with `digits` fraction digits,
    /// truncated toward zero.
    pub(crate) fn to_fixed(&self, digits: u32) -> BigInt {
        if digits >= self.scale {
            &self.mantissa * pow10(digits - self.scale)
        } else {
            &self.mantissa / pow10(self.scale - digits)
        }
    }

    fn mantissa_at(&self, scale: u32) -> BigInt {
        &self.mantissa * pow10(scale - self.scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.mantissa_at(scale).cmp(&other.mantissa_at(scale))
    }
}

impl From<i128> for Decimal {
    fn from(value: i128) -> Self {
        Self::from_int(value)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Self::from_bigint_with_scale(value, 0)
    }
}

impl FromStr for Decimal {
    type Err = NumericError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

/// Renders exactly `scale` fraction digits; no exponent notation.
impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.mantissa.abs().to_string();
        let sign = if self.is_negative() { "-" } else { "" };
        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let scale = self.scale as usize;
        if digits.len() <= scale {
            let padding = "0".repeat(scale - digits.len());
            write!(f, "{sign}0.{padding}{digits}")
        } else {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{integer}.{fraction}")
        }
    }
}

/// Sum of digit counts, or `Overflow` when it leaves `u32`.
pub(crate) fn digit_sum(parts: &[u32]) -> Result<u32, NumericError> {
    parts.iter().try_fold(0u32, |total, part| {
        total.checked_add(*part).ok_or(NumericError::Overflow)
    })
}

/// `10^power` as a big integer.
pub fn pow10(power: u32) -> BigInt {
    BigInt::from(10u8).pow(power)
}

#[cfg(test)]
#[path = "decimal_test.rs"]
mod tests;
