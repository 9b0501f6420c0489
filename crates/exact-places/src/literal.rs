use crate::node::Number;
use exact_numeric::pow10;
use num_bigint::BigInt;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

const LITERAL_PATTERN: &str = r"^-?[0-9]*(\.[0-9]+)?$";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty numeric literal")]
    Empty,
    #[error("invalid numeric literal: {0}")]
    InvalidLiteral(String),
}

/// Builds a number from a decimal literal such as `"12"`, `"-0.5"` or `".25"`.
///
/// A leading `-` becomes `0 - rest` and a fraction becomes an exact quotient,
/// so `"123.45"` is `12345 / 100`.
pub fn parse_literal(input: &str) -> Result<Number, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let has_digit = input.bytes().any(|byte| byte.is_ascii_digit());
    if !has_digit || !literal_pattern().is_match(input) {
        return Err(ParseError::InvalidLiteral(input.to_string()));
    }
    build_literal(input)
}

fn build_literal(literal: &str) -> Result<Number, ParseError> {
    if let Some(magnitude) = literal.strip_prefix('-') {
        return Ok(Number::integer(0).sub(&build_literal(magnitude)?));
    }
    let Some((integer, fraction)) = literal.split_once('.') else {
        return Ok(Number::integer(parse_digits(literal)?));
    };
    let fraction_digits = u32::try_from(fraction.len())
        .map_err(|_| ParseError::InvalidLiteral(literal.to_string()))?;
    let denominator = pow10(fraction_digits);
    let numerator = parse_digits(integer)? * &denominator + parse_digits(fraction)?;
    Ok(Number::integer(numerator).div(&Number::integer(denominator)))
}

fn parse_digits(digits: &str) -> Result<BigInt, ParseError> {
    if digits.is_empty() {
        return Ok(BigInt::from(0u8));
    }
    digits
        .parse::<BigInt>()
        .map_err(|_| ParseError::InvalidLiteral(digits.to_string()))
}

fn literal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(LITERAL_PATTERN).expect("valid regex"))
}

impl Number {
    pub fn parse(input: &str) -> Result<Number, ParseError> {
        parse_literal(input)
    }
}

impl FromStr for Number {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_literal(input)
    }
}

#[cfg(test)]
#[path = "literal_test.rs"]
mod tests;
