use crate::{Decimal, NumericError, RoundingMode};

fn dec(input: &str) -> Decimal {
    Decimal::parse(input).expect("parse")
}

#[test]
fn ln_matches_known_constants() {
    let ln2 = dec("2").ln(20, RoundingMode::HalfUp).expect("ln");
    assert_eq!(ln2.to_string(), "0.69314718055994530942");
    let ln10 = dec("10").ln(20, RoundingMode::HalfUp).expect("ln");
    assert_eq!(ln10.to_string(), "2.30258509299404568402");
}

#[test]
fn ln_of_fraction_is_negative() {
    let out = dec("0.5").ln(15, RoundingMode::HalfUp).expect("ln");
    assert_eq!(out.to_string(), "-0.693147180559945");
}

#[test]
fn ln_of_one_is_zero() {
    let out = Decimal::one().ln(3, RoundingMode::HalfUp).expect("ln");
    assert_eq!(out.to_string(), "0.000");
}

#[test]
fn ln_rejects_non_positive_values() {
    for input in ["0", "-1", "0.000"] {
        let err = dec(input).ln(5, RoundingMode::HalfUp).expect_err("must fail");
        assert!(matches!(err, NumericError::InvalidOperation(_)), "{input}: {err:?}");
    }
}

#[test]
fn exp_matches_known_constants() {
    let e = Decimal::one().exp(20, RoundingMode::HalfUp).expect("exp");
    assert_eq!(e.to_string(), "2.71828182845904523536");
    let inverse = dec("-1").exp(20, RoundingMode::HalfUp).expect("exp");
    assert_eq!(inverse.to_string(), "0.36787944117144232160");
}

#[test]
fn exp_of_zero_is_one() {
    let out = Decimal::zero().exp(4, RoundingMode::HalfUp).expect("exp");
    assert_eq!(out.to_string(), "1.0000");
}

#[test]
fn exp_undoes_ln() {
    let value = dec("123.456");
    let ln = value.ln(40, RoundingMode::HalfEven).expect("ln");
    let back = ln.exp(10, RoundingMode::HalfUp).expect("exp");
    assert_eq!(back.to_string(), "123.4560000000");
}

#[test]
fn exp_of_large_argument_overflows() {
    let err = dec("5000000").exp(2, RoundingMode::HalfUp).expect_err("must fail");
    assert_eq!(err, NumericError::Overflow);
}

#[test]
fn exp_of_very_negative_argument_flushes_to_zero() {
    let out = dec("-1000").exp(10, RoundingMode::HalfUp).expect("exp");
    assert_eq!(out.to_string(), "0.0000000000");
}

#[test]
fn working_digits_past_u32_report_overflow() {
    let err = dec("2").ln(u32::MAX, RoundingMode::HalfUp).expect_err("must fail");
    assert_eq!(err, NumericError::Overflow);
    let err = Decimal::one().exp(u32::MAX - 5, RoundingMode::HalfUp).expect_err("must fail");
    assert_eq!(err, NumericError::Overflow);
}
