use crate::config::EvalConfig;
use crate::node::{Node, Number, Operator};
use exact_numeric::{pow10, Decimal, NumericError, RoundingMode};

/// Rounding for division and power results at working precision and for
/// operands handed to a parent. Results rounded this way can be re-rounded to
/// fewer places without double rounding.
const WORKING_ROUNDING: RoundingMode = RoundingMode::ZeroFiveUp;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("numeric error: {0}")]
    Numeric(#[from] NumericError),
    #[error("{places} places plus guard digits exceeds the supported precision")]
    PrecisionOverflow { places: u32 },
}

/// Evaluates numbers to a requested number of decimal places.
///
/// Every call walks the whole tree again; nothing is kept between calls.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Decimal string with exactly `places` digits after the point.
    pub fn evaluate(&self, number: &Number, places: u32) -> Result<String, EvalError> {
        let value = self.evaluate_decimal(number, places)?;
        Ok(render_places(&value, places))
    }

    pub fn evaluate_decimal(&self, number: &Number, places: u32) -> Result<Decimal, EvalError> {
        tracing::debug!(places, guard_digits = self.config.guard_digits, "evaluating number");
        evaluate_places(
            number,
            places,
            Rounding::Final(self.config.rounding),
            &self.config,
            &mut NoCache,
        )
        .inspect_err(|error| {
            tracing::debug!(places, %error, "evaluation failed");
        })
    }
}

/// How an operation result is brought to the places it was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Rounding {
    /// The node the caller asked for; rounds with the configured mode.
    Final(RoundingMode),
    /// A node evaluated for its parent.
    Intermediate,
}

/// Storage consulted for operation nodes during a walk.
pub(crate) trait PlacesCache {
    fn lookup(&self, number: &Number, places: u32, rounding: Rounding) -> Option<Decimal>;
    fn store(&mut self, number: &Number, places: u32, rounding: Rounding, value: &Decimal);
}

pub(crate) struct NoCache;

impl PlacesCache for NoCache {
    fn lookup(&self, _number: &Number, _places: u32, _rounding: Rounding) -> Option<Decimal> {
        None
    }

    fn store(&mut self, _number: &Number, _places: u32, _rounding: Rounding, _value: &Decimal) {}
}

/// `number` rounded to exactly `places` fraction digits.
///
/// Operands of an operation are asked for `places + guard` digits, and the
/// operator runs at `places + 2 * guard`, so the guard compounds with depth.
/// Only the outermost node rounds with the configured mode; operands come
/// back from [`round_intermediate`] so the parent's rounding is the only one
/// that decides a digit.
pub(crate) fn evaluate_places<C: PlacesCache>(
    number: &Number,
    places: u32,
    rounding: Rounding,
    config: &EvalConfig,
    cache: &mut C,
) -> Result<Decimal, EvalError> {
    let (op, first, second) = match number.node() {
        Node::Integer(value) => {
            return Ok(Decimal::from_bigint_with_scale(value * pow10(places), places));
        }
        Node::Operation { op, first, second } => (*op, first, second),
    };
    if let Some(hit) = cache.lookup(number, places, rounding) {
        return Ok(hit);
    }

    let working = places
        .checked_add(config.guard_digits)
        .ok_or(EvalError::PrecisionOverflow { places })?;
    let operator_digits = working
        .checked_add(config.guard_digits)
        .ok_or(EvalError::PrecisionOverflow { places })?;
    tracing::trace!(%op, places, working, ?rounding, "evaluating operation");

    let left = evaluate_places(first, working, Rounding::Intermediate, config, cache)?;
    let right = evaluate_places(second, working, Rounding::Intermediate, config, cache)?;
    let raw = apply_operator(op, &left, &right, operator_digits)?;
    let rounded = match rounding {
        Rounding::Final(mode) => raw.quantize(places, mode),
        Rounding::Intermediate => round_intermediate(&raw, places),
    };

    cache.store(number, places, rounding, &rounded);
    Ok(rounded)
}

/// Rounds an operand for its parent. Values of at least one unit in the last
/// place use [`WORKING_ROUNDING`]; smaller ones round half-up, so an operand
/// can still come back as zero and fail a division.
fn round_intermediate(value: &Decimal, places: u32) -> Decimal {
    if value.quantize(places, RoundingMode::Down).is_zero() {
        value.quantize(places, RoundingMode::HalfUp)
    } else {
        value.quantize(places, WORKING_ROUNDING)
    }
}

fn apply_operator(
    op: Operator,
    left: &Decimal,
    right: &Decimal,
    fraction_digits: u32,
) -> Result<Decimal, NumericError> {
    match op {
        Operator::Add => left.add(right),
        Operator::Sub => left.sub(right),
        Operator::Mul => left.mul(right),
        Operator::Div => left.div(right, fraction_digits, WORKING_ROUNDING),
        Operator::Pow => left.pow(right, fraction_digits, WORKING_ROUNDING),
    }
}

/// `value` as `digits.fraction`; the point is kept even with zero places.
/// A value that rounded to zero prints unsigned (`"0.00"`, never `"-0.00"`).
pub(crate) fn render_places(value: &Decimal, places: u32) -> String {
    if places == 0 {
        format!("{value}.")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "evaluator_test.rs"]
mod tests;
