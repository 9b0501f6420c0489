//! Numbers kept as expression trees over integers and evaluated to any
//! number of decimal places on request.

pub mod config;
pub mod evaluator;
pub mod literal;
pub mod memo;
pub mod node;

pub use config::{
    load_eval_config, validate_eval_config, EvalConfig, EvalConfigError, CONFIG_SCHEMA,
    GUARD_DIGITS,
};
pub use evaluator::{EvalError, Evaluator};
pub use exact_numeric::{Decimal, NumericError, RoundingMode};
pub use literal::{parse_literal, ParseError};
pub use memo::MemoEvaluator;
pub use node::{Fingerprint, Node, Number, Operator};

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties;
