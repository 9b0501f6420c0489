//! Exact decimal arithmetic with caller-chosen precision.
//!
//! Addition, subtraction and multiplication are exact. Division, powers,
//! logarithms and exponentials take the number of fraction digits to produce
//! and a [`RoundingMode`]; there is no ambient precision context.

pub mod decimal;
mod power;
pub mod rounding;
mod transcendental;

pub use decimal::{pow10, Decimal, NumericError};
pub use rounding::RoundingMode;
