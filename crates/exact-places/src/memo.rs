use crate::config::EvalConfig;
use crate::evaluator::{evaluate_places, render_places, EvalError, PlacesCache, Rounding};
use crate::node::{Fingerprint, Number};
use exact_numeric::Decimal;
use std::collections::HashMap;

/// Evaluator that remembers every operation result it computes, keyed by the
/// node's structural fingerprint, the places that were requested of it and
/// whether it was rounded as the outermost node or as an operand.
///
/// Results are the ones a fresh [`crate::Evaluator`] with the same config
/// returns; repeated and shared subtrees are just computed once per precision.
#[derive(Debug, Default)]
pub struct MemoEvaluator {
    config: EvalConfig,
    cache: ResultCache,
}

#[derive(Debug, Default)]
struct ResultCache {
    entries: HashMap<(Fingerprint, u32, Rounding), Decimal>,
}

impl PlacesCache for ResultCache {
    fn lookup(&self, number: &Number, places: u32, rounding: Rounding) -> Option<Decimal> {
        self.entries
            .get(&(number.fingerprint(), places, rounding))
            .cloned()
    }

    fn store(&mut self, number: &Number, places: u32, rounding: Rounding, value: &Decimal) {
        self.entries
            .insert((number.fingerprint(), places, rounding), value.clone());
    }
}

impl MemoEvaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            cache: ResultCache::default(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn evaluate(&mut self, number: &Number, places: u32) -> Result<String, EvalError> {
        let value = self.evaluate_decimal(number, places)?;
        Ok(render_places(&value, places))
    }

    pub fn evaluate_decimal(&mut self, number: &Number, places: u32) -> Result<Decimal, EvalError> {
        let before = self.cache.entries.len();
        let rounding = Rounding::Final(self.config.rounding);
        let result = evaluate_places(number, places, rounding, &self.config, &mut self.cache);
        tracing::debug!(
            places,
            new_entries = self.cache.entries.len() - before,
            cached_entries = self.cache.entries.len(),
            "memoized evaluation"
        );
        result
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.entries.len()
    }

    pub fn clear(&mut self) {
        self.cache.entries.clear();
    }
}

#[cfg(test)]
#[path = "memo_test.rs"]
mod tests;
