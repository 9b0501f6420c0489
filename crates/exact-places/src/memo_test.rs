use super::MemoEvaluator;
use crate::config::EvalConfig;
use crate::evaluator::Evaluator;
use crate::node::Number;

fn num(literal: &str) -> Number {
    Number::parse(literal).expect("literal")
}

#[test]
fn memoized_results_match_fresh_evaluation() {
    let expr = num("1")
        .add(&num("1").div(&num("3")))
        .mul(&num("2").pow(&num("0.5")));
    let fresh = Evaluator::default();
    let mut memo = MemoEvaluator::default();
    for places in [0, 3, 10, 3] {
        assert_eq!(
            memo.evaluate(&expr, places).expect("memo"),
            fresh.evaluate(&expr, places).expect("fresh")
        );
    }
}

#[test]
fn repeated_request_reuses_cached_entries() {
    let expr = num("1").add(&num("2").div(&num("3")));
    let mut memo = MemoEvaluator::default();
    memo.evaluate(&expr, 5).expect("eval");
    let after_first = memo.cached_entries();
    // add and div; integer leaves are never cached.
    assert_eq!(after_first, 2);
    memo.evaluate(&expr, 5).expect("eval");
    assert_eq!(memo.cached_entries(), after_first);
    memo.evaluate(&expr, 6).expect("eval");
    assert_eq!(memo.cached_entries(), 4);
}

#[test]
fn structurally_equal_subtrees_share_one_entry() {
    let left = num("1").div(&num("3"));
    let right = num("1").div(&num("3"));
    let expr = left.sub(&right);
    let mut memo = MemoEvaluator::default();
    assert_eq!(memo.evaluate(&expr, 4).expect("eval"), "0.0000");
    assert_eq!(memo.cached_entries(), 2);
}

#[test]
fn clear_drops_every_entry() {
    let expr = num("2.5").mul(&num("4"));
    let mut memo = MemoEvaluator::new(EvalConfig::default());
    assert_eq!(memo.evaluate(&expr, 1).expect("eval"), "10.0");
    assert!(memo.cached_entries() > 0);
    memo.clear();
    assert_eq!(memo.cached_entries(), 0);
    assert_eq!(memo.evaluate(&expr, 1).expect("eval"), "10.0");
}

#[test]
fn failed_evaluation_keeps_successful_subresults() {
    let expr = num("1").div(&num("3")).add(&num("1").div(&num("0")));
    let mut memo = MemoEvaluator::default();
    memo.evaluate(&expr, 2).expect_err("must fail");
    assert_eq!(memo.cached_entries(), 1);
}

#[test]
fn outermost_and_operand_results_are_cached_apart() {
    let value = num("0.12499");
    let mut memo = MemoEvaluator::default();
    assert_eq!(memo.evaluate(&value, 4).expect("eval"), "0.1250");
    assert_eq!(memo.evaluate(&value.neg(), 2).expect("eval"), "-0.12");
    // value as outermost at 4, value as operand at 4, the negation at 2.
    assert_eq!(memo.cached_entries(), 3);
}
