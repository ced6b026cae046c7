use crate::errors::check_failed;
use crate::test_helpers::Harness;
use crate::EvalResult;
use lemma_ir::{Expr, Number};
use pretty_assertions::assert_eq;

#[test]
fn scoped_pops_on_drop() {
    let mut harness = Harness::bare();
    let mut evaluator = harness.evaluator();
    {
        let scoped = evaluator.scoped();
        assert_eq!(scoped.env().scope_depth(), 2);
    }
    assert_eq!(evaluator.env().scope_depth(), 1);
}

#[test]
fn with_bindings_binds_then_forgets() {
    let mut harness = Harness::bare();
    let x = harness.context.interner().intern("x");
    let one = Expr::number(Number::from(1));

    let mut evaluator = harness.evaluator();
    let seen = evaluator.with_bindings([(x, &one)], |scoped| scoped.env().lookup(x).cloned());
    assert_eq!(seen, Some(one));
    assert!(evaluator.env().lookup(x).is_none());
}

#[test]
fn scope_is_popped_when_the_body_fails() {
    let mut harness = Harness::bare();
    let mut evaluator = harness.evaluator();
    let result: EvalResult<()> = evaluator.with_env_scope(|scoped| {
        scoped.with_env_scope(|_| Err(check_failed("inner")))
    });
    assert!(result.is_err());
    assert_eq!(evaluator.env().scope_depth(), 1);
}
