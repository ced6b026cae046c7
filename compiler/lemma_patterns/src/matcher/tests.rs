use super::*;
use lemma_ir::{CoreNames, OperatorTable, StringInterner};
use lemma_parse::parse;
use pretty_assertions::assert_eq;
use std::convert::Infallible;

/// Accepts candidates that are integers when the predicate is `IsInteger`,
/// rejects everything else.
struct IntegerCheck {
    is_integer: lemma_ir::Name,
    calls: usize,
}

impl PredicateCheck for IntegerCheck {
    type Error = Infallible;

    fn check(&mut self, predicate: &Expr, candidate: &Expr) -> Result<bool, Infallible> {
        self.calls += 1;
        Ok(predicate.as_atom() == Some(self.is_integer)
            && candidate.as_number().is_some_and(lemma_ir::Number::is_integer))
    }
}

struct FailingCheck;

impl PredicateCheck for FailingCheck {
    type Error = &'static str;

    fn check(&mut self, _: &Expr, _: &Expr) -> Result<bool, &'static str> {
        Err("predicate blew up")
    }
}

struct Fixture {
    interner: StringInterner,
    operators: OperatorTable,
    names: PatternNames,
}

impl Fixture {
    fn new() -> Self {
        let interner = StringInterner::new();
        let operators = OperatorTable::standard(&interner);
        let names = PatternNames::from(&CoreNames::new(&interner));
        Fixture {
            interner,
            operators,
            names,
        }
    }

    fn expr(&self, source: &str) -> Expr {
        let output = parse(source, &self.operators, &self.interner);
        assert!(output.errors.is_empty(), "{:?}", output.errors);
        output.statements.into_iter().next().unwrap()
    }

    fn checker(&self) -> IntegerCheck {
        IntegerCheck {
            is_integer: self.interner.intern("IsInteger"),
            calls: 0,
        }
    }

    fn run(&self, pattern: &str, candidate: &str) -> (MatchOutcome, Bindings) {
        let pattern = Pattern::compile(&self.expr(pattern), &self.names);
        let mut bindings = Bindings::new();
        let outcome = Matcher::new(self.names)
            .matches(&pattern, &self.expr(candidate), &mut bindings, &mut self.checker())
            .unwrap();
        (outcome, bindings)
    }

    fn bound(&self, bindings: &Bindings, var: &str) -> Expr {
        bindings.get(self.interner.intern(var)).cloned().unwrap()
    }
}

#[test]
fn literal_matches_only_equal_expressions() {
    let f = Fixture::new();
    assert_eq!(f.run("f(1)", "f(1)").0, MatchOutcome::Matched);
    assert_eq!(
        f.run("f(1)", "f(2)").0,
        MatchOutcome::NoMatch(MismatchReason::Literal)
    );
}

#[test]
fn variable_binds_the_candidate() {
    let f = Fixture::new();
    let (outcome, bindings) = f.run("f(_x, 2)", "f(a+b, 2)");
    assert!(outcome.is_match());
    assert_eq!(f.bound(&bindings, "x"), f.expr("a+b"));
}

#[test]
fn repeated_variable_requires_equal_values() {
    let f = Fixture::new();
    let (outcome, bindings) = f.run("f(_x, _x)", "f(1, 2)");
    assert_eq!(outcome, MatchOutcome::NoMatch(MismatchReason::Inconsistent));
    assert!(bindings.is_empty());

    let (outcome, bindings) = f.run("f(_x, _x)", "f(3, 3)");
    assert!(outcome.is_match());
    assert_eq!(bindings.len(), 1);
    assert_eq!(f.bound(&bindings, "x"), f.expr("3"));
}

#[test]
fn arity_mismatch_is_a_shape_failure() {
    let f = Fixture::new();
    assert_eq!(
        f.run("f(_x)", "f(1, 2)").0,
        MatchOutcome::NoMatch(MismatchReason::Shape)
    );
    assert_eq!(
        f.run("f(_x)", "x").0,
        MatchOutcome::NoMatch(MismatchReason::Shape)
    );
}

#[test]
fn head_is_matched_like_any_element() {
    let f = Fixture::new();
    let (outcome, bindings) = f.run("_h(1)", "g(1)");
    assert!(outcome.is_match());
    assert_eq!(f.bound(&bindings, "h"), f.expr("g"));
}

#[test]
fn predicate_filters_candidates() {
    let f = Fixture::new();
    assert!(f.run("f(_n::IsInteger)", "f(4)").0.is_match());
    assert_eq!(
        f.run("f(_n::IsInteger)", "f(y)").0,
        MatchOutcome::NoMatch(MismatchReason::Predicate)
    );
}

#[test]
fn predicate_is_checked_only_on_first_binding() {
    let f = Fixture::new();
    let pattern = Pattern::compile(&f.expr("f(_n::IsInteger, _n)"), &f.names);
    let mut checker = f.checker();
    let mut bindings = Bindings::new();
    let outcome = Matcher::new(f.names)
        .matches(&pattern, &f.expr("f(2, 2)"), &mut bindings, &mut checker)
        .unwrap();
    assert!(outcome.is_match());
    assert_eq!(checker.calls, 1);
}

#[test]
fn predicate_errors_propagate_and_restore_bindings() {
    let f = Fixture::new();
    let pattern = Pattern::compile(&f.expr("f(_a, _n::IsInteger)"), &f.names);
    let mut bindings = Bindings::new();
    let result = Matcher::new(f.names).matches(
        &pattern,
        &f.expr("f(1, 2)"),
        &mut bindings,
        &mut FailingCheck,
    );
    assert_eq!(result, Err("predicate blew up"));
    assert!(bindings.is_empty());
}

#[test]
fn tail_collects_remaining_arguments() {
    let f = Fixture::new();
    let (outcome, bindings) = f.run("f(_a, __rest)", "f(1, 2, 3)");
    assert!(outcome.is_match());
    assert_eq!(f.bound(&bindings, "a"), f.expr("1"));
    assert_eq!(f.bound(&bindings, "rest"), f.expr("{2, 3}"));
}

#[test]
fn tail_may_be_empty() {
    let f = Fixture::new();
    let (outcome, bindings) = f.run("f(_a, __rest)", "f(1)");
    assert!(outcome.is_match());
    assert_eq!(f.bound(&bindings, "rest"), f.expr("{}"));
}

#[test]
fn tail_leaves_room_for_later_patterns() {
    let f = Fixture::new();
    let (outcome, bindings) = f.run("f(__init, _last)", "f(1, 2, 3)");
    assert!(outcome.is_match());
    assert_eq!(f.bound(&bindings, "init"), f.expr("{1, 2}"));
    assert_eq!(f.bound(&bindings, "last"), f.expr("3"));
}

#[test]
fn too_few_arguments_for_fixed_patterns_fail() {
    let f = Fixture::new();
    assert_eq!(
        f.run("f(_a, _b, __rest)", "f(1)").0,
        MatchOutcome::NoMatch(MismatchReason::Shape)
    );
}

#[test]
fn failed_match_keeps_existing_bindings() {
    let f = Fixture::new();
    let pattern = Pattern::compile(&f.expr("f(_y, 1)"), &f.names);
    let mut bindings = Bindings::new();
    bindings.insert(f.interner.intern("z"), f.expr("0"));
    let outcome = Matcher::new(f.names)
        .matches(&pattern, &f.expr("f(5, 2)"), &mut bindings, &mut f.checker())
        .unwrap();
    assert_eq!(outcome, MatchOutcome::NoMatch(MismatchReason::Literal));
    assert_eq!(bindings.len(), 1);
    assert!(bindings.get(f.interner.intern("y")).is_none());
}
