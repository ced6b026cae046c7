use crate::errors::EvalErrorKind;
use crate::test_helpers::Harness;
use crate::DEFAULT_MAX_DEPTH;
use lemma_ir::{Expr, Number};
use pretty_assertions::assert_eq;

#[test]
fn atoms_evaluate_to_their_binding_or_themselves() {
    let mut h = Harness::new();
    assert_eq!(h.run("x"), "x");
    assert_eq!(h.run("x := 4; x"), "4");
    assert_eq!(h.run("\"text\""), "\"text\"");
}

#[test]
fn precedence_drives_evaluation_order() {
    let mut h = Harness::new();
    let tree = h.parse("2+3*4");
    assert_eq!(h.context.render_lisp(&tree), "(+ 2\n  (* 3 4))");
    assert_eq!(h.run("2+3*4"), "14");
}

#[test]
fn unknown_heads_stay_in_normal_form_with_evaluated_arguments() {
    let mut h = Harness::new();
    assert_eq!(h.run("f(1 + 1, y)"), "f(2, y)");
}

#[test]
fn compound_heads_are_evaluated() {
    let mut h = Harness::new();
    let interner = h.context.interner().clone();
    let f = interner.intern("f");
    let add = interner.intern("MathAdd");
    let head = Expr::call(f, [Expr::number(Number::from(1))]);
    let arg = Expr::call(add, [Expr::number(Number::from(1)), Expr::number(Number::from(1))]);

    let result = h.evaluator().eval(&Expr::apply(head.clone(), [arg])).unwrap();
    assert_eq!(result, Expr::apply(head, [Expr::number(Number::from(2))]));
}

#[test]
fn first_applicable_rule_wins() {
    let mut h = Harness::new();
    h.eval("g(_x) <-- first; g(_x) <-- second;").unwrap();
    assert_eq!(h.run("g(5)"), "first");
}

#[test]
fn failing_guard_falls_through_to_the_next_rule() {
    let mut h = Harness::new();
    h.eval("size(_x) _ x > 3 <-- big; size(_x) <-- small;").unwrap();
    assert_eq!(h.run("size(5)"), "big");
    assert_eq!(h.run("size(1)"), "small");
}

#[test]
fn repeated_variables_must_agree() {
    let mut h = Harness::new();
    h.eval("pair(_x, _x) <-- same;").unwrap();
    assert_eq!(h.run("pair(1, 2)"), "pair(1, 2)");
    assert_eq!(h.run("pair(3, 3)"), "same");
}

#[test]
fn held_argument_is_seen_unevaluated() {
    let mut h = Harness::new();
    h.eval("RuleBase(raw, 1); HoldArgNr(raw, 1, 1); raw(_x) <-- Hold(x);").unwrap();
    assert_eq!(h.run("raw(1 + 2)"), "1 + 2");
    assert_eq!(h.run("Hold(1 + 2)"), "1 + 2");
}

#[test]
fn guards_bind_pattern_variables_and_bodies_substitute_them() {
    let mut h = Harness::new();
    h.eval("bump(_x) _ [x := x + 1; x > 5;] <-- x;").unwrap();
    assert_eq!(h.run("bump(5)"), "5");
    assert_eq!(h.run("bump(4)"), "bump(4)");

    h.eval("step(_x) <-- [Local(y); y := x + 1; y;];").unwrap();
    assert_eq!(h.run("step(5)"), "6");

    h.eval("inc(_x) <-- [x := x + 1; x;];").unwrap();
    assert!(matches!(h.error("inc(5)").kind, EvalErrorKind::TypeError { .. }));
    assert_eq!(h.env.scope_depth(), 1);
}

#[test]
fn predicate_sees_the_candidate_without_reevaluation() {
    let mut h = Harness::new();
    h.eval("b := c; c := 7; sym(_x::IsAtom) <-- yes;").unwrap();
    assert_eq!(h.run("sym(b)"), "yes");
    assert_eq!(h.run("sym(2)"), "sym(2)");
}

#[test]
fn macro_rules_run_in_the_callers_scope() {
    let mut h = Harness::new();
    h.eval("MacroRuleBase(declare, 0); declare() <-- Local(t); t := 1;").unwrap();
    assert_eq!(h.run("Prog(declare(), t := 5, t)"), "5");
    assert_eq!(h.run("t"), "1");
}

#[test]
fn ordinary_rules_run_in_their_own_scope() {
    let mut h = Harness::new();
    h.eval("declare() <-- Local(t); t := 1;").unwrap();
    assert_eq!(h.run("Prog(declare(), t := 5, t)"), "5");
    assert_eq!(h.run("t"), "5");
}

#[test]
fn macro_arguments_are_held() {
    let mut h = Harness::new();
    h.eval("MacroRuleBase(q, 1); q(_x) <-- Hold(x);").unwrap();
    assert_eq!(h.run("q(1 + 2)"), "1 + 2");
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let mut h = Harness::new();
    h.eval("r(_x) <-- r(x);").unwrap();
    let error = h.error("r(1)");
    assert_eq!(
        error.kind,
        EvalErrorKind::RecursionLimitExceeded {
            depth: DEFAULT_MAX_DEPTH
        }
    );
    assert_eq!(error.backtrace.first().map(String::as_str), Some("r"));
    assert_eq!(h.env.depth(), 0);
    assert_eq!(h.env.scope_depth(), 1);
    assert_eq!(h.run("1 + 1"), "2");
}

#[test]
fn errors_carry_the_heads_they_unwound_through() {
    let mut h = Harness::new();
    h.eval("k(_x) <-- Check(False, \"boom\");").unwrap();
    let error = h.error("k(1)");
    assert_eq!(
        error.kind,
        EvalErrorKind::CheckFailed {
            message: "boom".to_string()
        }
    );
    assert_eq!(error.backtrace, vec!["Check".to_string(), "k".to_string()]);
    assert_eq!(error.backtrace_display(), "Check <- k");
}

#[test]
fn scopes_are_balanced_after_errors() {
    let mut h = Harness::new();
    let error = h.error("Prog(Local(a), Prog(Local(b), Check(False, \"no\")))");
    assert_eq!(error.code(), "E6010");
    assert_eq!(h.env.scope_depth(), 1);
    assert_eq!(h.env.depth(), 0);
}

#[test]
fn secure_mode_refuses_output() {
    let mut h = Harness::new();
    let error = h.error("Secure(Echo(\"hi\"))");
    assert_eq!(
        error.kind,
        EvalErrorKind::SecureViolation {
            name: "Echo".to_string()
        }
    );
    assert!(!h.env.config().secure);
    assert_eq!(h.run("Echo(\"hi\")"), "True");
    assert_eq!(h.output(), "hi\n");
}

#[test]
fn evaluation_is_idempotent_on_results() {
    let mut h = Harness::new();
    for source in ["x + 0", "2 ^ (1/2)", "If(c, 1, 2)", "(a - a) * b + 3!", "Not x"] {
        let once = h.eval(source).unwrap();
        let twice = h.evaluator().eval(&once).unwrap();
        assert_eq!(twice, once, "{source}");
    }
}
