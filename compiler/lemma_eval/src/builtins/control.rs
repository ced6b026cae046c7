//! `Quote`, `Hold`, `Eval`, `If`, `Prog`, `While`, `Check`, `Secure`.

use lemma_ir::{Expr, StringInterner};

use super::helpers::{display, unevaluated};
use crate::errors::{check_failed, type_error};
use crate::registry::{Arity, Held};
use crate::{EvalResult, Evaluator, Primitive, PrimitiveFn, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    let held = |arity: Arity, func: PrimitiveFn| Primitive::new(arity, func).held(Held::All);

    table.define(interner, "Quote", held(Arity::Fixed(1), quote));
    table.define(interner, "Hold", held(Arity::Fixed(1), quote));
    table.define(interner, "Eval", Primitive::new(Arity::Fixed(1), eval));
    table.define(
        interner,
        "If",
        Primitive::new(Arity::Fixed(2), if_then).held(Held::positions(&[1])),
    );
    table.define(
        interner,
        "If",
        Primitive::new(Arity::Fixed(3), if_then_else).held(Held::positions(&[1, 2])),
    );
    table.define(interner, "Prog", held(Arity::Variadic, prog));
    table.define(interner, "While", held(Arity::Fixed(2), while_loop));
    table.define(interner, "Check", Primitive::new(Arity::Fixed(2), check));
    table.define(interner, "Secure", held(Arity::Fixed(1), secure));
}

fn quote(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(args[0].clone())
}

/// The argument arrives evaluated once; evaluate it again.
fn eval(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    ev.eval(&args[0])
}

/// `If(c, a)`: `False` when the condition is false.
fn if_then(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let condition = &args[0];
    if ev.is_true(condition) {
        ev.eval(&args[1])
    } else if ev.is_false(condition) {
        Ok(ev.boolean(false))
    } else {
        Ok(unevaluated(ev, "If", args))
    }
}

fn if_then_else(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let condition = &args[0];
    if ev.is_true(condition) {
        ev.eval(&args[1])
    } else if ev.is_false(condition) {
        ev.eval(&args[2])
    } else {
        Ok(unevaluated(ev, "If", args))
    }
}

/// Statements in order inside their own scope; the value of the last one.
fn prog(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    ev.with_env_scope(|scoped| {
        let mut last = scoped.boolean(true);
        for statement in args {
            last = scoped.eval(statement)?;
        }
        Ok(last)
    })
}

fn while_loop(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let (condition, body) = (&args[0], &args[1]);
    loop {
        let verdict = ev.eval(condition)?;
        if ev.is_false(&verdict) {
            return Ok(ev.boolean(true));
        }
        if !ev.is_true(&verdict) {
            return Err(type_error("True or False", &verdict));
        }
        ev.eval(body)?;
    }
}

fn check(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    if ev.is_true(&args[0]) {
        Ok(ev.boolean(true))
    } else {
        Err(check_failed(display(ev, &args[1])))
    }
}

/// Evaluate with secure mode on, restoring the previous setting after.
fn secure(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let previous = ev.env().config().secure;
    ev.env_mut().config_mut().secure = true;
    let result = ev.eval(&args[0]);
    ev.env_mut().config_mut().secure = previous;
    result
}
