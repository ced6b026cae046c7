//! Logic, equality and type predicates.

use std::cmp::Ordering;

use lemma_ir::{Expr, ExprKind, StringInterner};
use lemma_stack::ensure_sufficient_stack;

use super::helpers::unevaluated;
use crate::errors::type_error;
use crate::registry::{Arity, Held};
use crate::{EvalResult, Evaluator, Primitive, PrimitiveFn, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    let unary = |func: PrimitiveFn| Primitive::new(Arity::Fixed(1), func);

    table.define(interner, "Not", unary(not));
    table.define(interner, "And", Primitive::new(Arity::Variadic, and).held(Held::All));
    table.define(interner, "Or", Primitive::new(Arity::Variadic, or).held(Held::All));
    table.define(interner, "=", Primitive::new(Arity::Fixed(2), equal));
    table.define(interner, "!=", Primitive::new(Arity::Fixed(2), not_equal));
    table.define(interner, "IsAtom", unary(is_atom));
    table.define(interner, "IsNumber", unary(is_number));
    table.define(interner, "IsInteger", unary(is_integer));
    table.define(interner, "IsPositiveInteger", unary(is_positive_integer));
    table.define(interner, "IsList", unary(is_list));
    table.define(interner, "IsString", unary(is_string));
    table.define(interner, "IsFunction", unary(is_function));
    table.define(interner, "IsGeneric", unary(is_generic));
    table.define(interner, "GenericTypeName", unary(generic_type_name));
}

/// `Not(x)` stays symbolic unless `x` is a boolean.
fn not(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let arg = &args[0];
    if ev.is_true(arg) {
        Ok(ev.boolean(false))
    } else if ev.is_false(arg) {
        Ok(ev.boolean(true))
    } else {
        Ok(unevaluated(ev, "Not", args))
    }
}

/// Short-circuit connective. Operands are evaluated left to right until
/// one equals `stop`; undecided operands are kept in the result.
fn connective(ev: &mut Evaluator<'_>, name: &str, args: &[Expr], stop: bool) -> EvalResult {
    let mut undecided = Vec::new();
    for arg in args {
        let value = ev.eval(arg)?;
        let decided = if stop { ev.is_true(&value) } else { ev.is_false(&value) };
        if decided {
            return Ok(ev.boolean(stop));
        }
        let neutral = if stop { ev.is_false(&value) } else { ev.is_true(&value) };
        if !neutral {
            undecided.push(value);
        }
    }
    match undecided.as_slice() {
        [] => Ok(ev.boolean(!stop)),
        [single] => Ok(single.clone()),
        _ => Ok(unevaluated(ev, name, &undecided)),
    }
}

fn and(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    connective(ev, "And", args, false)
}

fn or(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    connective(ev, "Or", args, true)
}

/// Structural equality, except that numbers compare by value, so
/// `1/2 = 0.5` holds.
pub(super) fn same(a: &Expr, b: &Expr) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    match (a.kind(), b.kind()) {
        (ExprKind::Number(x), ExprKind::Number(y)) => {
            x.cmp_value(y).is_ok_and(|ordering| ordering == Ordering::Equal)
        }
        (ExprKind::List(xs), ExprKind::List(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(x, y)| ensure_sufficient_stack(|| same(x, y)))
        }
        _ => a == b,
    }
}

fn equal(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(same(&args[0], &args[1])))
}

fn not_equal(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(!same(&args[0], &args[1])))
}

fn is_atom(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(args[0].is_atom()))
}

fn is_number(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(args[0].as_number().is_some()))
}

fn is_integer(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(args[0].as_number().is_some_and(|n| n.is_integer())))
}

fn is_positive_integer(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let positive = args[0]
        .as_number()
        .is_some_and(|n| n.is_integer() && !n.is_negative() && !n.is_zero());
    Ok(ev.boolean(positive))
}

/// `{...}` lists only.
fn is_list(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let list = ev.names().list;
    Ok(ev.boolean(args[0].head_name() == Some(list)))
}

fn is_string(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(args[0].as_str().is_some()))
}

/// Any compound expression.
fn is_function(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(args[0].as_list().is_some_and(|items| !items.is_empty())))
}

fn is_generic(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(ev.boolean(args[0].as_generic().is_some()))
}

fn generic_type_name(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let handle = args[0]
        .as_generic()
        .ok_or_else(|| type_error("generic object", &args[0]))?;
    Ok(Expr::string(ev.intern(handle.type_name())))
}
