//! List primitives: `List`, `Length`, `Nth`, `Tail`, `Concat`, `Listify`,
//! `UnList`, `Subst`, and the positional edits `Insert`, `Delete`,
//! `Replace`.
//!
//! Edits work on the arguments of any compound, counting from one, and
//! return a new expression with the same head.

use lemma_ir::{Expr, ExprKind, StringInterner};
use lemma_stack::ensure_sufficient_stack;

use super::helpers::{count, integer, list_items, position, string};
use super::predicates::same;
use crate::errors::{index_out_of_range, not_a_list, primitive_error, type_error};
use crate::registry::Arity;
use crate::{EvalResult, Evaluator, Primitive, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    table.define(interner, "List", Primitive::new(Arity::Variadic, list));
    table.define(interner, "Length", Primitive::new(Arity::Fixed(1), length));
    table.define(interner, "Nth", Primitive::new(Arity::Fixed(2), nth));
    table.define(interner, "Tail", Primitive::new(Arity::Fixed(1), tail));
    table.define(interner, "Concat", Primitive::new(Arity::Variadic, concat));
    table.define(interner, "Listify", Primitive::new(Arity::Fixed(1), listify));
    table.define(interner, "UnList", Primitive::new(Arity::Fixed(1), unlist));
    table.define(interner, "Subst", Primitive::new(Arity::Fixed(3), subst));
    table.define(interner, "Insert", Primitive::new(Arity::Fixed(3), insert_at));
    table.define(interner, "Delete", Primitive::new(Arity::Fixed(2), delete_at));
    table.define(interner, "Replace", Primitive::new(Arity::Fixed(3), replace_at));
}

fn list(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(Expr::call(ev.names().list, args.iter().cloned()))
}

/// Arguments of a compound, characters of a string.
fn length(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let arg = &args[0];
    let len = match arg.kind() {
        ExprKind::List(_) => arg.arity().unwrap_or(0),
        ExprKind::Str(_) => string(ev, arg)?.chars().count(),
        ExprKind::Atom(_) | ExprKind::Number(_) | ExprKind::Generic(_) => {
            return Err(type_error("list or string", arg));
        }
    };
    Ok(Expr::number(lemma_ir::BigInt::from(len)))
}

/// `Nth(x, 0)` is the head; `Nth(x, k)` the `k`-th argument.
fn nth(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let (target, index) = (&args[0], count("Nth", &args[1])?);
    Ok(target.nth(index)?.clone())
}

fn tail(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let items = list_items(ev, &args[0])?;
    match items.split_first() {
        Some((_, rest)) => Ok(Expr::call(ev.names().list, rest.iter().cloned())),
        None => Err(index_out_of_range(1, 0)),
    }
}

fn concat(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let mut items = Vec::new();
    for arg in args {
        items.extend_from_slice(list_items(ev, arg)?);
    }
    Ok(Expr::call(ev.names().list, items))
}

/// `f(a, b)` to `{f, a, b}`.
fn listify(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let items = args[0].as_list().ok_or_else(not_a_list)?;
    Ok(Expr::call(ev.names().list, items.iter().cloned()))
}

/// `{f, a, b}` to `f(a, b)`.
fn unlist(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let items = list_items(ev, &args[0])?;
    if items.is_empty() {
        return Err(primitive_error("UnList", "cannot build a call from an empty list"));
    }
    Ok(Expr::list(items.to_vec()))
}

/// `Subst(from, to) body`: replace every subexpression equal to `from`,
/// then evaluate.
fn subst(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let (from, to, body) = (&args[0], &args[1], &args[2]);
    let replaced = replace(body, from, to);
    ev.eval(&replaced)
}

fn replace(expr: &Expr, from: &Expr, to: &Expr) -> Expr {
    if same(expr, from) {
        return to.clone();
    }
    match expr.as_list() {
        Some(items) => {
            let replaced = items
                .iter()
                .map(|item| ensure_sufficient_stack(|| replace(item, from, to)))
                .collect();
            expr.with_items(replaced)
        }
        None => expr.clone(),
    }
}

/// `Insert(x, k, e)`: `e` becomes argument `k`; `k` may be one past the end.
fn insert_at(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let target = &args[0];
    let mut items = target.args()?.to_vec();
    let index = integer("Insert", &args[1])?;
    let slot = usize::try_from(index)
        .ok()
        .filter(|k| (1..=items.len() + 1).contains(k))
        .ok_or_else(|| index_out_of_range(index, items.len()))?;
    items.insert(slot - 1, args[2].clone());
    Ok(target.with_args(items)?)
}

fn delete_at(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let target = &args[0];
    let mut items = target.args()?.to_vec();
    let slot = position(&args[1], items.len())?;
    items.remove(slot);
    Ok(target.with_args(items)?)
}

fn replace_at(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let target = &args[0];
    let mut items = target.args()?.to_vec();
    let slot = position(&args[1], items.len())?;
    items[slot] = args[2].clone();
    Ok(target.with_args(items)?)
}
