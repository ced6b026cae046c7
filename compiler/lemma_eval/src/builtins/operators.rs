//! Operator definition and queries.
//!
//! New operators take effect for the next statement parsed.

use lemma_ir::{Assoc, Expr, Fixity, Name, OpInfo, StringInterner};

use super::helpers::{count, symbol};
use crate::errors::primitive_error;
use crate::registry::{Arity, Held};
use crate::{EvalResult, Evaluator, Primitive, PrimitiveFn, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    let op = |arity: Arity, func: PrimitiveFn| Primitive::new(arity, func).held(Held::positions(&[0]));

    table.define(interner, "Infix", op(Arity::Fixed(2), infix));
    table.define(interner, "Prefix", op(Arity::Fixed(2), prefix));
    table.define(interner, "Postfix", op(Arity::Fixed(2), postfix));
    table.define(interner, "Bodied", op(Arity::Fixed(2), bodied));
    table.define(interner, "RightAssociative", op(Arity::Fixed(1), right_associative));
    table.define(interner, "IsInfix", op(Arity::Fixed(1), is_infix));
    table.define(interner, "IsPrefix", op(Arity::Fixed(1), is_prefix));
    table.define(interner, "IsPostfix", op(Arity::Fixed(1), is_postfix));
    table.define(interner, "IsBodied", op(Arity::Fixed(1), is_bodied));
    table.define(interner, "OpPrecedence", op(Arity::Fixed(1), op_precedence));
}

fn define_operator(
    ev: &mut Evaluator<'_>,
    primitive: &str,
    args: &[Expr],
    fixity: Fixity,
    assoc: Assoc,
) -> EvalResult {
    let name = symbol(&args[0])?;
    let spelling = ev.interner().lookup(name);
    let precedence = u32::try_from(count(primitive, &args[1])?)
        .map_err(|_| primitive_error(primitive, "precedence too large"))?;

    ev.context().operators().write().register(
        ev.interner(),
        spelling,
        fixity,
        OpInfo { precedence, assoc },
    );
    tracing::debug!(operator = spelling, ?fixity, precedence, "operator registered");
    Ok(ev.boolean(true))
}

fn infix(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    define_operator(ev, "Infix", args, Fixity::Infix, Assoc::Left)
}

fn prefix(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    define_operator(ev, "Prefix", args, Fixity::Prefix, Assoc::Right)
}

fn postfix(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    define_operator(ev, "Postfix", args, Fixity::Postfix, Assoc::Left)
}

fn bodied(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    define_operator(ev, "Bodied", args, Fixity::Bodied, Assoc::Right)
}

fn right_associative(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let name = symbol(&args[0])?;
    if !ev.context().operators().write().set_assoc(name, Fixity::Infix, Assoc::Right) {
        return Err(primitive_error(
            "RightAssociative",
            format!("{} is not an infix operator", ev.interner().lookup(name)),
        ));
    }
    Ok(ev.boolean(true))
}

fn has_fixity(ev: &Evaluator<'_>, args: &[Expr], fixity: Fixity) -> EvalResult {
    let name = symbol(&args[0])?;
    let found = ev.context().operators().read().lookup(name, fixity).is_some();
    Ok(ev.boolean(found))
}

fn is_infix(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    has_fixity(ev, args, Fixity::Infix)
}

fn is_prefix(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    has_fixity(ev, args, Fixity::Prefix)
}

fn is_postfix(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    has_fixity(ev, args, Fixity::Postfix)
}

fn is_bodied(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    has_fixity(ev, args, Fixity::Bodied)
}

/// Precedence of the first fixity `op` is registered under, infix first.
fn op_precedence(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let name: Name = symbol(&args[0])?;
    let operators = ev.context().operators().read();
    let info = [Fixity::Infix, Fixity::Prefix, Fixity::Postfix, Fixity::Bodied]
        .into_iter()
        .find_map(|fixity| operators.lookup(name, fixity));
    drop(operators);
    match info {
        Some(info) => Ok(Expr::number(i64::from(info.precedence))),
        None => Err(primitive_error(
            "OpPrecedence",
            format!("{} is not an operator", ev.interner().lookup(name)),
        )),
    }
}
