//! Runtime configuration: precision, depth limit, exactness limit.

use lemma_ir::{Expr, StringInterner};

use super::helpers::{count, digits};
use crate::errors::primitive_error;
use crate::registry::Arity;
use crate::{EvalResult, Evaluator, Primitive, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    table.define(interner, "Precision", Primitive::new(Arity::Fixed(1), precision));
    table.define(interner, "GetPrecision", Primitive::new(Arity::Fixed(0), get_precision));
    table.define(interner, "MaxEvalDepth", Primitive::new(Arity::Fixed(1), max_eval_depth));
    table.define(interner, "SetExactBits", Primitive::new(Arity::Fixed(1), set_exact_bits));
    table.define(interner, "GetExactBits", Primitive::new(Arity::Fixed(0), get_exact_bits));
}

fn precision(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let digits = digits("Precision", &args[0])?;
    ev.env_mut().config_mut().precision = digits;
    Ok(ev.boolean(true))
}

fn get_precision(ev: &mut Evaluator<'_>, _: &[Expr]) -> EvalResult {
    Ok(Expr::number(i64::from(ev.env().config().precision)))
}

/// Takes effect for frames entered after the call.
fn max_eval_depth(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let depth = count("MaxEvalDepth", &args[0])?;
    if depth == 0 {
        return Err(primitive_error("MaxEvalDepth", "depth must be positive"));
    }
    ev.env_mut().config_mut().max_depth = depth;
    Ok(ev.boolean(true))
}

/// `SetExactBits(0)` removes the limit.
fn set_exact_bits(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let bits = count("SetExactBits", &args[0])?;
    let limit = match u64::try_from(bits) {
        Ok(0) => None,
        Ok(bits) => Some(bits),
        Err(_) => return Err(primitive_error("SetExactBits", "limit too large")),
    };
    ev.env_mut().config_mut().max_exact_bits = limit;
    Ok(ev.boolean(true))
}

/// `0` when exact results are unlimited.
fn get_exact_bits(ev: &mut Evaluator<'_>, _: &[Expr]) -> EvalResult {
    let bits = ev.env().config().max_exact_bits.unwrap_or(0);
    Ok(Expr::number(lemma_ir::BigInt::from(bits)))
}
