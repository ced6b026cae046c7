//! Generic arrays. Indices are one-based.

use lemma_ir::{ArrayObject, Expr, GenericHandle, StringInterner};

use super::helpers::{count, position};
use crate::errors::{index_out_of_range, primitive_error, type_error};
use crate::registry::Arity;
use crate::{EvalError, EvalResult, Evaluator, Primitive, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    table.define(interner, "ArrayCreate", Primitive::new(Arity::Fixed(2), create));
    table.define(interner, "ArraySize", Primitive::new(Arity::Fixed(1), size));
    table.define(interner, "ArrayGet", Primitive::new(Arity::Fixed(2), get));
    table.define(interner, "ArraySet", Primitive::new(Arity::Fixed(3), set));
}

fn handle(arg: &Expr) -> EvalResult<&GenericHandle> {
    arg.as_generic().ok_or_else(|| type_error("generic object", arg))
}

fn create(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let size = count("ArrayCreate", &args[0])?;
    let array = ArrayObject::new(size, &args[1]).ok_or_else(|| {
        primitive_error(
            "ArrayCreate",
            format!("size {size} exceeds the limit of {}", ArrayObject::MAX_LEN),
        )
    })?;
    Ok(Expr::generic(GenericHandle::new(array)))
}

fn size(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let size = handle(&args[0])?.size();
    Ok(Expr::number(lemma_ir::BigInt::from(size)))
}

fn get(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let array = handle(&args[0])?;
    let index = position(&args[1], array.size())?;
    array.get(index).ok_or_else(|| out_of_range(index, array))
}

fn set(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let array = handle(&args[0])?;
    let index = position(&args[1], array.size())?;
    if !array.set(index, args[2].clone()) {
        return Err(out_of_range(index, array));
    }
    Ok(ev.boolean(true))
}

/// The array shrank between the bounds check and the access.
fn out_of_range(index: usize, array: &GenericHandle) -> EvalError {
    index_out_of_range(i64::try_from(index + 1).unwrap_or(i64::MAX), array.size())
}
