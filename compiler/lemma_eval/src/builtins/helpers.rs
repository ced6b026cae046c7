//! Argument extraction shared by the primitives.

use lemma_ir::{Expr, Name, Number, MAX_PRECISION};

use crate::errors::{index_out_of_range, primitive_error, type_error};
use crate::{EvalResult, Evaluator};

pub(super) fn number<'e>(arg: &'e Expr) -> EvalResult<&'e Number> {
    arg.as_number().ok_or_else(|| type_error("number", arg))
}

pub(super) fn atom(arg: &Expr) -> EvalResult<Name> {
    arg.as_atom().ok_or_else(|| type_error("atom", arg))
}

/// Text of a string argument.
pub(super) fn string(ev: &Evaluator<'_>, arg: &Expr) -> EvalResult<&'static str> {
    match arg.as_str() {
        Some(content) => Ok(ev.interner().lookup(content)),
        None => Err(type_error("string", arg)),
    }
}

/// Name given either as an atom or as a string (`Infix("op", 60)`).
///
/// String contents share the interner with atoms, so both give the same
/// `Name` for the same text.
pub(super) fn symbol(arg: &Expr) -> EvalResult<Name> {
    arg.as_atom()
        .or_else(|| arg.as_str())
        .ok_or_else(|| type_error("atom or string", arg))
}

pub(super) fn integer(name: &str, arg: &Expr) -> EvalResult<i64> {
    number(arg)?
        .to_i64()
        .ok_or_else(|| primitive_error(name, "expected a machine-sized integer"))
}

/// Non-negative integer that fits in `usize`.
pub(super) fn count(name: &str, arg: &Expr) -> EvalResult<usize> {
    number(arg)?
        .to_usize()
        .ok_or_else(|| primitive_error(name, "expected a non-negative integer"))
}

/// Significant digit count between 1 and [`MAX_PRECISION`].
pub(super) fn digits(name: &str, arg: &Expr) -> EvalResult<u32> {
    u32::try_from(count(name, arg)?)
        .ok()
        .filter(|d| (1..=MAX_PRECISION).contains(d))
        .ok_or_else(|| {
            primitive_error(name, format!("precision must be between 1 and {MAX_PRECISION}"))
        })
}

/// One-based index into `len` slots, returned zero-based.
pub(super) fn position(arg: &Expr, len: usize) -> EvalResult<usize> {
    let index = integer("index", arg)?;
    match usize::try_from(index) {
        Ok(one_based) if (1..=len).contains(&one_based) => Ok(one_based - 1),
        _ => Err(index_out_of_range(index, len)),
    }
}

/// Arguments of a `{...}` list.
pub(super) fn list_items<'e>(ev: &Evaluator<'_>, arg: &'e Expr) -> EvalResult<&'e [Expr]> {
    if arg.head_name() == Some(ev.names().list) {
        Ok(arg.args()?)
    } else {
        Err(type_error("list", arg))
    }
}

/// Text shown by output primitives: string contents verbatim, anything
/// else rendered.
pub(super) fn display(ev: &Evaluator<'_>, arg: &Expr) -> String {
    match arg.as_str() {
        Some(content) => ev.interner().lookup(content).to_string(),
        None => ev.render(arg),
    }
}

/// `name(args)`, left as is.
pub(super) fn unevaluated(ev: &Evaluator<'_>, name: &str, args: &[Expr]) -> Expr {
    Expr::call(ev.intern(name), args.iter().cloned())
}
