//! `Echo` and `WriteString`. Both are refused in secure mode.

use lemma_ir::{Expr, StringInterner};

use super::helpers::{display, string};
use crate::primitives::Effect;
use crate::registry::Arity;
use crate::{EvalResult, Evaluator, Primitive, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    table.define(
        interner,
        "Echo",
        Primitive::new(Arity::Variadic, echo).effect(Effect::Output),
    );
    table.define(
        interner,
        "WriteString",
        Primitive::new(Arity::Fixed(1), write_string).effect(Effect::Output),
    );
}

/// Arguments side by side, then a newline. Strings print without quotes.
fn echo(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let line: String = args.iter().map(|arg| display(ev, arg)).collect();
    ev.output().println(&line);
    Ok(ev.boolean(true))
}

fn write_string(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let text = string(ev, &args[0])?;
    ev.output().print(text);
    Ok(ev.boolean(true))
}
