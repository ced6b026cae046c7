//! String conversion: `ToString`, `Atom`, `String`, `ConcatStrings`,
//! `FullForm`.

use lemma_ir::{Expr, StringInterner};

use super::helpers::{atom, string};
use crate::errors::type_error;
use crate::primitives::Effect;
use crate::registry::Arity;
use crate::{EvalResult, Evaluator, Primitive, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    table.define(interner, "ToString", Primitive::new(Arity::Fixed(1), to_string));
    table.define(interner, "Atom", Primitive::new(Arity::Fixed(1), to_atom));
    table.define(interner, "String", Primitive::new(Arity::Fixed(1), atom_to_string));
    table.define(interner, "ConcatStrings", Primitive::new(Arity::Variadic, concat_strings));
    table.define(
        interner,
        "FullForm",
        Primitive::new(Arity::Fixed(1), full_form).effect(Effect::Output),
    );
}

/// Infix text of any expression.
fn to_string(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let text = ev.render(&args[0]);
    Ok(Expr::string(ev.intern(&text)))
}

/// String contents and atom names share the interner.
fn to_atom(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let content = args[0]
        .as_str()
        .ok_or_else(|| type_error("string", &args[0]))?;
    Ok(Expr::atom(content))
}

fn atom_to_string(_: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    Ok(Expr::string(atom(&args[0])?))
}

fn concat_strings(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let mut joined = String::new();
    for arg in args {
        joined.push_str(string(ev, arg)?);
    }
    Ok(Expr::string(ev.intern(&joined)))
}

/// Print the Lisp form and return the argument.
fn full_form(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let text = ev.context().render_lisp(&args[0]);
    ev.output().println(&text);
    Ok(args[0].clone())
}
