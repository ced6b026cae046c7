//! `:=`, `Set`, `Clear`, `Local`, `IsBound`, `LazyGlobal`.

use lemma_ir::{Expr, StringInterner};

use super::helpers::atom;
use crate::errors::primitive_error;
use crate::registry::{Arity, Held};
use crate::{EvalResult, Evaluator, Primitive, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    let assign = || Primitive::new(Arity::Fixed(2), set).held(Held::positions(&[0]));
    table.define(interner, ":=", assign());
    table.define(interner, "Set", assign());
    table.define(interner, "Clear", Primitive::new(Arity::Variadic, clear).held(Held::All));
    table.define(interner, "Local", Primitive::new(Arity::Variadic, local).held(Held::All));
    table.define(interner, "IsBound", Primitive::new(Arity::Fixed(1), is_bound).held(Held::All));
    table.define(interner, "LazyGlobal", Primitive::new(Arity::Fixed(1), lazy_global).held(Held::All));
}

/// `x := value`: rebinds `x` where it is visible, otherwise globally.
fn set(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let name = atom(&args[0])?;
    ev.env_mut().set(name, args[1].clone());
    Ok(ev.boolean(true))
}

fn clear(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    for arg in args {
        let name = atom(arg)?;
        ev.env_mut().unbind(name);
    }
    Ok(ev.boolean(true))
}

/// Declare names local to the current scope.
fn local(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    for arg in args {
        let name = atom(arg)?;
        ev.env_mut().declare_local(name);
    }
    Ok(ev.boolean(true))
}

fn is_bound(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let bound = args[0].as_atom().is_some_and(|name| ev.env().is_bound(name));
    Ok(ev.boolean(bound))
}

/// `LazyGlobal(x)`: the global value of `x` is evaluated on first lookup
/// and replaced by the result.
fn lazy_global(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let name = atom(&args[0])?;
    if !ev.env_mut().mark_lazy(name) {
        let text = ev.interner().lookup(name);
        return Err(primitive_error("LazyGlobal", format!("{text} has no global value")));
    }
    Ok(ev.boolean(true))
}
