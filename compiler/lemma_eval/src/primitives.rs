//! Primitive callables.
//!
//! A primitive is a plain function pointer plus the metadata the evaluator
//! needs before calling it: which arities it accepts, which arguments it
//! receives unevaluated, and whether it has side effects.

use rustc_hash::FxHashMap;

use crate::registry::{Arity, Held};
use crate::{EvalResult, Evaluator};
use lemma_ir::{Expr, Name, StringInterner};

/// Signature of every primitive.
///
/// Arguments arrive evaluated except at held positions. The returned
/// expression is final; a primitive that wants further evaluation calls
/// the evaluator itself.
pub type PrimitiveFn = fn(&mut Evaluator<'_>, &[Expr]) -> EvalResult;

/// Side effects of a primitive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Effect {
    #[default]
    Pure,
    /// Writes to the session's print handler; refused in secure mode.
    Output,
}

#[derive(Clone, Debug)]
pub struct Primitive {
    pub arity: Arity,
    pub held: Held,
    pub effect: Effect,
    pub func: PrimitiveFn,
}

impl Primitive {
    pub fn new(arity: Arity, func: PrimitiveFn) -> Self {
        Primitive {
            arity,
            held: Held::None,
            effect: Effect::Pure,
            func,
        }
    }

    #[must_use]
    pub fn held(mut self, held: Held) -> Self {
        self.held = held;
        self
    }

    #[must_use]
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
}

/// Primitives keyed by name and arity.
#[derive(Debug, Default)]
pub struct PrimitiveTable {
    entries: FxHashMap<(Name, Arity), Primitive>,
}

impl PrimitiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `primitive` under `spelling`, replacing any previous entry
    /// of the same arity.
    pub fn define(&mut self, interner: &StringInterner, spelling: &str, primitive: Primitive) -> Name {
        let name = interner.intern(spelling);
        self.entries.insert((name, primitive.arity), primitive);
        name
    }

    /// Primitive for a call with `count` arguments: an exact arity first,
    /// then a variadic one.
    pub fn lookup(&self, name: Name, count: usize) -> Option<&Primitive> {
        self.entries
            .get(&(name, Arity::Fixed(count)))
            .or_else(|| self.entries.get(&(name, Arity::Variadic)))
    }

    /// Whether `name` has a primitive of any arity.
    pub fn contains(&self, name: Name) -> bool {
        self.entries.keys().any(|(key, _)| *key == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
