//! RAII scope management for the evaluator.
//!
//! [`ScopedEvaluator`] pushes an environment scope on creation and pops it
//! on drop, so a rule body or `Prog` that fails halfway still leaves the
//! scope stack balanced.
//!
//! ```text
//! evaluator.with_env_scope(|scoped| {
//!     scoped.env_mut().declare_local(name);
//!     scoped.eval(body)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use super::Evaluator;
use lemma_ir::{Expr, Name};

/// Guard holding a pushed scope. Derefs to the evaluator.
pub struct ScopedEvaluator<'guard, 'a> {
    evaluator: &'guard mut Evaluator<'a>,
}

impl Drop for ScopedEvaluator<'_, '_> {
    fn drop(&mut self) {
        self.evaluator.env.pop_scope();
    }
}

impl<'a> Deref for ScopedEvaluator<'_, 'a> {
    type Target = Evaluator<'a>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for ScopedEvaluator<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl<'a> Evaluator<'a> {
    /// Push a scope that is popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedEvaluator<'_, 'a> {
        self.env.push_scope();
        ScopedEvaluator { evaluator: self }
    }

    /// Run `f` inside a fresh scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedEvaluator<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` inside a fresh scope holding `bindings`.
    pub fn with_bindings<'b, T, F, I>(&mut self, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedEvaluator<'_, 'a>) -> T,
        I: IntoIterator<Item = (Name, &'b Expr)>,
    {
        self.with_env_scope(|scoped| {
            for (name, value) in bindings {
                scoped.env.bind(name, value.clone());
            }
            f(scoped)
        })
    }
}

#[cfg(test)]
mod tests;
