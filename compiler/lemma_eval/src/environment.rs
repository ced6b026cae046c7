//! Variable scopes and evaluation depth for one session.
//!
//! Scopes form a stack with the global scope at the bottom. Lookups search
//! innermost first. A scope may hold a name without a value (`Local(x)`),
//! which hides outer bindings of `x` until it is assigned.
//!
//! A global may be marked lazy (`LazyGlobal`): its stored value is evaluated
//! the first time it is looked up unshadowed, and the result replaces it.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::recursion_limit_exceeded;
use crate::{EvalConfig, EvalResult};
use lemma_ir::{Expr, Name};

/// One lexical scope.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Option<Expr>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(None)` when the name is declared here but unassigned.
    fn get(&self, name: Name) -> Option<Option<&Expr>> {
        self.bindings.get(&name).map(Option::as_ref)
    }

    fn holds(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Scope stack, configuration and recursion counter.
pub struct Environment {
    /// `scopes[0]` is the global scope and is never popped.
    scopes: Vec<Scope>,
    /// Globals still holding their unevaluated definition.
    lazy: FxHashSet<Name>,
    config: EvalConfig,
    depth: usize,
}

impl Environment {
    pub fn new(config: EvalConfig) -> Self {
        Environment {
            scopes: vec![Scope::new()],
            lazy: FxHashSet::default(),
            config,
            depth: 0,
        }
    }

    /// Number of scopes, the global one included.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Current evaluation depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EvalConfig {
        &mut self.config
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn innermost(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Bind in the innermost scope.
    pub fn bind(&mut self, name: Name, value: Expr) {
        self.innermost().bindings.insert(name, Some(value));
    }

    /// Declare `name` local to the innermost scope, unassigned.
    pub fn declare_local(&mut self, name: Name) {
        self.innermost().bindings.insert(name, None);
    }

    /// Rebind in the innermost scope that holds `name`; bind globally when
    /// no scope does.
    pub fn set(&mut self, name: Name, value: Expr) {
        match self.scopes.iter_mut().rev().find(|scope| scope.holds(name)) {
            Some(scope) => {
                scope.bindings.insert(name, Some(value));
            }
            None => self.bind_global(name, value),
        }
    }

    /// Bind in the global scope, replacing any lazy definition.
    pub fn bind_global(&mut self, name: Name, value: Expr) {
        self.lazy.remove(&name);
        self.scopes[0].bindings.insert(name, Some(value));
    }

    /// Remove the innermost binding of `name`. Returns whether one existed.
    pub fn unbind(&mut self, name: Name) -> bool {
        let Some(index) = self.scopes.iter().rposition(|scope| scope.holds(name)) else {
            return false;
        };
        if index == 0 {
            self.lazy.remove(&name);
        }
        self.scopes[index].bindings.remove(&name).is_some()
    }

    /// Mark the global value of `name` for evaluation on first lookup.
    /// Returns `false` when `name` has no global value.
    pub fn mark_lazy(&mut self, name: Name) -> bool {
        if matches!(self.scopes[0].get(name), Some(Some(_))) {
            self.lazy.insert(name);
            true
        } else {
            false
        }
    }

    pub fn is_lazy(&self, name: Name) -> bool {
        self.lazy.contains(&name)
    }

    /// Unevaluated definition of a lazy global, when a lookup of `name`
    /// would reach it. The mark is cleared; the caller stores the evaluated
    /// value with [`Environment::bind_global`].
    pub fn take_lazy(&mut self, name: Name) -> Option<Expr> {
        if !self.lazy.contains(&name) || self.scopes[1..].iter().any(|scope| scope.holds(name)) {
            return None;
        }
        self.lazy.remove(&name);
        self.scopes[0].get(name).flatten().cloned()
    }

    /// Value of `name`, searching innermost first. A local declared without
    /// a value hides outer bindings.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<&Expr> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))?
    }

    pub fn is_bound(&self, name: Name) -> bool {
        self.lookup(name).is_some()
    }

    /// Enter an evaluation frame.
    pub fn enter_call(&mut self) -> EvalResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(recursion_limit_exceeded(self.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}
