//! Variable bindings produced by a successful match.

use lemma_ir::{Expr, Name};
use smallvec::SmallVec;

/// Ordered variable bindings.
///
/// Rules rarely bind more than a handful of variables, so bindings live
/// inline and lookups are linear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    entries: SmallVec<[(Name, Expr); 4]>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: Name) -> Option<&Expr> {
        self.entries
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value)
    }

    /// Add a binding. The caller has checked the name is not yet bound.
    pub fn insert(&mut self, name: Name, value: Expr) {
        self.entries.push((name, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop bindings added after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Name, &Expr)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }
}
