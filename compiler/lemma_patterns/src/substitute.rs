//! Instantiating rule bodies.

use crate::Bindings;
use lemma_ir::{Expr, ExprKind};
use lemma_stack::ensure_sufficient_stack;

/// Replace every atom bound in `bindings` by its value.
///
/// Subtrees without bound atoms are returned as-is (same `Arc`), so a body
/// that mentions no variables costs nothing to instantiate.
pub fn substitute(template: &Expr, bindings: &Bindings) -> Expr {
    if bindings.is_empty() {
        return template.clone();
    }
    substitute_inner(template, bindings)
}

fn substitute_inner(template: &Expr, bindings: &Bindings) -> Expr {
    match template.kind() {
        ExprKind::Atom(name) => bindings
            .get(*name)
            .cloned()
            .unwrap_or_else(|| template.clone()),
        ExprKind::List(items) => {
            let replaced: Vec<Expr> = items
                .iter()
                .map(|item| ensure_sufficient_stack(|| substitute_inner(item, bindings)))
                .collect();
            template.with_items(replaced)
        }
        ExprKind::Str(_) | ExprKind::Number(_) | ExprKind::Generic(_) => template.clone(),
    }
}
