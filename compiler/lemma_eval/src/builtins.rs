//! Core primitives.
//!
//! Enough built-in behavior to drive the rewriting engine from Lemma
//! source: control flow, variables, rule and operator definition,
//! predicates, exact and real arithmetic, lists, strings, generic arrays
//! and output. Everything else (the arithmetic operators included) is
//! written as rules in the prelude.

mod arithmetic;
mod arrays;
mod config;
mod control;
mod helpers;
mod lists;
mod operators;
mod output;
mod predicates;
mod rules;
mod strings;
mod variables;

use crate::PrimitiveTable;
use lemma_ir::StringInterner;

/// Register every core primitive.
pub fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    control::register(table, interner);
    variables::register(table, interner);
    rules::register(table, interner);
    operators::register(table, interner);
    predicates::register(table, interner);
    arithmetic::register(table, interner);
    config::register(table, interner);
    lists::register(table, interner);
    strings::register(table, interner);
    arrays::register(table, interner);
    output::register(table, interner);
}
