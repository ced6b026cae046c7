//! Printer for Lemma expression trees.
//!
//! Two notations:
//! - [`render`]: infix text that the parser reads back into the same tree
//! - [`render_lisp`]: fully parenthesized `(head arg ...)` form
//!
//! Both write through the [`Emitter`] trait; [`StringEmitter`] collects
//! into a `String`.

mod emitter;
mod infix;
mod lisp;

pub use emitter::{Emitter, StringEmitter};
pub use infix::{quote, InfixPrinter};
pub use lisp::LispPrinter;

use lemma_ir::{Expr, OperatorTable, StringInterner};

/// Render `expr` in infix notation.
pub fn render(expr: &Expr, operators: &OperatorTable, interner: &StringInterner) -> String {
    let mut printer = InfixPrinter::new(operators, interner, StringEmitter::new());
    printer.print(expr);
    printer.finish().output()
}

/// Render `expr` in indented Lisp form.
pub fn render_lisp(expr: &Expr, interner: &StringInterner) -> String {
    let mut printer = LispPrinter::new(interner, StringEmitter::new());
    printer.print(expr);
    printer.finish().output()
}
