//! Lisp-form rendering: `(head arg ...)`.
//!
//! A list in argument position starts a new line, indented two spaces per
//! nesting level, so deep trees read top to bottom:
//!
//! ```text
//! (+ 2
//!   (* 3 4))
//! ```

use crate::infix::quote;
use crate::Emitter;
use lemma_ir::{Expr, ExprKind, StringInterner};
use lemma_stack::ensure_sufficient_stack;

pub struct LispPrinter<'a, E: Emitter> {
    interner: &'a StringInterner,
    emitter: E,
}

impl<'a, E: Emitter> LispPrinter<'a, E> {
    pub fn new(interner: &'a StringInterner, emitter: E) -> Self {
        LispPrinter { interner, emitter }
    }

    pub fn print(&mut self, expr: &Expr) {
        self.expr(expr, 0);
    }

    pub fn finish(self) -> E {
        self.emitter
    }

    fn expr(&mut self, expr: &Expr, depth: usize) {
        ensure_sufficient_stack(|| self.expr_inner(expr, depth));
    }

    fn expr_inner(&mut self, expr: &Expr, depth: usize) {
        match expr.kind() {
            ExprKind::List(items) => {
                self.emitter.emit("(");
                let mut items = items.iter();
                if let Some(head) = items.next() {
                    self.expr(head, depth + 1);
                }
                for item in items {
                    if item.is_list() {
                        self.emitter.emit_newline();
                        self.emitter.emit_indent(depth + 1);
                    } else {
                        self.emitter.emit_space();
                    }
                    self.expr(item, depth + 1);
                }
                self.emitter.emit(")");
            }
            ExprKind::Atom(name) => self.emitter.emit(self.interner.lookup(*name)),
            ExprKind::Str(content) => {
                let quoted = quote(self.interner.lookup(*content));
                self.emitter.emit(&quoted);
            }
            ExprKind::Number(number) => self.emitter.emit(&number.to_string()),
            ExprKind::Generic(handle) => self.emitter.emit(&format!("{handle:?}")),
        }
    }
}
