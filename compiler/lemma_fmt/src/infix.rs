//! Infix rendering.
//!
//! Operator applications print in the notation the operator table gives
//! them, with parentheses only where reading the text back would group it
//! differently. Two things decide that:
//!
//! - the child's operator against the parent's (precedence, then
//!   associativity on ties);
//! - for prefix and bodied forms, the operator that follows in the text: a
//!   prefix operand is parsed at the prefix precedence, so `Not a And b`
//!   would swallow anything binding at least as tightly as `Not`.

use crate::{Emitter, StringEmitter};
use lemma_ir::{
    is_operator_char, Assoc, CoreNames, Expr, ExprKind, Fixity, Name, Number, OpInfo,
    OperatorTable, StringInterner,
};
use lemma_stack::ensure_sufficient_stack;

/// Precedence standing for a `[` index following an expression.
const INDEX_FOLLOW: u32 = u32::MAX;

/// How an expression is written, decided by its head and arity.
enum Shape<'e> {
    Infix {
        op: Name,
        info: OpInfo,
        lhs: &'e Expr,
        rhs: &'e Expr,
    },
    Prefix {
        op: Name,
        info: OpInfo,
        operand: &'e Expr,
    },
    Postfix {
        op: Name,
        info: OpInfo,
        operand: &'e Expr,
    },
    Bodied {
        head: Name,
        info: OpInfo,
        args: &'e [Expr],
        body: &'e Expr,
    },
    Index {
        target: &'e Expr,
        index: &'e Expr,
    },
    Braces(&'e [Expr]),
    Block(&'e [Expr]),
    Call {
        head: &'e Expr,
        args: &'e [Expr],
    },
    Empty,
    Leaf,
}

/// How tightly a rendered expression holds together.
#[derive(Clone, Copy)]
enum Binding {
    /// Nothing can split it: atoms, calls, brackets, non-negative numbers.
    Closed,
    /// Signed or fractional numbers, which read back differently next to an
    /// operator.
    Signed,
    Infix(OpInfo),
    Postfix(OpInfo),
    /// Prefix or bodied form: its right edge keeps parsing at this
    /// precedence.
    Open(u32),
}

/// Where a child sits relative to its parent.
#[derive(Clone, Copy)]
enum Slot {
    InfixLeft(OpInfo),
    InfixRight(OpInfo),
    PrefixOperand(OpInfo),
    PostfixOperand(OpInfo),
    Body(OpInfo),
}

/// Infix printer over an [`Emitter`].
pub struct InfixPrinter<'a, E: Emitter> {
    operators: &'a OperatorTable,
    interner: &'a StringInterner,
    names: CoreNames,
    emitter: E,
}

impl<'a, E: Emitter> InfixPrinter<'a, E> {
    pub fn new(operators: &'a OperatorTable, interner: &'a StringInterner, emitter: E) -> Self {
        InfixPrinter {
            operators,
            interner,
            names: CoreNames::new(interner),
            emitter,
        }
    }

    pub fn print(&mut self, expr: &Expr) {
        self.expr(expr, None);
    }

    pub fn finish(self) -> E {
        self.emitter
    }

    /// `follow` is the precedence of the operator printed right after this
    /// expression, if any.
    fn expr(&mut self, expr: &Expr, follow: Option<u32>) {
        ensure_sufficient_stack(|| self.expr_inner(expr, follow));
    }

    fn expr_inner(&mut self, expr: &Expr, follow: Option<u32>) {
        match self.shape(expr) {
            Shape::Leaf => self.leaf(expr),
            Shape::Empty => self.emitter.emit("()"),
            Shape::Infix { op, info, lhs, rhs } => {
                self.child(lhs, Slot::InfixLeft(info), Some(info.precedence));
                self.emitter.emit_space();
                self.emitter.emit(self.interner.lookup(op));
                self.emitter.emit_space();
                self.child(rhs, Slot::InfixRight(info), follow);
            }
            Shape::Prefix { op, info, operand } => {
                let symbol = self.interner.lookup(op);
                // `-(3)` rather than `-3`, which would read back as a number.
                let numeric_minus = op == self.names.minus && operand.as_number().is_some();
                let operand_text = self.detached(|inner| {
                    if numeric_minus {
                        inner.parenthesized(operand);
                    } else {
                        inner.child(operand, Slot::PrefixOperand(info), follow);
                    }
                });

                self.emitter.emit(symbol);
                if starts_with_word(symbol)
                    || operand_text.bytes().next().is_some_and(is_operator_char)
                {
                    self.emitter.emit_space();
                }
                self.emitter.emit(&operand_text);
            }
            Shape::Postfix { op, info, operand } => {
                let symbol = self.interner.lookup(op);
                let operand_text = self.detached(|inner| {
                    inner.child(operand, Slot::PostfixOperand(info), Some(info.precedence));
                });

                self.emitter.emit(&operand_text);
                if starts_with_word(symbol)
                    || operand_text.bytes().last().is_some_and(is_operator_char)
                {
                    self.emitter.emit_space();
                }
                self.emitter.emit(symbol);
            }
            Shape::Bodied {
                head,
                info,
                args,
                body,
            } => {
                self.emitter.emit(self.interner.lookup(head));
                self.arguments(args);
                self.emitter.emit_space();
                self.child(body, Slot::Body(info), follow);
            }
            Shape::Index { target, index } => {
                if matches!(self.binding(target), Binding::Closed) {
                    self.expr(target, Some(INDEX_FOLLOW));
                } else {
                    self.parenthesized(target);
                }
                self.emitter.emit("[");
                self.expr(index, None);
                self.emitter.emit("]");
            }
            Shape::Braces(items) => {
                self.emitter.emit("{");
                self.separated(items, ",");
                self.emitter.emit("}");
            }
            Shape::Block(statements) => {
                self.emitter.emit("[");
                for (i, statement) in statements.iter().enumerate() {
                    if i > 0 {
                        self.emitter.emit_space();
                    }
                    self.expr(statement, None);
                    self.emitter.emit(";");
                }
                self.emitter.emit("]");
            }
            Shape::Call { head, args } => {
                if matches!(self.binding(head), Binding::Closed) {
                    self.expr(head, None);
                } else {
                    self.parenthesized(head);
                }
                self.arguments(args);
            }
        }
    }

    fn child(&mut self, child: &Expr, slot: Slot, follow: Option<u32>) {
        if self.needs_parens(child, slot, follow) {
            self.parenthesized(child);
        } else {
            self.expr(child, follow);
        }
    }

    fn parenthesized(&mut self, expr: &Expr) {
        self.emitter.emit("(");
        self.expr(expr, None);
        self.emitter.emit(")");
    }

    fn arguments(&mut self, args: &[Expr]) {
        self.emitter.emit("(");
        self.separated(args, ",");
        self.emitter.emit(")");
    }

    fn separated(&mut self, items: &[Expr], separator: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emitter.emit(separator);
                self.emitter.emit_space();
            }
            self.expr(item, None);
        }
    }

    fn needs_parens(&self, child: &Expr, slot: Slot, follow: Option<u32>) -> bool {
        let binding = self.binding(child);
        if let (Binding::Open(open), Some(next)) = (binding, follow) {
            if next >= open {
                return true;
            }
        }

        match (binding, slot) {
            (Binding::Closed | Binding::Open(_), _) => false,
            (Binding::Signed, _) => true,
            (Binding::Infix(inner), Slot::InfixLeft(outer) | Slot::PostfixOperand(outer)) => {
                inner.precedence < outer.precedence
                    || (inner.precedence == outer.precedence && inner.assoc == Assoc::Right)
            }
            (Binding::Postfix(inner), Slot::InfixLeft(outer) | Slot::PostfixOperand(outer)) => {
                inner.precedence < outer.precedence
            }
            (Binding::Infix(inner) | Binding::Postfix(inner), Slot::InfixRight(outer)) => {
                inner.precedence < right_operand_min(outer)
            }
            (
                Binding::Infix(inner) | Binding::Postfix(inner),
                Slot::PrefixOperand(outer) | Slot::Body(outer),
            ) => inner.precedence < outer.precedence,
        }
    }

    fn binding(&self, expr: &Expr) -> Binding {
        match self.shape(expr) {
            Shape::Infix { info, .. } => Binding::Infix(info),
            Shape::Postfix { info, .. } => Binding::Postfix(info),
            Shape::Prefix { info, .. } | Shape::Bodied { info, .. } => Binding::Open(info.precedence),
            Shape::Leaf => match expr.as_number() {
                Some(number) if number.is_negative() || matches!(number, Number::Rational(_)) => {
                    Binding::Signed
                }
                _ => Binding::Closed,
            },
            Shape::Index { .. }
            | Shape::Braces(_)
            | Shape::Block(_)
            | Shape::Call { .. }
            | Shape::Empty => Binding::Closed,
        }
    }

    fn shape<'e>(&self, expr: &'e Expr) -> Shape<'e> {
        let ExprKind::List(items) = expr.kind() else {
            return Shape::Leaf;
        };
        let Some((head, args)) = items.split_first() else {
            return Shape::Empty;
        };
        let Some(op) = head.as_atom() else {
            return Shape::Call { head, args };
        };

        if op == self.names.list {
            return Shape::Braces(args);
        }
        if op == self.names.prog {
            return Shape::Block(args);
        }

        let infix = self.operators.lookup(op, Fixity::Infix);
        let prefix = self.operators.lookup(op, Fixity::Prefix);
        let postfix = self.operators.lookup(op, Fixity::Postfix);
        let bodied = self.operators.lookup(op, Fixity::Bodied);
        match (args, infix, prefix, postfix, bodied) {
            ([target, index], ..) if op == self.names.nth => Shape::Index { target, index },
            ([lhs, rhs], Some(info), ..) => Shape::Infix { op, info, lhs, rhs },
            ([operand], _, Some(info), ..) => Shape::Prefix { op, info, operand },
            ([operand], _, None, Some(info), _) => Shape::Postfix { op, info, operand },
            ([call_args @ .., body], .., Some(info)) => Shape::Bodied {
                head: op,
                info,
                args: call_args,
                body,
            },
            _ => Shape::Call { head, args },
        }
    }

    /// Render through a scratch printer and return the text.
    fn detached(&self, render: impl FnOnce(&mut InfixPrinter<'a, StringEmitter>)) -> String {
        let mut inner = InfixPrinter {
            operators: self.operators,
            interner: self.interner,
            names: self.names,
            emitter: StringEmitter::new(),
        };
        render(&mut inner);
        inner.finish().output()
    }

    fn leaf(&mut self, expr: &Expr) {
        match expr.kind() {
            ExprKind::Atom(name) => self.emitter.emit(self.interner.lookup(*name)),
            ExprKind::Str(content) => {
                let quoted = quote(self.interner.lookup(*content));
                self.emitter.emit(&quoted);
            }
            ExprKind::Number(number) => self.emitter.emit(&number.to_string()),
            ExprKind::Generic(handle) => self.emitter.emit(&format!("{handle:?}")),
            ExprKind::List(_) => {}
        }
    }
}

/// Minimum precedence the parser uses for an infix operator's right operand.
fn right_operand_min(info: OpInfo) -> u32 {
    match info.assoc {
        Assoc::Left => info.precedence + 1,
        Assoc::Right => info.precedence,
    }
}

fn starts_with_word(symbol: &str) -> bool {
    symbol.bytes().next().is_some_and(|b| b.is_ascii_alphanumeric())
}

/// Quote string content, escaping what the lexer unescapes.
pub fn quote(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2);
    out.push('"');
    for c in content.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests;
