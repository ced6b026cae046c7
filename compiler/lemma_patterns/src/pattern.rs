//! Compiling expressions into patterns.

use lemma_ir::{CoreNames, Expr, ExprKind, Name};

/// Symbols that mark pattern syntax.
#[derive(Clone, Copy, Debug)]
pub struct PatternNames {
    /// Prefix `_`: pattern variable.
    pub var: Name,
    /// Prefix `__`: variadic tail.
    pub tail: Name,
    /// Infix `::`: predicate constraint.
    pub constraint: Name,
    /// Head of the list a tail collects into.
    pub list: Name,
}

impl From<&CoreNames> for PatternNames {
    fn from(names: &CoreNames) -> Self {
        PatternNames {
            var: names.underscore,
            tail: names.double_underscore,
            constraint: names.constraint,
            list: names.list,
        }
    }
}

/// Compiled pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Matches a structurally equal expression.
    Literal(Expr),
    /// `_x` or `_x::Pred`.
    Var { name: Name, predicate: Option<Expr> },
    /// `__xs`: collects the remaining siblings of a list.
    Tail { name: Name },
    /// Element-wise list pattern (head included).
    List(Vec<Pattern>),
}

impl Pattern {
    /// Compile `expr` into a pattern.
    ///
    /// `_x` becomes a variable, `_x::P` a constrained variable, `__xs` a
    /// tail; every other list is a list pattern and everything else a literal.
    pub fn compile(expr: &Expr, names: &PatternNames) -> Pattern {
        let ExprKind::List(items) = expr.kind() else {
            return Pattern::Literal(expr.clone());
        };

        if let Some(var) = Self::variable(items, names) {
            return var;
        }

        if let [head, target, predicate] = items.as_slice() {
            if head.as_atom() == Some(names.constraint) {
                if let Some(Pattern::Var { name, .. }) = target
                    .as_list()
                    .and_then(|inner| Self::variable(inner, names))
                {
                    return Pattern::Var {
                        name,
                        predicate: Some(predicate.clone()),
                    };
                }
            }
        }

        Pattern::List(items.iter().map(|item| Self::compile(item, names)).collect())
    }

    /// `_x` or `__x` as a list `[marker, atom]`.
    fn variable(items: &[Expr], names: &PatternNames) -> Option<Pattern> {
        let [marker, target] = items else {
            return None;
        };
        let marker = marker.as_atom()?;
        let name = target.as_atom()?;
        if marker == names.var {
            Some(Pattern::Var {
                name,
                predicate: None,
            })
        } else if marker == names.tail {
            Some(Pattern::Tail { name })
        } else {
            None
        }
    }

    /// Whether this is a list pattern containing a tail at its top level.
    pub fn has_tail(&self) -> bool {
        match self {
            Pattern::List(children) => children.iter().any(|c| matches!(c, Pattern::Tail { .. })),
            _ => false,
        }
    }

    /// Names of all variables, in first-occurrence order.
    pub fn variables(&self) -> Vec<Name> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut Vec<Name>) {
        match self {
            Pattern::Var { name, .. } | Pattern::Tail { name } => {
                if !out.contains(name) {
                    out.push(*name);
                }
            }
            Pattern::List(children) => {
                for child in children {
                    child.collect_variables(out);
                }
            }
            Pattern::Literal(_) => {}
        }
    }
}
