//! Symbols the parser, matcher, evaluator and printer refer to directly.

use crate::{Name, StringInterner};

/// Pre-interned core symbols.
///
/// Interned once per context so structural checks such as "is this a
/// `{...}` list" compare `u32`s instead of text.
#[derive(Clone, Copy, Debug)]
pub struct CoreNames {
    /// Head of `{a, b}`.
    pub list: Name,
    /// Head of `[a; b;]`.
    pub prog: Name,
    /// Head of `x[i]`.
    pub nth: Name,
    pub true_: Name,
    pub false_: Name,
    pub hold: Name,
    /// Prefix `_`, a pattern variable; infix `_`, a rule guard.
    pub underscore: Name,
    /// Prefix `__`, a variadic tail.
    pub double_underscore: Name,
    /// `_x::Pred`.
    pub constraint: Name,
    /// `pattern <-- body`.
    pub rule: Name,
    pub assign: Name,
    pub minus: Name,
}

impl CoreNames {
    pub fn new(interner: &StringInterner) -> Self {
        CoreNames {
            list: interner.intern("List"),
            prog: interner.intern("Prog"),
            nth: interner.intern("Nth"),
            true_: interner.intern("True"),
            false_: interner.intern("False"),
            hold: interner.intern("Hold"),
            underscore: interner.intern("_"),
            double_underscore: interner.intern("__"),
            constraint: interner.intern("::"),
            rule: interner.intern("<--"),
            assign: interner.intern(":="),
            minus: interner.intern("-"),
        }
    }

    /// `True` or `False`.
    pub fn boolean(&self, value: bool) -> Name {
        if value {
            self.true_
        } else {
            self.false_
        }
    }
}
