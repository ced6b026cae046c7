//! Rule registry: rule bases keyed by head and arity.

use std::sync::Arc;

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use lemma_ir::{Expr, Name};
use lemma_patterns::Pattern;

/// Number of arguments a rule base or primitive accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

bitflags! {
    /// Rule base flags.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct RuleFlags: u8 {
        /// Arguments are never pre-evaluated and bodies run in the caller's
        /// scope.
        const MACRO = 1;
    }
}

/// Argument positions (zero-based) that are passed unevaluated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Held {
    #[default]
    None,
    All,
    Positions(SmallVec<[usize; 4]>),
}

impl Held {
    pub fn positions(positions: &[usize]) -> Self {
        Held::Positions(positions.iter().copied().collect())
    }

    pub fn contains(&self, index: usize) -> bool {
        match self {
            Held::None => false,
            Held::All => true,
            Held::Positions(positions) => positions.contains(&index),
        }
    }

    /// Add a held position.
    pub fn hold(&mut self, index: usize) {
        match self {
            Held::All => {}
            Held::None => *self = Held::Positions(SmallVec::from_slice(&[index])),
            Held::Positions(positions) => {
                if !positions.contains(&index) {
                    positions.push(index);
                }
            }
        }
    }
}

/// `pattern _ guard <-- body`.
#[derive(Clone, Debug)]
pub struct Rule {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Expr,
}

/// The rules of one `(head, arity)`, tried in registration order.
#[derive(Clone, Debug, Default)]
pub struct RuleBase {
    pub rules: Vec<Arc<Rule>>,
    pub held: Held,
    pub flags: RuleFlags,
}

impl RuleBase {
    pub fn is_macro(&self) -> bool {
        self.flags.contains(RuleFlags::MACRO)
    }

    /// Whether argument `index` is passed unevaluated.
    pub fn is_held(&self, index: usize) -> bool {
        self.is_macro() || self.held.contains(index)
    }
}

/// All rule bases of a context.
///
/// Bases are stored behind `Arc` so the evaluator can take a snapshot and
/// release the registry lock before running any rule; rules defined while
/// a base is being applied take effect on the next lookup.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    bases: FxHashMap<(Name, Arity), Arc<RuleBase>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty rule base if none exists, adding `flags`.
    pub fn declare(&mut self, head: Name, arity: Arity, flags: RuleFlags) {
        let base = self.bases.entry((head, arity)).or_default();
        Arc::make_mut(base).flags |= flags;
        tracing::debug!(?head, ?arity, ?flags, "rule base declared");
    }

    /// Append a rule, creating the rule base on first use.
    pub fn define(&mut self, head: Name, arity: Arity, rule: Rule) {
        let base = self.bases.entry((head, arity)).or_default();
        let base = Arc::make_mut(base);
        base.rules.push(Arc::new(rule));
        tracing::debug!(?head, ?arity, count = base.rules.len(), "rule defined");
    }

    /// Rule base for a call with `count` arguments: an exact arity first,
    /// then a variadic base.
    pub fn lookup(&self, head: Name, count: usize) -> Option<Arc<RuleBase>> {
        self.bases
            .get(&(head, Arity::Fixed(count)))
            .or_else(|| self.bases.get(&(head, Arity::Variadic)))
            .cloned()
    }

    pub fn is_defined(&self, head: Name, arity: Arity) -> bool {
        self.bases.contains_key(&(head, arity))
    }

    /// Whether `head` has a rule base of any arity.
    pub fn defines(&self, head: Name) -> bool {
        self.bases.keys().any(|(key, _)| *key == head)
    }

    /// Whether argument `index` of `head/arity` is held. Unknown bases hold
    /// nothing.
    pub fn is_held(&self, head: Name, arity: Arity, index: usize) -> bool {
        self.bases
            .get(&(head, arity))
            .is_some_and(|base| base.is_held(index))
    }

    /// Hold argument `index` of an existing rule base. Returns `false` when
    /// the base has not been declared.
    pub fn hold_arg(&mut self, head: Name, arity: Arity, index: usize) -> bool {
        let Some(base) = self.bases.get_mut(&(head, arity)) else {
            return false;
        };
        Arc::make_mut(base).held.hold(index);
        true
    }

    /// Remove a rule base. Returns whether it existed.
    pub fn retract(&mut self, head: Name, arity: Arity) -> bool {
        let removed = self.bases.remove(&(head, arity)).is_some();
        if removed {
            tracing::debug!(?head, ?arity, "rule base retracted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}
