//! Matching candidates against compiled patterns.
//!
//! Matching is first-fit and never backtracks: children are matched left to
//! right and the first failing child fails the whole pattern. A variable that
//! occurs more than once must bind structurally equal values.

use crate::{Bindings, Pattern, PatternNames};
use lemma_ir::{Expr, ExprKind, Name};
use lemma_stack::ensure_sufficient_stack;

/// Why a candidate did not match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MismatchReason {
    /// A literal differed.
    Literal,
    /// Wrong number of list elements, or a list pattern met a non-list.
    Shape,
    /// A constrained variable's predicate did not hold.
    Predicate,
    /// A repeated variable would bind two different values.
    Inconsistent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched,
    NoMatch(MismatchReason),
}

impl MatchOutcome {
    pub fn is_match(self) -> bool {
        self == MatchOutcome::Matched
    }
}

/// Decides predicate constraints such as `_x::IsInteger`.
///
/// The evaluator implements this by evaluating `Pred(candidate)`; errors
/// from that evaluation abort the match.
pub trait PredicateCheck {
    type Error;

    fn check(&mut self, predicate: &Expr, candidate: &Expr) -> Result<bool, Self::Error>;
}

/// Stateless matcher over a set of pattern names.
#[derive(Clone, Copy, Debug)]
pub struct Matcher {
    names: PatternNames,
}

impl Matcher {
    pub fn new(names: PatternNames) -> Self {
        Matcher { names }
    }

    /// Match `candidate` against `pattern`, extending `bindings`.
    ///
    /// On `NoMatch` (and on error) `bindings` is restored to what it was on
    /// entry.
    pub fn matches<P: PredicateCheck>(
        &self,
        pattern: &Pattern,
        candidate: &Expr,
        bindings: &mut Bindings,
        checker: &mut P,
    ) -> Result<MatchOutcome, P::Error> {
        let mark = bindings.len();
        let outcome = self.match_inner(pattern, candidate, bindings, checker);
        if !matches!(outcome, Ok(MatchOutcome::Matched)) {
            bindings.truncate(mark);
        }
        outcome
    }

    fn match_inner<P: PredicateCheck>(
        &self,
        pattern: &Pattern,
        candidate: &Expr,
        bindings: &mut Bindings,
        checker: &mut P,
    ) -> Result<MatchOutcome, P::Error> {
        match pattern {
            Pattern::Literal(expected) => Ok(if expected == candidate {
                MatchOutcome::Matched
            } else {
                MatchOutcome::NoMatch(MismatchReason::Literal)
            }),
            Pattern::Var { name, predicate } => {
                if let Some(bound) = bindings.get(*name) {
                    return Ok(Self::consistent(bound, candidate));
                }
                if let Some(predicate) = predicate {
                    if !checker.check(predicate, candidate)? {
                        return Ok(MatchOutcome::NoMatch(MismatchReason::Predicate));
                    }
                }
                bindings.insert(*name, candidate.clone());
                Ok(MatchOutcome::Matched)
            }
            // A tail outside a list collects nothing but itself.
            Pattern::Tail { name } => {
                let collected = Expr::call(self.names.list, [candidate.clone()]);
                Ok(self.bind_tail(*name, collected, bindings))
            }
            Pattern::List(children) => {
                let ExprKind::List(items) = candidate.kind() else {
                    return Ok(MatchOutcome::NoMatch(MismatchReason::Shape));
                };
                self.match_list(children, items, bindings, checker)
            }
        }
    }

    fn match_list<P: PredicateCheck>(
        &self,
        children: &[Pattern],
        items: &[Expr],
        bindings: &mut Bindings,
        checker: &mut P,
    ) -> Result<MatchOutcome, P::Error> {
        let has_tail = children.iter().any(|c| matches!(c, Pattern::Tail { .. }));
        if !has_tail && children.len() != items.len() {
            return Ok(MatchOutcome::NoMatch(MismatchReason::Shape));
        }
        let fixed = children.len() - usize::from(has_tail);
        if items.len() < fixed {
            return Ok(MatchOutcome::NoMatch(MismatchReason::Shape));
        }

        let mut pos = 0;
        for (index, child) in children.iter().enumerate() {
            let outcome = if let Pattern::Tail { name } = child {
                // Greedy: leave exactly one element per remaining pattern.
                let after = children.len() - index - 1;
                let take = items.len().saturating_sub(pos + after);
                let collected = Expr::call(self.names.list, items[pos..pos + take].iter().cloned());
                pos += take;
                self.bind_tail(*name, collected, bindings)
            } else {
                let Some(item) = items.get(pos) else {
                    return Ok(MatchOutcome::NoMatch(MismatchReason::Shape));
                };
                pos += 1;
                ensure_sufficient_stack(|| self.match_inner(child, item, bindings, checker))?
            };
            if outcome != MatchOutcome::Matched {
                return Ok(outcome);
            }
        }

        Ok(if pos == items.len() {
            MatchOutcome::Matched
        } else {
            MatchOutcome::NoMatch(MismatchReason::Shape)
        })
    }

    fn bind_tail(&self, name: Name, collected: Expr, bindings: &mut Bindings) -> MatchOutcome {
        if let Some(bound) = bindings.get(name) {
            return Self::consistent(bound, &collected);
        }
        bindings.insert(name, collected);
        MatchOutcome::Matched
    }

    fn consistent(bound: &Expr, candidate: &Expr) -> MatchOutcome {
        if bound == candidate {
            MatchOutcome::Matched
        } else {
            tracing::trace!(?bound, ?candidate, "pattern variable bound inconsistently");
            MatchOutcome::NoMatch(MismatchReason::Inconsistent)
        }
    }
}

#[cfg(test)]
mod tests;
