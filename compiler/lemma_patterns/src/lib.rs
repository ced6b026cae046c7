//! Rule patterns for Lemma.
//!
//! A rule's left-hand side is compiled into a [`Pattern`], matched against
//! candidate expressions with [`Matcher`], and the rule body is instantiated
//! with [`substitute`]. Predicate constraints (`_x::IsInteger`) are checked
//! through the [`PredicateCheck`] seam so this crate never depends on the
//! evaluator.

mod bindings;
mod matcher;
mod pattern;
mod substitute;

pub use bindings::Bindings;
pub use matcher::{MatchOutcome, Matcher, MismatchReason, PredicateCheck};
pub use pattern::{Pattern, PatternNames};
pub use substitute::substitute;
