//! Lemma Eval - rule-based rewriting evaluator.
//!
//! # Architecture
//!
//! - `Context`: interner, operator table, rule registry and primitive table,
//!   shared between sessions
//! - `Environment`: one session's scope stack, configuration and depth
//!   counter
//! - `RuleRegistry`: rule bases keyed by `(head, arity)`
//! - `PrimitiveTable`: built-in callables with their held positions and
//!   effects
//! - `Evaluator`: rewrites an expression to normal form
//!
//! The arithmetic operators are not primitives: the prelude defines them as
//! rules over the `Math*` primitives.

mod builtins;
mod config;
mod context;
mod environment;
pub mod errors;
mod evaluator;
mod prelude;
mod primitives;
mod print_handler;
pub mod registry;
mod shared;

#[cfg(test)]
mod test_helpers;

pub use config::{EvalConfig, DEFAULT_MAX_DEPTH, DEFAULT_PRECISION};
pub use context::Context;
pub use environment::{Environment, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use evaluator::{Evaluator, ScopedEvaluator};
pub use prelude::{load_prelude, PreludeError, PRELUDE};
pub use primitives::{Effect, Primitive, PrimitiveFn, PrimitiveTable};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use registry::{Arity, Held, Rule, RuleBase, RuleFlags, RuleRegistry};
pub use shared::{SharedMutableRegistry, SharedRegistry};
