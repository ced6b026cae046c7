//! Stack growth for deep recursion.
//!
//! The parser recurses once per nesting level and the evaluator once per
//! rewrite step. The evaluator bounds its own depth with a configurable
//! counter (`max_depth`); this crate makes sure the OS stack is never the
//! thing that gives out first, so exceeding the limit is reported as an
//! error instead of aborting the process.
//!
//! - **Native targets**: `stacker` allocates a fresh segment when the red
//!   zone is reached.
//! - **WASM targets**: plain call (the runtime owns the stack).

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated segment (2MB).
///
/// A rewrite step keeps matcher state, bindings and a scope guard alive on
/// the stack, so segments are larger than a plain parser would need.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than [`RED_ZONE`] remains.
///
/// ```text
/// fn eval(&mut self, expr: &Expr) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
