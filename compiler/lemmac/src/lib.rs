//! Lemma sessions: parse, evaluate, render.
//!
//! A [`Session`] couples a shared [`Context`] (operators, rules, primitives)
//! with one [`Environment`]. Source text is handled one statement at a time:
//! each statement is parsed against the operator table as it stands after
//! the previous statement ran, so `Infix("##", 60); a ## b` works in a
//! single call.
//!
//! ```text
//! source ──► Parser::at(offset) ──► Expr ──► Evaluator ──► Expr ──► render
//!                ▲                                 │
//!                └──── operator table (RwLock) ◄───┘  Infix, Prefix, ...
//! ```

mod session;

pub use session::{Session, SessionError};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber for debug output.
///
/// Only takes effect when `RUST_LOG` is set, e.g.
/// `RUST_LOG=lemma_eval=debug` for rule dispatch or `RUST_LOG=trace` for
/// every evaluation step as a tree. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true);
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(tree)
                .try_init();
        }
    });
}
