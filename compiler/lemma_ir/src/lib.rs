//! Lemma IR - expression tree and shared tables.
//!
//! This crate holds the data every other layer of Lemma works on:
//! - Interned names (`Name`, `StringInterner`)
//! - Spans for statement text
//! - The numeric tower (`Number`)
//! - The shared, immutable expression tree (`Expr`)
//! - The operator/precedence table
//! - The generic-value contract for opaque runtime objects
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: atoms, operators and string contents are `Name(u32)`
//! - **Share Everything**: `Expr` is an `Arc`; rewriting rebuilds only the
//!   spine it changes

mod core_names;
mod expr;
mod generic;
mod interner;
mod name;
mod number;
mod operators;
mod span;

pub use core_names::CoreNames;
pub use expr::{Expr, ExprKind, IrError};
pub use generic::{ArrayObject, GenericHandle, GenericObject};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use number::{NumberError, Number, NumericContext, Real, MAX_DECIMAL_SHIFT, MAX_PRECISION};
pub use operators::{is_operator_char, Assoc, Fixity, OpInfo, OperatorTable};
pub use span::{Span, SpanError};

/// Re-exported so downstream crates can build numbers without naming the
/// num crates themselves.
pub use num_bigint::BigInt;
pub use num_rational::BigRational;
