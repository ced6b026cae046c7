//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured category; factory functions are the
//! public way to build errors. Each kind has a stable `E6xxx` code.
//!
//! Unbound variables, missing rules and inconsistent pattern bindings are
//! not errors: they leave the expression in normal form.

use lemma_ir::{Expr, ExprKind, IrError, NumberError};

/// Result of evaluation.
pub type EvalResult<T = Expr> = Result<T, EvalError>;

/// Frames kept on an error's backtrace; deeper frames are dropped.
const MAX_BACKTRACE: usize = 32;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("maximum evaluation depth ({depth}) exceeded")]
    RecursionLimitExceeded { depth: usize },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("{name}: {message}")]
    Primitive { name: String, message: String },

    #[error("{name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("{name} is not allowed in secure mode")]
    SecureViolation { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("argument is not a list")]
    NotAList,

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("invalid rule: {message}")]
    InvalidRule { message: String },

    #[error("check failed: {message}")]
    CheckFailed { message: String },
}

impl EvalErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            EvalErrorKind::RecursionLimitExceeded { .. } => "E6001",
            EvalErrorKind::TypeError { .. } => "E6002",
            EvalErrorKind::Primitive { .. } => "E6003",
            EvalErrorKind::ArityMismatch { .. } => "E6004",
            EvalErrorKind::SecureViolation { .. } => "E6005",
            EvalErrorKind::DivisionByZero => "E6006",
            EvalErrorKind::NotAList => "E6007",
            EvalErrorKind::IndexOutOfRange { .. } => "E6008",
            EvalErrorKind::InvalidRule { .. } => "E6009",
            EvalErrorKind::CheckFailed { .. } => "E6010",
        }
    }
}

/// Evaluation error with the chain of heads it unwound through.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost frame first.
    pub backtrace: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: Vec::new(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Record that the error passed through `frame`.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        if self.backtrace.len() < MAX_BACKTRACE {
            self.backtrace.push(frame.into());
        }
        self
    }

    /// Backtrace as `a <- b <- c`, innermost first.
    pub fn backtrace_display(&self) -> String {
        self.backtrace.join(" <- ")
    }
}

impl From<IrError> for EvalError {
    fn from(error: IrError) -> Self {
        match error {
            IrError::NotAList => not_a_list(),
            IrError::IndexOutOfRange { index, len } => {
                index_out_of_range(i64::try_from(index).unwrap_or(i64::MAX), len)
            }
        }
    }
}

/// Short description of an expression's kind for type errors.
pub fn describe(expr: &Expr) -> &'static str {
    match expr.kind() {
        ExprKind::Atom(_) => "atom",
        ExprKind::Str(_) => "string",
        ExprKind::Number(_) => "number",
        ExprKind::List(_) => "list",
        ExprKind::Generic(_) => "generic object",
    }
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { depth })
}

#[cold]
pub fn type_error(expected: &str, got: &Expr) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeError {
        expected: expected.to_string(),
        got: describe(got).to_string(),
    })
}

#[cold]
pub fn primitive_error(name: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Primitive {
        name: name.to_string(),
        message: message.into(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: impl Into<String>, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn secure_violation(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SecureViolation {
        name: name.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn not_a_list() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAList)
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, len })
}

#[cold]
pub fn invalid_rule(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidRule {
        message: message.into(),
    })
}

#[cold]
pub fn check_failed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CheckFailed {
        message: message.into(),
    })
}

/// Map a numeric failure inside primitive `name`.
#[cold]
pub fn number_error(name: &str, error: &NumberError) -> EvalError {
    match error {
        NumberError::DivisionByZero => division_by_zero(),
        other => primitive_error(name, other.to_string()),
    }
}
