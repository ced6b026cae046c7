//! Lexical errors.
//!
//! Every error carries the span of the offending text. The lexer has already
//! moved past that text when it reports the error, so lexing can resume.

use lemma_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },

    #[error("invalid escape `\\{escape}` in string literal")]
    InvalidEscape { span: Span, escape: char },

    #[error("invalid numeric literal `{text}`")]
    InvalidNumber { span: Span, text: String },

    #[error("unexpected character `{ch}`")]
    UnexpectedChar { span: Span, ch: char },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnterminatedComment { span }
            | LexError::InvalidEscape { span, .. }
            | LexError::InvalidNumber { span, .. }
            | LexError::UnexpectedChar { span, .. } => *span,
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            LexError::UnterminatedString { .. } => "E1001",
            LexError::UnterminatedComment { .. } => "E1002",
            LexError::InvalidEscape { .. } => "E1003",
            LexError::InvalidNumber { .. } => "E1004",
            LexError::UnexpectedChar { .. } => "E1005",
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
