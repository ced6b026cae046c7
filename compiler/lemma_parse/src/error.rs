//! Parse errors.

use lemma_ir::Span;
use lemma_lexer::LexError;

/// What the parser was doing when an error occurred.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorContext {
    Statement,
    Expression,
    /// Right operand of an infix operator or operand of a prefix operator.
    Operand,
    FunctionCall,
    ListLiteral,
    Block,
    Group,
    Index,
    LispForm,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Statement => "a statement",
            Self::Expression => "an expression",
            Self::Operand => "an operand",
            Self::FunctionCall => "a function call",
            Self::ListLiteral => "a list literal",
            Self::Block => "a block",
            Self::Group => "a parenthesized expression",
            Self::Index => "an index expression",
            Self::LispForm => "a Lisp form",
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} while parsing {}", .context.description())]
    UnexpectedToken {
        span: Span,
        expected: &'static str,
        found: &'static str,
        context: ErrorContext,
    },

    #[error("unclosed `{open}` (opened at {open_span}), found {found}")]
    UnclosedDelimiter {
        span: Span,
        open_span: Span,
        open: char,
        found: &'static str,
    },

    #[error("missing operand while parsing {}", .context.description())]
    MissingOperand { span: Span, context: ErrorContext },

    #[error("unexpected {found} after a complete expression; expected `;` or end of input")]
    TrailingInput { span: Span, found: &'static str },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnclosedDelimiter { span, .. }
            | ParseError::MissingOperand { span, .. }
            | ParseError::TrailingInput { span, .. } => *span,
            ParseError::Lex(error) => error.span(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "E2001",
            ParseError::UnclosedDelimiter { .. } => "E2002",
            ParseError::MissingOperand { .. } => "E2003",
            ParseError::TrailingInput { .. } => "E2004",
            ParseError::Lex(error) => error.code(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
