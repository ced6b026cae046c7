//! Parser for Lemma.
//!
//! Turns statement text into expression trees by precedence climbing over
//! the live operator table. Statements end with `;` or end of input; after
//! an error the parser skips to the next `;` so the remaining statements
//! still parse.

mod error;
mod grammar;
pub mod lisp;
mod recovery;

pub use error::{ErrorContext, ParseError, ParseResult};
pub use recovery::{TokenSet, OPERAND_FOLLOW, STATEMENT_END};

use lemma_ir::{CoreNames, Expr, OperatorTable, Span, StringInterner};
use lemma_lexer::{Lexer, Token, TokenKind};

/// Statements parsed from a source text, plus the errors recovered from.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub statements: Vec<Expr>,
    pub errors: Vec<ParseError>,
}

/// Parser state.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    operators: &'a OperatorTable,
    names: CoreNames,
    /// One-token lookahead, filled lazily.
    current: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        operators: &'a OperatorTable,
        interner: &'a StringInterner,
    ) -> Self {
        Self::at(source, 0, operators, interner)
    }

    /// Parser that starts reading at byte `offset` of `source`.
    pub fn at(
        source: &'a str,
        offset: u32,
        operators: &'a OperatorTable,
        interner: &'a StringInterner,
    ) -> Self {
        Parser {
            lexer: Lexer::at(source, offset, interner),
            operators,
            names: CoreNames::new(interner),
            current: None,
        }
    }

    /// Byte offset of the first token not yet consumed.
    pub fn offset(&self) -> u32 {
        match &self.current {
            Some(token) => token.span.start,
            None => self.lexer.position(),
        }
    }

    /// Parse the next statement. Returns `Ok(None)` at end of input.
    ///
    /// On error the parser has already skipped past the next `;`, so calling
    /// again continues with the following statement.
    pub fn parse_statement(&mut self) -> ParseResult<Option<Expr>> {
        match self.statement() {
            Ok(statement) => Ok(statement),
            Err(error) => {
                self.synchronize();
                Err(error)
            }
        }
    }

    /// Parse every statement, collecting errors instead of stopping at them.
    pub fn parse_all(&mut self) -> ParseOutput {
        let mut output = ParseOutput::default();
        loop {
            match self.parse_statement() {
                Ok(Some(statement)) => output.statements.push(statement),
                Ok(None) => return output,
                Err(error) => output.errors.push(error),
            }
        }
    }

    fn statement(&mut self) -> ParseResult<Option<Expr>> {
        while self.peek()?.kind == TokenKind::Semicolon {
            self.bump()?;
        }
        if self.peek()?.kind == TokenKind::Eof {
            return Ok(None);
        }

        let expr = self.parse_expr(0)?;

        let next = self.peek()?.clone();
        match next.kind {
            TokenKind::Semicolon => {
                self.bump()?;
            }
            TokenKind::Eof => {}
            other => {
                return Err(ParseError::TrailingInput {
                    span: next.span,
                    found: other.describe(),
                });
            }
        }
        tracing::debug!(offset = self.offset(), "parsed statement");
        Ok(Some(expr))
    }

    /// Skip to just past the next `;`, or to end of input.
    ///
    /// Lex errors met while skipping are dropped; the statement is already
    /// reported.
    fn synchronize(&mut self) {
        loop {
            match self.bump() {
                Ok(token) if token.kind == TokenKind::Eof => {
                    self.current = Some(token);
                    return;
                }
                Ok(token) if STATEMENT_END.contains(&token.kind) => return,
                Ok(_) => {}
                Err(error) => tracing::trace!(%error, "dropping lex error during recovery"),
            }
        }
    }

    /// Look at the next token without consuming it.
    fn peek(&mut self) -> ParseResult<&Token> {
        let token = match self.current.take() {
            Some(token) => token,
            None => self.lexer.next_token(self.operators)?,
        };
        Ok(self.current.insert(token))
    }

    /// Consume and return the next token.
    fn bump(&mut self) -> ParseResult<Token> {
        match self.current.take() {
            Some(token) => Ok(token),
            None => Ok(self.lexer.next_token(self.operators)?),
        }
    }

    fn peek_kind(&mut self) -> ParseResult<TokenKind> {
        Ok(self.peek()?.kind.clone())
    }

    fn peek_span(&mut self) -> ParseResult<Span> {
        Ok(self.peek()?.span)
    }
}

/// Parse every statement in `source` with the given operator table.
pub fn parse(source: &str, operators: &OperatorTable, interner: &StringInterner) -> ParseOutput {
    Parser::new(source, operators, interner).parse_all()
}

#[cfg(test)]
mod tests;
