//! Reader for the fully parenthesised Lisp form.
//!
//! `(f a b)` reads as `f(a, b)`; atoms, numbers and strings lex as in infix
//! text. The reader uses an empty operator table, so every symbol run is a
//! single atom: `(+ 1 2)` has head `+`.

use crate::{ErrorContext, ParseError, ParseResult};
use lemma_ir::{Expr, OperatorTable, Span, StringInterner};
use lemma_lexer::{Lexer, Token, TokenKind};

pub struct LispReader<'a> {
    lexer: Lexer<'a>,
    operators: OperatorTable,
}

impl<'a> LispReader<'a> {
    pub fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        LispReader {
            lexer: Lexer::new(source, interner),
            operators: OperatorTable::new(),
        }
    }

    /// Read the next form. Returns `Ok(None)` at end of input.
    pub fn read(&mut self) -> ParseResult<Option<Expr>> {
        let token = self.next()?;
        if token.kind == TokenKind::Eof {
            return Ok(None);
        }
        self.form(token).map(Some)
    }

    /// Read every form in the input.
    pub fn read_all(&mut self) -> ParseResult<Vec<Expr>> {
        let mut forms = Vec::new();
        while let Some(form) = self.read()? {
            forms.push(form);
        }
        Ok(forms)
    }

    fn next(&mut self) -> ParseResult<Token> {
        Ok(self.lexer.next_token(&self.operators)?)
    }

    fn form(&mut self, token: Token) -> ParseResult<Expr> {
        lemma_stack::ensure_sufficient_stack(|| match token.kind {
            TokenKind::Number(value) => Ok(Expr::number(value)),
            TokenKind::Str(content) => Ok(Expr::string(content)),
            TokenKind::Ident(name) | TokenKind::Operator(name) => Ok(Expr::atom(name)),
            TokenKind::LParen => self.list(token.span),
            other => Err(ParseError::UnexpectedToken {
                span: token.span,
                expected: "an atom or `(`",
                found: other.describe(),
                context: ErrorContext::LispForm,
            }),
        })
    }

    fn list(&mut self, open: Span) -> ParseResult<Expr> {
        let mut items = Vec::new();
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::RParen => return Ok(Expr::list(items)),
                TokenKind::Eof => {
                    return Err(ParseError::UnclosedDelimiter {
                        span: token.span,
                        open_span: open,
                        open: '(',
                        found: TokenKind::Eof.describe(),
                    });
                }
                _ => items.push(self.form(token)?),
            }
        }
    }
}

/// Read all Lisp forms in `source`.
pub fn read_lisp(source: &str, interner: &StringInterner) -> ParseResult<Vec<Expr>> {
    LispReader::new(source, interner).read_all()
}
