//! Expression grammar: precedence climbing over the operator table.
//!
//! ```text
//! expr    := prefix (infix expr | postfix | '[' expr ']')*
//! prefix  := number | string | ident | ident '(' args ')' [body]
//!          | op expr | '(' expr ')' | '{' args '}' | '[' (expr ';')* ']'
//! ```
//!
//! A left-associative infix operator parses its right operand at `prec + 1`,
//! a right-associative one at `prec`. When operators of equal precedence but
//! different associativity meet, the earlier operator's associativity
//! decides.

use crate::{ErrorContext, ParseError, ParseResult, Parser, OPERAND_FOLLOW};
use lemma_ir::{Assoc, Expr, Fixity, Name, Span};
use lemma_lexer::TokenKind;

impl Parser<'_> {
    /// Parse an expression whose operators bind at least as tightly as
    /// `min_prec`.
    pub(crate) fn parse_expr(&mut self, min_prec: u32) -> ParseResult<Expr> {
        lemma_stack::ensure_sufficient_stack(|| self.parse_expr_inner(min_prec))
    }

    fn parse_expr_inner(&mut self, min_prec: u32) -> ParseResult<Expr> {
        let mut lhs = self.parse_prefix()?;

        loop {
            match self.peek_kind()? {
                TokenKind::LBracket => {
                    lhs = self.parse_index(lhs)?;
                }
                TokenKind::Operator(name) | TokenKind::Ident(name) => {
                    if let Some(info) = self.operators.lookup(name, Fixity::Postfix) {
                        if info.precedence < min_prec {
                            break;
                        }
                        self.bump()?;
                        lhs = Expr::call(name, [lhs]);
                        continue;
                    }
                    let Some(info) = self.operators.lookup(name, Fixity::Infix) else {
                        break;
                    };
                    if info.precedence < min_prec {
                        break;
                    }
                    self.bump()?;
                    let next_min = match info.assoc {
                        Assoc::Left => info.precedence + 1,
                        Assoc::Right => info.precedence,
                    };
                    let rhs = self.parse_operand_in(next_min, ErrorContext::Operand)?;
                    lhs = Expr::call(name, [lhs, rhs]);
                }
                _ => break,
            }
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::number(value)),
            TokenKind::Str(content) => Ok(Expr::string(content)),
            TokenKind::Ident(name) => self.parse_identifier(name),
            TokenKind::Operator(name) => self.parse_prefix_operator(name),
            TokenKind::LParen => {
                let inner = self.parse_operand_in(0, ErrorContext::Group)?;
                self.expect_close(TokenKind::RParen, '(', token.span)?;
                Ok(inner)
            }
            TokenKind::LBrace => {
                let items = self.parse_sequence(
                    TokenKind::RBrace,
                    '{',
                    token.span,
                    ErrorContext::ListLiteral,
                )?;
                Ok(Expr::call(self.names.list, items))
            }
            TokenKind::LBracket => self.parse_block(token.span),
            other => {
                let span = token.span;
                // Put the token back so recovery sees it.
                self.current = Some(lemma_lexer::Token::new(other, span));
                Err(ParseError::MissingOperand {
                    span,
                    context: ErrorContext::Expression,
                })
            }
        }
    }

    fn parse_operand_in(&mut self, min_prec: u32, context: ErrorContext) -> ParseResult<Expr> {
        let token = self.peek()?;
        if OPERAND_FOLLOW.contains(&token.kind) {
            return Err(ParseError::MissingOperand {
                span: token.span,
                context,
            });
        }
        self.parse_expr(min_prec)
    }

    /// Atom, call, bodied call, or word prefix operator.
    fn parse_identifier(&mut self, name: Name) -> ParseResult<Expr> {
        if self.peek_kind()? == TokenKind::LParen {
            let mut args = self.parse_call_args()?;
            if let Some(info) = self.operators.lookup(name, Fixity::Bodied) {
                if !OPERAND_FOLLOW.contains(&self.peek_kind()?) {
                    args.push(self.parse_expr(info.precedence)?);
                }
            }
            return Ok(Expr::call(name, args));
        }

        if let Some(info) = self.operators.lookup(name, Fixity::Prefix) {
            if self.starts_operand()? {
                let operand = self.parse_expr(info.precedence)?;
                return Ok(Expr::call(name, [operand]));
            }
        }

        Ok(Expr::atom(name))
    }

    /// A symbolic operator in operand position: a prefix application when
    /// registered as prefix and followed by an operand, a call when followed
    /// by an argument list, otherwise an atom.
    fn parse_prefix_operator(&mut self, name: Name) -> ParseResult<Expr> {
        let Some(info) = self.operators.lookup(name, Fixity::Prefix) else {
            // `+(a, b, c)`: an operator head with an explicit argument list.
            if self.peek_kind()? == TokenKind::LParen {
                let args = self.parse_call_args()?;
                return Ok(Expr::call(name, args));
            }
            return Ok(Expr::atom(name));
        };
        if !self.starts_operand()? {
            return Ok(Expr::atom(name));
        }

        let bare_number = matches!(self.peek_kind()?, TokenKind::Number(_));
        let operand = self.parse_expr(info.precedence)?;

        if name == self.names.minus && bare_number {
            if let Some(value) = operand.as_number() {
                return Ok(Expr::number(value.neg()));
            }
        }
        Ok(Expr::call(name, [operand]))
    }

    fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        let open = self.bump()?.span;
        self.parse_sequence(TokenKind::RParen, '(', open, ErrorContext::FunctionCall)
    }

    /// Whether the next token can begin an operand of a prefix operator.
    ///
    /// An infix-only operator cannot: in `f(-, x)` the `-` stays an atom,
    /// while in `- -x` the inner `-` is itself a prefix application.
    fn starts_operand(&mut self) -> ParseResult<bool> {
        let kind = self.peek_kind()?;
        if OPERAND_FOLLOW.contains(&kind) {
            return Ok(false);
        }
        if let TokenKind::Operator(next) = kind {
            let infix_only = self.operators.lookup(next, Fixity::Infix).is_some()
                && self.operators.lookup(next, Fixity::Prefix).is_none();
            let postfix = self.operators.lookup(next, Fixity::Postfix).is_some();
            return Ok(!(infix_only || postfix));
        }
        Ok(true)
    }

    /// `expr[index]` becomes `Nth(expr, index)`.
    fn parse_index(&mut self, target: Expr) -> ParseResult<Expr> {
        let open = self.bump()?.span;
        let index = self.parse_operand_in(0, ErrorContext::Index)?;
        self.expect_close(TokenKind::RBracket, '[', open)?;
        Ok(Expr::call(self.names.nth, [target, index]))
    }

    /// `[ s1; s2; ]` becomes `Prog(s1, s2)`. The final `;` is optional.
    fn parse_block(&mut self, open: Span) -> ParseResult<Expr> {
        let mut statements = Vec::new();
        loop {
            match self.peek_kind()? {
                TokenKind::RBracket => {
                    self.bump()?;
                    break;
                }
                TokenKind::Semicolon => {
                    self.bump()?;
                }
                TokenKind::Eof => {
                    return Err(self.unclosed('[', open)?);
                }
                _ => {
                    statements.push(self.parse_operand_in(0, ErrorContext::Block)?);
                    match self.peek_kind()? {
                        TokenKind::Semicolon | TokenKind::RBracket => {}
                        TokenKind::Eof => return Err(self.unclosed('[', open)?),
                        other => {
                            return Err(ParseError::UnexpectedToken {
                                span: self.peek_span()?,
                                expected: "`;` or `]`",
                                found: other.describe(),
                                context: ErrorContext::Block,
                            });
                        }
                    }
                }
            }
        }
        Ok(Expr::call(self.names.prog, statements))
    }

    /// Comma-separated expressions up to `close`; the opener is consumed.
    fn parse_sequence(
        &mut self,
        close: TokenKind,
        open_char: char,
        open: Span,
        context: ErrorContext,
    ) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.peek_kind()? == close {
            self.bump()?;
            return Ok(items);
        }
        loop {
            items.push(self.parse_operand_in(0, context)?);
            let kind = self.peek_kind()?;
            if kind == TokenKind::Comma {
                self.bump()?;
            } else if kind == close {
                self.bump()?;
                return Ok(items);
            } else if kind == TokenKind::Eof || kind == TokenKind::Semicolon {
                return Err(self.unclosed(open_char, open)?);
            } else {
                return Err(ParseError::UnexpectedToken {
                    span: self.peek_span()?,
                    expected: "`,` or closing delimiter",
                    found: kind.describe(),
                    context,
                });
            }
        }
    }

    fn expect_close(&mut self, close: TokenKind, open_char: char, open: Span) -> ParseResult<()> {
        if self.peek_kind()? == close {
            self.bump()?;
            Ok(())
        } else {
            Err(self.unclosed(open_char, open)?)
        }
    }

    fn unclosed(&mut self, open: char, open_span: Span) -> ParseResult<ParseError> {
        let token = self.peek()?;
        Ok(ParseError::UnclosedDelimiter {
            span: token.span,
            open_span,
            open,
            found: token.kind.describe(),
        })
    }
}
