//! The tokenizer proper.

use crate::{Cursor, LexError, LexResult, Token, TokenKind};
use lemma_ir::{is_operator_char, Number, OperatorTable, Span, StringInterner};

/// Pull-based tokenizer.
///
/// Produces one token per [`next_token`](Lexer::next_token) call. At the end
/// of input it keeps returning `Eof`. After an error the cursor is already
/// past the offending literal, so the next call continues normally.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        Self::at(source, 0, interner)
    }

    /// Lexer starting at byte `offset`.
    pub fn at(source: &'a str, offset: u32, interner: &'a StringInterner) -> Self {
        Lexer {
            cursor: Cursor::new(source, offset),
            interner,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> u32 {
        self.cursor.pos()
    }

    pub fn next_token(&mut self, operators: &OperatorTable) -> LexResult<Token> {
        self.skip_trivia()?;
        let start = self.cursor.pos();

        if self.cursor.is_eof() {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        }

        let kind = match self.cursor.current() {
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'"' => self.string(start)?,
            b'0'..=b'9' => self.number(start)?,
            b if b.is_ascii_alphabetic() => self.identifier(),
            b if is_operator_char(b) => self.operator(start, operators),
            _ => {
                let ch = self.cursor.current_char();
                self.cursor.advance_char();
                tracing::trace!(?ch, at = start, "skipping unexpected character");
                return Err(LexError::UnexpectedChar {
                    span: self.span_from(start),
                    ch,
                });
            }
        };

        Ok(Token::new(kind, self.span_from(start)))
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.cursor.pos())
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> LexResult<()> {
        loop {
            self.cursor.eat_while(|b| b.is_ascii_whitespace());
            match (self.cursor.current(), self.cursor.peek()) {
                (b'/', b'/') => self.cursor.eat_until_newline_or_eof(),
                (b'/', b'*') => {
                    let start = self.cursor.pos();
                    self.cursor.advance_n(2);
                    if !self.cursor.eat_block_comment_body() {
                        return Err(LexError::UnterminatedComment {
                            span: self.span_from(start),
                        });
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn identifier(&mut self) -> TokenKind {
        let start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_alphanumeric());
        TokenKind::Ident(self.interner.intern(self.cursor.slice_from(start)))
    }

    /// Split a symbol run at its longest registered prefix, or take the
    /// whole run when nothing matches.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "match length is bounded by the run, which fits in u32"
    )]
    fn operator(&mut self, start: u32, operators: &OperatorTable) -> TokenKind {
        let mut end = self.cursor;
        end.eat_while(is_operator_char);
        let run = self.cursor.slice(start, end.pos());

        let len = operators.longest_match(run).unwrap_or(run.len());
        self.cursor.advance_n(len as u32);
        TokenKind::Operator(self.interner.intern(&run[..len]))
    }

    /// `digits [ '.' digits ] [ ('e'|'E') ['+'|'-'] digits ]`.
    fn number(&mut self, start: u32) -> LexResult<TokenKind> {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut well_formed = true;

        // `1..n` is an integer followed by a `..` operator.
        if self.cursor.current() == b'.' && self.cursor.peek() != b'.' {
            self.cursor.advance();
            if self.cursor.current().is_ascii_digit() {
                self.cursor.eat_while(|b| b.is_ascii_digit());
            } else {
                well_formed = false;
            }
        }

        if well_formed && matches!(self.cursor.current(), b'e' | b'E') {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            if self.cursor.current().is_ascii_digit() {
                self.cursor.eat_while(|b| b.is_ascii_digit());
            } else {
                well_formed = false;
            }
        }

        // A literal glued to a word (`12abc`) is one bad token, not two.
        if self.cursor.current().is_ascii_alphanumeric() {
            well_formed = false;
        }

        if well_formed {
            if let Some(value) = Number::from_literal(self.cursor.slice_from(start)) {
                return Ok(TokenKind::Number(value));
            }
        }

        self.cursor.eat_while(|b| b.is_ascii_alphanumeric());
        let text = self.cursor.slice_from(start).to_owned();
        tracing::trace!(%text, "skipping malformed number");
        Err(LexError::InvalidNumber {
            span: self.span_from(start),
            text,
        })
    }

    fn string(&mut self, start: u32) -> LexResult<TokenKind> {
        self.cursor.advance();
        let mut content = String::new();
        let mut bad_escape = None;
        let mut chunk_start = self.cursor.pos();

        loop {
            let delim = self.cursor.skip_to_string_delim();
            content.push_str(self.cursor.slice_from(chunk_start));
            match delim {
                b'"' => {
                    self.cursor.advance();
                    break;
                }
                b'\\' => {
                    let escape_start = self.cursor.pos();
                    self.cursor.advance();
                    if self.cursor.is_eof() {
                        return Err(LexError::UnterminatedString {
                            span: self.span_from(start),
                        });
                    }
                    let escaped = self.cursor.current_char();
                    self.cursor.advance_char();
                    match escaped {
                        '"' => content.push('"'),
                        '\\' => content.push('\\'),
                        'n' => content.push('\n'),
                        't' => content.push('\t'),
                        'r' => content.push('\r'),
                        other => {
                            bad_escape.get_or_insert((self.span_from(escape_start), other));
                        }
                    }
                    chunk_start = self.cursor.pos();
                }
                _ => {
                    return Err(LexError::UnterminatedString {
                        span: self.span_from(start),
                    });
                }
            }
        }

        if let Some((span, escape)) = bad_escape {
            tracing::trace!(?escape, "skipping string with invalid escape");
            return Err(LexError::InvalidEscape { span, escape });
        }
        Ok(TokenKind::Str(self.interner.intern(&content)))
    }
}

/// Lex a whole source string, collecting every token (ending with `Eof`) and
/// every error.
pub fn tokenize(
    source: &str,
    operators: &OperatorTable,
    interner: &StringInterner,
) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source, interner);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    loop {
        match lexer.next_token(operators) {
            Ok(token) => {
                let done = token.kind == TokenKind::Eof;
                tokens.push(token);
                if done {
                    return (tokens, errors);
                }
            }
            Err(error) => errors.push(error),
        }
    }
}

#[cfg(test)]
mod tests;
