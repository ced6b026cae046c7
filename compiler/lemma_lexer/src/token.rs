//! Tokens produced by the lexer.

use lemma_ir::{Name, Number, Span};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(Number),
    /// String literal with escapes already processed.
    Str(Name),
    /// Letters and digits, starting with a letter. Word operators such as
    /// `And` lex as identifiers; the parser consults the operator table.
    Ident(Name),
    /// Run of operator characters, registered or not.
    Operator(Name),
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Eof,
}

impl TokenKind {
    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Operator(_) => "operator",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Eof => "end of input",
        }
    }

    /// Dense index of the variant, for bitset token sets.
    pub const fn discriminant_index(&self) -> u8 {
        match self {
            TokenKind::Number(_) => 0,
            TokenKind::Str(_) => 1,
            TokenKind::Ident(_) => 2,
            TokenKind::Operator(_) => 3,
            TokenKind::LParen => 4,
            TokenKind::RParen => 5,
            TokenKind::LBrace => 6,
            TokenKind::RBrace => 7,
            TokenKind::LBracket => 8,
            TokenKind::RBracket => 9,
            TokenKind::Comma => 10,
            TokenKind::Semicolon => 11,
            TokenKind::Eof => 12,
        }
    }

    /// Name carried by identifier and operator tokens.
    pub fn name(&self) -> Option<Name> {
        match self {
            TokenKind::Ident(name) | TokenKind::Operator(name) => Some(*name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
