//! Token sets and resynchronisation after errors.

use lemma_lexer::TokenKind;

/// Set of token kinds as a bitset over [`TokenKind::discriminant_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u16);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub const fn with(self, kind: &TokenKind) -> Self {
        Self(self.0 | (1u16 << kind.discriminant_index()))
    }

    #[inline]
    pub const fn contains(&self, kind: &TokenKind) -> bool {
        (self.0 & (1u16 << kind.discriminant_index())) != 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens that end a top-level statement.
pub const STATEMENT_END: TokenSet = TokenSet::new()
    .with(&TokenKind::Semicolon)
    .with(&TokenKind::Eof);

/// Tokens that can never begin an operand.
pub const OPERAND_FOLLOW: TokenSet = TokenSet::new()
    .with(&TokenKind::RParen)
    .with(&TokenKind::RBrace)
    .with(&TokenKind::RBracket)
    .with(&TokenKind::Comma)
    .with(&TokenKind::Semicolon)
    .with(&TokenKind::Eof);

#[cfg(test)]
mod tests;
