//! Tokenizer for Lemma expressions.
//!
//! The lexer is pulled one token at a time by the parser and consults the
//! operator table on every symbol run, so operators registered by one
//! statement are honoured when the next statement is lexed.

mod cursor;
mod lex_error;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use lex_error::{LexError, LexResult};
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
