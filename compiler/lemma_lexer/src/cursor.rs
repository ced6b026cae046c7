//! Byte cursor over statement text.
//!
//! The cursor reads bytes; `0x00` is returned past the end so scanning
//! predicates terminate without explicit bounds checks. Interior NUL bytes
//! are told apart from the end with [`Cursor::is_eof`].

/// Byte-level cursor over a source string.
///
/// The cursor is [`Copy`], so the lexer can snapshot it cheaply.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: u32,
}

impl<'a> Cursor<'a> {
    /// Cursor at byte `pos` of `source`.
    ///
    /// # Panics
    /// Panics in debug builds if the source is longer than `u32::MAX` bytes.
    pub fn new(source: &'a str, pos: u32) -> Self {
        debug_assert!(u32::try_from(source.len()).is_ok(), "source too large");
        Cursor { source, pos }
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.source.as_bytes().get(pos).copied().unwrap_or(0)
    }

    /// Byte at the current position, `0x00` at the end.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos as usize)
    }

    /// Byte one position ahead.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos as usize + 1)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Source text between two byte offsets.
    ///
    /// Offsets come from token boundaries, which always fall on ASCII bytes
    /// or on UTF-8 character starts; an invalid range yields `""`.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }

    /// Source text from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` holds for the current byte. `pred(0)` must be
    /// `false`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Width in bytes of the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// The character at the current position.
    pub fn current_char(&self) -> char {
        self.source
            .get(self.pos as usize..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }

    fn remaining(&self) -> &'a [u8] {
        self.source
            .as_bytes()
            .get(self.pos as usize..)
            .unwrap_or_default()
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by the source length, which fits in u32"
    )]
    fn jump(&mut self, offset: Option<usize>) -> bool {
        match offset {
            Some(off) => {
                self.pos += off as u32;
                true
            }
            None => {
                self.pos = self.source.len() as u32;
                false
            }
        }
    }

    /// Advance to the next `\n` or the end of input.
    pub fn eat_until_newline_or_eof(&mut self) {
        let found = memchr::memchr(b'\n', self.remaining());
        self.jump(found);
    }

    /// Advance past the next `*/`. Returns `false` (cursor at the end) when
    /// there is none.
    pub fn eat_block_comment_body(&mut self) -> bool {
        let found = memchr::memmem::find(self.remaining(), b"*/");
        if self.jump(found) {
            self.advance_n(2);
            true
        } else {
            false
        }
    }

    /// Advance to the next `"` or `\` inside a string literal and return it,
    /// or `0x00` at the end of input.
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let found = memchr::memchr2(b'"', b'\\', self.remaining());
        if self.jump(found) {
            self.current()
        } else {
            0
        }
    }
}
