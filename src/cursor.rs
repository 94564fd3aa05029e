//! Mutable scanning state shared by every matcher for one step at a time.

#[derive(Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    had_error: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            had_error: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Unconsumed input from the current offset.
    pub fn remaining(&self) -> &'a str {
        self.source.get(self.offset..).unwrap_or("")
    }

    pub fn current(&self) -> Option<u8> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.offset + n).copied()
    }

    /// Source text from `start` up to the current offset.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.offset]
    }

    /// Moves forward `n` bytes, clamped to the end of input.
    pub fn advance(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.source.len());
    }

    /// Consumes bytes while `pred` holds and returns how many were consumed.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let count = self
            .remaining()
            .bytes()
            .take_while(|&byte| pred(byte))
            .count();
        self.offset += count;
        count
    }

    /// Consumes the whole character under the cursor, never splitting a
    /// multi-byte sequence.
    pub fn bump_char(&mut self) -> Option<char> {
        let ch = self.remaining().chars().next()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    pub fn new_line(&mut self) {
        self.line += 1;
    }

    pub fn flag_error(&mut self) {
        self.had_error = true;
    }
}
