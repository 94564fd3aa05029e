//! The scan driver and its matcher pipeline.
//!
//! At each position the matchers run in a fixed order and the first one that
//! recognizes its construct consumes it. The order resolves every overlap in
//! the grammar: `//` must be seen as a comment before `/` reaches the operator
//! trie, and an identifier run must be isolated before the keyword table is
//! consulted.

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{LexingError, NumberFault};
use crate::keywords;
use crate::token::{Kind, Literal, Token};
use crate::trie::OperatorTrie;

/// Receives tokens and diagnostics in source order as the scan produces them.
pub trait TokenSink<'a> {
    fn token(&mut self, token: Token<'a>);
    fn error(&mut self, error: LexingError);
}

/// Everything one scan produced, collected in memory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanOutput<'a> {
    pub tokens: Vec<Token<'a>>,
    pub errors: Vec<LexingError>,
}

impl ScanOutput<'_> {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<'a> TokenSink<'a> for ScanOutput<'a> {
    fn token(&mut self, token: Token<'a>) {
        self.tokens.push(token);
    }

    fn error(&mut self, error: LexingError) {
        self.errors.push(error);
    }
}

/// Scans `source` to completion and collects the result.
pub fn scan(source: &str) -> ScanOutput<'_> {
    let mut output = ScanOutput::default();
    Lexer::new(source).scan_into(&mut output);
    output
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    operators: &'static OperatorTrie,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            operators: OperatorTrie::operators(),
        }
    }

    /// Runs the scan, feeding `sink`, and returns whether any lexical error
    /// was reported. The last token is always `EOF`.
    pub fn scan_into<S: TokenSink<'a>>(mut self, sink: &mut S) -> bool {
        debug!(bytes = self.cursor.source().len(), "scan started");

        while !self.cursor.is_eof() {
            if self.step(sink) {
                continue;
            }
            // Nothing recognized this position; report it and move on by
            // exactly one character so the loop always makes progress.
            let line = self.cursor.line();
            if let Some(ch) = self.cursor.bump_char() {
                self.report(sink, LexingError::UnexpectedCharacter { line, ch });
            }
        }

        let line = self.cursor.line();
        self.emit(sink, Token::eof(line));
        let had_error = self.cursor.had_error();
        debug!(lines = line, had_error, "scan finished");
        had_error
    }

    fn step<S: TokenSink<'a>>(&mut self, sink: &mut S) -> bool {
        self.scan_newline()
            || self.scan_whitespace()
            || self.scan_comment()
            || self.scan_string(sink)
            || self.scan_number(sink)
            || self.scan_identifier(sink)
            || self.scan_operator(sink)
    }

    fn emit<S: TokenSink<'a>>(&self, sink: &mut S, token: Token<'a>) {
        trace!(kind = %token.kind, lexeme = token.lexeme, line = token.line, "token");
        sink.token(token);
    }

    fn report<S: TokenSink<'a>>(&mut self, sink: &mut S, error: LexingError) {
        debug!(line = error.line(), "{}", error);
        self.cursor.flag_error();
        sink.error(error);
    }

    fn scan_newline(&mut self) -> bool {
        if self.cursor.current() != Some(b'\n') {
            return false;
        }
        self.cursor.new_line();
        self.cursor.advance(1);
        true
    }

    fn scan_whitespace(&mut self) -> bool {
        match self.cursor.current() {
            Some(byte) if is_blank(byte) => {
                self.cursor.advance(1);
                true
            }
            _ => false,
        }
    }

    fn scan_comment(&mut self) -> bool {
        let rest = self.cursor.remaining();
        if !rest.starts_with("//") {
            return false;
        }
        // The newline itself is left for `scan_newline`.
        let len = rest.find('\n').unwrap_or(rest.len());
        self.cursor.advance(len);
        true
    }

    fn scan_string<S: TokenSink<'a>>(&mut self, sink: &mut S) -> bool {
        if self.cursor.current() != Some(b'"') {
            return false;
        }

        let start = self.cursor.offset();
        let start_line = self.cursor.line();
        self.cursor.advance(1);

        loop {
            match self.cursor.current() {
                None => {
                    self.report(sink, LexingError::UnterminatedString { line: start_line });
                    return true;
                }
                Some(b'"') => break,
                Some(b'\n') => {
                    self.cursor.new_line();
                    self.cursor.advance(1);
                }
                Some(_) => self.cursor.advance(1),
            }
        }

        let contents = self.cursor.slice_from(start + 1);
        self.cursor.advance(1);
        let lexeme = self.cursor.slice_from(start);
        let literal = Literal::Str(contents.to_string());
        self.emit(sink, Token::with_literal(Kind::String, lexeme, literal, start_line));
        true
    }

    fn scan_number<S: TokenSink<'a>>(&mut self, sink: &mut S) -> bool {
        if !self.cursor.current().is_some_and(|b| b.is_ascii_digit()) {
            return false;
        }

        let start = self.cursor.offset();
        self.cursor.eat_while(|b| b.is_ascii_digit());

        // `1.` is a number followed by a DOT; the dot only belongs to the
        // number when a digit follows it.
        if self.cursor.current() == Some(b'.')
            && self.cursor.peek_nth(1).is_some_and(|b| b.is_ascii_digit())
        {
            self.cursor.advance(1);
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }

        let lexeme = self.cursor.slice_from(start);
        match parse_number(lexeme) {
            Ok(value) => {
                let line = self.cursor.line();
                let token = Token::with_literal(Kind::Number, lexeme, Literal::Number(value), line);
                self.emit(sink, token);
            }
            Err(reason) => {
                let error = LexingError::MalformedNumber {
                    line: self.cursor.line(),
                    lexeme: lexeme.to_string(),
                    reason,
                };
                self.report(sink, error);
            }
        }
        true
    }

    fn scan_identifier<S: TokenSink<'a>>(&mut self, sink: &mut S) -> bool {
        if !self.cursor.current().is_some_and(is_ident_start) {
            return false;
        }

        let start = self.cursor.offset();
        self.cursor.eat_while(is_ident_continue);
        let lexeme = self.cursor.slice_from(start);
        let kind = keywords::lookup(lexeme).unwrap_or(Kind::Identifier);
        let line = self.cursor.line();
        self.emit(sink, Token::new(kind, lexeme, line));
        true
    }

    fn scan_operator<S: TokenSink<'a>>(&mut self, sink: &mut S) -> bool {
        let rest = self.cursor.remaining();
        let Some((len, kind)) = self.operators.longest_match(rest) else {
            return false;
        };
        let line = self.cursor.line();
        self.emit(sink, Token::new(kind, &rest[..len], line));
        self.cursor.advance(len);
        true
    }
}

fn parse_number(lexeme: &str) -> Result<f64, NumberFault> {
    let value: f64 = lexeme.parse().map_err(|_| NumberFault::Invalid)?;
    // Subnormal results, and nonzero lexemes that collapse to 0.0, are
    // underflows.
    let nonzero = lexeme.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let underflowed = nonzero && value.abs() < f64::MIN_POSITIVE;
    if value.is_infinite() || underflowed {
        return Err(NumberFault::OutOfRange);
    }
    Ok(value)
}

// Whitespace other than '\n': space, tab, carriage return, vertical tab and
// form feed.
fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | 0x0b | 0x0c)
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
