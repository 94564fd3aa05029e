//! Lexical scanner for the Lox scripting language.
//!
//! [`scan`] turns source text into classified tokens plus every lexical
//! error found along the way; [`Lexer::scan_into`] streams the same output
//! into a [`TokenSink`].

pub mod config;
pub mod cursor;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod token;
pub mod trie;

pub use error::{CliError, LexingError, NumberFault};
pub use lexer::{scan, Lexer, ScanOutput, TokenSink};
pub use token::{Kind, Literal, Token};
