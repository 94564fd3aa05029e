//! Prefix tree over the fixed operator and punctuation lexemes.
//!
//! Lookup walks the tree one byte at a time and remembers the deepest terminal
//! node it passes, which makes `==` win over `=` without any backtracking.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::token::Kind;

/// Every operator lexeme the scanner recognizes, with its kind.
pub const OPERATORS: &[(&str, Kind)] = &[
    ("==", Kind::EqualEqual),
    ("!=", Kind::BangEqual),
    ("<=", Kind::LessEqual),
    (">=", Kind::GreaterEqual),
    ("(", Kind::LeftParen),
    (")", Kind::RightParen),
    ("{", Kind::LeftBrace),
    ("}", Kind::RightBrace),
    (",", Kind::Comma),
    (".", Kind::Dot),
    ("-", Kind::Minus),
    ("+", Kind::Plus),
    (";", Kind::Semicolon),
    ("*", Kind::Star),
    ("=", Kind::Equal),
    ("!", Kind::Bang),
    ("<", Kind::Less),
    (">", Kind::Greater),
    ("/", Kind::Slash),
];

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<u8, TrieNode>,
    /// Set iff the path from the root spells a complete lexeme.
    kind: Option<Kind>,
}

#[derive(Debug, Default)]
pub struct OperatorTrie {
    root: TrieNode,
}

impl OperatorTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared trie holding [`OPERATORS`], built on first use.
    pub fn operators() -> &'static OperatorTrie {
        static TRIE: OnceLock<OperatorTrie> = OnceLock::new();
        TRIE.get_or_init(|| OPERATORS.iter().copied().collect())
    }

    /// Registers `lexeme`. Inserting the same lexeme twice keeps the last kind.
    pub fn insert(&mut self, lexeme: &str, kind: Kind) {
        let mut node = &mut self.root;
        for byte in lexeme.bytes() {
            node = node.children.entry(byte).or_default();
        }
        node.kind = Some(kind);
    }

    /// Returns the length and kind of the longest registered lexeme that
    /// prefixes `text`, or `None` when no lexeme does.
    pub fn longest_match(&self, text: &str) -> Option<(usize, Kind)> {
        let mut node = &self.root;
        let mut best = None;

        for (index, byte) in text.bytes().enumerate() {
            match node.children.get(&byte) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(kind) = node.kind {
                best = Some((index + 1, kind));
            }
        }

        best
    }
}

impl<'s> FromIterator<(&'s str, Kind)> for OperatorTrie {
    fn from_iter<I: IntoIterator<Item = (&'s str, Kind)>>(iter: I) -> Self {
        let mut trie = OperatorTrie::new();
        for (lexeme, kind) in iter {
            trie.insert(lexeme, kind);
        }
        trie
    }
}
