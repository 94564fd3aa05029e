use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A lexical problem found while scanning. None of these stop the scan.
///
/// `Display` renders the exact `[line N] Error: ...` line written to stderr.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingError {
    #[error("[line {line}] Error: Unexpected character: {ch}")]
    UnexpectedCharacter { line: usize, ch: char },

    /// `line` is where the opening quote appeared.
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },

    #[error("[line {line}] Error: {reason}: {lexeme}")]
    MalformedNumber {
        line: usize,
        lexeme: String,
        reason: NumberFault,
    },
}

impl LexingError {
    pub fn line(&self) -> usize {
        match self {
            LexingError::UnexpectedCharacter { line, .. }
            | LexingError::UnterminatedString { line }
            | LexingError::MalformedNumber { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberFault {
    #[error("Number literal out of range")]
    OutOfRange,
    #[error("Invalid number format")]
    Invalid,
}

/// Failures of the command-line wrapper, as opposed to lexical errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid log filter {directive:?}: {source}")]
    LogFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Could not write token: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not write output: {0}")]
    Output(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_reference_messages() {
        let unexpected = LexingError::UnexpectedCharacter { line: 1, ch: '@' };
        assert_eq!(
            unexpected.to_string(),
            "[line 1] Error: Unexpected character: @"
        );

        let unterminated = LexingError::UnterminatedString { line: 4 };
        assert_eq!(unterminated.to_string(), "[line 4] Error: Unterminated string.");

        let range = LexingError::MalformedNumber {
            line: 2,
            lexeme: "1e999".to_string(),
            reason: NumberFault::OutOfRange,
        };
        assert_eq!(
            range.to_string(),
            "[line 2] Error: Number literal out of range: 1e999"
        );
    }

    #[test]
    fn invalid_number_has_its_own_message() {
        let invalid = LexingError::MalformedNumber {
            line: 7,
            lexeme: "1.2.3".to_string(),
            reason: NumberFault::Invalid,
        };
        assert_eq!(invalid.to_string(), "[line 7] Error: Invalid number format: 1.2.3");
        assert_eq!(invalid.line(), 7);
    }
}
