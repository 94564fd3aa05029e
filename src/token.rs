use serde::Serialize;
use std::fmt;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Token<'a> {
    pub kind: Kind,
    pub lexeme: &'a str,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: Kind, lexeme: &'a str, line: usize) -> Self {
        Self {
            kind,
            lexeme,
            literal: None,
            line,
        }
    }

    pub fn with_literal(kind: Kind, lexeme: &'a str, literal: Literal, line: usize) -> Self {
        Self {
            kind,
            lexeme,
            literal: Some(literal),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(Kind::Eof, "", line)
    }
}

/// Renders the `<KIND> <lexeme> <literal>` line a downstream parser reads.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, "{}", literal),
            None => f.write_str("null"),
        }
    }
}

/// Decoded value carried by `STRING` and `NUMBER` tokens.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Str(String),
    Number(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Str(value) => f.write_str(value),
            Literal::Number(value) => f.write_str(&format_number(*value)),
        }
    }
}

/// Integral values always keep one decimal digit (`10` -> `10.0`); anything
/// else gets at most 15 significant digits with trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        return format!("{:.1}", value);
    }
    format_significant(value, 15)
}

// Same output as C's `%.<digits>g`.
fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    // Single-character punctuation
    LeftParen,   // (
    RightParen,  // )
    LeftBrace,   // {
    RightBrace,  // }
    Comma,       // ,
    Dot,         // .
    Minus,       // -
    Plus,        // +
    Semicolon,   // ;
    Star,        // *
    Slash,       // /

    // One or two character operators
    Bang,         // !
    BangEqual,    // !=
    Equal,        // =
    EqualEqual,   // ==
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=

    // Keywords
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // Identifiers and literals
    Identifier,
    String,
    Number,

    Eof, // End of file marker
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::LeftParen => "LEFT_PAREN",
            Kind::RightParen => "RIGHT_PAREN",
            Kind::LeftBrace => "LEFT_BRACE",
            Kind::RightBrace => "RIGHT_BRACE",
            Kind::Comma => "COMMA",
            Kind::Dot => "DOT",
            Kind::Minus => "MINUS",
            Kind::Plus => "PLUS",
            Kind::Semicolon => "SEMICOLON",
            Kind::Star => "STAR",
            Kind::Slash => "SLASH",
            Kind::Bang => "BANG",
            Kind::BangEqual => "BANG_EQUAL",
            Kind::Equal => "EQUAL",
            Kind::EqualEqual => "EQUAL_EQUAL",
            Kind::Less => "LESS",
            Kind::LessEqual => "LESS_EQUAL",
            Kind::Greater => "GREATER",
            Kind::GreaterEqual => "GREATER_EQUAL",
            Kind::And => "AND",
            Kind::Class => "CLASS",
            Kind::Else => "ELSE",
            Kind::False => "FALSE",
            Kind::For => "FOR",
            Kind::Fun => "FUN",
            Kind::If => "IF",
            Kind::Nil => "NIL",
            Kind::Or => "OR",
            Kind::Print => "PRINT",
            Kind::Return => "RETURN",
            Kind::Super => "SUPER",
            Kind::This => "THIS",
            Kind::True => "TRUE",
            Kind::Var => "VAR",
            Kind::While => "WHILE",
            Kind::Identifier => "IDENTIFIER",
            Kind::String => "STRING",
            Kind::Number => "NUMBER",
            Kind::Eof => "EOF",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Kind::And
                | Kind::Class
                | Kind::Else
                | Kind::False
                | Kind::For
                | Kind::Fun
                | Kind::If
                | Kind::Nil
                | Kind::Or
                | Kind::Print
                | Kind::Return
                | Kind::Super
                | Kind::This
                | Kind::True
                | Kind::Var
                | Kind::While
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_renders_with_empty_lexeme() {
        assert_eq!(Token::eof(3).to_string(), "EOF  null");
    }

    #[test]
    fn operator_renders_null_literal() {
        let token = Token::new(Kind::BangEqual, "!=", 1);
        assert_eq!(token.to_string(), "BANG_EQUAL != null");
    }

    #[test]
    fn string_renders_raw_contents() {
        let token = Token::with_literal(
            Kind::String,
            "\"hi there\"",
            Literal::Str("hi there".to_string()),
            1,
        );
        assert_eq!(token.to_string(), "STRING \"hi there\" hi there");
    }

    #[test]
    fn integral_numbers_keep_one_decimal() {
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(10.0), "10.0");
        assert_eq!(format_number(1234.0), "1234.0");
        assert_eq!(format_number(1e20), "100000000000000000000.0");
    }

    #[test]
    fn fractional_numbers_trim_trailing_zeros() {
        assert_eq!(format_number(123.45), "123.45");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.25), "1.25");
    }

    #[test]
    fn fractional_numbers_cap_at_fifteen_significant_digits() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.23456789012345678), "1.23456789012346");
    }

    #[test]
    fn tiny_fractions_switch_to_exponent_form() {
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn kind_names_match_serde_names() {
        for kind in [Kind::LeftParen, Kind::GreaterEqual, Kind::Eof, Kind::Identifier] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn keyword_kinds_are_flagged() {
        assert!(Kind::While.is_keyword());
        assert!(!Kind::Identifier.is_keyword());
        assert!(!Kind::EqualEqual.is_keyword());
    }
}
