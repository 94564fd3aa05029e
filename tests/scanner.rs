use loxscan::trie::OPERATORS;
use loxscan::{scan, Kind, LexingError, Literal};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn render(source: &str) -> Vec<String> {
    scan(source).tokens.iter().map(ToString::to_string).collect()
}

#[test]
fn every_operator_prefix_pair_scans_as_one_token() {
    for (long, long_kind) in OPERATORS {
        for (short, _) in OPERATORS {
            if long.len() > short.len() && long.starts_with(short) {
                let output = scan(long);
                assert_eq!(output.tokens.len(), 2, "{long} should be one token");
                assert_eq!(output.tokens[0].kind, *long_kind);
                assert_eq!(output.tokens[0].lexeme, *long);
            }
        }
    }
}

#[test]
fn small_program() {
    let source = "fun add(a, b) {\n  // sum\n  return a + b;\n}\nprint add(1, 2.5) >= 3;\n";
    assert_eq!(
        render(source),
        vec![
            "FUN fun null",
            "IDENTIFIER add null",
            "LEFT_PAREN ( null",
            "IDENTIFIER a null",
            "COMMA , null",
            "IDENTIFIER b null",
            "RIGHT_PAREN ) null",
            "LEFT_BRACE { null",
            "RETURN return null",
            "IDENTIFIER a null",
            "PLUS + null",
            "IDENTIFIER b null",
            "SEMICOLON ; null",
            "RIGHT_BRACE } null",
            "PRINT print null",
            "IDENTIFIER add null",
            "LEFT_PAREN ( null",
            "NUMBER 1 1.0",
            "COMMA , null",
            "NUMBER 2.5 2.5",
            "RIGHT_PAREN ) null",
            "GREATER_EQUAL >= null",
            "NUMBER 3 3.0",
            "SEMICOLON ; null",
            "EOF  null",
        ]
    );
    let output = scan(source);
    assert!(!output.had_error());
    assert_eq!(output.tokens.last().map(|t| t.line), Some(6));
}

#[test]
fn all_errors_in_one_pass() {
    let output = scan("a @ b\n\"never closed\n#");
    assert_eq!(
        output.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "[line 1] Error: Unexpected character: @",
            "[line 2] Error: Unterminated string.",
        ]
    );
    assert_eq!(
        output.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Kind::Identifier, Kind::Identifier, Kind::Eof]
    );
}

proptest! {
    #[test]
    fn exact_integers_render_with_one_decimal(n in 0u64..(1u64 << 53)) {
        let source = n.to_string();
        let output = scan(&source);
        prop_assert!(!output.had_error());
        prop_assert_eq!(output.tokens.len(), 2);
        prop_assert_eq!(&render(&source)[0], &format!("NUMBER {n} {n}.0"));
    }

    #[test]
    fn plain_strings_round_trip(s in "[^\"\n]*") {
        let source = format!("\"{}\"", s);
        let output = scan(&source);
        prop_assert!(!output.had_error());
        prop_assert_eq!(output.tokens.len(), 2);
        prop_assert_eq!(output.tokens[0].kind, Kind::String);
        prop_assert_eq!(output.tokens[0].literal.clone(), Some(Literal::Str(s)));
    }

    #[test]
    fn unterminated_string_reports_opening_line(k in 0usize..50, tail in "[a-z\n]*") {
        let source = format!("{}\"{}", "\n".repeat(k), tail);
        let output = scan(&source);
        prop_assert_eq!(output.errors, vec![LexingError::UnterminatedString { line: k + 1 }]);
    }

    #[test]
    fn identifiers_are_single_tokens(s in "[a-zA-Z_][a-zA-Z0-9_]{0,20}") {
        let output = scan(&s);
        prop_assert_eq!(output.tokens.len(), 2);
        prop_assert!(output.tokens[0].kind == Kind::Identifier || output.tokens[0].kind.is_keyword());
    }

    #[test]
    fn scanning_is_deterministic(source in "\\PC{0,64}") {
        prop_assert_eq!(scan(&source), scan(&source));
    }

    #[test]
    fn always_ends_with_eof(source in "\\PC{0,64}") {
        let output = scan(&source);
        prop_assert_eq!(output.tokens.last().map(|t| t.kind), Some(Kind::Eof));
    }
}
