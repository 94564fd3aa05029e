use crate::token::Kind;

/// Looks up a reserved word. Only called on an already isolated
/// identifier-shaped run, so no prefix matching is needed.
pub fn lookup(ident: &str) -> Option<Kind> {
    match ident {
        "and" => Some(Kind::And),
        "class" => Some(Kind::Class),
        "else" => Some(Kind::Else),
        "false" => Some(Kind::False),
        "for" => Some(Kind::For),
        "fun" => Some(Kind::Fun),
        "if" => Some(Kind::If),
        "nil" => Some(Kind::Nil),
        "or" => Some(Kind::Or),
        "print" => Some(Kind::Print),
        "return" => Some(Kind::Return),
        "super" => Some(Kind::Super),
        "this" => Some(Kind::This),
        "true" => Some(Kind::True),
        "var" => Some(Kind::Var),
        "while" => Some(Kind::While),
        _ => None,
    }
}
