use crate::{
    ast::{Modifier, Scope},
    runtime::value::Value,
    syntax::token::{TokenKind, TokenValue},
};

/// Looks up an identifier in the table of reserved words.
///
/// # Returns
/// - `Some((kind, value))`: The token the word stands for.
/// - `None`: If the word is an ordinary identifier.
///
/// # Example
/// ```
/// use addyscript::syntax::{keyword::lookup, token::TokenKind};
///
/// assert_eq!(lookup("foreach").map(|(kind, _)| kind), Some(TokenKind::ForEach));
/// assert_eq!(lookup("and").map(|(kind, _)| kind), Some(TokenKind::DoubleAmpersand));
/// assert!(lookup("total").is_none());
/// ```
#[must_use]
pub fn lookup(word: &str) -> Option<(TokenKind, TokenValue)> {
    if let Some(kind) = keyword(word) {
        return Some((kind, TokenValue::None));
    }
    let value = match word {
        "null" => (TokenKind::Null, TokenValue::Literal(Value::Void)),
        "true" => (TokenKind::Boolean, TokenValue::Literal(Value::Boolean(true))),
        "false" => (TokenKind::Boolean, TokenValue::Literal(Value::Boolean(false))),
        _ if is_type_name(word) => (TokenKind::TypeName, TokenValue::Text(word.to_string())),
        _ => {
            if let Some(scope) = Scope::from_name(word) {
                (TokenKind::Scope, TokenValue::Scope(scope))
            } else {
                (TokenKind::Modifier, TokenValue::Modifier(Modifier::from_name(word)?))
            }
        },
    };
    Some(value)
}

fn keyword(word: &str) -> Option<TokenKind> {
    Some(match word {
        "typeof" => TokenKind::TypeOf,
        "is" => TokenKind::Is,
        "not" => TokenKind::Not,
        "startswith" => TokenKind::StartsWith,
        "endswith" => TokenKind::EndsWith,
        "contains" => TokenKind::Contains,
        "matches" => TokenKind::Matches,
        "with" => TokenKind::With,
        "import" => TokenKind::Import,
        "as" => TokenKind::As,
        "const" => TokenKind::Const,
        "var" => TokenKind::Var,
        "let" => TokenKind::Let,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "default" => TokenKind::Default,
        "for" => TokenKind::For,
        "foreach" => TokenKind::ForEach,
        "in" => TokenKind::In,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "continue" => TokenKind::Continue,
        "break" => TokenKind::Break,
        "goto" => TokenKind::Goto,
        "yield" => TokenKind::Yield,
        "return" => TokenKind::Return,
        "throw" => TokenKind::Throw,
        "function" => TokenKind::Function,
        "extern" => TokenKind::Extern,
        "ref" => TokenKind::Ref,
        "params" => TokenKind::Params,
        "class" => TokenKind::Class,
        "constructor" => TokenKind::Constructor,
        "property" => TokenKind::Property,
        "operator" => TokenKind::Operator,
        "event" => TokenKind::Event,
        "this" => TokenKind::This,
        "super" => TokenKind::Super,
        "new" => TokenKind::New,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "finally" => TokenKind::Finally,
        "when" => TokenKind::When,
        "and" => TokenKind::DoubleAmpersand,
        "or" => TokenKind::DoubleVerticalBar,
        _ => return None,
    })
}

/// The builtin type names.
pub const TYPE_NAMES: [&str; 18] = ["void", "bool", "int", "long", "rational", "float", "decimal",
                                    "complex", "date", "string", "list", "set", "queue", "stack",
                                    "map", "object", "resource", "closure"];

#[must_use]
pub fn is_type_name(word: &str) -> bool {
    TYPE_NAMES.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_carry_their_value() {
        assert_eq!(lookup("true"),
                   Some((TokenKind::Boolean, TokenValue::Literal(Value::Boolean(true)))));
        assert_eq!(lookup("null"), Some((TokenKind::Null, TokenValue::Literal(Value::Void))));
    }

    #[test]
    fn scopes_and_modifiers() {
        assert_eq!(lookup("protected"),
                   Some((TokenKind::Scope, TokenValue::Scope(Scope::Protected))));
        assert_eq!(lookup("static"),
                   Some((TokenKind::Modifier, TokenValue::Modifier(Modifier::Static))));
    }

    #[test]
    fn type_names() {
        assert_eq!(lookup("queue").map(|(kind, _)| kind), Some(TokenKind::TypeName));
        assert!(lookup("blob").is_none());
        assert!(lookup("tuple").is_none());
    }

    #[test]
    fn words_are_case_sensitive() {
        assert!(lookup("If").is_none());
        assert_eq!(lookup("or").map(|(kind, _)| kind), Some(TokenKind::DoubleVerticalBar));
    }
}
