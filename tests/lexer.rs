use addyscript::{
    runtime::value::Value,
    syntax::token::{Token, TokenKind},
    tokenize,
};

fn literal(source: &str) -> Value {
    let tokens = tokenize(source);
    assert_eq!(tokens.len(), 2, "{source} is not a single token");
    tokens[0].literal()
             .cloned()
             .unwrap_or_else(|| panic!("{source} is not a literal"))
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn literals_survive_printing() {
    for source in ["1_000", "0x1F", "3.14f", "2.5d", "10l", "2147483648", "'text'", "true"] {
        let value = literal(source);
        let printed = match &value {
            Value::String(text) => format!("'{text}'"),
            other => other.to_string(),
        };
        assert!(literal(&printed).equals(&value), "{source} printed as {printed}");
    }
}

#[test]
fn scripts_split_into_tokens() {
    let tokens = tokenize("var x = 10; // ten\nif (x >= 10) println($'{x}');");
    assert_eq!(kinds(&tokens),
               [TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Integer,
                TokenKind::SemiColon,
                TokenKind::LineComment,
                TokenKind::If,
                TokenKind::LeftParenthesis,
                TokenKind::Identifier,
                TokenKind::GreaterThanEqual,
                TokenKind::Integer,
                TokenKind::RightParenthesis,
                TokenKind::Identifier,
                TokenKind::LeftParenthesis,
                TokenKind::MutableString,
                TokenKind::RightParenthesis,
                TokenKind::SemiColon,
                TokenKind::EndOfFile]);
    let end = &tokens[tokens.len() - 1];
    assert_eq!(end.span.start.line, 2);
    assert_eq!(tokens[6].span.start.column(), 1);
}

#[test]
fn unknown_input_does_not_stop_the_lexer() {
    let tokens = tokenize("a # b 'open");
    assert_eq!(kinds(&tokens),
               [TokenKind::Identifier,
                TokenKind::Unknown,
                TokenKind::Identifier,
                TokenKind::Unknown,
                TokenKind::EndOfFile]);
    assert_eq!(tokens[3].text(), "'open");
}

#[test]
fn keywords_and_type_names() {
    let tokens = tokenize("class int myClass and static");
    assert_eq!(kinds(&tokens),
               [TokenKind::Class,
                TokenKind::TypeName,
                TokenKind::Identifier,
                TokenKind::DoubleAmpersand,
                TokenKind::Modifier,
                TokenKind::EndOfFile]);
    assert_eq!(tokens[1].text(), "int");
    assert_eq!(tokens[4].text(), "static");
}

#[test]
fn decimal_exponents_are_bounded() {
    let tokens = tokenize("1e2000000000d 1e-5d");
    assert_eq!(kinds(&tokens), [TokenKind::Unknown, TokenKind::Decimal, TokenKind::EndOfFile]);
    assert_eq!(tokens[1].literal().map(ToString::to_string), Some("0.00001".to_string()));
}
