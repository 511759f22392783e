use std::fmt::{self, Display};

use crate::{
    ast::{BinaryOperator, Modifier, Scope, UnaryOperator},
    runtime::value::Value,
    syntax::span::Span,
};

/// The kinds of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A character sequence the lexer could not recognize.
    Unknown,
    Comma,
    Dot,
    DoubleDot,
    SemiColon,
    Colon,
    DoubleColon,
    Question,
    QuestionDot,
    QuestionBracket,
    DoubleQuestion,
    DoubleQuestionEqual,
    LeftParenthesis,
    RightParenthesis,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Equal,
    DoubleEqual,
    TripleEqual,
    Exclamation,
    ExclamationEqual,
    ExclamationDoubleEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Plus,
    DoublePlus,
    PlusEqual,
    Minus,
    DoubleMinus,
    MinusEqual,
    Asterisk,
    AsteriskEqual,
    DoubleAsterisk,
    DoubleAsteriskEqual,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    DoubleLessThan,
    DoubleLessThanEqual,
    DoubleGreaterThan,
    DoubleGreaterThanEqual,
    Tilda,
    Ampersand,
    DoubleAmpersand,
    AmpersandEqual,
    VerticalBar,
    DoubleVerticalBar,
    VerticalBarEqual,
    Circumflex,
    CircumflexEqual,
    /// `=>`
    Arrow,
    TypeOf,
    Is,
    Not,
    StartsWith,
    EndsWith,
    Contains,
    Matches,
    With,
    Import,
    As,
    Const,
    Var,
    Let,
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    ForEach,
    In,
    While,
    Do,
    Continue,
    Break,
    Goto,
    Yield,
    Return,
    Throw,
    Function,
    Extern,
    Ref,
    Params,
    Class,
    Constructor,
    Property,
    Operator,
    Event,
    This,
    Super,
    New,
    Try,
    Catch,
    Finally,
    When,
    Null,
    Boolean,
    Integer,
    Long,
    Float,
    Decimal,
    Complex,
    Date,
    String,
    /// A builtin type name such as `int` or `list`.
    TypeName,
    /// `public`, `protected` or `private`.
    Scope,
    /// `abstract`, `final` or `static`.
    Modifier,
    Identifier,
    /// The decoded text of an interpolated string.
    MutableString,
    LineComment,
    BlockComment,
    EndOfFile,
}

impl TokenKind {
    /// The source spelling of fixed tokens, a description of the others.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Unknown => "unknown token",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::DoubleDot => "..",
            Self::SemiColon => ";",
            Self::Colon => ":",
            Self::DoubleColon => "::",
            Self::Question => "?",
            Self::QuestionDot => "?.",
            Self::QuestionBracket => "?[",
            Self::DoubleQuestion => "??",
            Self::DoubleQuestionEqual => "??=",
            Self::LeftParenthesis => "(",
            Self::RightParenthesis => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Equal => "=",
            Self::DoubleEqual => "==",
            Self::TripleEqual => "===",
            Self::Exclamation => "!",
            Self::ExclamationEqual => "!=",
            Self::ExclamationDoubleEqual => "!==",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::Plus => "+",
            Self::DoublePlus => "++",
            Self::PlusEqual => "+=",
            Self::Minus => "-",
            Self::DoubleMinus => "--",
            Self::MinusEqual => "-=",
            Self::Asterisk => "*",
            Self::AsteriskEqual => "*=",
            Self::DoubleAsterisk => "**",
            Self::DoubleAsteriskEqual => "**=",
            Self::Slash => "/",
            Self::SlashEqual => "/=",
            Self::Percent => "%",
            Self::PercentEqual => "%=",
            Self::DoubleLessThan => "<<",
            Self::DoubleLessThanEqual => "<<=",
            Self::DoubleGreaterThan => ">>",
            Self::DoubleGreaterThanEqual => ">>=",
            Self::Tilda => "~",
            Self::Ampersand => "&",
            Self::DoubleAmpersand => "&&",
            Self::AmpersandEqual => "&=",
            Self::VerticalBar => "|",
            Self::DoubleVerticalBar => "||",
            Self::VerticalBarEqual => "|=",
            Self::Circumflex => "^",
            Self::CircumflexEqual => "^=",
            Self::Arrow => "=>",
            Self::TypeOf => "typeof",
            Self::Is => "is",
            Self::Not => "not",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Contains => "contains",
            Self::Matches => "matches",
            Self::With => "with",
            Self::Import => "import",
            Self::As => "as",
            Self::Const => "const",
            Self::Var => "var",
            Self::Let => "let",
            Self::If => "if",
            Self::Else => "else",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::For => "for",
            Self::ForEach => "foreach",
            Self::In => "in",
            Self::While => "while",
            Self::Do => "do",
            Self::Continue => "continue",
            Self::Break => "break",
            Self::Goto => "goto",
            Self::Yield => "yield",
            Self::Return => "return",
            Self::Throw => "throw",
            Self::Function => "function",
            Self::Extern => "extern",
            Self::Ref => "ref",
            Self::Params => "params",
            Self::Class => "class",
            Self::Constructor => "constructor",
            Self::Property => "property",
            Self::Operator => "operator",
            Self::Event => "event",
            Self::This => "this",
            Self::Super => "super",
            Self::New => "new",
            Self::Try => "try",
            Self::Catch => "catch",
            Self::Finally => "finally",
            Self::When => "when",
            Self::Null => "null",
            Self::Boolean => "boolean literal",
            Self::Integer => "integer literal",
            Self::Long => "long literal",
            Self::Float => "float literal",
            Self::Decimal => "decimal literal",
            Self::Complex => "complex literal",
            Self::Date => "date literal",
            Self::String => "string literal",
            Self::TypeName => "type name",
            Self::Scope => "scope",
            Self::Modifier => "modifier",
            Self::Identifier => "identifier",
            Self::MutableString => "interpolated string",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::EndOfFile => "end of file",
        }
    }

    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Whether the token holds a literal value.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self,
                 Self::Null
                 | Self::Boolean
                 | Self::Integer
                 | Self::Long
                 | Self::Float
                 | Self::Decimal
                 | Self::Complex
                 | Self::Date
                 | Self::String)
    }

    /// Whether the token holds a number.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self,
                 Self::Integer | Self::Long | Self::Float | Self::Decimal | Self::Complex)
    }

    /// The binary operator spelled by this token, compound assignments
    /// included.
    #[must_use]
    pub const fn binary_operator(self) -> Option<BinaryOperator> {
        Some(match self {
            Self::Plus | Self::PlusEqual => BinaryOperator::Plus,
            Self::Minus | Self::MinusEqual => BinaryOperator::Minus,
            Self::Asterisk | Self::AsteriskEqual => BinaryOperator::Times,
            Self::Slash | Self::SlashEqual => BinaryOperator::Divide,
            Self::Percent | Self::PercentEqual => BinaryOperator::Modulo,
            Self::DoubleAsterisk | Self::DoubleAsteriskEqual => BinaryOperator::Power,
            Self::DoubleLessThan | Self::DoubleLessThanEqual => BinaryOperator::ShiftLeft,
            Self::DoubleGreaterThan | Self::DoubleGreaterThanEqual => BinaryOperator::ShiftRight,
            Self::Ampersand | Self::AmpersandEqual => BinaryOperator::And,
            Self::DoubleAmpersand => BinaryOperator::AndAlso,
            Self::VerticalBar | Self::VerticalBarEqual => BinaryOperator::Or,
            Self::DoubleVerticalBar => BinaryOperator::OrElse,
            Self::Circumflex | Self::CircumflexEqual => BinaryOperator::ExclusiveOr,
            Self::DoubleEqual => BinaryOperator::Equal,
            Self::ExclamationEqual => BinaryOperator::NotEqual,
            Self::TripleEqual => BinaryOperator::Identical,
            Self::ExclamationDoubleEqual => BinaryOperator::NotIdentical,
            Self::LessThan => BinaryOperator::LessThan,
            Self::LessThanEqual => BinaryOperator::LessThanOrEqual,
            Self::GreaterThan => BinaryOperator::GreaterThan,
            Self::GreaterThanEqual => BinaryOperator::GreaterThanOrEqual,
            Self::StartsWith => BinaryOperator::StartsWith,
            Self::EndsWith => BinaryOperator::EndsWith,
            Self::Contains => BinaryOperator::Contains,
            Self::Matches => BinaryOperator::Matches,
            Self::DoubleQuestion | Self::DoubleQuestionEqual => BinaryOperator::IfEmpty,
            _ => return None,
        })
    }

    /// The prefix operator spelled by this token.
    #[must_use]
    pub const fn prefix_operator(self) -> Option<UnaryOperator> {
        Some(match self {
            Self::Plus => UnaryOperator::Plus,
            Self::Minus => UnaryOperator::Minus,
            Self::DoublePlus => UnaryOperator::PreIncrement,
            Self::DoubleMinus => UnaryOperator::PreDecrement,
            Self::Exclamation => UnaryOperator::Not,
            Self::Tilda => UnaryOperator::BitwiseNot,
            _ => return None,
        })
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    /// The value of a literal.
    Literal(Value),
    /// The text of identifiers, type names, comments, interpolated strings
    /// and unknown tokens.
    Text(String),
    Scope(Scope),
    Modifier(Modifier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind:  TokenKind,
    pub value: TokenValue,
    pub span:  Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        Self { kind, value, span }
    }

    #[must_use]
    pub const fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// The literal value carried by the token.
    #[must_use]
    pub const fn literal(&self) -> Option<&Value> {
        match &self.value {
            TokenValue::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// The text of the token: its payload, or its spelling for fixed tokens.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.value {
            TokenValue::None => self.kind.symbol().to_string(),
            TokenValue::Literal(value) => value.to_string(),
            TokenValue::Text(text) => text.clone(),
            TokenValue::Scope(scope) => scope.name().to_string(),
            TokenValue::Modifier(modifier) => modifier.name().to_string(),
        }
    }

    /// Whether the token is the identifier `word`.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier
        && matches!(&self.value, TokenValue::Text(text) if text == word)
    }

    /// How the token is named in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfFile => self.kind.symbol().to_string(),
            _ => format!("'{}'", self.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_tokens_show_their_spelling() {
        let token = Token::new(TokenKind::DoubleQuestionEqual, TokenValue::None, Span::default());
        assert_eq!(token.text(), "??=");
        assert_eq!(token.describe(), "'??='");
        assert_eq!(token.kind.binary_operator(), Some(BinaryOperator::IfEmpty));
    }

    #[test]
    fn payload_tokens_show_their_payload() {
        let token = Token::new(TokenKind::Identifier,
                               TokenValue::Text("read".to_string()),
                               Span::default());
        assert!(token.is_word("read"));
        assert!(!token.is_word("write"));
        let token = Token::new(TokenKind::Integer,
                               TokenValue::Literal(Value::Integer(12)),
                               Span::default());
        assert_eq!(token.text(), "12");
        assert!(token.kind.is_numeric());
    }
}
