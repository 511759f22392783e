use crate::syntax::{
    lexer::Lexer,
    token::{Token, TokenKind, TokenValue},
};

/// Operators and punctuation, longest first within each leading character.
const OPERATORS: &[(&str, TokenKind)] = &[("??=", TokenKind::DoubleQuestionEqual),
                                         ("??", TokenKind::DoubleQuestion),
                                         ("?.", TokenKind::QuestionDot),
                                         ("?[", TokenKind::QuestionBracket),
                                         ("?", TokenKind::Question),
                                         ("::", TokenKind::DoubleColon),
                                         (":", TokenKind::Colon),
                                         ("..", TokenKind::DoubleDot),
                                         (".", TokenKind::Dot),
                                         ("===", TokenKind::TripleEqual),
                                         ("==", TokenKind::DoubleEqual),
                                         ("=>", TokenKind::Arrow),
                                         ("=", TokenKind::Equal),
                                         ("!==", TokenKind::ExclamationDoubleEqual),
                                         ("!=", TokenKind::ExclamationEqual),
                                         ("!", TokenKind::Exclamation),
                                         ("<<=", TokenKind::DoubleLessThanEqual),
                                         ("<<", TokenKind::DoubleLessThan),
                                         ("<=", TokenKind::LessThanEqual),
                                         ("<", TokenKind::LessThan),
                                         (">>=", TokenKind::DoubleGreaterThanEqual),
                                         (">>", TokenKind::DoubleGreaterThan),
                                         (">=", TokenKind::GreaterThanEqual),
                                         (">", TokenKind::GreaterThan),
                                         ("++", TokenKind::DoublePlus),
                                         ("+=", TokenKind::PlusEqual),
                                         ("+", TokenKind::Plus),
                                         ("--", TokenKind::DoubleMinus),
                                         ("-=", TokenKind::MinusEqual),
                                         ("-", TokenKind::Minus),
                                         ("**=", TokenKind::DoubleAsteriskEqual),
                                         ("**", TokenKind::DoubleAsterisk),
                                         ("*=", TokenKind::AsteriskEqual),
                                         ("*", TokenKind::Asterisk),
                                         ("/=", TokenKind::SlashEqual),
                                         ("/", TokenKind::Slash),
                                         ("%=", TokenKind::PercentEqual),
                                         ("%", TokenKind::Percent),
                                         ("&&", TokenKind::DoubleAmpersand),
                                         ("&=", TokenKind::AmpersandEqual),
                                         ("&", TokenKind::Ampersand),
                                         ("||", TokenKind::DoubleVerticalBar),
                                         ("|=", TokenKind::VerticalBarEqual),
                                         ("|", TokenKind::VerticalBar),
                                         ("^=", TokenKind::CircumflexEqual),
                                         ("^", TokenKind::Circumflex),
                                         ("~", TokenKind::Tilda),
                                         (",", TokenKind::Comma),
                                         (";", TokenKind::SemiColon),
                                         ("(", TokenKind::LeftParenthesis),
                                         (")", TokenKind::RightParenthesis),
                                         ("[", TokenKind::LeftBracket),
                                         ("]", TokenKind::RightBracket),
                                         ("{", TokenKind::LeftBrace),
                                         ("}", TokenKind::RightBrace)];

impl<I> Lexer<I> where I: Iterator<Item = char>
{
    /// Whether the characters ahead spell `symbol`.
    fn lookahead_is(&mut self, symbol: &str) -> bool {
        symbol.chars()
              .enumerate()
              .all(|(k, c)| self.buffer.ll(k + 1) == c)
    }

    /// An operator or a punctuation mark, taking the longest match.
    ///
    /// A `.` followed by a digit starts a number instead.
    pub(super) fn operator(&mut self) -> Token {
        if self.buffer.ll(1) == '.' && self.buffer.ll(2).is_ascii_digit() {
            return self.number();
        }
        let found = OPERATORS.iter()
                             .find(|(symbol, _)| self.lookahead_is(symbol))
                             .copied();
        match found {
            Some((symbol, kind)) => {
                self.buffer.consume(symbol.chars().count());
                self.make(kind, TokenValue::None)
            },
            None => {
                let c = self.buffer.bump();
                self.unknown(c.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source.chars());
        std::iter::from_fn(|| {
            let token = lexer.next_token();
            (token.kind != TokenKind::EndOfFile).then_some(token.kind)
        }).collect()
    }

    #[test]
    fn longest_match_wins() {
        assert_eq!(kinds("a ??= b"),
                   [TokenKind::Identifier, TokenKind::DoubleQuestionEqual, TokenKind::Identifier]);
        assert_eq!(kinds("!== === **="),
                   [TokenKind::ExclamationDoubleEqual,
                    TokenKind::TripleEqual,
                    TokenKind::DoubleAsteriskEqual]);
        assert_eq!(kinds("<<=>>"), [TokenKind::DoubleLessThanEqual, TokenKind::DoubleGreaterThan]);
    }

    #[test]
    fn null_conditional_access() {
        assert_eq!(kinds("a?.b?[0]"),
                   [TokenKind::Identifier,
                    TokenKind::QuestionDot,
                    TokenKind::Identifier,
                    TokenKind::QuestionBracket,
                    TokenKind::Integer,
                    TokenKind::RightBracket]);
    }

    #[test]
    fn dots() {
        assert_eq!(kinds("a.b"), [TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier]);
        assert_eq!(kinds("..x"), [TokenKind::DoubleDot, TokenKind::Identifier]);
        assert_eq!(kinds(".5"), [TokenKind::Float]);
    }

    #[test]
    fn stray_characters_are_unknown() {
        let mut lexer = Lexer::new("#!".chars());
        let token = lexer.next_token();
        assert_eq!((token.kind, token.text()), (TokenKind::Unknown, "#".to_string()));
        assert_eq!(lexer.next_token().kind, TokenKind::Exclamation);
    }
}
