/// The character look-ahead buffer.
pub mod buffer;
/// Numeric literals.
mod number;
/// Punctuation and operators.
mod operator;
/// String, verbatim string, interpolated string and date literals, with the
/// escape sequences they share with identifiers.
mod string;

use crate::syntax::{
    keyword,
    lexer::buffer::{CharBuffer, EOF},
    span::{Location, Span},
    token::{Token, TokenKind, TokenValue},
};

/// Whether `c` can start an identifier: a letter, extended Latin-1 letters
/// included, or an underscore.
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// Whether `c` can continue an identifier.
#[must_use]
pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_numeric()
}

/// A lexer over any character source.
///
/// Every call to [`Lexer::next_token`] returns one token. Past the end of the
/// source, it keeps returning `EndOfFile`.
///
/// # Example
/// ```
/// use addyscript::syntax::{lexer::Lexer, token::TokenKind};
///
/// let mut lexer = Lexer::new("x += 0x1F; // done".chars());
/// let kinds: Vec<_> = std::iter::from_fn(|| {
///                         let token = lexer.next_token();
///                         (token.kind != TokenKind::EndOfFile).then_some(token.kind)
///                     }).collect();
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::PlusEqual,
///             TokenKind::Integer,
///             TokenKind::SemiColon,
///             TokenKind::LineComment]);
/// ```
#[derive(Debug)]
pub struct Lexer<I> {
    buffer: CharBuffer<I>,
    start:  Location,
}

impl<I> Lexer<I> where I: Iterator<Item = char>
{
    pub fn new(source: I) -> Self {
        Self::with_location(source, Location::default())
    }

    /// A lexer whose first character sits at `location`, used for sources
    /// embedded in another one.
    pub fn with_location(source: I, location: Location) -> Self {
        Self { buffer: CharBuffer::with_location(source, location),
               start:  location, }
    }

    /// Reads the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_white_space();
        self.start = self.buffer.location();
        match self.buffer.ll(1) {
            EOF => self.make(TokenKind::EndOfFile, TokenValue::None),
            '0' => self.zero(),
            '1'..='9' => self.number(),
            '\'' | '"' => self.string_literal(),
            '@' => self.verbatim_string_literal(),
            '$' => self.dollar_sign(),
            '`' => self.date_literal(),
            '/' if self.buffer.ll(2) == '/' => self.line_comment(),
            '/' if self.buffer.ll(2) == '*' => self.block_comment(),
            c if is_identifier_start(c) || c == '\\' => self.identifier(),
            _ => self.operator(),
        }
    }

    fn skip_white_space(&mut self) {
        while self.buffer.ll(1).is_whitespace() {
            self.buffer.consume(1);
        }
    }

    /// A token spanning from the start of the current token to the next
    /// character.
    fn make(&self, kind: TokenKind, value: TokenValue) -> Token {
        Token::new(kind, value, Span::new(self.start, self.buffer.location()))
    }

    fn unknown(&self, text: impl Into<String>) -> Token {
        self.make(TokenKind::Unknown, TokenValue::Text(text.into()))
    }

    /// Reads the characters of an identifier, decoding escape sequences.
    fn identifier_text(&mut self) -> String {
        let mut text = String::new();
        loop {
            match self.buffer.ll(1) {
                '\\' => self.escape_sequence(&mut text),
                c if is_identifier_part(c) => {
                    text.push(c);
                    self.buffer.consume(1);
                },
                _ => return text,
            }
        }
    }

    fn identifier(&mut self) -> Token {
        let text = self.identifier_text();
        match keyword::lookup(&text) {
            Some((kind, value)) => self.make(kind, value),
            None => self.make(TokenKind::Identifier, TokenValue::Text(text)),
        }
    }

    fn line_comment(&mut self) -> Token {
        self.buffer.consume(2);
        let mut text = String::new();
        while !matches!(self.buffer.ll(1), '\r' | '\n' | EOF) {
            text.push(self.buffer.bump());
        }
        self.make(TokenKind::LineComment, TokenValue::Text(text))
    }

    /// A block comment. An unterminated one runs to the end of the source.
    fn block_comment(&mut self) -> Token {
        self.buffer.consume(2);
        let mut text = String::new();
        loop {
            match (self.buffer.ll(1), self.buffer.ll(2)) {
                (EOF, _) => break,
                ('*', '/') => {
                    self.buffer.consume(2);
                    break;
                },
                _ => text.push(self.buffer.bump()),
            }
        }
        self.make(TokenKind::BlockComment, TokenValue::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source.chars());
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfFile {
                return tokens;
            }
            tokens.push(token);
        }
    }

    #[test]
    fn tokens_start_after_white_space() {
        let tokens = lex("  \n  abc");
        assert_eq!(tokens[0].span.start.line, 2);
        assert_eq!(tokens[0].span.start.column(), 3);
        assert_eq!(tokens[0].span.len(), 3);
    }

    #[test]
    fn identifiers() {
        let tokens = lex(r"café if Abc i\x66");
        assert_eq!(tokens[0].text(), "café");
        assert_eq!(tokens[1].kind, TokenKind::If);
        assert_eq!(tokens[2].text(), "Abc");
        assert_eq!(tokens[3].kind, TokenKind::If);
    }

    #[test]
    fn comments_are_kept() {
        let tokens = lex("a // rest\n/* one\ntwo */ b /* open");
        let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
        assert_eq!(kinds,
                   [TokenKind::Identifier,
                    TokenKind::LineComment,
                    TokenKind::BlockComment,
                    TokenKind::Identifier,
                    TokenKind::BlockComment]);
        assert_eq!(tokens[1].text(), " rest");
        assert_eq!(tokens[2].text(), " one\ntwo ");
        assert_eq!(tokens[3].span.start.line, 3);
    }

    #[test]
    fn end_of_file_repeats() {
        let mut lexer = Lexer::new("".chars());
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
    }
}
