use std::collections::VecDeque;

use crate::{
    error::{Message, ParseError, ParseResult},
    syntax::{
        lexer::Lexer,
        parser::Parser,
        span::Span,
        token::{Token, TokenKind},
    },
};

/// The number of consumed tokens kept before the buffer drops them.
pub const MAX_BUFFER_SIZE: usize = 100;

/// A look-ahead buffer over the tokens of a lexer.
///
/// Works like the character buffer of the lexer: consumed tokens accumulate
/// until `MAX_BUFFER_SIZE` of them can be dropped at once.
#[derive(Debug)]
pub struct TokenBuffer<I> {
    lexer:  Lexer<I>,
    tokens: VecDeque<Token>,
    index:  usize,
}

impl<I> TokenBuffer<I> where I: Iterator<Item = char>
{
    pub const fn new(lexer: Lexer<I>) -> Self {
        Self { lexer,
               tokens: VecDeque::new(),
               index: 0 }
    }

    /// The `k`-th token ahead, starting at 1, comments included.
    ///
    /// Past the end of the source, this is the `EndOfFile` token.
    pub fn ll(&mut self, k: usize) -> &Token {
        debug_assert!(k > 0);
        let wanted = self.index + k;
        while self.tokens.len() < wanted {
            let token = self.lexer.next_token();
            self.tokens.push_back(token);
        }
        &self.tokens[wanted - 1]
    }

    /// Skips `count` tokens.
    pub fn consume(&mut self, count: usize) {
        self.ll(count.max(1));
        self.index += count;
        if self.index >= MAX_BUFFER_SIZE {
            self.tokens.drain(..MAX_BUFFER_SIZE);
            self.index -= MAX_BUFFER_SIZE;
        }
    }
}

/// Elements of a list whose names must be unique.
pub trait Named {
    fn name(&self) -> &str;

    fn span(&self) -> Span;
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Consumes the comments ahead.
    pub(super) fn skip_comments(&mut self) {
        while self.tokens.ll(1).is_comment() {
            self.tokens.consume(1);
        }
    }

    /// The next significant token.
    pub(super) fn peek(&mut self) -> &Token {
        self.skip_comments();
        self.tokens.ll(1)
    }

    /// The kind of the `k`-th significant token ahead, starting at 1.
    pub(super) fn look(&mut self, k: usize) -> TokenKind {
        self.skip_comments();
        let mut seen = 0;
        let mut i = 0;
        loop {
            i += 1;
            let kind = self.tokens.ll(i).kind;
            if kind.is_comment() {
                continue;
            }
            seen += 1;
            if seen == k || kind == TokenKind::EndOfFile {
                return kind;
            }
        }
    }

    /// The position of the first significant token of kind `kind`, searching
    /// from the second one, before any token failing `allowed`.
    ///
    /// # Returns
    /// - `Some(k)`: The token is the `k`-th significant one ahead.
    /// - `None`: A token failing `allowed`, or the end of the source, came
    ///   first.
    pub(super) fn look_ahead_while(&mut self,
                                   kind: TokenKind,
                                   allowed: impl Fn(TokenKind) -> bool)
                                   -> Option<usize> {
        let mut k = 2;
        loop {
            let next = self.look(k);
            if next == kind {
                return Some(k);
            }
            if next == TokenKind::EndOfFile || !allowed(next) {
                return None;
            }
            k += 1;
        }
    }

    /// Consumes the next significant token.
    pub(super) fn consume(&mut self) -> Token {
        let token = self.peek().clone();
        self.tokens.consume(1);
        token
    }

    /// Whether the next significant token has kind `kind`.
    pub(super) fn try_match(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn try_match_any(&mut self, kinds: &[TokenKind]) -> bool {
        let next = self.peek().kind;
        kinds.contains(&next)
    }

    /// Consumes the next token if it has kind `kind`.
    pub(super) fn accept(&mut self, kind: TokenKind) -> Option<Token> {
        self.try_match(kind).then(|| self.consume())
    }

    /// Consumes the next token, which must have kind `kind`.
    ///
    /// # Errors
    /// `UnexpectedToken` otherwise.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> ParseResult<Token> {
        self.accept(kind).ok_or_else(|| self.unexpected())
    }

    /// Consumes the next token, which must have one of the given kinds.
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> ParseResult<Token> {
        if self.try_match_any(kinds) { Ok(self.consume()) } else { Err(self.unexpected()) }
    }

    /// Runs a rule that must succeed.
    ///
    /// # Errors
    /// A syntax error carrying `message` when the rule does not apply at the
    /// current token.
    pub(super) fn required<T>(&mut self,
                              rule: impl FnOnce(&mut Self) -> ParseResult<Option<T>>,
                              message: Message)
                              -> ParseResult<T> {
        match rule(self)? {
            Some(value) => Ok(value),
            None => {
                let span = self.current_span();
                Err(self.syntax_error(span, message))
            },
        }
    }

    /// Repeats a rule as long as it applies.
    pub(super) fn asterisk<T>(&mut self,
                              mut rule: impl FnMut(&mut Self) -> ParseResult<Option<T>>)
                              -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = rule(self)? {
            items.push(item);
        }
        Ok(items)
    }

    /// Repeats a rule that must apply at least once.
    pub(super) fn plus<T>(&mut self,
                          mut rule: impl FnMut(&mut Self) -> ParseResult<Option<T>>,
                          message: Message)
                          -> ParseResult<Vec<T>> {
        let first = self.required(&mut rule, message)?;
        let mut items = vec![first];
        items.extend(self.asterisk(rule)?);
        Ok(items)
    }

    /// A possibly empty list of comma separated elements.
    ///
    /// # Errors
    /// `AbnormalListTermination` when a comma is not followed by an element.
    pub(super) fn list<T>(&mut self,
                          mut rule: impl FnMut(&mut Self) -> ParseResult<Option<T>>)
                          -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        let Some(first) = rule(self)? else {
            return Ok(items);
        };
        items.push(first);
        while self.accept(TokenKind::Comma).is_some() {
            let item = self.required(&mut rule, Message::AbnormalListTermination)?;
            items.push(item);
        }
        Ok(items)
    }

    /// A list whose elements have unique names.
    ///
    /// # Errors
    /// The semantic error built by `duplicate` for the first repeated name.
    pub(super) fn unique_list<T>(&mut self,
                                 rule: impl FnMut(&mut Self) -> ParseResult<Option<T>>,
                                 duplicate: fn(String) -> Message)
                                 -> ParseResult<Vec<T>>
        where T: Named
    {
        let items = self.list(rule)?;
        self.check_unique(&items, duplicate)?;
        Ok(items)
    }

    pub(super) fn check_unique<T>(&self, items: &[T], duplicate: fn(String) -> Message)
                                  -> ParseResult<()>
        where T: Named
    {
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.name() == item.name()) {
                return Err(self.semantic_error(item.span(), duplicate(item.name().to_string())));
            }
        }
        Ok(())
    }

    /// The span of the next significant token.
    pub(super) fn current_span(&mut self) -> Span {
        self.peek().span
    }

    /// An `UnexpectedToken` error at the next significant token.
    pub(super) fn unexpected(&mut self) -> ParseError {
        let token = self.peek();
        let (span, found) = (token.span, token.describe());
        self.syntax_error(span, Message::UnexpectedToken { found })
    }

    pub(super) fn syntax_error(&self, span: Span, message: Message) -> ParseError {
        ParseError::syntax(&self.file_name, span, message)
    }

    pub(super) fn semantic_error(&self, span: Span, message: Message) -> ParseError {
        ParseError::semantic(&self.file_name, span, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser<std::str::Chars<'_>> {
        Parser::new(Lexer::new(source.chars()), "test.add")
    }

    #[test]
    fn comments_are_invisible() {
        let mut parser = parser("a /* one */ // two\n b");
        assert_eq!(parser.consume().text(), "a");
        assert_eq!(parser.look(1), TokenKind::Identifier);
        assert_eq!(parser.look(2), TokenKind::EndOfFile);
        assert_eq!(parser.consume().text(), "b");
        assert!(parser.try_match(TokenKind::EndOfFile));
    }

    #[test]
    fn look_ahead_stops_at_disallowed_tokens() {
        let names = |kind| matches!(kind, TokenKind::Identifier | TokenKind::DoubleColon);
        let mut cast = parser("( a :: b ) c");
        assert_eq!(cast.look_ahead_while(TokenKind::RightParenthesis, names), Some(5));
        let mut sum = parser("( a + b )");
        assert_eq!(sum.look_ahead_while(TokenKind::RightParenthesis, names), None);
    }

    #[test]
    fn lists_reject_trailing_commas() {
        let identifier = |parser: &mut Parser<_>| {
            Ok(parser.accept(TokenKind::Identifier).map(|token| token.text()))
        };
        assert_eq!(parser("a, b, c").list(identifier).unwrap(), ["a", "b", "c"]);
        assert!(parser("").list(identifier).unwrap().is_empty());
        let error = parser("a, b,").list(identifier).unwrap_err();
        assert_eq!(error.message, Message::AbnormalListTermination);
    }

    #[test]
    fn unexpected_names_the_token() {
        let mut parser = parser("\n  ;");
        let error = parser.match_token(TokenKind::Identifier).unwrap_err();
        assert_eq!(error.to_string(), "test.add(2,3): syntax error: unexpected ';'");
    }

    #[test]
    fn long_token_streams_are_paged() {
        let source = "x ".repeat(250);
        let mut parser = parser(&source);
        for _ in 0..250 {
            assert_eq!(parser.consume().kind, TokenKind::Identifier);
        }
        assert!(parser.tokens.tokens.len() <= MAX_BUFFER_SIZE);
        assert!(parser.try_match(TokenKind::EndOfFile));
    }
}
