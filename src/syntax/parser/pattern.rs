use crate::{
    ast::{
        BinaryOperator, ExprKind, FieldMatch, MatchCase, Pattern, PatternKind, QualifiedName,
    },
    error::{Message, ParseResult},
    runtime::value::Value,
    syntax::{
        parser::{Parser, base::Named},
        span::Span,
        token::TokenKind,
    },
};

impl Named for FieldMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn span(&self) -> Span {
        self.span
    }
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// A case of a `switch` expression.
    ///
    /// Grammar: `match_case := composite_pattern ("when" expression)? "=>"
    /// (block | expression)`
    pub(super) fn match_case(&mut self) -> ParseResult<Option<MatchCase>> {
        let Some(pattern) = self.composite_pattern()? else {
            return Ok(None);
        };
        let guard = match self.accept(TokenKind::When) {
            Some(_) => Some(self.required_expression()?),
            None => None,
        };
        self.match_token(TokenKind::Arrow)?;
        let result = if self.try_match(TokenKind::LeftBrace) {
            let block = self.block(true)?;
            let span = block.span;
            ExprKind::Block(block).at(span)
        } else {
            self.required(|parser| parser.throw_or(Self::expression), Message::ExpressionRequired)?
        };
        let span = pattern.span.to(result.span);
        Ok(Some(MatchCase { pattern,
                            guard,
                            result,
                            span }))
    }

    /// Patterns separated by commas, matching when any of them does.
    fn composite_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let Some(first) = self.simple_pattern()? else {
            return Ok(None);
        };
        if !self.try_match(TokenKind::Comma) {
            return Ok(Some(first));
        }
        let mut patterns = vec![first];
        while self.accept(TokenKind::Comma).is_some() {
            patterns.push(self.required(Self::simple_pattern, Message::PatternRequired)?);
        }
        let span = patterns[0].span.to(patterns[patterns.len() - 1].span);
        Ok(Some(Pattern::new(PatternKind::Composite(patterns), span)))
    }

    /// Grammar:
    /// ```text
    /// simple_pattern := "_" | "null" | "not" simple_pattern
    ///                 | ("<" | "<=" | ">" | ">=") literal
    ///                 | "matches" string
    ///                 | ".." literal | literal (".." literal?)?
    ///                 | identifier ":" expression
    ///                 | type_name ("{" field_match ("," field_match)* "}")?
    /// ```
    pub(super) fn simple_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let token = self.peek().clone();
        let kind = match token.kind {
            TokenKind::Identifier if token.is_word("_") => {
                self.consume();
                PatternKind::Always
            },
            TokenKind::Null => {
                self.consume();
                PatternKind::Null
            },
            TokenKind::Not => {
                self.consume();
                let inner = self.required(Self::simple_pattern, Message::PatternRequired)?;
                let span = token.span.to(inner.span);
                return Ok(Some(Pattern::new(PatternKind::Not(Box::new(inner)), span)));
            },
            TokenKind::LessThan
            | TokenKind::LessThanEqual
            | TokenKind::GreaterThan
            | TokenKind::GreaterThanEqual => {
                self.consume();
                let (value, end) = self.literal_value()?;
                let op = token.kind.binary_operator().unwrap_or(BinaryOperator::Equal);
                return Ok(Some(Pattern::new(PatternKind::Relation { op, value },
                                            token.span.to(end))));
            },
            TokenKind::Matches => {
                self.consume();
                let regex = self.match_token(TokenKind::String)?;
                return Ok(Some(Pattern::new(PatternKind::Regex(regex.text()),
                                            token.span.to(regex.span))));
            },
            TokenKind::DoubleDot => {
                self.consume();
                let (upper, end) = self.literal_value()?;
                let range = PatternKind::Range { lower: None,
                                                 upper: Some(upper) };
                return Ok(Some(Pattern::new(range, token.span.to(end))));
            },
            TokenKind::Identifier if self.look(2) == TokenKind::Colon => {
                return self.predicate().map(Some);
            },
            TokenKind::Identifier | TokenKind::TypeName => return self.type_pattern().map(Some),
            _ => return self.value_pattern(),
        };
        Ok(Some(Pattern::new(kind, token.span)))
    }

    /// A literal or a range starting with a literal.
    fn value_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let Some((lower, mut span)) = self.signed_literal()? else {
            return Ok(None);
        };
        if let Some(dots) = self.accept(TokenKind::DoubleDot) {
            span = span.to(dots.span);
            let upper = self.signed_literal()?.map(|(value, end)| {
                                                   span = span.to(end);
                                                   value
                                               });
            let range = PatternKind::Range { lower: Some(lower),
                                             upper };
            return Ok(Some(Pattern::new(range, span)));
        }
        Ok(Some(Pattern::new(PatternKind::Value(lower), span)))
    }

    /// Grammar: `predicate := identifier ":" expression`
    fn predicate(&mut self) -> ParseResult<Pattern> {
        let parameter = self.consume();
        self.consume();
        let condition = self.required_expression()?;
        let span = parameter.span.to(condition.span);
        Ok(Pattern::new(PatternKind::Predicate { parameter: parameter.text(),
                                                 condition: Box::new(condition), },
                        span))
    }

    /// A type, optionally followed by constraints on its fields.
    ///
    /// # Errors
    /// `DuplicatedProperty` when a field is constrained twice.
    fn type_pattern(&mut self) -> ParseResult<Pattern> {
        let (type_name, mut span) = match self.accept(TokenKind::TypeName) {
            Some(token) => (QualifiedName::simple(token.text()), token.span),
            None => self.qualified_name()?,
        };
        if self.accept(TokenKind::LeftBrace).is_none() {
            return Ok(Pattern::new(PatternKind::Type(type_name), span));
        }
        let fields =
            self.unique_list(Self::field_match, |name| Message::DuplicatedProperty { name })?;
        span = span.to(self.match_token(TokenKind::RightBrace)?.span);
        Ok(Pattern::new(PatternKind::Object { type_name, fields }, span))
    }

    /// Grammar: `field_match := identifier "=" literal`
    fn field_match(&mut self) -> ParseResult<Option<FieldMatch>> {
        let Some(name) = self.accept(TokenKind::Identifier) else {
            return Ok(None);
        };
        self.match_token(TokenKind::Equal)?;
        let (value, end): (Value, Span) = self.literal_value()?;
        Ok(Some(FieldMatch { name: name.text(),
                             value,
                             span: name.span.to(end) }))
    }
}
