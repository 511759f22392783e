use crate::{
    ast::{
        Argument, Arguments, Attribute, Declarator, Expr, ExprKind, NamedArgument, Parameter,
        PropertyInit, QualifiedName, UnaryOperator,
    },
    error::{Message, ParseResult},
    runtime::value::Value,
    syntax::{
        parser::{Parser, base::Named},
        span::Span,
        token::{Token, TokenKind},
    },
};

macro_rules! named {
    ($($type:ty),*) => {
        $(impl Named for $type {
            fn name(&self) -> &str {
                &self.name
            }

            fn span(&self) -> Span {
                self.span
            }
        })*
    };
}

named!(Parameter, PropertyInit, Declarator, Attribute, NamedArgument);

/// Whether tokens of this kind spell a word that can name a member, keywords
/// included.
const fn is_word(kind: TokenKind) -> bool {
    matches!(kind,
             TokenKind::Identifier
             | TokenKind::TypeName
             | TokenKind::Scope
             | TokenKind::Modifier
             | TokenKind::TypeOf
             | TokenKind::Is
             | TokenKind::Not
             | TokenKind::StartsWith
             | TokenKind::EndsWith
             | TokenKind::Contains
             | TokenKind::Matches
             | TokenKind::With
             | TokenKind::Import
             | TokenKind::As
             | TokenKind::Const
             | TokenKind::Var
             | TokenKind::Let
             | TokenKind::If
             | TokenKind::Else
             | TokenKind::Switch
             | TokenKind::Case
             | TokenKind::Default
             | TokenKind::For
             | TokenKind::ForEach
             | TokenKind::In
             | TokenKind::While
             | TokenKind::Do
             | TokenKind::Continue
             | TokenKind::Break
             | TokenKind::Goto
             | TokenKind::Yield
             | TokenKind::Return
             | TokenKind::Throw
             | TokenKind::Function
             | TokenKind::Extern
             | TokenKind::Ref
             | TokenKind::Params
             | TokenKind::Class
             | TokenKind::Constructor
             | TokenKind::Property
             | TokenKind::Operator
             | TokenKind::Event
             | TokenKind::This
             | TokenKind::Super
             | TokenKind::New
             | TokenKind::Try
             | TokenKind::Catch
             | TokenKind::Finally
             | TokenKind::When)
}

/// An argument of a call while its kind is not checked yet.
enum CallArgument {
    Positional(Argument),
    Named(NamedArgument),
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Consumes an identifier and returns its text.
    pub(super) fn identifier(&mut self) -> ParseResult<String> {
        Ok(self.match_token(TokenKind::Identifier)?.text())
    }

    /// The name of a member after `.` or `::`, where keywords are ordinary
    /// names.
    pub(super) fn member_name(&mut self) -> ParseResult<Token> {
        if is_word(self.peek().kind) { Ok(self.consume()) } else { Err(self.unexpected()) }
    }

    /// Grammar: `qualified_name := identifier ("::" identifier)*`
    pub(super) fn qualified_name(&mut self) -> ParseResult<(QualifiedName, Span)> {
        let first = self.match_token(TokenKind::Identifier)?;
        let mut span = first.span;
        let mut segments = vec![first.text()];
        while self.try_match(TokenKind::DoubleColon) && self.look(2) == TokenKind::Identifier {
            self.consume();
            let segment = self.consume();
            span = span.to(segment.span);
            segments.push(segment.text());
        }
        Ok((QualifiedName::new(segments), span))
    }

    /// A literal, possibly preceded by `+` or `-` when it is a number.
    pub(super) fn signed_literal(&mut self) -> ParseResult<Option<(Value, Span)>> {
        let sign = match self.peek().kind {
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Minus => Some(UnaryOperator::Minus),
            kind if kind.is_literal() => {
                let token = self.consume();
                return Ok(token.literal().cloned().map(|value| (value, token.span)));
            },
            _ => return Ok(None),
        };
        if !self.look(2).is_numeric() {
            return Ok(None);
        }
        let start = self.consume().span;
        let token = self.consume();
        let span = start.to(token.span);
        let signed = match (sign, token.literal()) {
            (Some(op), Some(value)) => value.unary_operation(op).ok(),
            _ => None,
        };
        signed.map(|value| Some((value, span)))
              .ok_or_else(|| self.syntax_error(span, Message::LiteralRequired))
    }

    /// A literal that must be there.
    pub(super) fn literal_value(&mut self) -> ParseResult<(Value, Span)> {
        self.required(Self::signed_literal, Message::LiteralRequired)
    }

    /// Grammar: `parameter := attributes? ("&" | "..")? identifier "!"? ("="
    /// literal)?`
    pub(super) fn parameter(&mut self) -> ParseResult<Option<Parameter>> {
        let start = self.current_span();
        let attributes = self.attributes()?;
        let by_ref = self.accept(TokenKind::Ampersand).is_some();
        let variadic = !by_ref && self.accept(TokenKind::DoubleDot).is_some();
        let Some(name) = self.accept(TokenKind::Identifier) else {
            if attributes.is_empty() && !by_ref && !variadic {
                return Ok(None);
            }
            let span = self.current_span();
            return Err(self.syntax_error(span, Message::ParameterNameExpected));
        };
        let mut span = start.to(name.span);
        let can_be_empty = match self.accept(TokenKind::Exclamation) {
            Some(token) => {
                span = span.to(token.span);
                false
            },
            None => true,
        };
        let default = match self.accept(TokenKind::Equal) {
            Some(_) => {
                let (value, value_span) = self.literal_value()?;
                span = span.to(value_span);
                Some(value)
            },
            None => None,
        };
        Ok(Some(Parameter { name: name.text(),
                            by_ref,
                            variadic,
                            can_be_empty,
                            default,
                            attributes,
                            span }))
    }

    /// A comma separated parameter list, without its delimiters.
    ///
    /// # Errors
    /// - `DuplicatedParameter` when two parameters have the same name.
    /// - `VaArgsMustBeTheLast` when a variadic parameter is followed by
    ///   another one.
    /// - `MandatoryParamsPrecede` when a parameter without default value
    ///   follows one with a default value.
    pub(super) fn parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let parameters =
            self.unique_list(Self::parameter, |name| Message::DuplicatedParameter { name })?;
        let mut optional = false;
        for (i, parameter) in parameters.iter().enumerate() {
            if parameter.variadic && i + 1 < parameters.len() {
                return Err(self.semantic_error(parameter.span, Message::VaArgsMustBeTheLast));
            }
            if parameter.default.is_some() {
                optional = true;
            } else if optional && !parameter.variadic {
                return Err(self.semantic_error(parameter.span, Message::MandatoryParamsPrecede));
            }
        }
        Ok(parameters)
    }

    /// Grammar: `"(" parameters ")"`
    pub(super) fn parenthesized_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        self.match_token(TokenKind::LeftParenthesis)?;
        let parameters = self.parameters()?;
        self.match_token(TokenKind::RightParenthesis)?;
        Ok(parameters)
    }

    /// Zero or more bracketed attribute lists.
    ///
    /// Grammar: `attributes := ("[" attribute ("," attribute)* "]")*`
    ///
    /// # Errors
    /// `DuplicatedAttribute` when an attribute is given twice.
    pub(super) fn attributes(&mut self) -> ParseResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        while self.accept(TokenKind::LeftBracket).is_some() {
            let group = self.list(Self::attribute)?;
            if group.is_empty() {
                return Err(self.unexpected());
            }
            attributes.extend(group);
            self.match_token(TokenKind::RightBracket)?;
        }
        self.check_unique(&attributes, |name| Message::DuplicatedAttribute { name })?;
        Ok(attributes)
    }

    /// Grammar: `attribute := identifier ("(" (expression | identifier "="
    /// expression) ("," ...)* ")")?`
    fn attribute(&mut self) -> ParseResult<Option<Attribute>> {
        let Some(name) = self.accept(TokenKind::Identifier) else {
            return Ok(None);
        };
        let mut span = name.span;
        let mut fields: Vec<(String, Expr)> = Vec::new();
        if self.accept(TokenKind::LeftParenthesis).is_some() {
            let values = self.list(Self::attribute_value)?;
            span = span.to(self.match_token(TokenKind::RightParenthesis)?.span);
            for (field, value) in values {
                let duplicate = match &field {
                    Some(name) => fields.iter().any(|(other, _)| other == name),
                    None => fields.iter().any(|(other, _)| other == Attribute::DEFAULT_FIELD),
                };
                if duplicate {
                    let message = match field {
                        Some(name) => Message::DuplicatedAttributeField { name },
                        None => Message::DuplicatedAttributeValue,
                    };
                    return Err(self.semantic_error(value.span, message));
                }
                let field = field.unwrap_or_else(|| Attribute::DEFAULT_FIELD.to_string());
                fields.push((field, value));
            }
        }
        Ok(Some(Attribute { name: name.text(),
                            fields,
                            span }))
    }

    fn attribute_value(&mut self) -> ParseResult<Option<(Option<String>, Expr)>> {
        if self.try_match(TokenKind::Identifier) && self.look(2) == TokenKind::Equal {
            let field = self.identifier()?;
            self.consume();
            return Ok(Some((Some(field), self.required_expression()?)));
        }
        Ok(self.expression()?.map(|value| (None, value)))
    }

    fn call_argument(&mut self) -> ParseResult<Option<CallArgument>> {
        if let Some(dots) = self.accept(TokenKind::DoubleDot) {
            let value = self.required_expression()?;
            let span = dots.span.to(value.span);
            return Ok(Some(CallArgument::Positional(Argument { value,
                                                               spread: true,
                                                               span })));
        }
        if self.try_match(TokenKind::Identifier) && self.look(2) == TokenKind::Colon {
            let name = self.consume();
            self.consume();
            let value = self.required_expression()?;
            let span = name.span.to(value.span);
            return Ok(Some(CallArgument::Named(NamedArgument { name: name.text(),
                                                               value,
                                                               span })));
        }
        Ok(self.expression()?.map(|value| {
                                 CallArgument::Positional(Argument { span: value.span,
                                                                     value,
                                                                     spread: false })
                             }))
    }

    /// The arguments of a call, up to and including `closing`.
    ///
    /// # Errors
    /// - `PositionalAfterNamed` when a positional argument follows a named
    ///   one.
    /// - `DuplicatedNamedArgument` when a name is given twice.
    pub(super) fn arguments(&mut self, closing: TokenKind) -> ParseResult<(Arguments, Span)> {
        let items = self.list(Self::call_argument)?;
        let end = self.match_token(closing)?.span;
        let mut arguments = Arguments::default();
        for item in items {
            match item {
                CallArgument::Positional(argument) => {
                    if !arguments.named.is_empty() {
                        return Err(self.syntax_error(argument.span, Message::PositionalAfterNamed));
                    }
                    arguments.positional.push(argument);
                },
                CallArgument::Named(argument) => {
                    if arguments.named.iter().any(|other| other.name == argument.name) {
                        let name = argument.name;
                        return Err(self.syntax_error(argument.span,
                                                     Message::DuplicatedNamedArgument { name }));
                    }
                    arguments.named.push(argument);
                },
            }
        }
        Ok((arguments, end))
    }

    /// Grammar: `"(" arguments ")"`
    pub(super) fn parenthesized_arguments(&mut self) -> ParseResult<(Arguments, Span)> {
        self.match_token(TokenKind::LeftParenthesis)?;
        self.arguments(TokenKind::RightParenthesis)
    }

    /// Grammar: `property_init := identifier ("=" expression)?`
    fn property_init(&mut self) -> ParseResult<Option<PropertyInit>> {
        let Some(name) = self.accept(TokenKind::Identifier) else {
            return Ok(None);
        };
        let value = match self.accept(TokenKind::Equal) {
            Some(_) => self.required_expression()?,
            None => Expr::new(ExprKind::Variable(name.text()), name.span),
        };
        let span = name.span.to(value.span);
        Ok(Some(PropertyInit { name: name.text(),
                               value,
                               span }))
    }

    /// Grammar: `"{" property_init ("," property_init)* "}"`
    ///
    /// # Errors
    /// `DuplicatedProperty` when a property is initialized twice.
    pub(super) fn property_inits(&mut self) -> ParseResult<(Vec<PropertyInit>, Span)> {
        self.match_token(TokenKind::LeftBrace)?;
        let inits =
            self.unique_list(Self::property_init, |name| Message::DuplicatedProperty { name })?;
        let end = self.match_token(TokenKind::RightBrace)?.span;
        Ok((inits, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, syntax::lexer::Lexer};

    fn parser(source: &str) -> Parser<std::str::Chars<'_>> {
        Parser::new(Lexer::new(source.chars()), "test.add")
    }

    #[test]
    fn qualified_names() {
        let (name, span) = parser("io::File::open").qualified_name().unwrap();
        assert_eq!(name.to_string(), "io::File::open");
        assert_eq!(span.len(), 14);
    }

    #[test]
    fn signed_literals() {
        let (value, _) = parser("-5").literal_value().unwrap();
        assert_eq!(value, Value::Integer(-5));
        let (value, _) = parser("'x'").literal_value().unwrap();
        assert_eq!(value, Value::from("x"));
        let error = parser("-x").literal_value().unwrap_err();
        assert_eq!(error.message, Message::LiteralRequired);
    }

    #[test]
    fn parameter_forms() {
        let parameters = parser("&a, b!, c = -1, ..rest").parameters().unwrap();
        assert!(parameters[0].by_ref);
        assert!(!parameters[1].can_be_empty);
        assert_eq!(parameters[2].default, Some(Value::Integer(-1)));
        assert!(parameters[3].variadic);
    }

    #[test]
    fn parameter_order() {
        let error = parser("..a, b").parameters().unwrap_err();
        assert_eq!(error.message, Message::VaArgsMustBeTheLast);
        let error = parser("a = 1, b").parameters().unwrap_err();
        assert_eq!(error.message, Message::MandatoryParamsPrecede);
        let error = parser("a, a").parameters().unwrap_err();
        assert_eq!(error.kind, ErrorKind::Semantic);
        assert_eq!(error.message, Message::DuplicatedParameter { name: "a".to_string() });
        let error = parser("a = b").parameters().unwrap_err();
        assert_eq!(error.message, Message::LiteralRequired);
    }

    #[test]
    fn attribute_fields() {
        let attributes = parser("[Table('users', schema = 'public'), Obsolete]").attributes()
                                                                                 .unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].fields[0].0, Attribute::DEFAULT_FIELD);
        assert_eq!(attributes[0].fields[1].0, "schema");
        let error = parser("[A(1, 2)]").attributes().unwrap_err();
        assert_eq!(error.message, Message::DuplicatedAttributeValue);
        let error = parser("[A][A]").attributes().unwrap_err();
        assert_eq!(error.message, Message::DuplicatedAttribute { name: "A".to_string() });
    }

    #[test]
    fn named_arguments_come_last() {
        let (arguments, _) = parser("(1, ..xs, sep: ', ')").parenthesized_arguments().unwrap();
        assert_eq!(arguments.positional.len(), 2);
        assert!(arguments.positional[1].spread);
        assert_eq!(arguments.named[0].name, "sep");
        let error = parser("(a: 1, 2)").parenthesized_arguments().unwrap_err();
        assert_eq!((error.kind, error.message), (ErrorKind::Syntax, Message::PositionalAfterNamed));
        let error = parser("(a: 1, a: 2)").parenthesized_arguments().unwrap_err();
        assert_eq!(error.message, Message::DuplicatedNamedArgument { name: "a".to_string() });
    }
}
