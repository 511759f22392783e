use crate::{
    ast::{Expr, ExprKind},
    error::{Message, ParseResult},
    syntax::{
        lexer::Lexer,
        parser::{Parser, base::TokenBuffer},
        span::Location,
        token::Token,
    },
};

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Splits the text of an interpolated string into a pattern and the
    /// expressions substituted in it.
    ///
    /// Each `{expression}` becomes a numbered placeholder `{0}`, `{1}`, ...
    /// An `,alignment` or `:format` suffix is kept verbatim inside the
    /// placeholder. `{{` stays an escaped brace, and a lone `}` is escaped so
    /// that the pattern only holds placeholders.
    ///
    /// Every expression is read by a parser of its own, started on the rest of
    /// the text and sharing the current class and function.
    ///
    /// # Errors
    /// `MissingClosingBrace` when an expression is not closed by `}`, and any
    /// error raised while parsing an expression.
    pub(super) fn interpolation(&mut self, token: &Token) -> ParseResult<Expr> {
        let text: Vec<char> = token.text().chars().collect();
        let origin = token.span.start;
        let mut pattern = String::new();
        let mut substitutions = Vec::new();
        let mut counter = 0;
        while counter < text.len() {
            let c = text[counter];
            counter += 1;
            match c {
                '{' if text.get(counter) == Some(&'{') => {
                    pattern.push_str("{{");
                    counter += 1;
                },
                '{' => {
                    let location = Location { offset: origin.offset + 2 + counter,
                                              ..origin };
                    let substitution = self.substitution(&text[counter..], location)?;
                    counter += substitution.span.end.offset - location.offset;
                    while text.get(counter).is_some_and(|c| c.is_whitespace()) {
                        counter += 1;
                    }
                    pattern.push('{');
                    pattern.push_str(&substitutions.len().to_string());
                    match text.get(counter) {
                        Some(',' | ':') => {
                            let Some(close) = text[counter..].iter().position(|&c| c == '}')
                            else {
                                return Err(self.semantic_error(substitution.span,
                                                               Message::MissingClosingBrace));
                            };
                            pattern.extend(&text[counter..counter + close]);
                            counter += close;
                        },
                        Some('}') => {},
                        _ => {
                            return Err(self.semantic_error(substitution.span,
                                                           Message::MissingClosingBrace));
                        },
                    }
                    pattern.push('}');
                    counter += 1;
                    substitutions.push(substitution);
                },
                '}' if text.get(counter) == Some(&'}') => {
                    pattern.push_str("}}");
                    counter += 1;
                },
                '}' => pattern.push_str("}}"),
                c => pattern.push(c),
            }
        }
        Ok(ExprKind::Interpolation { pattern, substitutions }.at(token.span))
    }

    /// Parses the expression at the start of `rest`.
    fn substitution(&self, rest: &[char], location: Location) -> ParseResult<Expr> {
        let lexer = Lexer::with_location(rest.iter().copied(), location);
        let mut parser = Parser { tokens:    TokenBuffer::new(lexer),
                                  file_name: self.file_name.clone(),
                                  scopes:    self.scopes.context(), };
        parser.required_expression()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, runtime::value::Value};

    fn parse(source: &str) -> (String, Vec<Expr>) {
        let expr = Parser::new(Lexer::new(source.chars()), "test.add").required_expression()
                                                                       .unwrap();
        match expr.kind {
            ExprKind::Interpolation { pattern, substitutions } => (pattern, substitutions),
            other => panic!("not an interpolation: {other:?}"),
        }
    }

    #[test]
    fn placeholders_are_numbered() {
        let (pattern, substitutions) = parse("$'{a} + {b} = {a + b}'");
        assert_eq!(pattern, "{0} + {1} = {2}");
        assert_eq!(substitutions.len(), 3);
        assert!(matches!(substitutions[2].kind, ExprKind::Binary { .. }));
    }

    #[test]
    fn format_suffixes_are_kept() {
        let (pattern, _) = parse("$'[{name,-10}] {price:0.00}'");
        assert_eq!(pattern, "[{0,-10}] {1:0.00}");
    }

    #[test]
    fn braces_are_escaped() {
        let (pattern, substitutions) = parse("$'{{x}} }'");
        assert_eq!(pattern, "{{x}} }}");
        assert!(substitutions.is_empty());
    }

    #[test]
    fn spaces_around_expressions() {
        let (pattern, substitutions) = parse("$'<{ 1 }>'");
        assert_eq!(pattern, "<{0}>");
        assert_eq!(substitutions[0].kind, ExprKind::Literal(Value::Integer(1)));
    }

    #[test]
    fn nested_calls_and_strings() {
        let (pattern, substitutions) = parse("$\"{join(', ', items)}!\"");
        assert_eq!(pattern, "{0}!");
        assert!(matches!(substitutions[0].kind, ExprKind::Call { .. }));
    }

    #[test]
    fn unclosed_expressions_fail() {
        let error = Parser::new(Lexer::new("$'{a b}'".chars()), "t").required_expression()
                                                                    .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Semantic);
        assert_eq!(error.message, Message::MissingClosingBrace);
        let error = Parser::new(Lexer::new("$'{a:5'".chars()), "t").required_expression()
                                                                   .unwrap_err();
        assert_eq!(error.message, Message::MissingClosingBrace);
    }

    #[test]
    fn this_is_checked_in_substitutions() {
        let error = Parser::new(Lexer::new("$'{this}'".chars()), "t").required_expression()
                                                                     .unwrap_err();
        assert_eq!(error.message, Message::ThisUsedOutOfMethod);
    }
}
