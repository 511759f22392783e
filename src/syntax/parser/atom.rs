use std::{collections::BTreeMap, rc::Rc};

use crate::{
    ast::{
        Argument, Arguments, Block, Expr, ExprKind, Function, Parameter, QualifiedName,
        Statement, StatementKind, SuperAccess,
    },
    error::{Message, ParseResult},
    syntax::{
        parser::{Parser, scope::FunctionFrame},
        token::{Token, TokenKind},
    },
};

/// A block made of `return value;`, the body of `=> value` functions.
pub(super) fn return_block(value: Expr) -> Block {
    let span = value.span;
    let statement = Statement::new(StatementKind::Return(Some(value)), span);
    Block::new(vec![statement], BTreeMap::new(), span)
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Parses the smallest complete expressions.
    ///
    /// Grammar:
    /// ```text
    /// atom := literal | "this" | super | new | typeof | type_member | name
    ///       | "(" expression ")" | cast | set_or_map | list | lambda
    ///       | inline_function | interpolated_string
    /// ```
    pub(super) fn atom(&mut self) -> ParseResult<Option<Expr>> {
        let kind = self.peek().kind;
        let expr = match kind {
            _ if kind.is_literal() => {
                let token = self.consume();
                let Some(value) = token.literal().cloned() else {
                    return Err(self.syntax_error(token.span, Message::LiteralRequired));
                };
                ExprKind::Literal(value).at(token.span)
            },
            TokenKind::This => self.this()?,
            TokenKind::Super => self.super_access()?,
            TokenKind::New => self.new_object()?,
            TokenKind::TypeOf => self.type_of()?,
            TokenKind::TypeName => self.type_member()?,
            TokenKind::Identifier => self.name()?,
            TokenKind::LeftParenthesis => self.parenthesis()?,
            TokenKind::LeftBrace => self.set_or_map()?,
            TokenKind::LeftBracket => self.list_literal()?,
            TokenKind::VerticalBar | TokenKind::DoubleVerticalBar => self.lambda()?,
            TokenKind::Function => self.inline_function()?,
            TokenKind::MutableString => {
                let token = self.consume();
                self.interpolation(&token)?
            },
            _ => return Ok(None),
        };
        Ok(Some(expr))
    }

    /// `this`, only inside an instance method.
    fn this(&mut self) -> ParseResult<Expr> {
        let token = self.consume();
        let function = self.scopes.function();
        if !function.is_method || function.is_static {
            return Err(self.syntax_error(token.span, Message::ThisUsedOutOfMethod));
        }
        Ok(ExprKind::This.at(token.span))
    }

    /// Grammar: `super := "super" ("::" name arguments? | "[" expression "]")`
    fn super_access(&mut self) -> ParseResult<Expr> {
        let token = self.consume();
        if !self.scopes.function().is_method {
            return Err(self.syntax_error(token.span, Message::SuperUsedOutOfMethod));
        }
        if self.accept(TokenKind::LeftBracket).is_some() {
            let index = self.required_expression()?;
            let end = self.match_token(TokenKind::RightBracket)?.span;
            let access = SuperAccess::Indexer(Box::new(index));
            return Ok(ExprKind::Super(access).at(token.span.to(end)));
        }
        self.match_token(TokenKind::DoubleColon)?;
        let name = self.member_name()?;
        if self.try_match(TokenKind::LeftParenthesis) {
            let (arguments, end) = self.parenthesized_arguments()?;
            let access = SuperAccess::Method { name: name.text(),
                                               arguments };
            return Ok(ExprKind::Super(access).at(token.span.to(end)));
        }
        Ok(ExprKind::Super(SuperAccess::Property(name.text())).at(token.span.to(name.span)))
    }

    /// Grammar: `new := "new" (property_inits | qualified_name arguments?
    /// property_inits?)`
    ///
    /// The arguments can only be left out when initializers follow.
    ///
    /// # Errors
    /// `InvalidNewUsage` when `new` is followed by neither.
    fn new_object(&mut self) -> ParseResult<Expr> {
        let token = self.consume();
        if self.try_match(TokenKind::LeftBrace) {
            let (initializers, end) = self.property_inits()?;
            return Ok(ExprKind::New { class: None,
                                      arguments: Arguments::default(),
                                      initializers }.at(token.span.to(end)));
        }
        if !self.try_match(TokenKind::Identifier) {
            let span = self.current_span();
            return Err(self.syntax_error(span, Message::InvalidNewUsage));
        }
        let (class, mut end) = self.qualified_name()?;
        let mut arguments = Arguments::default();
        let mut initializers = Vec::new();
        if self.try_match(TokenKind::LeftParenthesis) {
            (arguments, end) = self.parenthesized_arguments()?;
        } else if !self.try_match(TokenKind::LeftBrace) {
            return Err(self.unexpected());
        }
        if self.try_match(TokenKind::LeftBrace) {
            (initializers, end) = self.property_inits()?;
        }
        Ok(ExprKind::New { class: Some(class),
                           arguments,
                           initializers }.at(token.span.to(end)))
    }

    /// Grammar: `typeof := "typeof" "(" (type_name | qualified_name) ")"`
    fn type_of(&mut self) -> ParseResult<Expr> {
        let token = self.consume();
        self.match_token(TokenKind::LeftParenthesis)?;
        let name = match self.accept(TokenKind::TypeName) {
            Some(type_name) => type_name.text(),
            None if self.try_match(TokenKind::Identifier) => self.qualified_name()?.0.to_string(),
            None => {
                let span = self.current_span();
                return Err(self.syntax_error(span, Message::TypeNameExpected));
            },
        };
        let end = self.match_token(TokenKind::RightParenthesis)?.span;
        Ok(ExprKind::TypeOf(name).at(token.span.to(end)))
    }

    /// A builtin type name followed by a conversion `(value)` or a static
    /// member `::name`.
    fn type_member(&mut self) -> ParseResult<Expr> {
        let token = self.consume();
        let type_name = token.text();
        if self.accept(TokenKind::LeftParenthesis).is_some() {
            let operand = self.required_expression()?;
            let end = self.match_token(TokenKind::RightParenthesis)?.span;
            return Ok(ExprKind::Conversion { type_name,
                                             operand: Box::new(operand) }.at(token.span.to(end)));
        }
        self.match_token(TokenKind::DoubleColon)?;
        let member = self.member_name()?;
        let name = QualifiedName::new(vec![type_name, member.text()]);
        if self.try_match(TokenKind::LeftParenthesis) {
            let (arguments, end) = self.parenthesized_arguments()?;
            return Ok(ExprKind::Call { function: name,
                                       arguments }.at(token.span.to(end)));
        }
        Ok(ExprKind::StaticMember(name).at(token.span.to(member.span)))
    }

    /// A variable, a static member or a call of a named function.
    fn name(&mut self) -> ParseResult<Expr> {
        let (name, span) = self.qualified_name()?;
        if self.try_match(TokenKind::LeftParenthesis) {
            let (arguments, end) = self.parenthesized_arguments()?;
            return Ok(ExprKind::Call { function: name,
                                       arguments }.at(span.to(end)));
        }
        let kind = if name.is_simple() {
            ExprKind::Variable(name.last().to_string())
        } else {
            ExprKind::StaticMember(name)
        };
        Ok(kind.at(span))
    }

    /// A cast `(type) value` or a parenthesized expression.
    fn parenthesis(&mut self) -> ParseResult<Expr> {
        if self.look_ahead_while(TokenKind::RightParenthesis, |kind| kind == TokenKind::TypeName)
           == Some(3)
        {
            let start = self.consume().span;
            let type_name = self.consume().text();
            self.consume();
            let operand = self.required(Self::prefix, Message::ExpressionRequired)?;
            let span = start.to(operand.span);
            return Ok(ExprKind::Conversion { type_name,
                                             operand: Box::new(operand) }.at(span));
        }
        let start = self.consume().span;
        let inner = self.required_expression()?;
        let end = self.match_token(TokenKind::RightParenthesis)?.span;
        Ok(inner.kind.at(start.to(end)))
    }

    /// A list element, possibly spread with `..`.
    fn element(&mut self) -> ParseResult<Option<Argument>> {
        if let Some(dots) = self.accept(TokenKind::DoubleDot) {
            let value = self.required_expression()?;
            let span = dots.span.to(value.span);
            return Ok(Some(Argument { value,
                                      spread: true,
                                      span }));
        }
        Ok(self.expression()?.map(|value| {
                                 Argument { span: value.span,
                                            value,
                                            spread: false }
                             }))
    }

    /// Grammar: `list := "[" (element ("," element)*)? "]"`
    fn list_literal(&mut self) -> ParseResult<Expr> {
        let start = self.consume().span;
        let elements = self.list(Self::element)?;
        let end = self.match_token(TokenKind::RightBracket)?.span;
        Ok(ExprKind::List(elements).at(start.to(end)))
    }

    /// A set `{a, ..b}` or a map `{k => v}`. `{}` is the empty set and `{=>}`
    /// the empty map.
    fn set_or_map(&mut self) -> ParseResult<Expr> {
        let start = self.consume().span;
        if let Some(end) = self.accept(TokenKind::RightBrace) {
            return Ok(ExprKind::Set(Vec::new()).at(start.to(end.span)));
        }
        if self.accept(TokenKind::Arrow).is_some() {
            let end = self.match_token(TokenKind::RightBrace)?.span;
            return Ok(ExprKind::Map(Vec::new()).at(start.to(end)));
        }
        let first = self.required(Self::element, Message::ExpressionRequired)?;
        if first.spread || !self.try_match(TokenKind::Arrow) {
            let mut elements = vec![first];
            while self.accept(TokenKind::Comma).is_some() {
                elements.push(self.required(Self::element, Message::AbnormalListTermination)?);
            }
            let end = self.match_token(TokenKind::RightBrace)?.span;
            return Ok(ExprKind::Set(elements).at(start.to(end)));
        }
        self.consume();
        let mut entries = vec![(first.value, self.required_expression()?)];
        while self.accept(TokenKind::Comma).is_some() {
            let key = self.required(Self::expression, Message::AbnormalListTermination)?;
            self.match_token(TokenKind::Arrow)?;
            entries.push((key, self.required_expression()?));
        }
        let end = self.match_token(TokenKind::RightBrace)?.span;
        Ok(ExprKind::Map(entries).at(start.to(end)))
    }

    /// Grammar: `lambda := ("|" parameters "|" | "||") "=>" (block |
    /// expression)`
    fn lambda(&mut self) -> ParseResult<Expr> {
        let start = self.consume();
        let parameters = if start.kind == TokenKind::DoubleVerticalBar {
            Vec::new()
        } else {
            let parameters = self.parameters()?;
            self.match_token(TokenKind::VerticalBar)?;
            parameters
        };
        self.match_token(TokenKind::Arrow)?;
        let function = self.function_literal(&start, parameters, false)?;
        let span = function.span;
        Ok(ExprKind::Function(Rc::new(function)).at(span))
    }

    /// Grammar: `inline_function := "function" "(" parameters ")" ("{" block
    /// | "=>" expression)`
    fn inline_function(&mut self) -> ParseResult<Expr> {
        let start = self.consume();
        let parameters = self.parenthesized_parameters()?;
        let arrow = self.accept(TokenKind::Arrow).is_some();
        let function = self.function_literal(&start, parameters, !arrow)?;
        let span = function.span;
        Ok(ExprKind::Function(Rc::new(function)).at(span))
    }

    /// The body of a lambda or an inline function, parsed in a frame of its
    /// own. A body that is not a block must be a block when `block_only`.
    fn function_literal(&mut self,
                        start: &Token,
                        parameters: Vec<Parameter>,
                        block_only: bool)
                        -> ParseResult<Function> {
        let frame = FunctionFrame::lambda(self.scopes.function());
        self.push_function(frame);
        let body = if block_only || self.try_match(TokenKind::LeftBrace) {
            self.block(false)?
        } else {
            return_block(self.required_expression()?)
        };
        self.pop_function()?;
        Ok(Function { span: start.span.to(body.span),
                      parameters,
                      body: Some(body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, runtime::value::Value, syntax::lexer::Lexer};

    fn parse(source: &str) -> Expr {
        Parser::new(Lexer::new(source.chars()), "test.add").required_expression()
                                                            .unwrap()
    }

    fn fails(source: &str) -> (ErrorKind, Message) {
        let error = Parser::new(Lexer::new(source.chars()), "test.add").required_expression()
                                                                        .unwrap_err();
        (error.kind, error.message)
    }

    #[test]
    fn literals_and_names() {
        assert_eq!(parse("42").kind, ExprKind::Literal(Value::Integer(42)));
        assert_eq!(parse("total").kind, ExprKind::Variable("total".to_string()));
        let ExprKind::StaticMember(name) = parse("Color::Red").kind else {
            panic!("not a static member");
        };
        assert_eq!(name.to_string(), "Color::Red");
        assert!(matches!(parse("math::max(1, 2)").kind, ExprKind::Call { .. }));
    }

    #[test]
    fn this_needs_an_instance_method() {
        assert_eq!(fails("this"), (ErrorKind::Syntax, Message::ThisUsedOutOfMethod));
        assert_eq!(fails("super::name"), (ErrorKind::Syntax, Message::SuperUsedOutOfMethod));
    }

    #[test]
    fn new_forms() {
        let ExprKind::New { class: None, initializers, .. } = parse("new { x = 1, y = 2 }").kind
        else {
            panic!("not an anonymous object");
        };
        assert_eq!(initializers.len(), 2);
        let ExprKind::New { class: Some(class), arguments, .. } = parse("new Point(1, 2)").kind
        else {
            panic!("not an object creation");
        };
        assert_eq!(class.to_string(), "Point");
        assert_eq!(arguments.len(), 2);
        assert!(matches!(parse("new Point { x = 1 }").kind, ExprKind::New { .. }));
        let found = "end of file".to_string();
        assert_eq!(fails("new Point"), (ErrorKind::Syntax, Message::UnexpectedToken { found }));
        assert_eq!(fails("new 3").1, Message::InvalidNewUsage);
        assert_eq!(fails("new { a = 1, a = 2 }").1,
                   Message::DuplicatedProperty { name: "a".to_string() });
    }

    #[test]
    fn types() {
        assert_eq!(parse("typeof(int)").kind, ExprKind::TypeOf("int".to_string()));
        assert!(matches!(parse("string(12)").kind, ExprKind::Conversion { .. }));
        assert!(matches!(parse("int::parse('3')").kind, ExprKind::Call { .. }));
        let ExprKind::Conversion { type_name, operand } = parse("(float) -x").kind else {
            panic!("not a cast");
        };
        assert_eq!(type_name, "float");
        assert!(matches!(operand.kind, ExprKind::Unary { .. }));
    }

    #[test]
    fn parentheses() {
        let expr = parse("(1 + 2) * 3");
        assert!(matches!(expr.kind, ExprKind::Binary { .. }));
        assert_eq!(expr.span.len(), 11);
        assert!(matches!(fails("(1, 2)").1, Message::UnexpectedToken { .. }));
    }

    #[test]
    fn collections() {
        assert_eq!(parse("{}").kind, ExprKind::Set(Vec::new()));
        assert_eq!(parse("{=>}").kind, ExprKind::Map(Vec::new()));
        let ExprKind::Map(entries) = parse("{'a' => 1, 'b' => 2}").kind else {
            panic!("not a map");
        };
        assert_eq!(entries.len(), 2);
        let ExprKind::Set(elements) = parse("{1, ..others}").kind else {
            panic!("not a set");
        };
        assert!(elements[1].spread);
        let ExprKind::List(elements) = parse("[1, [2, 3], ..rest]").kind else {
            panic!("not a list");
        };
        assert_eq!(elements.len(), 3);
        assert_eq!(fails("[1, 2,]").1, Message::AbnormalListTermination);
    }

    #[test]
    fn lambdas() {
        let ExprKind::Function(function) = parse("|a, b| => a + b").kind else {
            panic!("not a lambda");
        };
        assert_eq!(function.parameters.len(), 2);
        let body = function.body.as_ref().unwrap();
        assert!(matches!(body.statements[0].kind, StatementKind::Return(Some(_))));
        assert!(matches!(parse("|| => { return 1; }").kind, ExprKind::Function(_)));
        assert!(matches!(parse("function (x) { return x * 2; }").kind, ExprKind::Function(_)));
        assert!(matches!(parse("function (x) => x * 2").kind, ExprKind::Function(_)));
    }
}
