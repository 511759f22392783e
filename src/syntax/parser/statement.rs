use std::{collections::BTreeMap, rc::Rc};

use crate::{
    ast::{
        Attribute, Block, CatchClause, Declarator, Expr, ExternDecl, Function, FunctionDecl,
        GotoTarget, Statement, StatementKind, statement::DEFAULT_LABEL,
    },
    error::{Message, ParseResult},
    runtime::value::Value,
    syntax::{
        parser::{
            Parser,
            atom::return_block,
            scope::{DEFAULT_KEY_NAME, FunctionFrame},
        },
        span::Span,
        token::TokenKind,
    },
};

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Parses a statement, preceded by any number of labels.
    ///
    /// Empty statements (`;`) are skipped.
    ///
    /// Grammar: `statement := (identifier ":")* (declaration | block |
    /// control | expression ";")`
    pub(super) fn statement(&mut self) -> ParseResult<Option<Statement>> {
        while self.try_match(TokenKind::Identifier) && self.look(2) == TokenKind::Colon {
            let name = self.consume();
            let colon = self.consume();
            self.declare_label(name.text(), colon.span.end.offset, name.span)?;
        }
        while self.accept(TokenKind::SemiColon).is_some() {}
        let start = self.current_span();
        let kind = self.peek().kind;
        let statement = match kind {
            TokenKind::LeftBracket => self.attributed()?,
            TokenKind::Import => self.import()?,
            TokenKind::Modifier | TokenKind::Class => {
                let class = self.class(Vec::new())?;
                let span = class.span;
                Statement::new(StatementKind::Class(Rc::new(class)), span)
            },
            TokenKind::Function if self.look(2) == TokenKind::Identifier => {
                self.function_declaration(Vec::new(), start)?
            },
            TokenKind::Extern => self.extern_declaration(Vec::new(), start)?,
            TokenKind::Const => self.constants()?,
            TokenKind::Var => self.variables()?,
            TokenKind::Let => self.let_assignment()?,
            TokenKind::LeftBrace => {
                let block = self.block(false)?;
                let span = block.span;
                Statement::new(StatementKind::Block(block), span)
            },
            TokenKind::If => self.if_else()?,
            TokenKind::Switch => self.switch()?,
            TokenKind::For => self.for_loop()?,
            TokenKind::ForEach => self.foreach_loop()?,
            TokenKind::While => self.while_loop()?,
            TokenKind::Do => self.do_loop()?,
            TokenKind::Continue => self.continue_statement()?,
            TokenKind::Break => self.break_statement()?,
            TokenKind::Goto => self.goto()?,
            TokenKind::Yield => self.yield_statement()?,
            TokenKind::Return => self.return_statement()?,
            TokenKind::Throw => {
                let first = self.consume();
                let value = self.required_expression()?;
                let end = self.match_token(TokenKind::SemiColon)?.span;
                Statement::new(StatementKind::Throw(value), first.span.to(end))
            },
            TokenKind::Try => self.try_catch_finally()?,
            _ => return self.expression_statement(),
        };
        Ok(Some(statement))
    }

    /// A block of statements, the labels declared inside it being resolved
    /// once it is closed.
    ///
    /// `as_expression` tells whether the block is the value of a match case,
    /// which allows `yield` inside it.
    ///
    /// Grammar: `block := "{" statement* "}"`
    pub(super) fn block(&mut self, as_expression: bool) -> ParseResult<Block> {
        let first = self.match_token(TokenKind::LeftBrace)?;
        self.push_block(as_expression);
        let statements = self.asterisk(Self::statement)?;
        let last = self.match_token(TokenKind::RightBrace)?;
        let labels = self.pop_block(&statements);
        Ok(Block::new(statements, labels, first.span.to(last.span)))
    }

    /// The body of a named function or method: a block, or `=> expression;`.
    pub(super) fn function_body(&mut self) -> ParseResult<Block> {
        if self.accept(TokenKind::Arrow).is_none() {
            return self.block(false);
        }
        let value =
            self.required(|parser| parser.throw_or(Self::expression), Message::ExpressionRequired)?;
        let end = self.match_token(TokenKind::SemiColon)?.span;
        let mut block = return_block(value);
        block.span = block.span.to(end);
        Ok(block)
    }

    fn expression_statement(&mut self) -> ParseResult<Option<Statement>> {
        let Some(value) = self.expression()? else {
            return Ok(None);
        };
        let end = self.match_token(TokenKind::SemiColon)?.span;
        let span = value.span.to(end);
        Ok(Some(Statement::new(StatementKind::Expression(value), span)))
    }

    /// Grammar: `attributes (class | function | extern)`
    ///
    /// # Errors
    /// `AttributesNotSupported` when the attributes precede another statement.
    fn attributed(&mut self) -> ParseResult<Statement> {
        let start = self.current_span();
        let attributes = self.attributes()?;
        match self.peek().kind {
            TokenKind::Modifier | TokenKind::Class => {
                let class = self.class(attributes)?;
                let span = start.to(class.span);
                Ok(Statement::new(StatementKind::Class(Rc::new(class)), span))
            },
            TokenKind::Function => self.function_declaration(attributes, start),
            TokenKind::Extern => self.extern_declaration(attributes, start),
            _ => {
                let span = self.current_span();
                Err(self.syntax_error(span, Message::AttributesNotSupported))
            },
        }
    }

    /// Grammar: `import := "import" qualified_name ("as" identifier)? ";"`
    fn import(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let (path, _) = self.qualified_name()?;
        let alias = match self.accept(TokenKind::As) {
            Some(_) => Some(self.identifier()?),
            None => None,
        };
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Import { path, alias }, first.span.to(end)))
    }

    /// Grammar: `function_declaration := "function" identifier "(" parameters
    /// ")" function_body`
    fn function_declaration(&mut self,
                            attributes: Vec<Attribute>,
                            start: Span)
                            -> ParseResult<Statement> {
        let first = self.match_token(TokenKind::Function)?;
        let name = self.identifier()?;
        let parameters = self.parenthesized_parameters()?;
        self.push_function(FunctionFrame::function(name.clone()));
        let body = self.function_body()?;
        self.pop_function()?;
        let function = Function { parameters,
                                  span: first.span.to(body.span),
                                  body: Some(body) };
        let span = start.to(function.span);
        let declaration = FunctionDecl { name,
                                         function: Rc::new(function),
                                         attributes,
                                         span };
        Ok(Statement::new(StatementKind::Function(Rc::new(declaration)), span))
    }

    /// Grammar: `extern := "extern" "function" identifier "(" parameters ")"
    /// ";"`
    fn extern_declaration(&mut self,
                          attributes: Vec<Attribute>,
                          start: Span)
                          -> ParseResult<Statement> {
        self.match_token(TokenKind::Extern)?;
        self.match_token(TokenKind::Function)?;
        let name = self.identifier()?;
        let parameters = self.parenthesized_parameters()?;
        let span = start.to(self.match_token(TokenKind::SemiColon)?.span);
        Ok(Statement::new(StatementKind::Extern(ExternDecl { name,
                                                             parameters,
                                                             attributes,
                                                             span }),
                          span))
    }

    /// Grammar: `identifier ("=" expression)?`
    fn declarator(&mut self) -> ParseResult<Option<Declarator>> {
        let Some(name) = self.accept(TokenKind::Identifier) else {
            return Ok(None);
        };
        let value = match self.accept(TokenKind::Equal) {
            Some(_) => Some(self.required_expression()?),
            None => None,
        };
        let span = value.as_ref().map_or(name.span, |value| name.span.to(value.span));
        Ok(Some(Declarator { name: name.text(),
                             value,
                             span }))
    }

    /// Grammar: `constant := identifier "=" expression`
    fn constant(&mut self) -> ParseResult<Option<Declarator>> {
        let Some(name) = self.accept(TokenKind::Identifier) else {
            return Ok(None);
        };
        self.match_token(TokenKind::Equal)?;
        let value = self.required_expression()?;
        Ok(Some(Declarator { name:  name.text(),
                             span:  name.span.to(value.span),
                             value: Some(value), }))
    }

    /// Grammar: `constants := "const" constant ("," constant)* ";"`
    ///
    /// # Errors
    /// `DuplicatedConstant` when a name is declared twice.
    fn constants(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let declarators =
            self.unique_list(Self::constant, |name| Message::DuplicatedConstant { name })?;
        if declarators.is_empty() {
            return Err(self.unexpected());
        }
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Constants(declarators), first.span.to(end)))
    }

    /// Grammar: `variables := "var" declarator ("," declarator)* ";"`
    fn variables(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let declarators = self.list(Self::declarator)?;
        if declarators.is_empty() {
            return Err(self.unexpected());
        }
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Variables(declarators), first.span.to(end)))
    }

    /// Grammar: `let := "let" reference "=" expression ";"`
    ///
    /// # Errors
    /// `InvalidLValue` when the target cannot be assigned.
    fn let_assignment(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let target = self.required(Self::prefix, Message::ExpressionRequired)?;
        if !target.is_reference() {
            return Err(self.semantic_error(target.span, Message::InvalidLValue));
        }
        self.match_token(TokenKind::Equal)?;
        let value = self.required_expression()?;
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Let { target, value }, first.span.to(end)))
    }

    /// Grammar: `"(" expression ")"`
    fn condition(&mut self) -> ParseResult<Expr> {
        self.match_token(TokenKind::LeftParenthesis)?;
        let condition = self.required_expression()?;
        self.match_token(TokenKind::RightParenthesis)?;
        Ok(condition)
    }

    fn required_statement(&mut self) -> ParseResult<Statement> {
        self.required(Self::statement, Message::StatementRequired)
    }

    /// A statement parsed one loop deeper.
    fn loop_body(&mut self) -> ParseResult<Statement> {
        self.scopes.function_mut().loops += 1;
        let body = self.required_statement();
        self.scopes.function_mut().loops -= 1;
        body
    }

    /// Grammar: `if := "if" "(" expression ")" statement ("else" statement)?`
    fn if_else(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let condition = self.condition()?;
        let then_branch = self.required_statement()?;
        let else_branch = match self.accept(TokenKind::Else) {
            Some(_) => Some(Box::new(self.required_statement()?)),
            None => None,
        };
        let end = else_branch.as_ref().map_or(then_branch.span, |branch| branch.span);
        Ok(Statement::new(StatementKind::If { condition,
                                              then_branch: Box::new(then_branch),
                                              else_branch },
                          first.span.to(end)))
    }

    /// Grammar: `case_label := "case" (boolean | integer | string) ":"`
    ///
    /// # Errors
    /// `OnlyBoolIntOrString` for any other value.
    fn case_label(&mut self) -> ParseResult<(Value, Span)> {
        let first = self.consume();
        let token = self.consume();
        let value = match token.kind {
            TokenKind::Boolean | TokenKind::Integer | TokenKind::String => token.literal().cloned(),
            _ => None,
        };
        let Some(value) = value else {
            return Err(self.syntax_error(token.span, Message::OnlyBoolIntOrString));
        };
        let end = self.match_token(TokenKind::Colon)?.span;
        Ok((value, first.span.to(end)))
    }

    /// The sections of a switch are flattened into a single block. The
    /// address of each section is registered as a label of that block so
    /// that `goto case` and `goto default` can reach it.
    ///
    /// Grammar: `switch := "switch" "(" expression ")" "{" (case_label
    /// statement*)* ("default" ":" statement*)? "}"`
    ///
    /// # Errors
    /// - `DuplicatedCaseLabel` when a value is given to two sections.
    /// - `CaseLabelRequired` when the switch has no section at all.
    fn switch(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let subject = self.condition()?;
        let open = self.match_token(TokenKind::LeftBrace)?;
        self.push_block(false);
        self.scopes.function_mut().switches += 1;
        let mut statements = Vec::new();
        let mut cases = Vec::new();
        let mut sections = BTreeMap::new();
        while self.try_match(TokenKind::Case) {
            let (value, span) = self.case_label()?;
            let label = GotoTarget::Case(value.clone()).label_name();
            if sections.contains_key(&label) {
                return Err(self.semantic_error(span, Message::DuplicatedCaseLabel { label }));
            }
            sections.insert(label, statements.len());
            cases.push((value, statements.len()));
            statements.extend(self.asterisk(Self::statement)?);
        }
        let default = if self.accept(TokenKind::Default).is_some() {
            self.match_token(TokenKind::Colon)?;
            sections.insert(DEFAULT_LABEL.to_string(), statements.len());
            let address = statements.len();
            statements.extend(self.asterisk(Self::statement)?);
            Some(address)
        } else {
            None
        };
        let close = self.match_token(TokenKind::RightBrace)?;
        self.scopes.function_mut().switches -= 1;
        if cases.is_empty() && default.is_none() {
            return Err(self.syntax_error(first.span, Message::CaseLabelRequired));
        }
        let labels = self.pop_block_with(&statements, sections);
        let body = Block::new(statements, labels, open.span.to(close.span));
        Ok(Statement::new(StatementKind::Switch { subject,
                                                  cases,
                                                  default,
                                                  body },
                          first.span.to(close.span)))
    }

    /// Grammar: `for := "for" "(" (variables | expression ("," expression)*
    /// ";" | ";") expression? ";" (expression ("," expression)*)? ")"
    /// statement`
    fn for_loop(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        self.match_token(TokenKind::LeftParenthesis)?;
        let initializers = if self.try_match(TokenKind::Var) {
            vec![self.variables()?]
        } else {
            let expressions = self.list(Self::expression)?;
            self.match_token(TokenKind::SemiColon)?;
            expressions.into_iter()
                       .map(|value| {
                           let span = value.span;
                           Statement::new(StatementKind::Expression(value), span)
                       })
                       .collect()
        };
        let guard = self.expression()?;
        self.match_token(TokenKind::SemiColon)?;
        let updaters = self.list(Self::expression)?;
        self.match_token(TokenKind::RightParenthesis)?;
        let body = self.loop_body()?;
        let span = first.span.to(body.span);
        Ok(Statement::new(StatementKind::For { initializers,
                                               guard,
                                               updaters,
                                               body: Box::new(body) },
                          span))
    }

    /// Grammar: `foreach := "foreach" "(" (identifier "=>")? identifier "in"
    /// expression ")" statement`
    fn foreach_loop(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        self.match_token(TokenKind::LeftParenthesis)?;
        let mut key = DEFAULT_KEY_NAME.to_string();
        let mut value = self.identifier()?;
        if self.accept(TokenKind::Arrow).is_some() {
            key = value;
            value = self.identifier()?;
        }
        self.match_token(TokenKind::In)?;
        let collection = self.required_expression()?;
        self.match_token(TokenKind::RightParenthesis)?;
        let body = self.loop_body()?;
        let span = first.span.to(body.span);
        Ok(Statement::new(StatementKind::ForEach { key,
                                                   value,
                                                   collection,
                                                   body: Box::new(body) },
                          span))
    }

    /// Grammar: `while := "while" "(" expression ")" statement`
    fn while_loop(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let condition = self.condition()?;
        let body = self.loop_body()?;
        let span = first.span.to(body.span);
        Ok(Statement::new(StatementKind::While { condition,
                                                 body: Box::new(body) },
                          span))
    }

    /// Grammar: `do := "do" statement "while" "(" expression ")" ";"?`
    fn do_loop(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let body = self.loop_body()?;
        self.match_token(TokenKind::While)?;
        self.match_token(TokenKind::LeftParenthesis)?;
        let condition = self.required_expression()?;
        let mut end = self.match_token(TokenKind::RightParenthesis)?.span;
        if let Some(semicolon) = self.accept(TokenKind::SemiColon) {
            end = semicolon.span;
        }
        Ok(Statement::new(StatementKind::DoWhile { body: Box::new(body),
                                                   condition },
                          first.span.to(end)))
    }

    /// # Errors
    /// `NoContinueOutOfLoop` outside of any loop.
    fn continue_statement(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        if self.scopes.function().loops == 0 {
            return Err(self.syntax_error(first.span, Message::NoContinueOutOfLoop));
        }
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Continue, first.span.to(end)))
    }

    /// # Errors
    /// `NoBreakOutOfLoop` outside of any loop or switch.
    fn break_statement(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let function = self.scopes.function();
        if function.loops == 0 && function.switches == 0 {
            return Err(self.syntax_error(first.span, Message::NoBreakOutOfLoop));
        }
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Break, first.span.to(end)))
    }

    /// Grammar: `goto := "goto" (identifier | "case" (boolean | integer |
    /// string) | "default") ";"`
    ///
    /// # Errors
    /// `JumpToCaseOutOfSwitch` for `goto case` and `goto default` outside of
    /// a switch.
    fn goto(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let target = match self.peek().kind {
            TokenKind::Case => {
                self.consume();
                let token =
                    self.match_any(&[TokenKind::Boolean, TokenKind::Integer, TokenKind::String])?;
                GotoTarget::Case(token.literal().cloned().unwrap_or(Value::Void))
            },
            TokenKind::Default => {
                self.consume();
                GotoTarget::Default
            },
            _ => GotoTarget::Label(self.identifier()?),
        };
        let span = first.span.to(self.match_token(TokenKind::SemiColon)?.span);
        if !matches!(target, GotoTarget::Label(_)) && self.scopes.function().switches == 0 {
            return Err(self.semantic_error(span, Message::JumpToCaseOutOfSwitch));
        }
        self.declare_goto(target.label_name(), span);
        Ok(Statement::new(StatementKind::Goto(target), span))
    }

    /// # Errors
    /// `YieldUsedOutOfIterator` outside of an iterator method or a block used
    /// as an expression.
    fn yield_statement(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        if !self.scopes.can_yield() {
            return Err(self.syntax_error(first.span, Message::YieldUsedOutOfIterator));
        }
        let value = self.required_expression()?;
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Yield(value), first.span.to(end)))
    }

    /// # Errors
    /// - `CannotReturnFromFinally` inside a finally block.
    /// - `ScriptCannotReturnValue`, `ConstructorCantReturnValue` and
    ///   `IteratorCantReturnValue` when a value is returned where none is
    ///   expected.
    fn return_statement(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        if self.scopes.function().finally_blocks > 0 {
            return Err(self.syntax_error(first.span, Message::CannotReturnFromFinally));
        }
        let value = self.expression()?;
        if let Some(value) = &value {
            let function = self.scopes.function();
            let message = if function.is_main() {
                Some(Message::ScriptCannotReturnValue)
            } else if function.is_constructor {
                Some(Message::ConstructorCantReturnValue)
            } else if function.is_iterator() {
                Some(Message::IteratorCantReturnValue)
            } else {
                None
            };
            if let Some(message) = message {
                return Err(self.semantic_error(value.span, message));
            }
        }
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok(Statement::new(StatementKind::Return(value), first.span.to(end)))
    }

    /// Grammar: `try := "try" ("(" expression ")")? block ("catch" "("
    /// identifier ")" block)? ("finally" block)?`
    ///
    /// # Errors
    /// `CatchOrFinallyRequired` when a try without resource has neither a
    /// catch nor a finally block.
    fn try_catch_finally(&mut self) -> ParseResult<Statement> {
        let first = self.consume();
        let resource = if self.try_match(TokenKind::LeftParenthesis) {
            Some(self.condition()?)
        } else {
            None
        };
        let body = self.block(false)?;
        let mut end = body.span;
        let catch = match self.accept(TokenKind::Catch) {
            Some(_) => {
                self.match_token(TokenKind::LeftParenthesis)?;
                let name = self.identifier()?;
                self.match_token(TokenKind::RightParenthesis)?;
                let block = self.block(false)?;
                end = block.span;
                Some(CatchClause { name, block })
            },
            None => None,
        };
        let finally = match self.accept(TokenKind::Finally) {
            Some(_) => {
                self.scopes.function_mut().finally_blocks += 1;
                let block = self.block(false);
                self.scopes.function_mut().finally_blocks -= 1;
                let block = block?;
                end = block.span;
                Some(block)
            },
            None => None,
        };
        if resource.is_none() && catch.is_none() && finally.is_none() {
            return Err(self.syntax_error(first.span, Message::CatchOrFinallyRequired));
        }
        Ok(Statement::new(StatementKind::Try { resource,
                                               body,
                                               catch,
                                               finally },
                          first.span.to(end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Program, error::ErrorKind, syntax::lexer::Lexer};

    fn parse(source: &str) -> Program {
        Parser::new(Lexer::new(source.chars()), "test.add").program().unwrap()
    }

    fn fails(source: &str) -> (ErrorKind, Message) {
        let error = Parser::new(Lexer::new(source.chars()), "test.add").program().unwrap_err();
        (error.kind, error.message)
    }

    fn first(source: &str) -> StatementKind {
        parse(source).statements.remove(0).kind
    }

    #[test]
    fn declarations() {
        let StatementKind::Import { path, alias } = first("import io::file as f;") else {
            panic!("not an import");
        };
        assert_eq!(path.to_string(), "io::file");
        assert_eq!(alias.as_deref(), Some("f"));
        let StatementKind::Variables(declarators) = first("var a, b = 1;") else {
            panic!("not a variable declaration");
        };
        assert!(declarators[0].value.is_none() && declarators[1].value.is_some());
        assert_eq!(fails("const A = 1, A = 2;"),
                   (ErrorKind::Semantic, Message::DuplicatedConstant { name: "A".to_string() }));
    }

    #[test]
    fn let_needs_an_assignable_target() {
        assert!(matches!(first("let [a, b] = pair;"), StatementKind::Let { .. }));
        assert_eq!(fails("let 1 = x;"), (ErrorKind::Semantic, Message::InvalidLValue));
    }

    #[test]
    fn functions() {
        let StatementKind::Function(declaration) = first("function twice(x) => x * 2;") else {
            panic!("not a function");
        };
        assert_eq!(declaration.name, "twice");
        assert_eq!(declaration.function.parameters.len(), 1);
        let StatementKind::Extern(declaration) = first("[Native('lib')] extern function f(a);")
        else {
            panic!("not an extern function");
        };
        assert_eq!(declaration.attributes[0].name, "Native");
        assert_eq!(fails("[Native] var x;"), (ErrorKind::Syntax, Message::AttributesNotSupported));
    }

    #[test]
    fn labels_point_at_the_next_statement() {
        let program = parse("var i = 0; again: i++; if (i < 3) goto again; done:");
        assert_eq!(program.labels["again"], 1);
        assert_eq!(program.labels["done"], 3);
    }

    #[test]
    fn gotos_reach_enclosing_blocks() {
        let program = parse("outer: { { goto outer; } }");
        assert_eq!(program.labels["outer"], 0);
        let name = "nowhere".to_string();
        assert_eq!(fails("{ goto nowhere; }"),
                   (ErrorKind::Semantic, Message::UndeclaredLabel { name }));
        assert_eq!(fails("a: a: ;"),
                   (ErrorKind::Semantic, Message::DuplicatedLabel { name: "a".to_string() }));
    }

    #[test]
    fn labels_stay_inside_their_function() {
        assert_eq!(fails("start: function f() { goto start; }"),
                   (ErrorKind::Semantic, Message::UndeclaredLabel { name: "start".to_string() }));
    }

    #[test]
    fn switch_sections() {
        let StatementKind::Switch { cases, default, body, .. } =
            first("switch (x) { case 1: a(); b(); case 'two': goto case 1; default: break; }")
        else {
            panic!("not a switch");
        };
        assert_eq!(cases, [(Value::Integer(1), 0), (Value::from("two"), 2)]);
        assert_eq!(default, Some(3));
        assert_eq!(body.address("default"), Some(3));
        assert_eq!(body.address(&GotoTarget::Case(Value::Integer(1)).label_name()), Some(0));
    }

    #[test]
    fn switch_errors() {
        assert_eq!(fails("switch (x) { }"), (ErrorKind::Syntax, Message::CaseLabelRequired));
        assert_eq!(fails("switch (x) { case 1.5: break; }"),
                   (ErrorKind::Syntax, Message::OnlyBoolIntOrString));
        assert!(matches!(fails("switch (x) { case 1: case 1: break; }"),
                         (ErrorKind::Semantic, Message::DuplicatedCaseLabel { .. })));
        assert_eq!(fails("goto default;"), (ErrorKind::Semantic, Message::JumpToCaseOutOfSwitch));
        assert!(matches!(fails("switch (x) { case 1: goto case 2; }"),
                         (ErrorKind::Semantic, Message::UndeclaredLabel { .. })));
    }

    #[test]
    fn loops() {
        let StatementKind::For { initializers, guard, updaters, .. } =
            first("for (var i = 0; i < 10; i++, j--) print(i);")
        else {
            panic!("not a for loop");
        };
        assert_eq!(initializers.len(), 1);
        assert!(guard.is_some());
        assert_eq!(updaters.len(), 2);
        assert!(matches!(first("for (;;) break;"), StatementKind::For { guard: None, .. }));
        let StatementKind::ForEach { key, value, .. } = first("foreach (k => v in m) {}") else {
            panic!("not a foreach loop");
        };
        assert_eq!((key.as_str(), value.as_str()), ("k", "v"));
        let StatementKind::ForEach { key, .. } = first("foreach (v in m) {}") else {
            panic!("not a foreach loop");
        };
        assert_eq!(key, DEFAULT_KEY_NAME);
        assert!(matches!(first("do x++; while (x < 3);"), StatementKind::DoWhile { .. }));
    }

    #[test]
    fn jumps_need_a_target() {
        assert_eq!(fails("break;"), (ErrorKind::Syntax, Message::NoBreakOutOfLoop));
        assert_eq!(fails("switch (x) { case 1: continue; }"),
                   (ErrorKind::Syntax, Message::NoContinueOutOfLoop));
        assert_eq!(fails("while (true) { function f() { break; } }"),
                   (ErrorKind::Syntax, Message::NoBreakOutOfLoop));
        assert!(matches!(first("while (true) if (x) break; else continue;"),
                         StatementKind::While { .. }));
    }

    #[test]
    fn returns() {
        assert!(matches!(first("return;"), StatementKind::Return(None)));
        assert_eq!(fails("return 1;"), (ErrorKind::Semantic, Message::ScriptCannotReturnValue));
        assert_eq!(fails("function f() { try { } finally { return; } }"),
                   (ErrorKind::Syntax, Message::CannotReturnFromFinally));
        assert!(matches!(first("function f() { return 1; }"), StatementKind::Function(_)));
    }

    #[test]
    fn yields() {
        assert_eq!(fails("yield 1;"), (ErrorKind::Syntax, Message::YieldUsedOutOfIterator));
        assert_eq!(fails("{ yield 1; }"), (ErrorKind::Syntax, Message::YieldUsedOutOfIterator));
        assert!(matches!(first("var x = n switch { _ => { yield 1; } };"),
                         StatementKind::Variables(_)));
    }

    #[test]
    fn try_blocks() {
        let StatementKind::Try { resource, catch, finally, .. } =
            first("try { f(); } catch (e) { log(e); } finally { close(); }")
        else {
            panic!("not a try statement");
        };
        assert!(resource.is_none());
        assert_eq!(catch.map(|clause| clause.name).as_deref(), Some("e"));
        assert!(finally.is_some());
        assert!(matches!(first("try (file) { read(file); }"),
                         StatementKind::Try { resource: Some(_), .. }));
        assert_eq!(fails("try { }"), (ErrorKind::Syntax, Message::CatchOrFinallyRequired));
    }

    #[test]
    fn statements_must_end() {
        let found = "end of file".to_string();
        assert_eq!(fails("x = 1"), (ErrorKind::Syntax, Message::UnexpectedToken { found }));
        assert_eq!(fails("if (x)"), (ErrorKind::Syntax, Message::StatementRequired));
    }
}
