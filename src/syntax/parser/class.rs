use std::rc::Rc;

use crate::{
    ast::{
        Accessor, Arguments, Attribute, ClassDecl, Function, Member, MemberKind, Modifier,
        Overload, Parameter, Property, Scope, UnaryOperator,
    },
    error::{Message, ParseResult},
    syntax::{
        parser::{
            Parser,
            scope::{ClassFrame, FunctionFrame},
        },
        span::Span,
        token::{Token, TokenKind, TokenValue},
    },
};

/// The word introducing the reader of a property.
const READER: &str = "read";
/// The word introducing the writer of a property.
const WRITER: &str = "write";

/// Tokens accepted after `operator`.
const OVERLOADABLE: &[TokenKind] = &[TokenKind::Plus,
                                     TokenKind::Minus,
                                     TokenKind::DoublePlus,
                                     TokenKind::DoubleMinus,
                                     TokenKind::Tilda,
                                     TokenKind::Asterisk,
                                     TokenKind::Slash,
                                     TokenKind::Percent,
                                     TokenKind::DoubleAsterisk,
                                     TokenKind::DoubleLessThan,
                                     TokenKind::DoubleGreaterThan,
                                     TokenKind::Ampersand,
                                     TokenKind::VerticalBar,
                                     TokenKind::Circumflex,
                                     TokenKind::DoubleEqual,
                                     TokenKind::ExclamationEqual,
                                     TokenKind::LessThan,
                                     TokenKind::LessThanEqual,
                                     TokenKind::GreaterThan,
                                     TokenKind::GreaterThanEqual,
                                     TokenKind::StartsWith,
                                     TokenKind::EndsWith,
                                     TokenKind::Contains,
                                     TokenKind::Matches];

/// The operator overloaded by `kind` with `count` parameters, if the count
/// fits the operator.
///
/// `+` and `-` are unary without parameter and binary with one. `++` and
/// `--` are prefix without parameter and postfix with one. `~` takes none,
/// every other operator exactly one.
fn overload(kind: TokenKind, count: usize) -> Option<Overload> {
    let unary = match (kind, count) {
        (TokenKind::Plus, 0) => UnaryOperator::Plus,
        (TokenKind::Minus, 0) => UnaryOperator::Minus,
        (TokenKind::DoublePlus, 0) => UnaryOperator::PreIncrement,
        (TokenKind::DoublePlus, 1) => UnaryOperator::PostIncrement,
        (TokenKind::DoubleMinus, 0) => UnaryOperator::PreDecrement,
        (TokenKind::DoubleMinus, 1) => UnaryOperator::PostDecrement,
        (TokenKind::Tilda, 0) => UnaryOperator::BitwiseNot,
        (_, 1) => return kind.binary_operator().map(Overload::Binary),
        _ => return None,
    };
    Some(Overload::Unary(unary))
}

const fn modifier_of(token: &Token) -> Modifier {
    match token.value {
        TokenValue::Modifier(modifier) => modifier,
        _ => Modifier::Default,
    }
}

const fn scope_of(token: &Token) -> Scope {
    match token.value {
        TokenValue::Scope(scope) => scope,
        _ => Scope::Private,
    }
}

/// What precedes the keyword of a member.
struct Prefix {
    attributes: Vec<Attribute>,
    scope:      Scope,
    modifier:   Modifier,
    start:      Span,
    /// Whether any token was consumed.
    found:      bool,
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Parses a class and checks its members.
    ///
    /// Grammar: `class := modifier? "class" identifier (":" qualified_name)?
    /// "{" member* "}"`
    ///
    /// # Errors
    /// - `StaticClassHasNoSuperClass` when a static class names a parent.
    /// - Any error of [`Parser::check_members`].
    pub(super) fn class(&mut self, attributes: Vec<Attribute>) -> ParseResult<ClassDecl> {
        let start = self.current_span();
        let modifier = match self.accept(TokenKind::Modifier) {
            Some(token) => modifier_of(&token),
            None => Modifier::Default,
        };
        self.match_token(TokenKind::Class)?;
        let name = self.identifier()?;
        let parent = if self.try_match(TokenKind::Colon) {
            if modifier == Modifier::Static {
                let span = self.current_span();
                return Err(self.syntax_error(span, Message::StaticClassHasNoSuperClass));
            }
            self.consume();
            Some(self.qualified_name()?.0)
        } else {
            None
        };
        self.match_token(TokenKind::LeftBrace)?;
        self.push_class(ClassFrame { name: name.clone(),
                                     modifier,
                                     parent: parent.clone() });
        let members = self.asterisk(Self::member);
        self.pop_class();
        let members = members?;
        let close = self.match_token(TokenKind::RightBrace)?;
        self.check_members(modifier, &members)?;
        Ok(ClassDecl { name,
                       modifier,
                       parent,
                       attributes,
                       members,
                       span: start.to(close.span) })
    }

    /// Checks the rules binding the members of a class together.
    ///
    /// # Errors
    /// The first violated rule, as a semantic error located at the member:
    /// `SingleConstructor`, `SingleIndexer`, `MemberNameConflict`,
    /// `StaticClassMember`, `AbstractMemberInNonAbstractClass`,
    /// `InvalidFieldModifier`, `ConstantFieldShouldBeInitialized` or
    /// `SpecificFieldModifier`.
    fn check_members(&self, modifier: Modifier, members: &[Member]) -> ParseResult<()> {
        let mut constructors = 0;
        let mut indexers = 0;
        for (i, member) in members.iter().enumerate() {
            let error = |message| Err(self.semantic_error(member.span, message));
            match &member.kind {
                MemberKind::Constructor { .. } => {
                    constructors += 1;
                    if constructors > 1 {
                        return error(Message::SingleConstructor);
                    }
                },
                MemberKind::Property(property) if property.indexer => {
                    indexers += 1;
                    if indexers > 1 {
                        return error(Message::SingleIndexer);
                    }
                },
                _ => {},
            }
            if members[..i].iter().any(|other| other.name == member.name) {
                return error(Message::MemberNameConflict { name: member.name.clone() });
            }
            if modifier == Modifier::Static && !member.is_static() {
                return error(Message::StaticClassMember);
            }
            if modifier != Modifier::Abstract && member.modifier == Modifier::Abstract {
                return error(Message::AbstractMemberInNonAbstractClass);
            }
            match (&member.kind, member.modifier) {
                (MemberKind::Field { .. } | MemberKind::Event { .. }, Modifier::Abstract) => {
                    return error(Message::InvalidFieldModifier);
                },
                (MemberKind::Field { initializer: None }, Modifier::StaticFinal) => {
                    return error(Message::ConstantFieldShouldBeInitialized);
                },
                (MemberKind::Field { .. }, _) => {},
                (_, Modifier::StaticFinal) => return error(Message::SpecificFieldModifier),
                _ => {},
            }
        }
        Ok(())
    }

    /// `static final` and `final static` make a single modifier.
    fn member_modifier(&mut self) -> Modifier {
        let modifier = modifier_of(&self.consume());
        let pair = match modifier {
            Modifier::Static => Modifier::Final,
            Modifier::Final => Modifier::Static,
            _ => return modifier,
        };
        if self.try_match(TokenKind::Modifier) && modifier_of(self.peek()) == pair {
            self.consume();
            return Modifier::StaticFinal;
        }
        modifier
    }

    /// Grammar: `prefix := attributes (scope modifier? | modifier scope?)?`
    fn member_prefix(&mut self) -> ParseResult<Prefix> {
        let start = self.current_span();
        let attributes = self.attributes()?;
        let mut found = !attributes.is_empty();
        let mut scope = Scope::Private;
        let mut modifier = Modifier::Default;
        match self.peek().kind {
            TokenKind::Scope => {
                scope = scope_of(&self.consume());
                if self.try_match(TokenKind::Modifier) {
                    modifier = self.member_modifier();
                }
                found = true;
            },
            TokenKind::Modifier => {
                modifier = self.member_modifier();
                if let Some(token) = self.accept(TokenKind::Scope) {
                    scope = scope_of(&token);
                }
                found = true;
            },
            _ => {},
        }
        Ok(Prefix { attributes,
                    scope,
                    modifier,
                    start,
                    found })
    }

    /// Grammar: `member := prefix (field | constructor | property | method |
    /// operator | event)`
    fn member(&mut self) -> ParseResult<Option<Member>> {
        let prefix = self.member_prefix()?;
        let (name, kind, end) = match self.peek().kind {
            TokenKind::Identifier => self.field()?,
            TokenKind::Constructor => self.constructor(&prefix)?,
            TokenKind::Property => self.property(&prefix)?,
            TokenKind::Function => self.method(&prefix)?,
            TokenKind::Operator => self.operator(&prefix)?,
            TokenKind::Event => self.event()?,
            _ if prefix.found => return Err(self.unexpected()),
            _ => return Ok(None),
        };
        Ok(Some(Member { name,
                         scope: prefix.scope,
                         modifier: prefix.modifier,
                         attributes: prefix.attributes,
                         kind,
                         span: prefix.start.to(end) }))
    }

    /// Grammar: `field := identifier ("=" expression)? ";"`
    fn field(&mut self) -> ParseResult<(String, MemberKind, Span)> {
        let name = self.identifier()?;
        let initializer = match self.accept(TokenKind::Equal) {
            Some(_) => Some(self.required_expression()?),
            None => None,
        };
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok((name, MemberKind::Field { initializer }, end))
    }

    /// Grammar: `constructor := "constructor" "(" parameters ")" (":" "super"
    /// arguments)? block`
    ///
    /// # Errors
    /// `InvalidConstructorModifier` when the constructor has a modifier.
    fn constructor(&mut self, prefix: &Prefix) -> ParseResult<(String, MemberKind, Span)> {
        let first = self.consume();
        if prefix.modifier != Modifier::Default {
            return Err(self.semantic_error(first.span, Message::InvalidConstructorModifier));
        }
        let parameters = self.parenthesized_parameters()?;
        let super_arguments: Option<Arguments> = if self.accept(TokenKind::Colon).is_some() {
            self.match_token(TokenKind::Super)?;
            Some(self.parenthesized_arguments()?.0)
        } else {
            None
        };
        self.push_function(FunctionFrame::constructor());
        let body = self.block(false)?;
        self.pop_function()?;
        let end = body.span;
        let function = Function { parameters,
                                  body: Some(body),
                                  span: first.span.to(end) };
        let name = self.scopes.class().map_or_else(String::new, |class| class.name.clone());
        Ok((name,
            MemberKind::Constructor { function: Rc::new(function),
                                      super_arguments },
            end))
    }

    /// The body of a method, parsed in a frame of its own.
    fn method_function(&mut self,
                       name: &str,
                       is_static: bool,
                       parameters: Vec<Parameter>,
                       start: Span)
                       -> ParseResult<Function> {
        self.push_function(FunctionFrame::method(name, is_static));
        let body = self.function_body()?;
        self.pop_function()?;
        Ok(Function { parameters,
                      span: start.to(body.span),
                      body: Some(body) })
    }

    /// Grammar: `method := "function" identifier "(" parameters ")"
    /// (function_body | ";")`, the latter for abstract methods only.
    ///
    /// # Errors
    /// `AbstractMemberCantHaveBody` when an abstract method has a body.
    fn method(&mut self, prefix: &Prefix) -> ParseResult<(String, MemberKind, Span)> {
        let first = self.consume();
        let name = self.identifier()?;
        let parameters = self.parenthesized_parameters()?;
        if prefix.modifier == Modifier::Abstract {
            if self.try_match_any(&[TokenKind::LeftBrace, TokenKind::Arrow]) {
                let span = self.current_span();
                return Err(self.semantic_error(span, Message::AbstractMemberCantHaveBody));
            }
            let end = self.match_token(TokenKind::SemiColon)?.span;
            let function = Function { parameters,
                                      body: None,
                                      span: first.span.to(end) };
            return Ok((name, MemberKind::Method(Rc::new(function)), end));
        }
        let function =
            self.method_function(&name, prefix.modifier.is_static(), parameters, first.span)?;
        let end = function.span;
        Ok((name, MemberKind::Method(Rc::new(function)), end))
    }

    /// Grammar: `operator := "operator" overloadable "(" parameters ")"
    /// function_body`
    ///
    /// # Errors
    /// - `InvalidOperatorModifier` when the operator has a modifier.
    /// - `UnoverloadableOperator` for a token that cannot be overloaded.
    /// - `InvalidOperandCount` when the parameters do not fit the operator.
    fn operator(&mut self, prefix: &Prefix) -> ParseResult<(String, MemberKind, Span)> {
        let first = self.consume();
        if prefix.modifier != Modifier::Default {
            return Err(self.semantic_error(first.span, Message::InvalidOperatorModifier));
        }
        if !self.try_match_any(OVERLOADABLE) {
            let token = self.peek().clone();
            let operator = token.text();
            return Err(self.syntax_error(token.span, Message::UnoverloadableOperator { operator }));
        }
        let token = self.consume();
        let parameters = self.parenthesized_parameters()?;
        let Some(overload) = overload(token.kind, parameters.len()) else {
            let operator = token.text();
            return Err(self.semantic_error(token.span, Message::InvalidOperandCount { operator }));
        };
        let name = overload.method_name().to_string();
        let function = Rc::new(self.method_function(&name, false, parameters, first.span)?);
        let end = function.span;
        Ok((name, MemberKind::Operator { overload, function }, end))
    }

    /// Grammar: `event := "event" identifier "(" parameters ")" ";"`
    fn event(&mut self) -> ParseResult<(String, MemberKind, Span)> {
        self.consume();
        let name = self.identifier()?;
        let parameters = self.parenthesized_parameters()?;
        let end = self.match_token(TokenKind::SemiColon)?.span;
        Ok((name, MemberKind::Event { parameters }, end))
    }

    /// Grammar:
    /// ```text
    /// property := "property" (identifier | "[" "]")
    ///             (";" | "=>" expression ";" | "{" accessors "}")
    /// ```
    ///
    /// # Errors
    /// - `AbstractMemberCantHaveBody` when an abstract property has a body.
    /// - `IndexerCantBeStatic` and `IndexerCantBeAuto` for indexers.
    fn property(&mut self, prefix: &Prefix) -> ParseResult<(String, MemberKind, Span)> {
        let first = self.consume();
        let indexer = self.accept(TokenKind::LeftBracket).is_some();
        let name = if indexer {
            self.match_token(TokenKind::RightBracket)?;
            Property::INDEXER_NAME.to_string()
        } else {
            self.identifier()?
        };
        let is_static = prefix.modifier.is_static();
        let is_abstract = prefix.modifier == Modifier::Abstract;
        let (reader, writer, end) = match self.peek().kind {
            TokenKind::SemiColon => {
                let end = self.consume().span;
                let accessor = Accessor { scope:    prefix.scope,
                                          function: None, };
                (Some(accessor.clone()), Some(accessor), end)
            },
            TokenKind::Arrow => {
                if is_abstract {
                    let span = self.current_span();
                    return Err(self.semantic_error(span, Message::AbstractMemberCantHaveBody));
                }
                let start = self.current_span();
                let reader_name = format!("{name}.{READER}");
                let function = self.method_function(&reader_name, is_static, Vec::new(), start)?;
                let end = function.span;
                let reader = Accessor { scope:    prefix.scope,
                                        function: Some(Rc::new(function)), };
                (Some(reader), None, end)
            },
            _ => self.accessors(&name, prefix)?,
        };
        let has_body = |accessor: &Option<Accessor>| {
            accessor.as_ref().is_some_and(|accessor| accessor.function.is_some())
        };
        let automatic = !is_abstract && !has_body(&reader) && !has_body(&writer);
        if indexer && is_static {
            return Err(self.semantic_error(first.span, Message::IndexerCantBeStatic));
        }
        if indexer && automatic {
            return Err(self.semantic_error(first.span, Message::IndexerCantBeAuto));
        }
        Ok((name,
            MemberKind::Property(Property { indexer,
                                            reader,
                                            writer,
                                            automatic }),
            end))
    }

    /// The scope given to an accessor.
    ///
    /// # Errors
    /// - `BothAccessorsCantRedefineScope` when the other accessor already
    ///   redefines its scope.
    /// - `AccessorScopeMustBeMoreRestrictive` when the scope is not narrower
    ///   than the scope of the property.
    fn accessor_scope(&mut self,
                      property: Scope,
                      other: Option<Scope>)
                      -> ParseResult<Option<Scope>> {
        let Some(token) = self.accept(TokenKind::Scope) else {
            return Ok(None);
        };
        if other.is_some() {
            return Err(self.semantic_error(token.span, Message::BothAccessorsCantRedefineScope));
        }
        let scope = scope_of(&token);
        if scope >= property {
            return Err(self.semantic_error(token.span,
                                           Message::AccessorScopeMustBeMoreRestrictive));
        }
        Ok(Some(scope))
    }

    /// Grammar: `accessor_body := ";" | function_body`
    fn accessor_body(&mut self,
                     name: &str,
                     prefix: &Prefix)
                     -> ParseResult<Option<Rc<Function>>> {
        if self.accept(TokenKind::SemiColon).is_some() {
            return Ok(None);
        }
        if prefix.modifier == Modifier::Abstract {
            let span = self.current_span();
            return Err(self.semantic_error(span, Message::AbstractMemberCantHaveBody));
        }
        let start = self.current_span();
        let function =
            self.method_function(name, prefix.modifier.is_static(), Vec::new(), start)?;
        Ok(Some(Rc::new(function)))
    }

    /// The expanded form of a property: a read accessor, a write accessor or
    /// both, in any order.
    ///
    /// Grammar: `accessors := "{" scope? word accessor_body (scope? word
    /// accessor_body)? "}"`
    ///
    /// # Errors
    /// `NoEmptyProperty` when no accessor is given.
    fn accessors(&mut self,
                 name: &str,
                 prefix: &Prefix)
                 -> ParseResult<(Option<Accessor>, Option<Accessor>, Span)> {
        self.match_token(TokenKind::LeftBrace)?;
        let mut reader = None;
        let mut writer = None;
        let mut redefined = None;
        loop {
            let scope = self.accessor_scope(prefix.scope, redefined)?;
            let token = self.peek().clone();
            let word = if token.is_word(READER) && reader.is_none() {
                READER
            } else if token.is_word(WRITER) && writer.is_none() {
                WRITER
            } else if reader.is_none() && writer.is_none() {
                return Err(self.syntax_error(token.span, Message::NoEmptyProperty));
            } else if scope.is_some() {
                return Err(self.unexpected());
            } else {
                break;
            };
            self.consume();
            redefined = redefined.or(scope);
            let function = self.accessor_body(&format!("{name}.{word}"), prefix)?;
            let accessor = Some(Accessor { scope: scope.unwrap_or(prefix.scope),
                                           function });
            if word == READER {
                reader = accessor;
            } else {
                writer = accessor;
            }
        }
        let end = self.match_token(TokenKind::RightBrace)?.span;
        Ok((reader, writer, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, Statement, StatementKind},
        error::ErrorKind,
        syntax::lexer::Lexer,
    };

    fn parse(source: &str) -> Rc<ClassDecl> {
        let mut program = Parser::new(Lexer::new(source.chars()), "test.add").program().unwrap();
        match program.statements.remove(0) {
            Statement { kind: StatementKind::Class(class), .. } => class,
            other => panic!("not a class: {other:?}"),
        }
    }

    fn fails(source: &str) -> (ErrorKind, Message) {
        let error = Parser::new(Lexer::new(source.chars()), "test.add").program().unwrap_err();
        (error.kind, error.message)
    }

    #[test]
    fn members() {
        let class = parse("
            [Serializable]
            class Point : Shape {
                public x = 0;
                private static final ORIGIN = 0;
                constructor (x) : super('point') { this.x = x; }
                public function norm() => this.x * this.x;
                property size;
                property half => this.x / 2;
                public property [] { read => this.x; protected write { this.x = __value; } }
                operator + (other) => new Point(this.x + other.x);
                operator - () => new Point(-this.x);
                event moved(dx, dy);
            }");
        assert_eq!(class.name, "Point");
        assert_eq!(class.parent.as_ref().map(ToString::to_string).as_deref(), Some("Shape"));
        assert_eq!(class.attributes[0].name, "Serializable");
        assert_eq!(class.members.len(), 10);
        assert_eq!(class.members[1].modifier, Modifier::StaticFinal);
        assert_eq!(class.member("x").map(|member| member.scope), Some(Scope::Public));
        let Some(MemberKind::Constructor { super_arguments, .. }) =
            class.constructor().map(|member| &member.kind)
        else {
            panic!("no constructor");
        };
        assert_eq!(super_arguments.as_ref().map(Arguments::len), Some(1));
        let Some(MemberKind::Property(indexer)) =
            class.member(Property::INDEXER_NAME).map(|member| &member.kind)
        else {
            panic!("no indexer");
        };
        assert_eq!(indexer.writer.as_ref().map(|writer| writer.scope), Some(Scope::Protected));
        assert!(class.member("op_add").is_some());
        assert!(class.member("op_neg").is_some());
        let Some(MemberKind::Property(size)) = class.member("size").map(|member| &member.kind)
        else {
            panic!("no size property");
        };
        assert!(size.automatic);
    }

    #[test]
    fn abstract_classes() {
        let class = parse("abstract class Shape { abstract function area(); abstract property \
                           name { read; } }");
        assert_eq!(class.modifier, Modifier::Abstract);
        let MemberKind::Method(area) = &class.members[0].kind else {
            panic!("not a method");
        };
        assert!(area.body.is_none());
        assert_eq!(fails("class A { abstract function f(); }"),
                   (ErrorKind::Semantic, Message::AbstractMemberInNonAbstractClass));
        assert_eq!(fails("abstract class A { abstract function f() { } }"),
                   (ErrorKind::Semantic, Message::AbstractMemberCantHaveBody));
        assert_eq!(fails("abstract class A { abstract x; }"),
                   (ErrorKind::Semantic, Message::InvalidFieldModifier));
    }

    #[test]
    fn static_classes() {
        let class = parse("static class Math { static function sqr(x) => x * x; }");
        assert_eq!(class.members.len(), 1);
        assert_eq!(fails("static class Math : Base { }"),
                   (ErrorKind::Syntax, Message::StaticClassHasNoSuperClass));
        assert_eq!(fails("static class Math { function sqr(x) => x * x; }"),
                   (ErrorKind::Semantic, Message::StaticClassMember));
        assert_eq!(fails("class A { static function f() => this; }"),
                   (ErrorKind::Syntax, Message::ThisUsedOutOfMethod));
    }

    #[test]
    fn member_rules() {
        assert!(matches!(fails("class A { x; function x() { } }"),
                         (ErrorKind::Semantic, Message::MemberNameConflict { .. })));
        assert_eq!(fails("class A { constructor () { } constructor (a) { } }"),
                   (ErrorKind::Semantic, Message::SingleConstructor));
        assert_eq!(fails("class A { static final X; }"),
                   (ErrorKind::Semantic, Message::ConstantFieldShouldBeInitialized));
        assert_eq!(fails("class A { static final function f() { } }"),
                   (ErrorKind::Semantic, Message::SpecificFieldModifier));
        assert_eq!(fails("class A { static constructor () { } }"),
                   (ErrorKind::Semantic, Message::InvalidConstructorModifier));
        assert_eq!(fails("class A { constructor () { return 1; } }"),
                   (ErrorKind::Semantic, Message::ConstructorCantReturnValue));
    }

    #[test]
    fn properties() {
        assert_eq!(fails("class A { property p { } }"),
                   (ErrorKind::Syntax, Message::NoEmptyProperty));
        assert_eq!(fails("class A { public property p { public read; write; } }"),
                   (ErrorKind::Semantic, Message::AccessorScopeMustBeMoreRestrictive));
        assert_eq!(fails("class A { public property p { private read; protected write; } }"),
                   (ErrorKind::Semantic, Message::BothAccessorsCantRedefineScope));
        assert_eq!(fails("class A { property []; }"),
                   (ErrorKind::Semantic, Message::IndexerCantBeAuto));
        assert_eq!(fails("class A { static property [] => 1; }"),
                   (ErrorKind::Semantic, Message::IndexerCantBeStatic));
        assert_eq!(fails("class A { property [] => 1; property [] => 2; }"),
                   (ErrorKind::Semantic, Message::SingleIndexer));
    }

    #[test]
    fn operators() {
        assert_eq!(fails("class A { operator = (x) { } }"),
                   (ErrorKind::Syntax,
                    Message::UnoverloadableOperator { operator: "=".to_string() }));
        assert_eq!(fails("class A { operator * () { } }"),
                   (ErrorKind::Semantic,
                    Message::InvalidOperandCount { operator: "*".to_string() }));
        assert_eq!(fails("class A { static operator + (x) { } }"),
                   (ErrorKind::Semantic, Message::InvalidOperatorModifier));
        let class = parse("class A { operator ++ (x) { } operator == (x) => true; }");
        assert!(class.member("op_postinc").is_some());
        let MemberKind::Operator { overload, .. } = &class.members[1].kind else {
            panic!("not an operator");
        };
        assert_eq!(*overload, Overload::Binary(BinaryOperator::Equal));
    }

    #[test]
    fn iterators_may_yield() {
        let class = parse("class Range { function iterator() { yield 1; yield 2; } }");
        assert!(class.member("iterator").is_some());
        assert_eq!(fails("class A { function iterator() { return 1; } }"),
                   (ErrorKind::Semantic, Message::IteratorCantReturnValue));
        assert_eq!(fails("class A { static function iterator() { yield 1; } }"),
                   (ErrorKind::Syntax, Message::YieldUsedOutOfIterator));
    }
}
