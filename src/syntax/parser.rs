/// The token buffer and the generic combinators shared by every rule.
///
/// # Responsibilities
/// - Buffers tokens with unbounded look-ahead, comments being skipped.
/// - Matches single tokens and repeats rules (`asterisk`, `plus`, `list`).
/// - Builds syntax and semantic errors located at the current token.
pub mod base;
/// The class, function and block frames used to validate the program while
/// it is parsed.
pub mod scope;
/// Binary operators, from assignments down to exponentiation.
pub mod expression;
/// Prefix and postfix operators and the member access chain.
pub mod unary;
/// Atoms: literals, names, collections, lambdas and the like.
pub mod atom;
/// Patterns of `switch` expressions and `is` checks.
pub mod pattern;
/// Interpolated strings.
pub mod interpolation;
/// Statements and blocks.
pub mod statement;
/// Classes and their members.
pub mod class;
/// Parameters, attributes, arguments and names.
pub mod utils;

use crate::{
    ast::{Expr, Program},
    error::{Message, ParseResult},
    syntax::{
        lexer::Lexer,
        parser::{base::TokenBuffer, scope::ScopeStack},
        span::Span,
        token::TokenKind,
    },
};

/// A recursive descent parser over the tokens of a [`Lexer`].
///
/// Rules return `Ok(None)` when the current token cannot start them, and an
/// error once they have committed to a construct that turns out malformed.
///
/// # Example
/// ```
/// use addyscript::{
///     ast::StatementKind,
///     syntax::{lexer::Lexer, parser::Parser},
/// };
///
/// let source = "var total = 0; foreach (n in [1, 2, 3]) total += n;";
/// let program = Parser::new(Lexer::new(source.chars()), "sum.add").program().unwrap();
/// assert_eq!(program.statements.len(), 2);
/// assert!(matches!(program.statements[1].kind, StatementKind::ForEach { .. }));
/// ```
#[derive(Debug)]
pub struct Parser<I> {
    tokens:    TokenBuffer<I>,
    file_name: String,
    scopes:    ScopeStack,
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    pub fn new(lexer: Lexer<I>, file_name: impl Into<String>) -> Self {
        Self { tokens:    TokenBuffer::new(lexer),
               file_name: file_name.into(),
               scopes:    ScopeStack::new(), }
    }

    /// Parses a whole script.
    ///
    /// Grammar: `program := statement* EOF`
    ///
    /// # Errors
    /// The first syntax or semantic error found.
    pub fn program(mut self) -> ParseResult<Program> {
        let start = self.peek().span;
        let statements = self.asterisk(Self::statement)?;
        if !self.try_match(TokenKind::EndOfFile) {
            return Err(self.unexpected());
        }
        let end = self.peek().span;
        let labels = self.pop_root(&statements)?;
        Ok(Program { file_name: self.file_name,
                     statements,
                     labels,
                     span: Span::new(start.start, end.end) })
    }

    /// Parses an expression, if one starts at the current token.
    ///
    /// # Errors
    /// If the expression is malformed.
    pub fn expression(&mut self) -> ParseResult<Option<Expr>> {
        self.assignment()
    }

    /// Parses an expression that must be there.
    ///
    /// # Errors
    /// `ExpressionRequired` when no expression starts at the current token.
    pub fn required_expression(&mut self) -> ParseResult<Expr> {
        self.required(Self::expression, Message::ExpressionRequired)
    }
}
