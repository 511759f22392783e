//! # addyscript
//!
//! The front end and the value model of AddyScript, a dynamically typed
//! scripting language with classes, closures, pattern matching and string
//! interpolation.
//!
//! The crate turns source text into tokens, then into a validated syntax tree,
//! and provides the dynamic values scripts manipulate, arbitrary precision
//! decimals included. Executing the tree is left to an interpreter built on
//! top of it.

#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::ParseResult,
    syntax::{
        lexer::Lexer,
        parser::Parser,
        token::{Token, TokenKind},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the expressions, patterns, statements and
/// declarations produced by the parser. Every node carries the span of the
/// source text it was parsed from.
///
/// # Responsibilities
/// - Defines a node type for every language construct.
/// - Names the operators and the methods overloading them.
/// - Resolves the labels of blocks to statement indices.
pub mod ast;
/// Provides unified error types for parsing and value operations.
///
/// # Responsibilities
/// - Separates syntax errors from the static rules checked while parsing.
/// - Locates every parse error by file, line and column.
/// - Reports the failures of operations on dynamic values.
pub mod error;
/// The dynamic values manipulated by scripts and the numeric types behind
/// them.
pub mod runtime;
/// Lexing and parsing.
///
/// This module ties the lexer to the parser and defines the tokens and source
/// locations they exchange.
pub mod syntax;
/// General utilities for safe numeric conversion and index arithmetic.
pub mod util;

/// Parses a whole script.
///
/// `file_name` is only used to locate errors.
///
/// # Errors
/// The first syntax or semantic error found in the script.
///
/// # Examples
/// ```
/// use addyscript::parse;
///
/// let program = parse("var x = 2; println(x ** 10);", "demo.add").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// let error = parse("break;", "demo.add").unwrap_err();
/// assert_eq!(error.to_string(),
///            "demo.add(1,1): syntax error: break is only allowed in a loop or a switch");
/// ```
pub fn parse(source: &str, file_name: &str) -> ParseResult<Program> {
    Parser::new(Lexer::new(source.chars()), file_name).program()
}

/// Splits a script into tokens, comments included, up to and including the
/// `EndOfFile` token.
///
/// # Examples
/// ```
/// use addyscript::{syntax::token::TokenKind, tokenize};
///
/// let kinds: Vec<TokenKind> = tokenize("x += 1").iter().map(|token| token.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::PlusEqual,
///             TokenKind::Integer,
///             TokenKind::EndOfFile]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source.chars());
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
