/// Source locations.
///
/// Defines `Location`, a position in the source text, and `Span`, the pair of
/// locations bounding every token and syntax node.
pub mod span;
/// The tokens produced by the lexer.
///
/// # Responsibilities
/// - Enumerates every token kind, operators and keywords included.
/// - Carries the payload of literals, identifiers, scopes and modifiers.
pub mod token;
/// The table of reserved words.
pub mod keyword;
/// Turns characters into tokens.
///
/// The lexer never fails: malformed input becomes an `Unknown` token carrying
/// the offending text, and the parser decides what to make of it. Comments are
/// returned as tokens too.
///
/// # Responsibilities
/// - Buffers the character source with unbounded look-ahead.
/// - Recognizes numbers, strings, dates, identifiers and operators.
/// - Decodes escape sequences and attaches literal values to tokens.
pub mod lexer;
/// Turns tokens into a program.
///
/// A recursive descent parser that checks the context sensitive rules of the
/// language (labels, loops, `this`, class members) in the same pass.
///
/// # Responsibilities
/// - Buffers tokens with unbounded look-ahead and skips comments.
/// - Parses expressions by precedence level, patterns, statements and
///   classes.
/// - Tracks the class, function and block being parsed to validate them.
pub mod parser;
