/// Parsing errors.
///
/// Defines the error raised when the lexer output cannot be turned into a
/// program: grammar mismatches (syntax errors) and violations of the static
/// rules checked while parsing (semantic errors). Every error carries the file
/// name and the span of the offending element.
pub mod parse_error;
/// Value errors.
///
/// Contains the errors raised by operations on dynamic values: unsupported
/// operators, impossible coercions, division by zero, missing properties or
/// indexers, and failures reported by host objects.
pub mod runtime_error;

pub use parse_error::{ErrorKind, Message, ParseError, ParseResult};
pub use runtime_error::{ValueError, ValueResult};
