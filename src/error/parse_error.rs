use std::fmt::{self, Display};

use thiserror::Error;

use crate::syntax::span::Span;

/// Whether an error comes from the grammar or from a static rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The tokens do not match the grammar.
    Syntax,
    /// The grammar matched but a rule checked while parsing is violated.
    Semantic,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Syntax => "syntax error",
                        Self::Semantic => "semantic error",
                    })
    }
}

/// The reason of a parse error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The current token cannot start or continue the construct being parsed.
    #[error("unexpected {found}")]
    UnexpectedToken {
        /// A description of the offending token.
        found: String,
    },
    #[error("an expression is expected")]
    ExpressionRequired,
    #[error("a statement is expected")]
    StatementRequired,
    #[error("a pattern is expected")]
    PatternRequired,
    #[error("a type name is expected")]
    TypeNameExpected,
    #[error("a parameter name is expected")]
    ParameterNameExpected,
    #[error("a list cannot end with a comma")]
    AbnormalListTermination,
    #[error("new must be followed by a class name or an object initializer")]
    InvalidNewUsage,
    #[error("attributes are only allowed on classes, functions and their members")]
    AttributesNotSupported,
    #[error("positional arguments must precede named arguments")]
    PositionalAfterNamed,
    #[error("the argument {name} is given twice")]
    DuplicatedNamedArgument { name: String },
    #[error("the left operand of an assignment must be a variable, a property or an item")]
    InvalidLValue,
    #[error("the interpolated expression is not followed by a closing brace")]
    MissingClosingBrace,
    #[error("this is only allowed in a non-static method")]
    ThisUsedOutOfMethod,
    #[error("super is only allowed in a method")]
    SuperUsedOutOfMethod,
    #[error("yield is only allowed in an iterator or in a block used as an expression")]
    YieldUsedOutOfIterator,
    #[error("break is only allowed in a loop or a switch")]
    NoBreakOutOfLoop,
    #[error("continue is only allowed in a loop")]
    NoContinueOutOfLoop,
    #[error("return is not allowed in a finally block")]
    CannotReturnFromFinally,
    #[error("the script body cannot return a value")]
    ScriptCannotReturnValue,
    #[error("a constructor cannot return a value")]
    ConstructorCantReturnValue,
    #[error("an iterator cannot return a value")]
    IteratorCantReturnValue,
    #[error("goto case and goto default are only allowed in a switch")]
    JumpToCaseOutOfSwitch,
    #[error("the label {name} is declared twice in the same block")]
    DuplicatedLabel { name: String },
    #[error("no label named {name} is reachable from this goto")]
    UndeclaredLabel { name: String },
    #[error("case values must be boolean, integer or string literals")]
    OnlyBoolIntOrString,
    #[error("the case {label} is declared twice")]
    DuplicatedCaseLabel { label: String },
    #[error("a switch needs at least one case or a default section")]
    CaseLabelRequired,
    #[error("a try block needs a catch or a finally block")]
    CatchOrFinallyRequired,
    #[error("the constant {name} is declared twice")]
    DuplicatedConstant { name: String },
    #[error("the property {name} is initialized twice")]
    DuplicatedProperty { name: String },
    #[error("the parameter {name} is declared twice")]
    DuplicatedParameter { name: String },
    #[error("a variadic parameter must be the last one")]
    VaArgsMustBeTheLast,
    #[error("parameters without a default value must precede the others")]
    MandatoryParamsPrecede,
    #[error("a default value must be a literal")]
    LiteralRequired,
    #[error("the attribute {name} is given twice")]
    DuplicatedAttribute { name: String },
    #[error("the attribute field {name} is given twice")]
    DuplicatedAttributeField { name: String },
    #[error("the default value of an attribute is given twice")]
    DuplicatedAttributeValue,
    #[error("a static class cannot have a superclass")]
    StaticClassHasNoSuperClass,
    #[error("the name {name} is used by two members")]
    MemberNameConflict { name: String },
    #[error("every member of a static class must be static")]
    StaticClassMember,
    #[error("abstract members are only allowed in abstract classes")]
    AbstractMemberInNonAbstractClass,
    #[error("fields and events cannot be abstract")]
    InvalidFieldModifier,
    #[error("a class constant must be initialized")]
    ConstantFieldShouldBeInitialized,
    #[error("only fields can be static final")]
    SpecificFieldModifier,
    #[error("a class can have only one indexer")]
    SingleIndexer,
    #[error("a class can have only one constructor")]
    SingleConstructor,
    #[error("a constructor takes no modifier")]
    InvalidConstructorModifier,
    #[error("an operator takes no modifier")]
    InvalidOperatorModifier,
    #[error("an abstract member cannot have a body")]
    AbstractMemberCantHaveBody,
    #[error("a property needs at least a read or a write accessor")]
    NoEmptyProperty,
    #[error("an accessor scope must be more restrictive than the scope of its property")]
    AccessorScopeMustBeMoreRestrictive,
    #[error("only one accessor can redefine its scope")]
    BothAccessorsCantRedefineScope,
    #[error("an indexer cannot be static")]
    IndexerCantBeStatic,
    #[error("an indexer cannot be automatic")]
    IndexerCantBeAuto,
    #[error("{operator} cannot be overloaded")]
    UnoverloadableOperator { operator: String },
    #[error("wrong number of parameters for operator {operator}")]
    InvalidOperandCount { operator: String },
}

/// An error raised while parsing a script.
///
/// Parsing stops at the first error. The span locates the offending token or
/// element in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind:    ErrorKind,
    pub file:    String,
    pub span:    Span,
    pub message: Message,
}

impl ParseError {
    #[must_use]
    pub fn syntax(file: impl Into<String>, span: Span, message: Message) -> Self {
        Self { kind: ErrorKind::Syntax,
               file: file.into(),
               span,
               message }
    }

    #[must_use]
    pub fn semantic(file: impl Into<String>, span: Span, message: Message) -> Self {
        Self { kind: ErrorKind::Semantic,
               file: file.into(),
               span,
               message }
    }
}

impl Display for ParseError {
    /// Formats the error as `file(line,column): syntax error: message`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{}({},{}): {}: {}",
               self.file,
               self.span.start.line,
               self.span.start.column(),
               self.kind,
               self.message)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.message)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::span::Location;

    #[test]
    fn display_locates_the_error() {
        let start = Location { offset:      14,
                               line_offset: 10,
                               line:        2, };
        let error = ParseError::syntax("demo.add",
                                       Span::new(start, start),
                                       Message::NoBreakOutOfLoop);
        assert_eq!(error.to_string(),
                   "demo.add(2,5): syntax error: break is only allowed in a loop or a switch");
    }

    #[test]
    fn semantic_errors_say_so() {
        let error = ParseError::semantic("x.add",
                                         Span::default(),
                                         Message::UndeclaredLabel { name: "end".to_string() });
        assert_eq!(error.kind, ErrorKind::Semantic);
        assert!(error.to_string().contains("semantic error: no label named end"));
    }
}
