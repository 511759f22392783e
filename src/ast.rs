/// Expression nodes.
///
/// Declares `Expr`, its `ExprKind` variants, the unary and binary operators
/// and the small records shared by several expressions (arguments, property
/// initializers, match cases).
pub mod expression;
/// Declarations of functions, classes and their members.
///
/// # Responsibilities
/// - Describes parameters, attributes and function bodies.
/// - Describes classes, their members, scopes and modifiers.
pub mod declaration;
/// Patterns used by `switch` expressions and `is` checks.
pub mod pattern;
/// Statement nodes, blocks and the program root.
///
/// Blocks carry the addresses of the labels declared inside them, resolved
/// once all their statements are known.
pub mod statement;

use std::fmt::{self, Display};

pub use declaration::{
    Accessor, Attribute, ClassDecl, ExternDecl, Function, FunctionDecl, Member, MemberKind,
    Modifier, Overload, Parameter, Property, Scope,
};
pub use expression::{
    Argument, Arguments, BinaryOperator, Expr, ExprKind, MatchCase, NamedArgument,
    PropertyInit, SuperAccess, UnaryOperator,
};
pub use pattern::{FieldMatch, Pattern, PatternKind};
pub use statement::{Block, CatchClause, Declarator, GotoTarget, Program, Statement, StatementKind};

/// A `::` separated name such as `a::b::c`.
///
/// # Example
/// ```
/// use addyscript::ast::QualifiedName;
///
/// let name = QualifiedName::new(vec!["io".to_string(), "File".to_string()]);
/// assert_eq!(name.to_string(), "io::File");
/// assert!(!name.is_simple());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// The parts of the name, outermost first.
    pub segments: Vec<String>,
}

impl QualifiedName {
    #[must_use]
    pub const fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// A name made of a single identifier.
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self { segments: vec![name.into()] }
    }

    /// Whether the name holds a single identifier.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    /// The innermost part of the name.
    #[must_use]
    pub fn last(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}
