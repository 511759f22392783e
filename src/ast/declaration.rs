use std::rc::Rc;

use crate::{
    ast::{
        Arguments, Block, Expr, QualifiedName,
        expression::{BinaryOperator, UnaryOperator},
    },
    runtime::value::Value,
    syntax::span::Span,
};

/// The visibility of a class member, from the most restrictive to the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Scope {
    #[default]
    Private,
    Protected,
    Public,
}

impl Scope {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Public => "public",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "public" => Some(Self::Public),
            _ => None,
        }
    }
}

/// The modifier of a class or a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modifier {
    #[default]
    Default,
    Abstract,
    Final,
    Static,
    /// `static final`: a class constant.
    StaticFinal,
}

impl Modifier {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Abstract => "abstract",
            Self::Final => "final",
            Self::Static => "static",
            Self::StaticFinal => "static final",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "abstract" => Some(Self::Abstract),
            "final" => Some(Self::Final),
            "static" => Some(Self::Static),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_static(self) -> bool {
        matches!(self, Self::Static | Self::StaticFinal)
    }
}

/// `[Name(value, field = value)]`
///
/// An unnamed first value is stored under [`Attribute::DEFAULT_FIELD`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name:   String,
    pub fields: Vec<(String, Expr)>,
    pub span:   Span,
}

impl Attribute {
    pub const DEFAULT_FIELD: &'static str = "value";
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name:         String,
    /// `&name`
    pub by_ref:       bool,
    /// `..name`, collecting the remaining arguments.
    pub variadic:     bool,
    /// `false` for `name!`, which rejects empty arguments.
    pub can_be_empty: bool,
    /// The literal given after `=`.
    pub default:      Option<Value>,
    pub attributes:   Vec<Attribute>,
    pub span:         Span,
}

/// The signature and body shared by every kind of function.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub parameters: Vec<Parameter>,
    /// Missing for abstract methods and external functions.
    pub body:       Option<Block>,
    pub span:       Span,
}

/// `function name(params) body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name:       String,
    pub function:   Rc<Function>,
    pub attributes: Vec<Attribute>,
    pub span:       Span,
}

/// `extern function name(params);`
#[derive(Debug, Clone, PartialEq)]
pub struct ExternDecl {
    pub name:       String,
    pub parameters: Vec<Parameter>,
    pub attributes: Vec<Attribute>,
    pub span:       Span,
}

/// One of the two accessors of a property.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub scope:    Scope,
    /// Missing for an automatic or abstract accessor.
    pub function: Option<Rc<Function>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Whether this is the `property []` indexer.
    pub indexer:   bool,
    pub reader:    Option<Accessor>,
    pub writer:    Option<Accessor>,
    /// `property p;`, backed by a hidden field.
    pub automatic: bool,
}

impl Property {
    /// The name given to the indexer member.
    pub const INDEXER_NAME: &'static str = "[]";
}

/// The operator implemented by an `operator` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overload {
    Unary(UnaryOperator),
    Binary(BinaryOperator),
}

impl Overload {
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Unary(op) => op.method_name(),
            Self::Binary(op) => op.method_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Field {
        initializer: Option<Expr>,
    },
    Constructor {
        function:        Rc<Function>,
        /// `: super(arguments)`
        super_arguments: Option<Arguments>,
    },
    Property(Property),
    Method(Rc<Function>),
    Operator {
        overload: Overload,
        function: Rc<Function>,
    },
    Event {
        parameters: Vec<Parameter>,
    },
}

/// A member of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name:       String,
    pub scope:      Scope,
    pub modifier:   Modifier,
    pub attributes: Vec<Attribute>,
    pub kind:       MemberKind,
    pub span:       Span,
}

impl Member {
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.modifier.is_static()
    }
}

/// `class Name : Parent { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name:       String,
    pub modifier:   Modifier,
    pub parent:     Option<QualifiedName>,
    pub attributes: Vec<Attribute>,
    pub members:    Vec<Member>,
    pub span:       Span,
}

impl ClassDecl {
    /// The constructor, if the class declares one.
    #[must_use]
    pub fn constructor(&self) -> Option<&Member> {
        self.members
            .iter()
            .find(|member| matches!(member.kind, MemberKind::Constructor { .. }))
    }

    /// The member called `name`.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }
}
