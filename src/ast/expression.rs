use std::rc::Rc;

use crate::{
    ast::{Block, Function, Pattern, QualifiedName},
    runtime::value::Value,
    syntax::span::Span,
};

/// Operators taking a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `!x`
    Not,
    /// `~x`
    BitwiseNot,
    /// `++x`
    PreIncrement,
    /// `x++`
    PostIncrement,
    /// `--x`
    PreDecrement,
    /// `x--`
    PostDecrement,
    /// `x!`, true when the operand is not empty.
    NotEmpty,
}

impl UnaryOperator {
    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not | Self::NotEmpty => "!",
            Self::BitwiseNot => "~",
            Self::PreIncrement | Self::PostIncrement => "++",
            Self::PreDecrement | Self::PostDecrement => "--",
        }
    }

    /// The name of the method overloading the operator in a class.
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Plus => "op_plus",
            Self::Minus => "op_neg",
            Self::Not => "op_not",
            Self::BitwiseNot => "op_complement",
            Self::PreIncrement => "op_preinc",
            Self::PostIncrement => "op_postinc",
            Self::PreDecrement => "op_predec",
            Self::PostDecrement => "op_postdec",
            Self::NotEmpty => "op_notempty",
        }
    }
}

/// Operators taking two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    Power,
    ShiftLeft,
    ShiftRight,
    /// `&`
    And,
    /// `&&`, short-circuited.
    AndAlso,
    /// `|`
    Or,
    /// `||`, short-circuited.
    OrElse,
    /// `^`
    ExclusiveOr,
    Equal,
    NotEqual,
    /// `===`: same kind and equal values.
    Identical,
    /// `!==`
    NotIdentical,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    StartsWith,
    EndsWith,
    Contains,
    Matches,
    /// `??`: the right operand when the left one is empty.
    IfEmpty,
}

impl BinaryOperator {
    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "**",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::And => "&",
            Self::AndAlso => "&&",
            Self::Or => "|",
            Self::OrElse => "||",
            Self::ExclusiveOr => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Identical => "===",
            Self::NotIdentical => "!==",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Contains => "contains",
            Self::Matches => "matches",
            Self::IfEmpty => "??",
        }
    }

    /// The name of the method overloading the operator in a class.
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Plus => "op_add",
            Self::Minus => "op_sub",
            Self::Times => "op_mul",
            Self::Divide => "op_div",
            Self::Modulo => "op_mod",
            Self::Power => "op_pow",
            Self::ShiftLeft => "op_shl",
            Self::ShiftRight => "op_shr",
            Self::And | Self::AndAlso => "op_and",
            Self::Or | Self::OrElse => "op_or",
            Self::ExclusiveOr => "op_xor",
            Self::Equal | Self::Identical => "op_eq",
            Self::NotEqual | Self::NotIdentical => "op_ne",
            Self::LessThan => "op_lt",
            Self::LessThanOrEqual => "op_le",
            Self::GreaterThan => "op_gt",
            Self::GreaterThanOrEqual => "op_ge",
            Self::StartsWith => "op_startswith",
            Self::EndsWith => "op_endswith",
            Self::Contains => "op_contains",
            Self::Matches => "op_matches",
            Self::IfEmpty => "op_ifempty",
        }
    }
}

/// A positional argument, possibly spread with `..`.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The argument expression.
    pub value:  Expr,
    /// Whether the elements of the value are passed one by one.
    pub spread: bool,
    /// The source location of the argument, `..` included.
    pub span:   Span,
}

/// A `name: value` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    pub name:  String,
    pub value: Expr,
    pub span:  Span,
}

/// The arguments of a call: positional ones first, named ones after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    pub positional: Vec<Argument>,
    pub named:      Vec<NamedArgument>,
}

impl Arguments {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }
}

/// A `name = value` initializer of `new { ... }` and `with { ... }`.
///
/// A bare `name` stands for `name = name`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInit {
    pub name:  String,
    pub value: Expr,
    pub span:  Span,
}

/// A case of a `switch` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    pub pattern: Pattern,
    /// An extra condition introduced by `when`.
    pub guard:   Option<Expr>,
    /// The value of the case, possibly an [`ExprKind::Block`].
    pub result:  Expr,
    pub span:    Span,
}

/// The three ways of reaching the parent class.
#[derive(Debug, Clone, PartialEq)]
pub enum SuperAccess {
    /// `super::name`
    Property(String),
    /// `super::name(arguments)`
    Method {
        name:      String,
        arguments: Arguments,
    },
    /// `super[index]`
    Indexer(Box<Expr>),
}

/// The different kinds of expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A constant value.
    Literal(Value),
    /// A reference to a variable.
    Variable(String),
    /// A static member `a::b`, or a member of a builtin type such as
    /// `int::parse`.
    StaticMember(QualifiedName),
    /// `this`
    This,
    /// `super::...` or `super[...]`
    Super(SuperAccess),
    Unary {
        op:      UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        op:    BinaryOperator,
        left:  Box<Expr>,
        right: Box<Expr>,
    },
    /// `target = value` or a compound assignment such as `target += value`.
    Assignment {
        /// The operator of a compound assignment.
        op:     Option<BinaryOperator>,
        target: Box<Expr>,
        value:  Box<Expr>,
    },
    Ternary {
        condition:   Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `value is Type`
    TypeCheck {
        operand:   Box<Expr>,
        type_name: QualifiedName,
    },
    /// `(Type) value` or `Type(value)`
    Conversion {
        type_name: String,
        operand:   Box<Expr>,
    },
    /// `typeof(Type)`
    TypeOf(String),
    /// A call of a named function, possibly qualified.
    Call {
        function:  QualifiedName,
        arguments: Arguments,
    },
    /// A call of the value of an expression.
    Invoke {
        callee:    Box<Expr>,
        arguments: Arguments,
    },
    /// `target.name(arguments)` or `target?.name(arguments)`
    MethodCall {
        target:    Box<Expr>,
        name:      String,
        arguments: Arguments,
        optional:  bool,
    },
    /// `target.name` or `target?.name`
    Property {
        target:   Box<Expr>,
        name:     String,
        optional: bool,
    },
    /// `target[index]` or `target?[index]`
    Index {
        target:   Box<Expr>,
        index:    Box<Expr>,
        optional: bool,
    },
    /// `target[lower..upper]`, both bounds being optional.
    Slice {
        target:   Box<Expr>,
        lower:    Option<Box<Expr>>,
        upper:    Option<Box<Expr>>,
        optional: bool,
    },
    /// `subject switch { cases }`
    Match {
        subject: Box<Expr>,
        cases:   Vec<MatchCase>,
    },
    /// `original with { setters }`
    With {
        original: Box<Expr>,
        setters:  Vec<PropertyInit>,
    },
    /// `new Class(arguments) { initializers }`, or an anonymous object
    /// `new { initializers }` when `class` is `None`.
    New {
        class:        Option<QualifiedName>,
        arguments:    Arguments,
        initializers: Vec<PropertyInit>,
    },
    /// `[a, ..b]`
    List(Vec<Argument>),
    /// `{a, ..b}`
    Set(Vec<Argument>),
    /// `{k => v}`
    Map(Vec<(Expr, Expr)>),
    /// A lambda or an inline function.
    Function(Rc<Function>),
    /// An interpolated string: `pattern` holds numbered placeholders such as
    /// `{0}` or `{1,8}` standing for the substitutions.
    Interpolation {
        pattern:       String,
        substitutions: Vec<Expr>,
    },
    /// `throw value`, used as an expression.
    Throw(Box<Expr>),
    /// A block whose value is given by `yield`.
    Block(Block),
}

impl ExprKind {
    /// Wraps the expression kind with its location.
    #[must_use]
    pub const fn at(self, span: Span) -> Expr {
        Expr::new(self, span)
    }
}

/// An expression together with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[must_use]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether the expression designates something that can be assigned.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self.kind,
                 ExprKind::Variable(_)
                 | ExprKind::StaticMember(_)
                 | ExprKind::Super(SuperAccess::Property(_) | SuperAccess::Indexer(_))
                 | ExprKind::Property { .. }
                 | ExprKind::Index { .. }
                 | ExprKind::Slice { .. }
                 | ExprKind::List(_))
    }

    /// The literal value of the expression, if any.
    #[must_use]
    pub const fn literal(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Literal(value) => Some(value),
            _ => None,
        }
    }
}
