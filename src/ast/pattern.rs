use crate::{
    ast::{BinaryOperator, Expr, QualifiedName},
    runtime::value::Value,
    syntax::span::Span,
};

/// A `field = value` constraint of an object pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub name:  String,
    pub value: Value,
    pub span:  Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// `_`, matches anything.
    Always,
    /// `null`
    Null,
    /// A literal, possibly signed.
    Value(Value),
    /// `lower..upper`, inclusive, with either bound missing.
    Range {
        lower: Option<Value>,
        upper: Option<Value>,
    },
    /// `< value`, `<= value`, `> value` or `>= value`.
    Relation {
        op:    BinaryOperator,
        value: Value,
    },
    /// `matches 'regex'`
    Regex(String),
    /// A type name.
    Type(QualifiedName),
    /// `Type { field = value, ... }`
    Object {
        type_name: QualifiedName,
        fields:    Vec<FieldMatch>,
    },
    /// `name: condition`, binding the checked value to `name` while the
    /// condition is evaluated.
    Predicate {
        parameter: String,
        condition: Box<Expr>,
    },
    /// `not pattern`
    Not(Box<Pattern>),
    /// `p1, p2, ...`, matching when any of the patterns matches, tried left to
    /// right.
    Composite(Vec<Pattern>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    #[must_use]
    pub const fn new(kind: PatternKind, span: Span) -> Self {
        Self { kind, span }
    }
}
