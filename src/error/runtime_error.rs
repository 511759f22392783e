use thiserror::Error;

use crate::runtime::{bigdecimal::DecimalError, value::Kind};

/// Represents all errors that can occur while operating on values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// The unary operator has no meaning for this kind.
    #[error("operator {operator} cannot be applied to a {kind}")]
    UnsupportedUnary {
        /// The operator symbol.
        operator: &'static str,
        /// The kind of the operand.
        kind:     Kind,
    },
    /// The binary operator has no meaning for this kind.
    #[error("operator {operator} cannot be applied to a {kind}")]
    UnsupportedBinary {
        /// The operator symbol.
        operator: &'static str,
        /// The kind of the left operand.
        kind:     Kind,
    },
    /// A value was asked for a view it cannot provide.
    #[error("cannot convert a {from} to a {to}")]
    InvalidCoercion {
        /// The kind of the converted value.
        from: Kind,
        /// The requested kind.
        to:   Kind,
    },
    /// An integer, rational or decimal division by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The result does not fit the representation of its kind.
    #[error("arithmetic overflow on a {kind}")]
    Overflow {
        /// The kind whose representation overflowed.
        kind: Kind,
    },
    /// The kind has no property with this name.
    #[error("a {kind} has no property named {name}")]
    NoSuchProperty {
        /// The kind of the value.
        kind: Kind,
        /// The property name.
        name: String,
    },
    /// The property exists but cannot be written.
    #[error("the {name} property of a {kind} is read-only")]
    ReadOnlyProperty {
        /// The kind of the value.
        kind: Kind,
        /// The property name.
        name: String,
    },
    /// The kind cannot be indexed.
    #[error("a {kind} has no indexer")]
    NoIndexer {
        /// The kind of the value.
        kind: Kind,
    },
    /// An index outside of `[-length, length)`.
    #[error("index {index} is out of bounds for a length of {length}")]
    IndexOutOfBounds {
        /// The requested index.
        index:  i64,
        /// The length of the indexed value.
        length: usize,
    },
    /// Strings cannot be modified in place.
    #[error("strings are immutable")]
    ImmutableString,
    /// The kind does not support iteration.
    #[error("a {kind} cannot be iterated")]
    NotIterable {
        /// The kind of the value.
        kind: Kind,
    },
    /// The right operand of `matches` is not a valid regular expression.
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// The reason reported by the regex engine.
        message: String,
    },
    /// No host member accepts the given arguments.
    #[error("no overload of {name} accepts the given arguments")]
    NoMatchingMember {
        /// The member name.
        name: String,
    },
    /// A host object reported a failure.
    #[error("{message}")]
    Host {
        /// Details reported by the host.
        message: String,
    },
    /// A decimal operation failed.
    #[error(transparent)]
    Decimal(#[from] DecimalError),
}

pub type ValueResult<T> = Result<T, ValueError>;
