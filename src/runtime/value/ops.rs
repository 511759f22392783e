use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::{ValueError, ValueResult},
    runtime::value::{Kind, Value, containers, numeric},
};

pub(super) const fn unsupported_unary(op: UnaryOperator, value: &Value) -> ValueError {
    ValueError::UnsupportedUnary { operator: op.symbol(),
                                   kind:     value.kind(), }
}

pub(super) const fn unsupported_binary(op: BinaryOperator, value: &Value) -> ValueError {
    ValueError::UnsupportedBinary { operator: op.symbol(),
                                    kind:     value.kind(), }
}

impl Value {
    /// Applies a unary operator.
    ///
    /// Increments and decrements return the updated value, whatever their
    /// position: storing and choosing the result of the expression is up to
    /// the caller.
    ///
    /// # Example
    /// ```
    /// use addyscript::{ast::UnaryOperator, runtime::value::{Kind, Value}};
    ///
    /// let max = Value::Integer(i32::MAX);
    /// let next = max.unary_operation(UnaryOperator::PreIncrement).unwrap();
    /// assert_eq!(next.kind(), Kind::Long);
    /// assert_eq!(next.to_string(), "2147483648");
    /// ```
    pub fn unary_operation(&self, op: UnaryOperator) -> ValueResult<Self> {
        if op == UnaryOperator::NotEmpty {
            return Ok(Self::Boolean(!self.is_empty()));
        }
        let result = match self {
            Self::Boolean(value) if op == UnaryOperator::Not => Some(Self::Boolean(!value)),
            Self::Integer(value) => numeric::integer_unary(*value, op),
            Self::Long(value) => numeric::long_unary(value, op),
            Self::Rational(value) => numeric::rational_unary(value, op),
            Self::Float(value) => numeric::float_unary(*value, op),
            Self::Decimal(value) => numeric::decimal_unary(value, op),
            Self::Complex(value) => numeric::complex_unary(*value, op),
            _ => None,
        };
        result.ok_or_else(|| unsupported_unary(op, self))
    }

    /// Applies a binary operator, `self` being the left operand.
    ///
    /// The left operand is first promoted to the kind of the right one when
    /// [`Value::conversion_needed`] says so. The operation of the resulting
    /// kind then runs, reading the right operand through the coercion view it
    /// needs. Operators a kind does not handle fall back to equality and
    /// identity, then fail with [`ValueError::UnsupportedBinary`].
    ///
    /// # Example
    /// ```
    /// use addyscript::{ast::BinaryOperator, runtime::value::Value};
    ///
    /// let sum = Value::Integer(1).binary_operation(BinaryOperator::Plus, &Value::Float(0.5));
    /// assert_eq!(sum.unwrap(), Value::Float(1.5));
    ///
    /// let text = Value::Integer(1).binary_operation(BinaryOperator::Plus, &Value::from("x"));
    /// assert_eq!(text.unwrap(), Value::from("1x"));
    ///
    /// let one = Value::Integer(1);
    /// let same = one.binary_operation(BinaryOperator::Identical, &Value::Float(1.0));
    /// assert_eq!(same.unwrap(), Value::Boolean(false));
    /// ```
    pub fn binary_operation(&self, op: BinaryOperator, operand: &Self) -> ValueResult<Self> {
        match op {
            BinaryOperator::Equal => return Ok(Self::Boolean(self.equals(operand))),
            BinaryOperator::NotEqual => return Ok(Self::Boolean(!self.equals(operand))),
            _ => {},
        }
        let promoted = self.promote(operand.kind(), op)?;
        let left = promoted.as_ref().unwrap_or(self);
        let result = match left {
            Self::Boolean(value) => numeric::boolean_binary(*value, op, operand)?,
            Self::Integer(value) => numeric::integer_binary(*value, op, operand)?,
            Self::Long(value) => numeric::long_binary(value, op, operand)?,
            Self::Rational(value) => numeric::rational_binary(value, op, operand)?,
            Self::Float(value) => numeric::float_binary(*value, op, operand)?,
            Self::Decimal(value) => numeric::decimal_binary(value, op, operand)?,
            Self::Complex(value) => numeric::complex_binary(*value, op, operand)?,
            Self::Date(value) => numeric::date_binary(*value, op, operand)?,
            Self::String(text) => containers::string_binary(text, op, operand)?,
            Self::List(_) | Self::Queue(_) | Self::Stack(_) => {
                containers::sequence_binary(left, op, operand)?
            },
            Self::Set(elements) => containers::set_binary(&elements.borrow(), op, operand)?,
            Self::Map(entries) => containers::map_binary(&entries.borrow(), op, operand)?,
            _ => None,
        };
        match result {
            Some(value) => Ok(value),
            None => left.default_binary(op, operand),
        }
    }

    /// The shared fallback: equality, identity and `??`.
    fn default_binary(&self, op: BinaryOperator, operand: &Self) -> ValueResult<Self> {
        match op {
            BinaryOperator::Identical => Ok(Self::Boolean(self.is_identical(operand))),
            BinaryOperator::NotIdentical => Ok(Self::Boolean(!self.is_identical(operand))),
            BinaryOperator::IfEmpty if self.is_empty() => Ok(operand.clone()),
            BinaryOperator::IfEmpty => Ok(self.clone()),
            _ => Err(unsupported_binary(op, self)),
        }
    }

    /// `self` converted for an operation with a value of the `target` kind,
    /// or `None` when no conversion is needed.
    fn promote(&self, target: Kind, op: BinaryOperator) -> ValueResult<Option<Self>> {
        if self.conversion_needed(target, op) {
            self.convert_to(target).map(Some)
        } else {
            Ok(None)
        }
    }

    fn is_identical(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.equals(other)
    }

    /// Script equality.
    ///
    /// The left operand is promoted the way `==` does. A failed conversion
    /// means the values differ. `null` only equals `null`.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::Value;
    ///
    /// assert!(Value::Integer(2).equals(&Value::Float(2.0)));
    /// assert!(!Value::Integer(1).equals(&Value::Float(1.5)));
    /// assert!(Value::from("12").equals(&Value::Integer(12)));
    /// assert!(!Value::Boolean(true).equals(&Value::from("maybe")));
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        let empty = |value: &Self| matches!(value, Self::Undefined | Self::Void);
        if empty(self) || empty(other) {
            return self.kind() == other.kind();
        }
        match self.promote(other.kind(), BinaryOperator::Equal) {
            Ok(Some(promoted)) => promoted.try_equals(other).unwrap_or(false),
            Ok(None) => self.try_equals(other).unwrap_or(false),
            Err(_) => false,
        }
    }

    fn try_equals(&self, other: &Self) -> ValueResult<bool> {
        Ok(match self {
            Self::Boolean(value) => *value == other.as_boolean()?,
            Self::Integer(value) => *value == other.as_int32()?,
            Self::Long(value) => *value == other.as_bigint()?,
            Self::Rational(value) => *value == other.as_rational()?,
            Self::Float(value) => OrderedFloat(*value) == OrderedFloat(other.as_double()?),
            Self::Decimal(value) => *value == other.as_bigdecimal()?,
            Self::Complex(value) => *value == other.as_complex()?,
            Self::Date(value) => *value == other.as_date()?,
            Self::String(text) => **text == other.to_string(),
            Self::List(_) | Self::Queue(_) | Self::Stack(_) => {
                let (items, others) = (self.as_list()?, other.as_list()?);
                items.len() == others.len()
                && items.iter().zip(&others).all(|(item, other)| item.equals(other))
            },
            Self::Set(elements) => {
                let others = other.as_set()?;
                let elements = elements.borrow();
                elements.len() == others.len()
                && elements.keys().all(|key| others.contains_key(key))
            },
            Self::Map(entries) => {
                let others = other.as_map()?;
                let entries = entries.borrow();
                entries.len() == others.len()
                && entries.iter().all(|(key, value)| {
                                     others.get(key).is_some_and(|other| value.equals(other))
                                 })
            },
            Self::Undefined | Self::Void => self.kind() == other.kind(),
            Self::Object(_) | Self::Resource(_) | Self::Closure(_) => {
                self.serial_id() == other.serial_id()
            },
        })
    }

    /// Script ordering.
    ///
    /// Values that cannot be compared are ordered by their textual form.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use addyscript::runtime::value::Value;
    ///
    /// assert_eq!(Value::Integer(2).compare(&Value::Float(2.5)), Ordering::Less);
    /// let a = Value::list(vec![Value::Integer(1), Value::Integer(2)]);
    /// let b = Value::list(vec![Value::Integer(1)]);
    /// assert_eq!(a.compare(&b), Ordering::Greater);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let ordering = match self.promote(other.kind(), BinaryOperator::LessThan) {
            Ok(Some(promoted)) => promoted.try_compare(other),
            Ok(None) => self.try_compare(other),
            Err(error) => Err(error),
        };
        ordering.unwrap_or_else(|_| self.to_string().cmp(&other.to_string()))
    }

    fn try_compare(&self, other: &Self) -> ValueResult<Ordering> {
        Ok(match self {
            Self::Boolean(value) => value.cmp(&other.as_boolean()?),
            Self::Integer(value) => value.cmp(&other.as_int32()?),
            Self::Long(value) => value.cmp(&other.as_bigint()?),
            Self::Rational(value) => value.cmp(&other.as_rational()?),
            Self::Float(value) => OrderedFloat(*value).cmp(&OrderedFloat(other.as_double()?)),
            Self::Decimal(value) => value.cmp(&other.as_bigdecimal()?),
            Self::Date(value) => value.cmp(&other.as_date()?),
            Self::String(text) => (**text).cmp(other.to_string().as_str()),
            Self::List(_) | Self::Queue(_) | Self::Stack(_) => {
                let (items, others) = (self.as_list()?, other.as_list()?);
                items.iter()
                     .zip(&others)
                     .map(|(item, other)| item.compare(other))
                     .find(|ordering| ordering.is_ne())
                     .unwrap_or_else(|| items.len().cmp(&others.len()))
            },
            Self::Complex(_) => return Err(self.invalid_coercion(other.kind())),
            _ => Ordering::Equal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::complex::ComplexNumber;

    fn apply(left: Value, op: BinaryOperator, right: Value) -> ValueResult<Value> {
        left.binary_operation(op, &right)
    }

    #[test]
    fn unsupported_operators() {
        let error = apply(Value::Boolean(true), BinaryOperator::Minus, Value::Boolean(false));
        assert_eq!(error,
                   Err(ValueError::UnsupportedBinary { operator: "-",
                                                       kind:     Kind::Boolean, }));
        let error = Value::from("a").unary_operation(UnaryOperator::Minus);
        assert!(matches!(error, Err(ValueError::UnsupportedUnary { operator: "-", .. })));
    }

    #[test]
    fn equality_never_fails() {
        assert_eq!(apply(Value::Integer(1), BinaryOperator::Equal, Value::from("x")),
                   Ok(Value::Boolean(false)));
        assert_eq!(apply(Value::Void, BinaryOperator::NotEqual, Value::list(Vec::new())),
                   Ok(Value::Boolean(true)));
        assert_eq!(apply(Value::Void, BinaryOperator::Equal, Value::Void),
                   Ok(Value::Boolean(true)));
    }

    #[test]
    fn if_empty() {
        assert_eq!(apply(Value::Void, BinaryOperator::IfEmpty, Value::Integer(3)),
                   Ok(Value::Integer(3)));
        assert_eq!(apply(Value::from("a"), BinaryOperator::IfEmpty, Value::Integer(3)),
                   Ok(Value::from("a")));
    }

    #[test]
    fn not_empty() {
        assert_eq!(Value::from("").unary_operation(UnaryOperator::NotEmpty),
                   Ok(Value::Boolean(false)));
        assert_eq!(Value::Integer(0).unary_operation(UnaryOperator::NotEmpty),
                   Ok(Value::Boolean(true)));
    }

    #[test]
    fn incomparable_values_use_text() {
        let a = Value::Complex(ComplexNumber::new(1.0, 1.0));
        let b = Value::Complex(ComplexNumber::new(2.0, 0.0));
        assert_eq!(a.compare(&b), "(1+i)".cmp("2"));
    }
}
