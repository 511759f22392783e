use std::cmp::Ordering;

use chrono::{NaiveDateTime, TimeDelta};
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::{ValueError, ValueResult},
    runtime::{
        bigdecimal::BigDecimal,
        complex::ComplexNumber,
        rational::Rational,
        value::{Kind, Value},
    },
};

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// The result of a relational operator given the ordering of its operands.
fn relation(op: BinaryOperator, ordering: Ordering) -> Option<Value> {
    let result = match op {
        BinaryOperator::LessThan => ordering.is_lt(),
        BinaryOperator::LessThanOrEqual => ordering.is_le(),
        BinaryOperator::GreaterThan => ordering.is_gt(),
        BinaryOperator::GreaterThanOrEqual => ordering.is_ge(),
        _ => return None,
    };
    Some(Value::Boolean(result))
}

const fn is_relational(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::LessThan
             | BinaryOperator::LessThanOrEqual
             | BinaryOperator::GreaterThan
             | BinaryOperator::GreaterThanOrEqual)
}

/// A shift amount and its direction, `true` meaning left.
fn shift_amount(op: BinaryOperator, amount: i32) -> (bool, usize) {
    let left = (op == BinaryOperator::ShiftLeft) == (amount >= 0);
    (left, usize::try_from(amount.unsigned_abs()).unwrap_or(usize::MAX))
}

pub(super) fn boolean_binary(value: bool,
                             op: BinaryOperator,
                             operand: &Value)
                             -> ValueResult<Option<Value>> {
    let result = match op {
        BinaryOperator::And | BinaryOperator::AndAlso => value && operand.as_boolean()?,
        BinaryOperator::Or | BinaryOperator::OrElse => value || operand.as_boolean()?,
        BinaryOperator::ExclusiveOr => value ^ operand.as_boolean()?,
        _ => return Ok(None),
    };
    Ok(Some(Value::Boolean(result)))
}

pub(super) fn integer_unary(value: i32, op: UnaryOperator) -> Option<Value> {
    let result = match op {
        UnaryOperator::Plus => Some(value),
        UnaryOperator::Minus => value.checked_neg(),
        UnaryOperator::BitwiseNot => Some(!value),
        UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => value.checked_add(1),
        UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => value.checked_sub(1),
        UnaryOperator::Not | UnaryOperator::NotEmpty => return None,
    };
    result.map(Value::Integer)
          .or_else(|| long_unary(&BigInt::from(value), op))
}

/// Operators of 32-bit integers.
///
/// Additions, subtractions, multiplications, remainders and powers that
/// overflow are computed again with arbitrary precision. Divisions yield an
/// exact result, a rational unless the division is exact.
pub(super) fn integer_binary(value: i32,
                             op: BinaryOperator,
                             operand: &Value)
                             -> ValueResult<Option<Value>> {
    if op == BinaryOperator::Times && matches!(operand, Value::String(_) | Value::List(_)) {
        return operand.binary_operation(op, &Value::Integer(value)).map(Some);
    }
    let checked = match op {
        BinaryOperator::Plus => value.checked_add(operand.as_int32()?),
        BinaryOperator::Minus => value.checked_sub(operand.as_int32()?),
        BinaryOperator::Times => value.checked_mul(operand.as_int32()?),
        BinaryOperator::Modulo => {
            let divisor = operand.as_int32()?;
            if divisor == 0 {
                return Err(ValueError::DivisionByZero);
            }
            value.checked_rem(divisor)
        },
        BinaryOperator::Power => {
            let exponent = operand.as_int32()?;
            match u32::try_from(exponent) {
                Ok(exponent) => value.checked_pow(exponent),
                Err(_) => {
                    return rational_binary(&Rational::from_integer(value.into()), op, operand);
                },
            }
        },
        BinaryOperator::Divide => {
            let quotient = Rational::new(value.into(), operand.as_int32()?.into());
            return quotient.map(Value::from_rational)
                           .map(Some)
                           .ok_or(ValueError::DivisionByZero);
        },
        BinaryOperator::ShiftLeft => {
            Some(value.wrapping_shl((operand.as_int32()? & 31).unsigned_abs()))
        },
        BinaryOperator::ShiftRight => {
            Some(value.wrapping_shr((operand.as_int32()? & 31).unsigned_abs()))
        },
        BinaryOperator::And => Some(value & operand.as_int32()?),
        BinaryOperator::Or => Some(value | operand.as_int32()?),
        BinaryOperator::ExclusiveOr => Some(value ^ operand.as_int32()?),
        BinaryOperator::LessThan
        | BinaryOperator::LessThanOrEqual
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterThanOrEqual => {
            return Ok(relation(op, value.cmp(&operand.as_int32()?)));
        },
        _ => return Ok(None),
    };
    match checked {
        Some(result) => Ok(Some(Value::Integer(result))),
        None => long_binary(&BigInt::from(value), op, operand),
    }
}

pub(super) fn long_unary(value: &BigInt, op: UnaryOperator) -> Option<Value> {
    let result = match op {
        UnaryOperator::Plus => value.clone(),
        UnaryOperator::Minus => -value,
        UnaryOperator::BitwiseNot => !value,
        UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => value + 1u8,
        UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => value - 1u8,
        UnaryOperator::Not | UnaryOperator::NotEmpty => return None,
    };
    Some(Value::Long(result))
}

pub(super) fn long_binary(value: &BigInt,
                          op: BinaryOperator,
                          operand: &Value)
                          -> ValueResult<Option<Value>> {
    let result = match op {
        BinaryOperator::Plus => value + operand.as_bigint()?,
        BinaryOperator::Minus => value - operand.as_bigint()?,
        BinaryOperator::Times => value * operand.as_bigint()?,
        BinaryOperator::Modulo => {
            let divisor = operand.as_bigint()?;
            if divisor.is_zero() {
                return Err(ValueError::DivisionByZero);
            }
            value % divisor
        },
        BinaryOperator::Divide => {
            let quotient = Rational::new(value.clone(), operand.as_bigint()?);
            return quotient.map(Value::from_rational)
                           .map(Some)
                           .ok_or(ValueError::DivisionByZero);
        },
        BinaryOperator::Power => {
            let exponent = operand.as_int32()?;
            match u32::try_from(exponent) {
                Ok(exponent) => value.pow(exponent),
                Err(_) => {
                    return rational_binary(&Rational::from_integer(value.clone()), op, operand);
                },
            }
        },
        BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight => {
            match shift_amount(op, operand.as_int32()?) {
                (true, amount) => value << amount,
                (false, amount) => value >> amount,
            }
        },
        BinaryOperator::And => value & operand.as_bigint()?,
        BinaryOperator::Or => value | operand.as_bigint()?,
        BinaryOperator::ExclusiveOr => value ^ operand.as_bigint()?,
        _ if is_relational(op) => return Ok(relation(op, value.cmp(&operand.as_bigint()?))),
        _ => return Ok(None),
    };
    Ok(Some(Value::Long(result)))
}

pub(super) fn rational_unary(value: &Rational, op: UnaryOperator) -> Option<Value> {
    let one = Rational::from_integer(BigInt::one());
    let result = match op {
        UnaryOperator::Plus => value.clone(),
        UnaryOperator::Minus => -value.clone(),
        UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => value + &one,
        UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => value - &one,
        _ => return None,
    };
    Some(Value::from_rational(result))
}

/// Operators of fractions, whose results collapse to integers when their
/// denominator is one.
pub(super) fn rational_binary(value: &Rational,
                              op: BinaryOperator,
                              operand: &Value)
                              -> ValueResult<Option<Value>> {
    let result = match op {
        BinaryOperator::Plus => value + &operand.as_rational()?,
        BinaryOperator::Minus => value - &operand.as_rational()?,
        BinaryOperator::Times => value * &operand.as_rational()?,
        BinaryOperator::Divide => {
            value.checked_div(&operand.as_rational()?)
                 .ok_or(ValueError::DivisionByZero)?
        },
        BinaryOperator::Modulo => {
            value.checked_rem(&operand.as_rational()?)
                 .ok_or(ValueError::DivisionByZero)?
        },
        BinaryOperator::Power => {
            value.pow(operand.as_int32()?)
                 .ok_or(ValueError::DivisionByZero)?
        },
        _ if is_relational(op) => return Ok(relation(op, value.cmp(&operand.as_rational()?))),
        _ => return Ok(None),
    };
    Ok(Some(Value::from_rational(result)))
}

pub(super) fn float_unary(value: f64, op: UnaryOperator) -> Option<Value> {
    let result = match op {
        UnaryOperator::Plus => value,
        UnaryOperator::Minus => -value,
        UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => value + 1.0,
        UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => value - 1.0,
        _ => return None,
    };
    Some(Value::Float(result))
}

pub(super) fn float_binary(value: f64,
                           op: BinaryOperator,
                           operand: &Value)
                           -> ValueResult<Option<Value>> {
    let result = match op {
        BinaryOperator::Plus => value + operand.as_double()?,
        BinaryOperator::Minus => value - operand.as_double()?,
        BinaryOperator::Times => value * operand.as_double()?,
        BinaryOperator::Divide => value / operand.as_double()?,
        BinaryOperator::Modulo => value % operand.as_double()?,
        BinaryOperator::Power => value.powf(operand.as_double()?),
        BinaryOperator::LessThan => return Ok(Some(Value::Boolean(value < operand.as_double()?))),
        BinaryOperator::LessThanOrEqual => {
            return Ok(Some(Value::Boolean(value <= operand.as_double()?)));
        },
        BinaryOperator::GreaterThan => {
            return Ok(Some(Value::Boolean(value > operand.as_double()?)));
        },
        BinaryOperator::GreaterThanOrEqual => {
            return Ok(Some(Value::Boolean(value >= operand.as_double()?)));
        },
        _ => return Ok(None),
    };
    Ok(Some(Value::Float(result)))
}

pub(super) fn decimal_unary(value: &BigDecimal, op: UnaryOperator) -> Option<Value> {
    let result = match op {
        UnaryOperator::Plus => value.clone(),
        UnaryOperator::Minus => -value.clone(),
        UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => value + &BigDecimal::one(),
        UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => value - &BigDecimal::one(),
        _ => return None,
    };
    Some(Value::Decimal(result))
}

pub(super) fn decimal_binary(value: &BigDecimal,
                             op: BinaryOperator,
                             operand: &Value)
                             -> ValueResult<Option<Value>> {
    let result = match op {
        BinaryOperator::Plus => value + &operand.as_bigdecimal()?,
        BinaryOperator::Minus => value - &operand.as_bigdecimal()?,
        BinaryOperator::Times => value.checked_mul(&operand.as_bigdecimal()?)?,
        BinaryOperator::Divide => {
            value.checked_div(&operand.as_bigdecimal()?)
                 .ok_or(ValueError::DivisionByZero)?
        },
        BinaryOperator::Modulo => {
            value.checked_rem(&operand.as_bigdecimal()?)
                 .ok_or(ValueError::DivisionByZero)?
        },
        BinaryOperator::Power => value.pow(operand.as_int32()?)?,
        _ if is_relational(op) => return Ok(relation(op, value.cmp(&operand.as_bigdecimal()?))),
        _ => return Ok(None),
    };
    Ok(Some(Value::Decimal(result)))
}

pub(super) fn complex_unary(value: ComplexNumber, op: UnaryOperator) -> Option<Value> {
    match op {
        UnaryOperator::Plus => Some(Value::Complex(value)),
        UnaryOperator::Minus => Some(Value::Complex(-value)),
        _ => None,
    }
}

pub(super) fn complex_binary(value: ComplexNumber,
                             op: BinaryOperator,
                             operand: &Value)
                             -> ValueResult<Option<Value>> {
    let result = match op {
        BinaryOperator::Plus => value + operand.as_complex()?,
        BinaryOperator::Minus => value - operand.as_complex()?,
        BinaryOperator::Times => value * operand.as_complex()?,
        BinaryOperator::Divide => value / operand.as_complex()?,
        BinaryOperator::Power => value.pow(operand.as_complex()?),
        _ => return Ok(None),
    };
    Ok(Some(Value::Complex(result)))
}

/// Operators of dates.
///
/// Adding a number adds that many days, possibly fractional. Subtracting two
/// dates gives the number of days between them.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(super) fn date_binary(value: NaiveDateTime,
                          op: BinaryOperator,
                          operand: &Value)
                          -> ValueResult<Option<Value>> {
    let overflow = || ValueError::Overflow { kind: Kind::Date };
    match op {
        BinaryOperator::Plus => {
            let milliseconds = (operand.as_double()? * MILLISECONDS_PER_DAY).round();
            if !milliseconds.is_finite() || milliseconds.abs() >= i64::MAX as f64 {
                return Err(overflow());
            }
            TimeDelta::try_milliseconds(milliseconds as i64).and_then(|delta| {
                                                                 value.checked_add_signed(delta)
                                                             })
                                                             .map(|date| Some(Value::Date(date)))
                                                             .ok_or_else(overflow)
        },
        BinaryOperator::Minus => {
            let elapsed = value.signed_duration_since(operand.as_date()?);
            Ok(Some(Value::Float(elapsed.num_milliseconds() as f64 / MILLISECONDS_PER_DAY)))
        },
        _ if is_relational(op) => Ok(relation(op, value.cmp(&operand.as_date()?))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn apply(left: Value, op: BinaryOperator, right: Value) -> Value {
        left.binary_operation(op, &right).unwrap()
    }

    #[test]
    fn integer_overflow_promotes() {
        let sum = apply(Value::Integer(i32::MAX), BinaryOperator::Plus, Value::Integer(1));
        assert_eq!(sum, Value::Long(BigInt::from(i64::from(i32::MAX) + 1)));
        let product = apply(Value::Integer(65_536), BinaryOperator::Times, Value::Integer(65_536));
        assert_eq!(product.to_string(), "4294967296");
        let power = apply(Value::Integer(2), BinaryOperator::Power, Value::Integer(40));
        assert_eq!(power.to_string(), "1099511627776");
        assert_eq!(apply(Value::Integer(i32::MIN), BinaryOperator::Modulo, Value::Integer(-1)),
                   Value::Long(BigInt::zero()));
    }

    #[test]
    fn integer_division_is_exact() {
        assert_eq!(apply(Value::Integer(6), BinaryOperator::Divide, Value::Integer(3)),
                   Value::Integer(2));
        let third = apply(Value::Integer(1), BinaryOperator::Divide, Value::Integer(3));
        assert_eq!(third.kind(), Kind::Rational);
        assert_eq!(third.to_string(), "1/3");
        let sum = apply(third.clone(), BinaryOperator::Plus, third.clone());
        let whole = apply(sum, BinaryOperator::Plus, third);
        assert_eq!(whole, Value::Integer(1));
        assert_eq!(Value::Integer(1).binary_operation(BinaryOperator::Divide, &Value::Integer(0)),
                   Err(ValueError::DivisionByZero));
        assert_eq!(apply(Value::Integer(2), BinaryOperator::Power, Value::Integer(-2)).to_string(),
                   "1/4");
    }

    #[test]
    fn promotion_follows_rank() {
        let quarter = Value::Decimal("0.25".parse().unwrap());
        assert_eq!(apply(Value::Integer(1), BinaryOperator::Plus, quarter),
                   Value::Decimal("1.25".parse().unwrap()));
        assert_eq!(apply(Value::Float(0.5), BinaryOperator::Plus, Value::Integer(1)),
                   Value::Float(1.5));
        let i = Value::Complex(ComplexNumber::new(0.0, 1.0));
        let complex = apply(Value::Integer(2), BinaryOperator::Times, i);
        assert_eq!(complex, Value::Complex(ComplexNumber::new(0.0, 2.0)));
        assert_eq!(apply(Value::Boolean(true), BinaryOperator::Plus, Value::Integer(1)),
                   Value::Integer(2));
    }

    #[test]
    fn bitwise_and_shifts() {
        assert_eq!(apply(Value::Integer(1), BinaryOperator::ShiftLeft, Value::Integer(4)),
                   Value::Integer(16));
        assert_eq!(apply(Value::Integer(0b1100), BinaryOperator::And, Value::Integer(0b1010)),
                   Value::Integer(0b1000));
        assert_eq!(Value::Integer(0).unary_operation(UnaryOperator::BitwiseNot),
                   Ok(Value::Integer(-1)));
        let long = Value::Long(BigInt::from(1));
        assert_eq!(apply(long, BinaryOperator::ShiftLeft, Value::Integer(40)).to_string(),
                   "1099511627776");
    }

    #[test]
    fn comparisons() {
        assert_eq!(apply(Value::Integer(1), BinaryOperator::LessThan, Value::Float(1.5)),
                   Value::Boolean(true));
        let nan = Value::Float(f64::NAN);
        assert_eq!(apply(nan, BinaryOperator::GreaterThanOrEqual, Value::Float(0.0)),
                   Value::Boolean(false));
        let half = Value::from_rational(Rational::new(1.into(), 2.into()).unwrap());
        assert_eq!(apply(half, BinaryOperator::GreaterThan, Value::Integer(0)),
                   Value::Boolean(true));
    }

    #[test]
    fn dates() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let later = apply(Value::Date(start), BinaryOperator::Plus, Value::Float(1.5));
        assert_eq!(later.to_string(), "2024-03-01 00:00:00");
        assert_eq!(apply(later, BinaryOperator::Minus, Value::Date(start)), Value::Float(1.5));
    }
}
