use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::{
    ast::BinaryOperator,
    error::{ValueError, ValueResult},
    runtime::{
        bigdecimal::BigDecimal,
        complex::ComplexNumber,
        rational::Rational,
        value::{ClassInfo, Kind, Object, Table, Value},
    },
    util::num::{f64_to_bigint_checked, f64_to_i32_checked},
};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parses the date formats accepted by date literals.
///
/// The date is either ISO (`YYYY-MM-DD`) or US (`MM/DD/YYYY`), optionally
/// followed by a `T` or a space and a time `HH:MM[:SS[.fff]]`.
///
/// # Example
/// ```
/// use addyscript::runtime::value::coercion::parse_date;
///
/// let date = parse_date("2024-02-29T13:45").unwrap();
/// assert_eq!(date.to_string(), "2024-02-29 13:45:00");
/// assert_eq!(parse_date("02/29/2024"), parse_date("2024-02-29"));
/// assert!(parse_date("2023-02-29").is_none());
/// ```
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    let (date, time) = match text.find(['T', ' ']) {
        Some(position) => (&text[..position], Some(text[position + 1..].trim_start())),
        None => (text, None),
    };
    let date = DATE_FORMATS.iter()
                           .find_map(|format| NaiveDate::parse_from_str(date, format).ok())?;
    match time {
        Some(time) => {
            TIME_FORMATS.iter()
                        .find_map(|format| NaiveTime::parse_from_str(time, format).ok())
                        .map(|time| date.and_time(time))
        },
        None => date.and_hms_opt(0, 0, 0),
    }
}

impl Value {
    pub(crate) const fn invalid_coercion(&self, to: Kind) -> ValueError {
        ValueError::InvalidCoercion { from: self.kind(),
                                      to }
    }

    fn parse_text<T: std::str::FromStr>(&self, to: Kind) -> ValueResult<T> {
        match self {
            Self::String(text) => text.trim().parse().map_err(|_| self.invalid_coercion(to)),
            _ => Err(self.invalid_coercion(to)),
        }
    }

    /// The truth value.
    ///
    /// Numbers are true when non-zero. Strings only convert from `"true"` and
    /// `"false"`.
    pub fn as_boolean(&self) -> ValueResult<bool> {
        match self {
            Self::Void => Ok(false),
            Self::Boolean(value) => Ok(*value),
            Self::Integer(value) => Ok(*value != 0),
            Self::Long(value) => Ok(!value.is_zero()),
            Self::Rational(value) => Ok(!value.is_zero()),
            Self::Float(value) => Ok(*value != 0.0),
            Self::Decimal(value) => Ok(!value.is_zero()),
            Self::Complex(value) => Ok(!value.is_zero()),
            Self::String(text) => match &**text {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(self.invalid_coercion(Kind::Boolean)),
            },
            _ => Err(self.invalid_coercion(Kind::Boolean)),
        }
    }

    /// The value as a 32-bit integer, truncating fractions.
    pub fn as_int32(&self) -> ValueResult<i32> {
        let overflow = || ValueError::Overflow { kind: Kind::Integer };
        match self {
            Self::Void => Ok(0),
            Self::Boolean(value) => Ok(i32::from(*value)),
            Self::Integer(value) => Ok(*value),
            Self::Long(value) => value.to_i32().ok_or_else(overflow),
            Self::Rational(value) => value.trunc().to_i32().ok_or_else(overflow),
            Self::Float(value) => f64_to_i32_checked(*value),
            Self::Decimal(value) => value.truncate().to_i32().ok_or_else(overflow),
            Self::String(_) => self.parse_text(Kind::Integer),
            _ => Err(self.invalid_coercion(Kind::Integer)),
        }
    }

    /// The value as an arbitrary precision integer, truncating fractions.
    pub fn as_bigint(&self) -> ValueResult<BigInt> {
        match self {
            Self::Void => Ok(BigInt::zero()),
            Self::Boolean(value) => Ok(BigInt::from(u8::from(*value))),
            Self::Integer(value) => Ok(BigInt::from(*value)),
            Self::Long(value) => Ok(value.clone()),
            Self::Rational(value) => Ok(value.trunc()),
            Self::Float(value) => f64_to_bigint_checked(*value),
            Self::Decimal(value) => Ok(value.truncate().to_bigint()),
            Self::String(_) => self.parse_text(Kind::Long),
            _ => Err(self.invalid_coercion(Kind::Long)),
        }
    }

    /// The value as an exact fraction.
    pub fn as_rational(&self) -> ValueResult<Rational> {
        match self {
            Self::Rational(value) => Ok(value.clone()),
            Self::Float(value) => Ok(Rational::from(&BigDecimal::from_f64(*value)?)),
            Self::Decimal(value) => Ok(Rational::from(value)),
            Self::String(_) => {
                let decimal: BigDecimal = self.parse_text(Kind::Rational)?;
                Ok(Rational::from(&decimal))
            },
            Self::Void | Self::Boolean(_) | Self::Integer(_) | Self::Long(_) => {
                Ok(Rational::from_integer(self.as_bigint()?))
            },
            _ => Err(self.invalid_coercion(Kind::Rational)),
        }
    }

    /// The value as a double precision float.
    ///
    /// Complex numbers only convert when their imaginary part is zero.
    pub fn as_double(&self) -> ValueResult<f64> {
        match self {
            Self::Void => Ok(0.0),
            Self::Boolean(value) => Ok(f64::from(u8::from(*value))),
            Self::Integer(value) => Ok(f64::from(*value)),
            Self::Long(value) => value.to_f64().ok_or(ValueError::Overflow { kind: Kind::Float }),
            Self::Rational(value) => Ok(value.to_f64()),
            Self::Float(value) => Ok(*value),
            Self::Decimal(value) => Ok(value.to_f64()),
            Self::Complex(value) if value.imaginary == 0.0 => Ok(value.real),
            Self::String(_) => self.parse_text(Kind::Float),
            _ => Err(self.invalid_coercion(Kind::Float)),
        }
    }

    /// The value as an arbitrary precision decimal.
    pub fn as_bigdecimal(&self) -> ValueResult<BigDecimal> {
        match self {
            Self::Void => Ok(BigDecimal::zero()),
            Self::Boolean(value) => Ok(BigDecimal::from(i32::from(*value))),
            Self::Integer(value) => Ok(BigDecimal::from(*value)),
            Self::Long(value) => Ok(BigDecimal::from(value.clone())),
            Self::Rational(value) => Ok(value.to_decimal()),
            Self::Float(value) => Ok(BigDecimal::from_f64(*value)?),
            Self::Decimal(value) => Ok(value.clone()),
            Self::String(_) => self.parse_text(Kind::Decimal),
            _ => Err(self.invalid_coercion(Kind::Decimal)),
        }
    }

    pub fn as_complex(&self) -> ValueResult<ComplexNumber> {
        match self {
            Self::Complex(value) => Ok(*value),
            Self::Void
            | Self::Boolean(_)
            | Self::Integer(_)
            | Self::Long(_)
            | Self::Rational(_)
            | Self::Float(_)
            | Self::Decimal(_)
            | Self::String(_) => {
                self.as_double()
                    .map(ComplexNumber::from)
                    .map_err(|_| self.invalid_coercion(Kind::Complex))
            },
            _ => Err(self.invalid_coercion(Kind::Complex)),
        }
    }

    pub fn as_date(&self) -> ValueResult<NaiveDateTime> {
        match self {
            Self::Date(value) => Ok(*value),
            Self::String(text) => parse_date(text).ok_or_else(|| self.invalid_coercion(Kind::Date)),
            _ => Err(self.invalid_coercion(Kind::Date)),
        }
    }

    /// The items of a sequence.
    ///
    /// A string yields its characters and a stack its items from the top.
    pub fn as_list(&self) -> ValueResult<Vec<Self>> {
        match self {
            Self::Void => Ok(Vec::new()),
            Self::String(text) => Ok(text.chars().map(|c| Self::from(c.to_string())).collect()),
            Self::List(items) => Ok(items.borrow().clone()),
            Self::Stack(items) => Ok(items.borrow().iter().rev().cloned().collect()),
            Self::Queue(items) => Ok(items.borrow().iter().cloned().collect()),
            Self::Set(elements) => Ok(elements.borrow().keys().cloned().collect()),
            _ => Err(self.invalid_coercion(Kind::List)),
        }
    }

    pub fn as_set(&self) -> ValueResult<Table<()>> {
        match self {
            Self::Set(elements) => Ok(elements.borrow().clone()),
            _ => {
                self.as_list()
                    .map(|items| items.into_iter().map(|item| (item, ())).collect())
                    .map_err(|_| self.invalid_coercion(Kind::Set))
            },
        }
    }

    /// The entries of a map, or the fields of an object keyed by their names.
    pub fn as_map(&self) -> ValueResult<Table<Self>> {
        match self {
            Self::Void => Ok(Table::new()),
            Self::Map(entries) => Ok(entries.borrow().clone()),
            Self::Object(object) => {
                Ok(object.borrow()
                         .fields()
                         .map(|(name, value)| (Self::from(name), value.clone()))
                         .collect())
            },
            _ => Err(self.invalid_coercion(Kind::Map)),
        }
    }

    pub fn as_queue(&self) -> ValueResult<VecDeque<Self>> {
        self.as_list()
            .map(VecDeque::from)
            .map_err(|_| self.invalid_coercion(Kind::Queue))
    }

    /// The items of a stack, bottom first.
    pub fn as_stack(&self) -> ValueResult<Vec<Self>> {
        match self {
            Self::Stack(items) => Ok(items.borrow().clone()),
            _ => self.as_list().map_err(|_| self.invalid_coercion(Kind::Stack)),
        }
    }

    /// An anonymous object whose fields are the entries of a map with string
    /// keys.
    pub fn as_object(&self) -> ValueResult<Object> {
        match self {
            Self::Object(object) => Ok(object.borrow().clone()),
            Self::Map(entries) => {
                let mut object = Object::new(ClassInfo::anonymous());
                for (key, value) in entries.borrow().iter() {
                    match key {
                        Self::String(name) => object.set_field(name, value.clone()),
                        _ => return Err(self.invalid_coercion(Kind::Object)),
                    }
                }
                Ok(object)
            },
            _ => Err(self.invalid_coercion(Kind::Object)),
        }
    }

    /// Whether `self` has to be converted to `target` before applying `op`
    /// between `self` and a value of the `target` kind.
    ///
    /// Identity, containment and string matching operators never convert.
    /// Nor do strings, which stringify the other operand instead. `+` with a
    /// string converts to a string. Otherwise, numeric kinds and booleans move
    /// up to a higher ranked numeric kind.
    ///
    /// # Example
    /// ```
    /// use addyscript::{ast::BinaryOperator, runtime::value::{Kind, Value}};
    ///
    /// let one = Value::Integer(1);
    /// assert!(one.conversion_needed(Kind::Float, BinaryOperator::Plus));
    /// assert!(one.conversion_needed(Kind::String, BinaryOperator::Plus));
    /// assert!(!one.conversion_needed(Kind::Float, BinaryOperator::Identical));
    /// assert!(!Value::Float(1.0).conversion_needed(Kind::Integer, BinaryOperator::Plus));
    /// ```
    #[must_use]
    pub fn conversion_needed(&self, target: Kind, op: BinaryOperator) -> bool {
        let kind = self.kind();
        match op {
            BinaryOperator::Identical
            | BinaryOperator::NotIdentical
            | BinaryOperator::Contains
            | BinaryOperator::StartsWith
            | BinaryOperator::EndsWith
            | BinaryOperator::Matches => false,
            _ if kind == Kind::String => false,
            BinaryOperator::Plus if target == Kind::String => true,
            _ => kind < target && target < Kind::Date,
        }
    }

    /// Converts the value to another kind.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::{Kind, Value};
    ///
    /// let half = Value::from("0.5").convert_to(Kind::Rational).unwrap();
    /// assert_eq!(half.to_string(), "1/2");
    /// assert!(Value::Boolean(true).convert_to(Kind::Date).is_err());
    /// ```
    pub fn convert_to(&self, target: Kind) -> ValueResult<Self> {
        if self.kind() == target {
            return Ok(self.clone());
        }
        Ok(match target {
            Kind::Boolean => Self::Boolean(self.as_boolean()?),
            Kind::Integer => Self::Integer(self.as_int32()?),
            Kind::Long => Self::Long(self.as_bigint()?),
            Kind::Rational => Self::Rational(self.as_rational()?),
            Kind::Float => Self::Float(self.as_double()?),
            Kind::Decimal => Self::Decimal(self.as_bigdecimal()?),
            Kind::Complex => Self::Complex(self.as_complex()?),
            Kind::Date => Self::Date(self.as_date()?),
            Kind::String => Self::from(self.to_string()),
            Kind::List => Self::list(self.as_list()?),
            Kind::Map => Self::map(self.as_map()?),
            Kind::Set => Self::set(self.as_set()?),
            Kind::Queue => Self::queue(self.as_queue()?),
            Kind::Stack => Self::stack(self.as_stack()?),
            Kind::Object => Self::object(self.as_object()?),
            Kind::Undefined | Kind::Void | Kind::Resource | Kind::Closure => {
                return Err(self.invalid_coercion(target));
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_views() {
        assert_eq!(Value::Float(-2.7).as_int32(), Ok(-2));
        assert_eq!(Value::Boolean(true).as_double(), Ok(1.0));
        assert_eq!(Value::Void.as_int32(), Ok(0));
        assert_eq!(Value::from(" 42 ").as_int32(), Ok(42));
        assert!(matches!(Value::Long(BigInt::from(i64::MAX)).as_int32(),
                         Err(ValueError::Overflow { kind: Kind::Integer })));
        assert!(Value::Complex(ComplexNumber::new(1.0, 1.0)).as_double().is_err());
        assert_eq!(Value::Complex(ComplexNumber::new(3.0, 0.0)).as_double(), Ok(3.0));
    }

    #[test]
    fn truth_values() {
        assert_eq!(Value::Float(0.5).as_boolean(), Ok(true));
        assert_eq!(Value::Float(0.0).as_boolean(), Ok(false));
        assert_eq!(Value::from("true").as_boolean(), Ok(true));
        assert!(matches!(Value::from("yes").as_boolean(),
                         Err(ValueError::InvalidCoercion { from: Kind::String,
                                                           to:   Kind::Boolean, })));
    }

    #[test]
    fn container_views() {
        let stack = Value::stack(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(stack.as_list(), Ok(vec![Value::Integer(2), Value::Integer(1)]));
        let set = Value::list(vec![Value::Integer(1), Value::Integer(1)]).as_set().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(Value::from("ab").as_list().unwrap().len(), 2);
    }

    #[test]
    fn dates() {
        let date = parse_date("12/25/2023 08:30:15.250").unwrap();
        assert_eq!(date.to_string(), "2023-12-25 08:30:15.250");
        assert!(parse_date("2023-12-25X").is_none());
        assert!(parse_date("2023-12-25 25:00").is_none());
    }
}
