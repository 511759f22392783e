use std::rc::Rc;

use chrono::NaiveDateTime;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::{
    error::{ValueError, ValueResult},
    runtime::{
        bigdecimal::BigDecimal,
        value::{HostObject, Kind, Resource, Value},
    },
};

/// The types a host member can declare for its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostType {
    Unit,
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    BigInt,
    Decimal,
    Date,
    Char,
    String,
    Bytes,
    List,
    Set,
    Map,
    Object,
    /// Accepts anything, converted to its most natural host form.
    Any,
}

impl HostType {
    /// The bounds of the integer types.
    #[allow(clippy::cast_lossless)]
    const fn integer_range(self) -> Option<(i128, i128)> {
        Some(match self {
            Self::I8 => (i8::MIN as i128, i8::MAX as i128),
            Self::U8 => (0, u8::MAX as i128),
            Self::I16 => (i16::MIN as i128, i16::MAX as i128),
            Self::U16 => (0, u16::MAX as i128),
            Self::I32 => (i32::MIN as i128, i32::MAX as i128),
            Self::U32 => (0, u32::MAX as i128),
            Self::I64 => (i64::MIN as i128, i64::MAX as i128),
            Self::U64 => (0, u64::MAX as i128),
            _ => return None,
        })
    }

    #[must_use]
    pub const fn is_signed_integer(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    #[must_use]
    pub const fn is_unsigned_integer(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    #[must_use]
    pub const fn is_number(self) -> bool {
        self.is_signed_integer()
        || self.is_unsigned_integer()
        || matches!(self, Self::F32 | Self::F64 | Self::Decimal)
    }
}

/// A value on the host side of the bridge.
#[derive(Debug, Clone)]
pub enum HostValue {
    Unit,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    BigInt(BigInt),
    Decimal(BigDecimal),
    Date(NaiveDateTime),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<HostValue>),
    Map(Vec<(HostValue, HostValue)>),
    Object(Rc<dyn HostObject>),
}

impl Value {
    /// Wraps a host value.
    ///
    /// Host integers become integers when they fit 32 bits and long integers
    /// otherwise. Characters and bytes become strings, and host objects
    /// become resources.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::{HostValue, Kind, Value};
    ///
    /// assert_eq!(Value::from_host(HostValue::Int(7)), Value::Integer(7));
    /// assert_eq!(Value::from_host(HostValue::UInt(1 << 40)).kind(), Kind::Long);
    /// assert_eq!(Value::from_host(HostValue::Bytes(b"hi".to_vec())), Value::from("hi"));
    /// ```
    #[must_use]
    pub fn from_host(value: HostValue) -> Self {
        match value {
            HostValue::Unit => Self::Void,
            HostValue::Bool(value) => Self::Boolean(value),
            HostValue::Int(value) => {
                i32::try_from(value).map_or_else(|_| Self::Long(value.into()), Self::Integer)
            },
            HostValue::UInt(value) => {
                i32::try_from(value).map_or_else(|_| Self::Long(value.into()), Self::Integer)
            },
            HostValue::Float(value) => Self::Float(value),
            HostValue::BigInt(value) => Self::Long(value),
            HostValue::Decimal(value) => Self::Decimal(value),
            HostValue::Date(value) => Self::Date(value),
            HostValue::Char(value) => Self::from(value.to_string()),
            HostValue::String(value) => Self::from(value),
            HostValue::Bytes(bytes) => Self::from(String::from_utf8_lossy(&bytes).into_owned()),
            HostValue::List(items) => Self::list(items.into_iter().map(Self::from_host).collect()),
            HostValue::Map(entries) => {
                Self::map(entries.into_iter()
                                 .map(|(key, value)| (Self::from_host(key), Self::from_host(value)))
                                 .collect())
            },
            HostValue::Object(handle) => Self::Resource(Resource::new(handle)),
        }
    }

    /// Converts this value for a host parameter of type `target`.
    ///
    /// ## Errors
    /// - `ValueError::InvalidCoercion`: The value has no view of the target.
    /// - `ValueError::Overflow`: An integer does not fit the target width.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::{HostType, HostValue, Value};
    ///
    /// assert!(matches!(Value::Float(3.9).to_host(HostType::U8), Ok(HostValue::UInt(3))));
    /// assert!(Value::Integer(300).to_host(HostType::U8).is_err());
    /// assert!(matches!(Value::from("x").to_host(HostType::Char), Ok(HostValue::Char('x'))));
    /// ```
    pub fn to_host(&self, target: HostType) -> ValueResult<HostValue> {
        if let Some((min, max)) = target.integer_range() {
            let overflow = || ValueError::Overflow { kind: self.kind() };
            let value = self.as_bigint()?
                            .to_i128()
                            .filter(|value| (min..=max).contains(value))
                            .ok_or_else(overflow)?;
            return if target.is_signed_integer() {
                i64::try_from(value).map(HostValue::Int).map_err(|_| overflow())
            } else {
                u64::try_from(value).map(HostValue::UInt).map_err(|_| overflow())
            };
        }
        Ok(match target {
            HostType::Unit => match self {
                Self::Void | Self::Undefined => HostValue::Unit,
                _ => return Err(self.invalid_coercion(Kind::Void)),
            },
            HostType::Bool => HostValue::Bool(self.as_boolean()?),
            HostType::F32 | HostType::F64 => HostValue::Float(self.as_double()?),
            HostType::BigInt => HostValue::BigInt(self.as_bigint()?),
            HostType::Decimal => HostValue::Decimal(self.as_bigdecimal()?),
            HostType::Date => HostValue::Date(self.as_date()?),
            HostType::Char => {
                let text = self.to_string();
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => HostValue::Char(c),
                    _ => return Err(self.invalid_coercion(Kind::String)),
                }
            },
            HostType::String => HostValue::String(self.to_string()),
            HostType::Bytes => HostValue::Bytes(self.to_string().into_bytes()),
            HostType::List | HostType::Set => {
                let items: Vec<Self> = match target {
                    HostType::Set => self.as_set()?.keys().cloned().collect(),
                    _ => self.as_list()?,
                };
                HostValue::List(items.iter()
                                     .map(|item| item.to_host(HostType::Any))
                                     .collect::<ValueResult<_>>()?)
            },
            HostType::Map => {
                HostValue::Map(self.as_map()?
                                   .iter()
                                   .map(|(key, value)| {
                                       let key = key.to_host(HostType::Any)?;
                                       Ok((key, value.to_host(HostType::Any)?))
                                   })
                                   .collect::<ValueResult<_>>()?)
            },
            HostType::Object => match self {
                Self::Resource(resource) => HostValue::Object(Rc::clone(resource.handle())),
                _ => return Err(self.invalid_coercion(Kind::Resource)),
            },
            HostType::Any => return self.natural_host_value(),
            _ => return Err(self.invalid_coercion(Kind::Resource)),
        })
    }

    fn natural_host_value(&self) -> ValueResult<HostValue> {
        match self {
            Self::Undefined | Self::Void => Ok(HostValue::Unit),
            Self::Boolean(value) => Ok(HostValue::Bool(*value)),
            Self::Integer(value) => Ok(HostValue::Int((*value).into())),
            Self::Long(value) => Ok(HostValue::BigInt(value.clone())),
            Self::Rational(value) => Ok(HostValue::Float(value.to_f64())),
            Self::Float(value) => Ok(HostValue::Float(*value)),
            Self::Decimal(value) => Ok(HostValue::Decimal(value.clone())),
            Self::Date(value) => Ok(HostValue::Date(*value)),
            Self::Complex(_) | Self::String(_) => Ok(HostValue::String(self.to_string())),
            Self::List(_) | Self::Queue(_) | Self::Stack(_) => self.to_host(HostType::List),
            Self::Set(_) => self.to_host(HostType::Set),
            Self::Map(_) | Self::Object(_) => self.to_host(HostType::Map),
            Self::Resource(resource) => Ok(HostValue::Object(Rc::clone(resource.handle()))),
            Self::Closure(_) => Err(self.invalid_coercion(Kind::Resource)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_range_checked() {
        assert!(matches!(Value::Integer(-1).to_host(HostType::I8), Ok(HostValue::Int(-1))));
        assert_eq!(Value::Integer(-1).to_host(HostType::U32).unwrap_err(),
                   ValueError::Overflow { kind: Kind::Integer });
        let big = Value::Long(BigInt::from(u64::MAX));
        assert!(matches!(big.to_host(HostType::U64), Ok(HostValue::UInt(u64::MAX))));
        assert!(big.to_host(HostType::I64).is_err());
    }

    #[test]
    fn containers_cross_the_bridge() {
        let list = Value::list(vec![Value::Integer(1), Value::from("a")]);
        let HostValue::List(items) = list.to_host(HostType::List).unwrap() else {
            panic!("expected a host list");
        };
        assert!(matches!(items.as_slice(),
                         [HostValue::Int(1), HostValue::String(text)] if text == "a"));
        let back = Value::from_host(HostValue::List(items));
        assert!(back.equals(&list));
    }

    #[test]
    fn only_resources_are_host_objects() {
        assert!(Value::Integer(1).to_host(HostType::Object).is_err());
        assert!(matches!(Value::Void.to_host(HostType::Any), Ok(HostValue::Unit)));
    }
}
