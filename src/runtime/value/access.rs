use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use num_bigint::BigInt;

use crate::{
    error::{ValueError, ValueResult},
    runtime::value::{Kind, Value},
    util::num::{adjust_bounds, usize_to_i32_saturating, wrap_index},
};

/// Ticks are hundreds of nanoseconds since the first day of year one.
const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOSECONDS_PER_TICK: i32 = 100;

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn date_property(date: NaiveDateTime, name: &str) -> Option<Value> {
    let epoch = NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let integer = |value: u32| Value::Integer(i32::try_from(value).unwrap_or(i32::MAX));
    Some(match name {
        "date" => Value::Date(date.date().and_hms_opt(0, 0, 0)?),
        "time" => Value::Date(epoch.date().and_time(date.time())),
        "year" => Value::Integer(date.year()),
        "month" => integer(date.month()),
        "day" => integer(date.day()),
        "yearday" => integer(date.ordinal()),
        "weekday" => Value::from(weekday_name(date.weekday())),
        "hour" => integer(date.hour()),
        "minute" => integer(date.minute()),
        "second" => integer(date.second()),
        "millisecond" => integer(date.nanosecond() / 1_000_000),
        "ticks" => {
            let elapsed = date.signed_duration_since(epoch);
            let ticks = BigInt::from(elapsed.num_seconds()) * TICKS_PER_SECOND
                        + elapsed.subsec_nanos() / NANOSECONDS_PER_TICK;
            Value::Long(ticks)
        },
        _ => return None,
    })
}

impl Value {
    fn no_such_property(&self, name: &str) -> ValueError {
        ValueError::NoSuchProperty { kind: self.kind(),
                                     name: name.to_string(), }
    }

    /// Reads a property.
    ///
    /// Object fields that were never set read as `Void`.
    ///
    /// ## Errors
    /// Returns `ValueError::NoSuchProperty` when the kind has no property
    /// called `name`.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::Value;
    ///
    /// let list = Value::list(vec![Value::Integer(1), Value::Integer(2)]);
    /// assert_eq!(list.get_property("size").unwrap(), Value::Integer(2));
    /// assert_eq!(list.get_property("back").unwrap(), Value::Integer(2));
    /// assert_eq!(Value::from("abc").get_property("length").unwrap(), Value::Integer(3));
    /// assert!(Value::Integer(1).get_property("length").is_err());
    /// ```
    pub fn get_property(&self, name: &str) -> ValueResult<Self> {
        let size = |length: usize| Self::Integer(usize_to_i32_saturating(length));
        let found = match (self, name) {
            (_, "empty") if self.kind() >= Kind::String && self.kind() <= Kind::Stack => {
                Some(Self::Boolean(self.is_empty()))
            },
            (Self::String(text), "length") => Some(size(text.chars().count())),
            (Self::List(items), "size") | (Self::Stack(items), "size") => {
                Some(size(items.borrow().len()))
            },
            (Self::List(items), "front") => {
                Some(items.borrow().first().cloned().unwrap_or(Self::Void))
            },
            (Self::List(items), "back") | (Self::Stack(items), "top") => {
                Some(items.borrow().last().cloned().unwrap_or(Self::Void))
            },
            (Self::Queue(items), "size") => Some(size(items.borrow().len())),
            (Self::Queue(items), "front") => {
                Some(items.borrow().front().cloned().unwrap_or(Self::Void))
            },
            (Self::Set(elements), "size") => Some(size(elements.borrow().len())),
            (Self::Map(entries), "size") => Some(size(entries.borrow().len())),
            (Self::Map(entries), "keys") => {
                Some(Self::set(entries.borrow().keys().map(|key| (key.clone(), ())).collect()))
            },
            (Self::Map(entries), "values") => {
                let values = entries.borrow().values().map(|value| (value.clone(), ())).collect();
                Some(Self::set(values))
            },
            (Self::Rational(value), "num") => Some(Self::Long(value.numerator().clone())),
            (Self::Rational(value), "den") => Some(Self::Long(value.denominator().clone())),
            (Self::Complex(value), "real") => Some(Self::Float(value.real)),
            (Self::Complex(value), "imag") => Some(Self::Float(value.imaginary)),
            (Self::Date(date), _) => date_property(*date, name),
            (Self::Object(object), _) => {
                Some(object.borrow().get_field(name).cloned().unwrap_or(Self::Void))
            },
            (Self::Resource(resource), _) => return resource.handle().get_property(name),
            _ => None,
        };
        found.ok_or_else(|| self.no_such_property(name))
    }

    /// Writes a property. Only object fields and host properties are
    /// writable.
    ///
    /// ## Errors
    /// - `ValueError::ReadOnlyProperty`: The kind has such a property, but it
    ///   cannot be written.
    /// - `ValueError::NoSuchProperty`: The kind has no such property.
    pub fn set_property(&self, name: &str, value: Self) -> ValueResult<()> {
        match self {
            Self::Object(object) => {
                object.borrow_mut().set_field(name, value);
                Ok(())
            },
            Self::Resource(resource) => resource.handle().set_property(name, value),
            _ if self.get_property(name).is_ok() => {
                Err(ValueError::ReadOnlyProperty { kind: self.kind(),
                                                   name: name.to_string(), })
            },
            _ => Err(self.no_such_property(name)),
        }
    }

    fn out_of_bounds(index: i32, length: usize) -> ValueError {
        ValueError::IndexOutOfBounds { index: index.into(),
                                       length }
    }

    /// Reads an item: a character of a string, an element of a list or the
    /// value of a map entry.
    ///
    /// Negative indices count from the end. A missing map key reads as
    /// `Void`.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::Value;
    ///
    /// let text = Value::from("hello");
    /// assert_eq!(text.get_item(&Value::Integer(-1)).unwrap(), Value::from("o"));
    /// assert!(text.get_item(&Value::Integer(5)).is_err());
    /// ```
    pub fn get_item(&self, index: &Self) -> ValueResult<Self> {
        match self {
            Self::String(text) => {
                let position = index.as_int32()?;
                let length = text.chars().count();
                wrap_index(position, length).and_then(|at| text.chars().nth(at))
                                            .map(|c| Self::from(c.to_string()))
                                            .ok_or_else(|| Self::out_of_bounds(position, length))
            },
            Self::List(items) => {
                let position = index.as_int32()?;
                let items = items.borrow();
                let length = items.len();
                wrap_index(position, length).and_then(|at| items.get(at).cloned())
                                            .ok_or_else(|| Self::out_of_bounds(position, length))
            },
            Self::Map(entries) => Ok(entries.borrow().get(index).cloned().unwrap_or(Self::Void)),
            Self::Resource(resource) => resource.handle().get_item(index),
            _ => Err(ValueError::NoIndexer { kind: self.kind() }),
        }
    }

    /// Writes an item of a list or a map.
    ///
    /// ## Errors
    /// - `ValueError::ImmutableString`: The value is a string.
    /// - `ValueError::IndexOutOfBounds`: The list has no such index.
    /// - `ValueError::NoIndexer`: The kind cannot be indexed.
    pub fn set_item(&self, index: &Self, value: Self) -> ValueResult<()> {
        match self {
            Self::String(_) => Err(ValueError::ImmutableString),
            Self::List(items) => {
                let position = index.as_int32()?;
                let mut items = items.borrow_mut();
                let length = items.len();
                let slot = wrap_index(position, length).and_then(|at| items.get_mut(at));
                let Some(slot) = slot else {
                    return Err(Self::out_of_bounds(position, length));
                };
                *slot = value;
                Ok(())
            },
            Self::Map(entries) => {
                entries.borrow_mut().insert(index.clone(), value);
                Ok(())
            },
            Self::Resource(resource) => resource.handle().set_item(index, value),
            _ => Err(ValueError::NoIndexer { kind: self.kind() }),
        }
    }

    /// Reads `[lower..upper]` of a string or a list. Missing bounds mean the
    /// start and the end.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::Value;
    ///
    /// let text = Value::from("hello");
    /// assert_eq!(text.get_slice(Some(1), Some(-1)).unwrap(), Value::from("ell"));
    /// assert_eq!(text.get_slice(None, Some(2)).unwrap(), Value::from("he"));
    /// ```
    pub fn get_slice(&self, lower: Option<i32>, upper: Option<i32>) -> ValueResult<Self> {
        match self {
            Self::String(text) => {
                let (start, end) = adjust_bounds(lower, upper, text.chars().count());
                Ok(Self::from(text.chars().skip(start).take(end - start).collect::<String>()))
            },
            Self::List(items) => {
                let items = items.borrow();
                let (start, end) = adjust_bounds(lower, upper, items.len());
                Ok(Self::list(items[start..end].to_vec()))
            },
            _ => Err(ValueError::NoIndexer { kind: self.kind() }),
        }
    }

    /// Replaces `[lower..upper]` of a list with the items of `value`.
    pub fn set_slice(&self,
                     lower: Option<i32>,
                     upper: Option<i32>,
                     value: &Self)
                     -> ValueResult<()> {
        match self {
            Self::String(_) => Err(ValueError::ImmutableString),
            Self::List(items) => {
                let replacement = value.as_list()?;
                let mut items = items.borrow_mut();
                let (start, end) = adjust_bounds(lower, upper, items.len());
                items.splice(start..end, replacement);
                Ok(())
            },
            _ => Err(ValueError::NoIndexer { kind: self.kind() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::runtime::{complex::ComplexNumber, rational::Rational};

    fn list_of(items: &[i32]) -> Value {
        Value::list(items.iter().copied().map(Value::Integer).collect())
    }

    #[test]
    fn container_properties() {
        let queue = Value::queue(VecDeque::from([Value::Integer(1), Value::Integer(2)]));
        assert_eq!(queue.get_property("front").unwrap(), Value::Integer(1));
        let stack = Value::stack(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(stack.get_property("top").unwrap(), Value::Integer(2));
        assert_eq!(Value::list(Vec::new()).get_property("front").unwrap(), Value::Void);
        assert_eq!(Value::list(Vec::new()).get_property("empty").unwrap(), Value::Boolean(true));
        let map = Value::map([(Value::from("a"), Value::Integer(1))].into_iter().collect());
        assert_eq!(map.get_property("keys").unwrap().to_string(), "{a}");
        assert_eq!(map.get_property("values").unwrap().to_string(), "{1}");
    }

    #[test]
    fn numeric_properties() {
        let ratio = Value::Rational(Rational::new(6.into(), 4.into()).unwrap());
        assert_eq!(ratio.get_property("num").unwrap(), Value::Long(3.into()));
        assert_eq!(ratio.get_property("den").unwrap(), Value::Long(2.into()));
        let complex = Value::Complex(ComplexNumber::new(1.0, -2.0));
        assert_eq!(complex.get_property("imag").unwrap(), Value::Float(-2.0));
    }

    #[test]
    fn date_properties() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
                                                       .and_hms_milli_opt(8, 30, 5, 250)
                                                       .unwrap();
        let date = Value::Date(date);
        assert_eq!(date.get_property("weekday").unwrap(), Value::from("Friday"));
        assert_eq!(date.get_property("yearday").unwrap(), Value::Integer(61));
        assert_eq!(date.get_property("millisecond").unwrap(), Value::Integer(250));
        assert_eq!(date.get_property("date").unwrap().to_string(), "2024-03-01 00:00:00");
        let start = NaiveDate::from_ymd_opt(1, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let ticks = Value::Date(start).get_property("ticks").unwrap();
        assert_eq!(ticks, Value::Long(BigInt::from(864_000_000_000_i64)));
    }

    #[test]
    fn read_only_properties() {
        let text = Value::from("abc");
        assert!(matches!(text.set_property("length", Value::Integer(1)),
                         Err(ValueError::ReadOnlyProperty { .. })));
        assert!(matches!(text.set_property("width", Value::Integer(1)),
                         Err(ValueError::NoSuchProperty { .. })));
    }

    #[test]
    fn items() {
        let list = list_of(&[1, 2, 3]);
        assert_eq!(list.get_item(&Value::Integer(-3)).unwrap(), Value::Integer(1));
        list.set_item(&Value::Integer(-1), Value::Integer(9)).unwrap();
        assert_eq!(list, list_of(&[1, 2, 9]));
        assert_eq!(list.set_item(&Value::Integer(3), Value::Void),
                   Err(ValueError::IndexOutOfBounds { index: 3, length: 3 }));
        assert_eq!(Value::from("abc").set_item(&Value::Integer(0), Value::from("x")),
                   Err(ValueError::ImmutableString));
        let map = Value::map(Default::default());
        map.set_item(&Value::from("k"), Value::Integer(1)).unwrap();
        assert_eq!(map.get_item(&Value::from("k")).unwrap(), Value::Integer(1));
        assert_eq!(map.get_item(&Value::from("missing")).unwrap(), Value::Void);
        assert_eq!(Value::Integer(1).get_item(&Value::Integer(0)),
                   Err(ValueError::NoIndexer { kind: Kind::Integer }));
    }

    #[test]
    fn slices() {
        let list = list_of(&[1, 2, 3, 4]);
        assert_eq!(list.get_slice(Some(1), Some(3)).unwrap(), list_of(&[2, 3]));
        list.set_slice(Some(1), Some(3), &list_of(&[7])).unwrap();
        assert_eq!(list, list_of(&[1, 7, 4]));
        assert_eq!(Value::from("abc").get_slice(Some(2), Some(1)).unwrap(), Value::from(""));
    }

    #[test]
    fn objects_read_missing_fields_as_void() {
        let object = Value::map(Default::default()).as_object().map(Value::object).unwrap();
        assert_eq!(object.get_property("x").unwrap(), Value::Void);
        object.set_property("x", Value::Integer(1)).unwrap();
        assert_eq!(object.get_property("x").unwrap(), Value::Integer(1));
    }
}
