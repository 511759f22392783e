use std::{
    cell::{Ref, RefCell, RefMut},
    collections::VecDeque,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    rc::Rc,
    sync::atomic::{self, AtomicU64},
};

use chrono::NaiveDateTime;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use ordered_float::OrderedFloat;

use crate::runtime::{
    bigdecimal::BigDecimal,
    complex::ComplexNumber,
    rational::Rational,
    value::{Closure, Object, Resource, Table},
};

static SERIAL_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-wide unique, increasing identifier.
///
/// # Example
/// ```
/// use addyscript::runtime::value::next_serial_id;
///
/// let first = next_serial_id();
/// assert!(next_serial_id() > first);
/// ```
pub fn next_serial_id() -> u64 {
    SERIAL_ID.fetch_add(1, atomic::Ordering::Relaxed)
}

/// The kind of a value.
///
/// Kinds are ordered by rank: a binary operation between two numeric kinds
/// promotes the lower one to the higher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Undefined,
    Void,
    Boolean,
    Integer,
    Long,
    Rational,
    Float,
    Decimal,
    Complex,
    Date,
    String,
    List,
    Map,
    Set,
    Queue,
    Stack,
    Object,
    Resource,
    Closure,
}

impl Kind {
    /// All the kinds, in rank order.
    pub const ALL: [Self; 19] = [Self::Undefined,
                                 Self::Void,
                                 Self::Boolean,
                                 Self::Integer,
                                 Self::Long,
                                 Self::Rational,
                                 Self::Float,
                                 Self::Decimal,
                                 Self::Complex,
                                 Self::Date,
                                 Self::String,
                                 Self::List,
                                 Self::Map,
                                 Self::Set,
                                 Self::Queue,
                                 Self::Stack,
                                 Self::Object,
                                 Self::Resource,
                                 Self::Closure];

    /// The type name of the kind in scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Void => "void",
            Self::Boolean => "bool",
            Self::Integer => "int",
            Self::Long => "long",
            Self::Rational => "rational",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Complex => "complex",
            Self::Date => "date",
            Self::String => "string",
            Self::List => "list",
            Self::Map => "map",
            Self::Set => "set",
            Self::Queue => "queue",
            Self::Stack => "stack",
            Self::Object => "object",
            Self::Resource => "resource",
            Self::Closure => "closure",
        }
    }

    /// Looks a kind up by its type name.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::Kind;
    ///
    /// assert_eq!(Kind::from_name("decimal"), Some(Kind::Decimal));
    /// assert_eq!(Kind::from_name("undefined"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter()
                 .filter(|kind| *kind != Self::Undefined)
                 .find(|kind| kind.name() == name)
    }

    /// Whether the kind belongs to the numeric tower.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self,
                 Self::Integer
                 | Self::Long
                 | Self::Rational
                 | Self::Float
                 | Self::Decimal
                 | Self::Complex)
    }

    /// Whether values of this kind are mutable and shared by reference.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self,
                 Self::List | Self::Map | Self::Set | Self::Queue | Self::Stack | Self::Object)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mutable cell shared by every copy of a container value.
///
/// Each cell receives a serial id when it is created. Copies of the same value
/// share it.
#[derive(Debug)]
pub struct Shared<T> {
    id:   u64,
    cell: Rc<RefCell<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self { id:   next_serial_id(),
               cell: Rc::new(RefCell::new(value)), }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.cell.borrow_mut()
    }

    /// Whether both handles designate the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self { id:   self.id,
               cell: Rc::clone(&self.cell), }
    }
}

/// A dynamic value.
///
/// Scalars are immutable and copied. Containers live in a [`Shared`] cell, so
/// cloning a container value yields another reference to the same data; use
/// [`Value::deep_clone`] to copy the data itself.
#[derive(Debug, Clone)]
pub enum Value {
    /// The value of a variable never assigned.
    Undefined,
    /// `null`
    Void,
    Boolean(bool),
    Integer(i32),
    Long(BigInt),
    Rational(Rational),
    Float(f64),
    Decimal(BigDecimal),
    Complex(ComplexNumber),
    Date(NaiveDateTime),
    String(Rc<str>),
    List(Shared<Vec<Self>>),
    Map(Shared<Table<Self>>),
    Set(Shared<Table<()>>),
    Queue(Shared<VecDeque<Self>>),
    Stack(Shared<Vec<Self>>),
    Object(Shared<Object>),
    Resource(Resource),
    Closure(Closure),
}

impl Value {
    /// The kind of the value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Undefined => Kind::Undefined,
            Self::Void => Kind::Void,
            Self::Boolean(_) => Kind::Boolean,
            Self::Integer(_) => Kind::Integer,
            Self::Long(_) => Kind::Long,
            Self::Rational(_) => Kind::Rational,
            Self::Float(_) => Kind::Float,
            Self::Decimal(_) => Kind::Decimal,
            Self::Complex(_) => Kind::Complex,
            Self::Date(_) => Kind::Date,
            Self::String(_) => Kind::String,
            Self::List(_) => Kind::List,
            Self::Map(_) => Kind::Map,
            Self::Set(_) => Kind::Set,
            Self::Queue(_) => Kind::Queue,
            Self::Stack(_) => Kind::Stack,
            Self::Object(_) => Kind::Object,
            Self::Resource(_) => Kind::Resource,
            Self::Closure(_) => Kind::Closure,
        }
    }

    /// The serial id of a reference value, `None` for scalars.
    #[must_use]
    pub const fn serial_id(&self) -> Option<u64> {
        match self {
            Self::List(cell) | Self::Stack(cell) => Some(cell.id()),
            Self::Map(cell) => Some(cell.id()),
            Self::Set(cell) => Some(cell.id()),
            Self::Queue(cell) => Some(cell.id()),
            Self::Object(cell) => Some(cell.id()),
            Self::Resource(resource) => Some(resource.id()),
            Self::Closure(closure) => Some(closure.id()),
            _ => None,
        }
    }

    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Self::String(text.into())
    }

    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(Shared::new(items))
    }

    #[must_use]
    pub fn map(entries: Table<Self>) -> Self {
        Self::Map(Shared::new(entries))
    }

    #[must_use]
    pub fn set(elements: Table<()>) -> Self {
        Self::Set(Shared::new(elements))
    }

    #[must_use]
    pub fn queue(items: VecDeque<Self>) -> Self {
        Self::Queue(Shared::new(items))
    }

    /// A stack whose top is the last item of `items`.
    #[must_use]
    pub fn stack(items: Vec<Self>) -> Self {
        Self::Stack(Shared::new(items))
    }

    #[must_use]
    pub fn object(object: Object) -> Self {
        Self::Object(Shared::new(object))
    }

    /// An `Integer` when the number fits in 32 bits, a `Long` otherwise.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::{Kind, Value};
    ///
    /// assert_eq!(Value::from_bigint(42.into()).kind(), Kind::Integer);
    /// assert_eq!(Value::from_bigint(i64::MAX.into()).kind(), Kind::Long);
    /// ```
    #[must_use]
    pub fn from_bigint(value: BigInt) -> Self {
        value.to_i32().map_or(Self::Long(value), Self::Integer)
    }

    /// A `Rational`, or an integer when the denominator is one.
    #[must_use]
    pub fn from_rational(value: Rational) -> Self {
        if value.is_integer() {
            Self::from_bigint(value.numerator().clone())
        } else {
            Self::Rational(value)
        }
    }

    /// Whether the value counts as empty for `x!` and `??`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Undefined | Self::Void => true,
            Self::String(text) => text.is_empty(),
            Self::List(items) | Self::Stack(items) => items.borrow().is_empty(),
            Self::Map(entries) => entries.borrow().is_empty(),
            Self::Set(elements) => elements.borrow().is_empty(),
            Self::Queue(items) => items.borrow().is_empty(),
            _ => false,
        }
    }

    /// Copies the value, containers included, recursively.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::List(items) => Self::list(items.borrow().iter().map(Self::deep_clone).collect()),
            Self::Stack(items) => {
                Self::stack(items.borrow().iter().map(Self::deep_clone).collect())
            },
            Self::Queue(items) => {
                Self::queue(items.borrow().iter().map(Self::deep_clone).collect())
            },
            Self::Set(elements) => {
                Self::set(elements.borrow()
                                  .keys()
                                  .map(|element| (element.deep_clone(), ()))
                                  .collect())
            },
            Self::Map(entries) => {
                Self::map(entries.borrow()
                                 .iter()
                                 .map(|(key, value)| (key.deep_clone(), value.deep_clone()))
                                 .collect())
            },
            Self::Object(object) => Self::object(object.borrow().deep_clone()),
            scalar => scalar.clone(),
        }
    }
}

fn write_joined<'a, I, T>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
    where I: IntoIterator<Item = &'a T>,
          T: Display + 'a
{
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Void => Ok(()),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Rational(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Complex(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items.borrow().iter())?;
                f.write_str("]")
            },
            Self::Set(elements) => {
                f.write_str("{")?;
                write_joined(f, elements.borrow().keys())?;
                f.write_str("}")
            },
            Self::Map(entries) => {
                let entries = entries.borrow();
                if entries.is_empty() {
                    return f.write_str("{=>}");
                }
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} => {value}")?;
                }
                f.write_str("}")
            },
            Self::Object(object) => write!(f, "{}", object.borrow()),
            Self::Resource(resource) => f.write_str(&resource.describe()),
            Self::Queue(_) | Self::Stack(_) | Self::Closure(_) => write!(f, "<{}>", self.kind()),
        }
    }
}

/// Structural equality of two values of the same kind.
///
/// This is the equality of table keys. Scripts compare with
/// [`Value::equals`], which also relates values of different kinds.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Void, Self::Void) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Complex(a), Self::Complex(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Stack(a), Self::Stack(b)) => {
                a.ptr_eq(b) || *a.borrow() == *b.borrow()
            },
            (Self::Queue(a), Self::Queue(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Self::Map(a), Self::Map(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Self::Set(a), Self::Set(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Resource(a), Self::Resource(b)) => a.id() == b.id(),
            (Self::Closure(a), Self::Closure(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Undefined | Self::Void => {},
            Self::Boolean(value) => value.hash(state),
            Self::Integer(value) => value.hash(state),
            Self::Long(value) => value.hash(state),
            Self::Rational(value) => value.hash(state),
            Self::Float(value) => OrderedFloat(*value).hash(state),
            Self::Decimal(value) => value.hash(state),
            Self::Complex(value) => value.hash(state),
            Self::Date(value) => value.hash(state),
            Self::String(value) => value.hash(state),
            Self::List(items) | Self::Stack(items) => items.borrow().hash(state),
            Self::Queue(items) => items.borrow().hash(state),
            Self::Map(entries) => entries.borrow().len().hash(state),
            Self::Set(elements) => elements.borrow().len().hash(state),
            Self::Object(object) => object.id().hash(state),
            Self::Resource(resource) => resource.id().hash(state),
            Self::Closure(closure) => closure.id().hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Self::Long(value)
    }
}

impl From<Rational> for Value {
    fn from(value: Rational) -> Self {
        Self::Rational(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<ComplexNumber> for Value {
    fn from(value: ComplexNumber) -> Self {
        Self::Complex(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::list(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_ranked() {
        assert!(Kind::Integer < Kind::Long);
        assert!(Kind::Rational < Kind::Float);
        assert!(Kind::Decimal < Kind::Complex);
        assert!(Kind::Complex < Kind::Date);
        assert_eq!(Kind::ALL.len(), Kind::Closure as usize + 1);
    }

    #[test]
    fn copies_share_containers() {
        let list = Value::list(vec![Value::Integer(1)]);
        let alias = list.clone();
        if let Value::List(items) = &alias {
            items.borrow_mut().push(Value::Integer(2));
        }
        assert_eq!(list.to_string(), "[1, 2]");
        assert_eq!(list.serial_id(), alias.serial_id());

        let copy = list.deep_clone();
        assert_ne!(copy.serial_id(), list.serial_id());
        assert_eq!(copy, list);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Void.to_string(), "");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::map(Table::new()).to_string(), "{=>}");
        let map = Value::map([(Value::from("a"), Value::Integer(1))].into_iter().collect());
        assert_eq!(map.to_string(), "{a => 1}");
        let set = Value::set([(Value::Integer(1), ()), (Value::Integer(2), ())].into_iter()
                                                                               .collect());
        assert_eq!(set.to_string(), "{1, 2}");
    }

    #[test]
    fn structural_equality_is_kind_strict() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Integer(1), Value::Long(1.into()));
        assert_eq!(Value::from_bigint(1.into()), Value::Integer(1));
    }
}
