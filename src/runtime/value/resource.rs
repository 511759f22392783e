use std::{fmt::Debug, rc::Rc};

use crate::{
    error::{ValueError, ValueResult},
    runtime::value::{HostType, Kind, Value, next_serial_id},
};

/// The signature of a member exposed by a host object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMember {
    pub name:       String,
    pub parameters: Vec<HostType>,
}

impl HostMember {
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: Vec<HostType>) -> Self {
        Self { name: name.into(),
               parameters }
    }
}

/// An object owned by the host and handed to scripts as a resource.
///
/// Every access defaults to failing, so implementations only provide what
/// they support.
pub trait HostObject: Debug {
    /// The name under which scripts see the type of the object.
    fn type_name(&self) -> &str;

    /// The textual form of the object.
    fn describe(&self) -> String {
        format!("<{}>", self.type_name())
    }

    /// The signatures of the members callable on this object, overloads
    /// sharing a name.
    fn members(&self) -> Vec<HostMember> {
        Vec::new()
    }

    fn get_property(&self, name: &str) -> ValueResult<Value> {
        Err(ValueError::NoSuchProperty { kind: Kind::Resource,
                                         name: name.to_string(), })
    }

    fn set_property(&self, name: &str, _value: Value) -> ValueResult<()> {
        Err(ValueError::NoSuchProperty { kind: Kind::Resource,
                                         name: name.to_string(), })
    }

    fn get_item(&self, _index: &Value) -> ValueResult<Value> {
        Err(ValueError::NoIndexer { kind: Kind::Resource })
    }

    fn set_item(&self, _index: &Value, _value: Value) -> ValueResult<()> {
        Err(ValueError::NoIndexer { kind: Kind::Resource })
    }

    /// The (key, value) pairs of the object, if it is a collection.
    fn entries(&self) -> ValueResult<Vec<(Value, Value)>> {
        Err(ValueError::NotIterable { kind: Kind::Resource })
    }
}

/// How well a script value fits a host parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Compatibility {
    Exact = 0,
    /// Converts without loss.
    Lossless = 1,
    /// Converts with a possible loss.
    Lossy = 2,
    /// Only the textual form fits.
    StringOnly = 3,
    Incompatible = 4,
}

impl Compatibility {
    #[must_use]
    pub const fn rank(self) -> u32 {
        self as u32
    }
}

/// Ranks the conversion of a value of kind `kind` to the host type `target`.
///
/// # Example
/// ```
/// use addyscript::runtime::value::{Compatibility, HostType, Kind, compatibility};
///
/// assert_eq!(compatibility(Kind::Integer, HostType::I32), Compatibility::Exact);
/// assert_eq!(compatibility(Kind::Integer, HostType::I64), Compatibility::Lossless);
/// assert_eq!(compatibility(Kind::Float, HostType::I32), Compatibility::Lossy);
/// assert_eq!(compatibility(Kind::Date, HostType::String), Compatibility::StringOnly);
/// assert_eq!(compatibility(Kind::Date, HostType::Bool), Compatibility::Incompatible);
/// ```
#[must_use]
pub fn compatibility(kind: Kind, target: HostType) -> Compatibility {
    use Compatibility::{Exact, Incompatible, Lossless, Lossy, StringOnly};

    if target == HostType::Any {
        return Lossless;
    }
    if target == HostType::String && kind != Kind::String && kind != Kind::Void {
        return if kind == Kind::Undefined || kind == Kind::Closure {
            Incompatible
        } else {
            StringOnly
        };
    }
    match kind {
        Kind::Void => match target {
            HostType::Unit => Exact,
            HostType::Object | HostType::String => Lossless,
            _ => Incompatible,
        },
        Kind::Boolean => match target {
            HostType::Bool => Exact,
            _ if target.is_number() => Lossless,
            _ => Incompatible,
        },
        Kind::Integer => match target {
            HostType::I32 => Exact,
            HostType::I64
            | HostType::U64
            | HostType::F64
            | HostType::Decimal
            | HostType::BigInt => Lossless,
            HostType::Bool
            | HostType::I8
            | HostType::U8
            | HostType::I16
            | HostType::U16
            | HostType::U32
            | HostType::F32 => Lossy,
            _ => Incompatible,
        },
        Kind::Long => match target {
            HostType::BigInt => Exact,
            HostType::Decimal => Lossless,
            _ if target == HostType::Bool || target.is_number() => Lossy,
            _ => Incompatible,
        },
        Kind::Decimal => match target {
            HostType::Decimal => Exact,
            HostType::BigInt | HostType::Bool => Lossy,
            _ if target.is_number() => Lossy,
            _ => Incompatible,
        },
        Kind::Rational | Kind::Float => match target {
            HostType::F64 if kind == Kind::Float => Exact,
            HostType::Bool | HostType::BigInt => Lossy,
            _ if target.is_number() => Lossy,
            _ => Incompatible,
        },
        Kind::Date => match target {
            HostType::Date => Exact,
            _ => Incompatible,
        },
        Kind::String => match target {
            HostType::String => Exact,
            HostType::Bool
            | HostType::Date
            | HostType::Char
            | HostType::Bytes
            | HostType::BigInt => Lossy,
            _ if target.is_number() => Lossy,
            _ => Incompatible,
        },
        Kind::List | Kind::Queue | Kind::Stack => match target {
            HostType::List => Lossless,
            HostType::Set => Lossy,
            _ => Incompatible,
        },
        Kind::Set => match target {
            HostType::Set | HostType::List => Lossless,
            _ => Incompatible,
        },
        Kind::Map => match target {
            HostType::Map => Lossless,
            HostType::List | HostType::Set => Lossy,
            _ => Incompatible,
        },
        Kind::Object | Kind::Resource => match target {
            HostType::Object => Lossless,
            _ => Incompatible,
        },
        Kind::Undefined | Kind::Complex | Kind::Closure => Incompatible,
    }
}

/// A host object seen from scripts.
#[derive(Debug, Clone)]
pub struct Resource {
    id:     u64,
    handle: Rc<dyn HostObject>,
}

impl Resource {
    #[must_use]
    pub fn new(handle: Rc<dyn HostObject>) -> Self {
        Self { id: next_serial_id(),
               handle }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn handle(&self) -> &Rc<dyn HostObject> {
        &self.handle
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.handle.describe()
    }

    /// Picks the overload of `name` that best fits `arguments`.
    ///
    /// Each argument adds the rank of its conversion to the matching
    /// parameter, and each parameter left without an argument adds the
    /// highest rank. Signatures with fewer parameters than arguments are
    /// skipped. The lowest total wins, and ties go to the first signature.
    ///
    /// # Returns
    /// - `Some(member)`: The best overload.
    /// - `None`: If no overload of `name` accepts that many arguments.
    #[must_use]
    pub fn best_overload(&self, name: &str, arguments: &[Value]) -> Option<HostMember> {
        let mut best: Option<(u32, HostMember)> = None;
        for member in self.handle.members().into_iter().filter(|member| member.name == name) {
            if arguments.len() > member.parameters.len() {
                continue;
            }
            let missing = member.parameters.len() - arguments.len();
            let matched: u32 =
                arguments.iter()
                         .zip(&member.parameters)
                         .map(|(argument, &target)| compatibility(argument.kind(), target).rank())
                         .sum();
            let missing = u32::try_from(missing).unwrap_or(u32::MAX);
            let penalty = Compatibility::Incompatible.rank().saturating_mul(missing);
            let score = matched.saturating_add(penalty);
            if best.as_ref().is_some_and(|(minimum, _)| score >= *minimum) {
                continue;
            }
            let exact = score == 0;
            best = Some((score, member));
            if exact {
                break;
            }
        }
        best.map(|(_, member)| member)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        count: RefCell<i32>,
    }

    impl HostObject for Counter {
        fn type_name(&self) -> &str {
            "Counter"
        }

        fn members(&self) -> Vec<HostMember> {
            vec![HostMember::new("add", vec![HostType::String]),
                 HostMember::new("add", vec![HostType::I64]),
                 HostMember::new("add", vec![HostType::I32]),
                 HostMember::new("reset", vec![]),
                 HostMember::new("scale", vec![HostType::F64, HostType::F64])]
        }

        fn get_property(&self, name: &str) -> ValueResult<Value> {
            match name {
                "count" => Ok(Value::Integer(*self.count.borrow())),
                _ => Err(ValueError::NoSuchProperty { kind: Kind::Resource,
                                                      name: name.to_string(), }),
            }
        }
    }

    fn counter() -> Resource {
        Resource::new(Rc::new(Counter::default()))
    }

    #[test]
    fn exact_overload_wins() {
        let member = counter().best_overload("add", &[Value::Integer(1)]).unwrap();
        assert_eq!(member.parameters, vec![HostType::I32]);
        let member = counter().best_overload("add", &[Value::from("1")]).unwrap();
        assert_eq!(member.parameters, vec![HostType::String]);
    }

    #[test]
    fn missing_arguments_cost_the_most() {
        let member = counter().best_overload("scale", &[Value::Float(2.0)]).unwrap();
        assert_eq!(member.name, "scale");
        assert!(counter().best_overload("reset", &[Value::Integer(1)]).is_none());
        assert!(counter().best_overload("missing", &[]).is_none());
    }

    #[test]
    fn defaults_forward_errors() {
        let resource = counter();
        assert_eq!(resource.describe(), "<Counter>");
        assert_eq!(resource.handle().get_property("count"), Ok(Value::Integer(0)));
        assert_eq!(resource.handle().get_item(&Value::Integer(0)),
                   Err(ValueError::NoIndexer { kind: Kind::Resource }));
    }
}
