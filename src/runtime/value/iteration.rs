use std::{iter::FusedIterator, vec};

use crate::{
    error::{ValueError, ValueResult},
    runtime::value::Value,
    util::num::usize_to_i32_saturating,
};

/// The `(key, value)` pairs of a container.
///
/// The pairs are a snapshot taken when the iteration starts, so changing the
/// container while iterating does not affect them.
#[derive(Debug, Clone)]
pub struct Entries {
    pairs: vec::IntoIter<(Value, Value)>,
}

impl Entries {
    fn new(pairs: Vec<(Value, Value)>) -> Self {
        Self { pairs: pairs.into_iter() }
    }
}

impl Iterator for Entries {
    type Item = (Value, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.pairs.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl ExactSizeIterator for Entries {}

impl FusedIterator for Entries {}

fn indexed(items: impl IntoIterator<Item = Value>) -> Vec<(Value, Value)> {
    items.into_iter()
         .enumerate()
         .map(|(index, item)| (Value::Integer(usize_to_i32_saturating(index)), item))
         .collect()
}

impl Value {
    /// Iterates over the `(key, value)` pairs of the value.
    ///
    /// | kind | key | value |
    /// |---|---|---|
    /// | String, List | index | character, element |
    /// | Queue, Stack | `Void` | element, from the front or the top |
    /// | Set | element | element |
    /// | Map | key | value |
    ///
    /// ## Errors
    /// Returns `ValueError::NotIterable` for the other kinds.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::value::Value;
    ///
    /// let list = Value::list(vec![Value::Integer(10), Value::Integer(20)]);
    /// let pairs: Vec<_> = list.entries().unwrap().collect();
    /// assert_eq!(pairs, [(Value::Integer(0), Value::Integer(10)),
    ///                    (Value::Integer(1), Value::Integer(20))]);
    /// ```
    pub fn entries(&self) -> ValueResult<Entries> {
        let pairs = match self {
            Self::String(text) => indexed(text.chars().map(|c| Self::from(c.to_string()))),
            Self::List(items) => indexed(items.borrow().iter().cloned()),
            Self::Queue(_) | Self::Stack(_) => {
                self.as_list()?.into_iter().map(|item| (Self::Void, item)).collect()
            },
            Self::Set(elements) => {
                elements.borrow()
                        .keys()
                        .map(|element| (element.clone(), element.clone()))
                        .collect()
            },
            Self::Map(entries) => {
                entries.borrow()
                       .iter()
                       .map(|(key, value)| (key.clone(), value.clone()))
                       .collect()
            },
            Self::Resource(resource) => resource.handle().entries()?,
            _ => return Err(ValueError::NotIterable { kind: self.kind() }),
        };
        Ok(Entries::new(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::value::Kind;

    #[test]
    fn sets_pair_elements_with_themselves() {
        let set = Value::set([Value::Integer(1), Value::Integer(2)].into_iter()
                                                                   .map(|item| (item, ()))
                                                                   .collect());
        let pairs: Vec<_> = set.entries().unwrap().collect();
        assert_eq!(pairs, [(Value::Integer(1), Value::Integer(1)),
                           (Value::Integer(2), Value::Integer(2))]);
    }

    #[test]
    fn stacks_start_at_the_top() {
        let stack = Value::stack(vec![Value::Integer(1), Value::Integer(2)]);
        let values: Vec<_> = stack.entries().unwrap().map(|(key, value)| {
                                                         assert_eq!(key, Value::Void);
                                                         value
                                                     })
                                  .collect();
        assert_eq!(values, [Value::Integer(2), Value::Integer(1)]);
    }

    #[test]
    fn iteration_uses_a_snapshot() {
        let list = Value::list(vec![Value::Integer(1)]);
        let entries = list.entries().unwrap();
        if let Value::List(items) = &list {
            items.borrow_mut().push(Value::Integer(2));
        }
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn scalars_are_not_iterable() {
        assert_eq!(Value::Integer(3).entries().unwrap_err(),
                   ValueError::NotIterable { kind: Kind::Integer });
    }
}
