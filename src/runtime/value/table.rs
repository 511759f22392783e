use std::collections::HashMap;

use crate::runtime::value::Value;

/// A hash table which remembers the order in which its keys were inserted.
///
/// Maps use a `Table<Value>`, sets a `Table<()>`.
///
/// # Example
/// ```
/// use addyscript::runtime::value::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert(Value::from("b"), Value::Integer(2));
/// table.insert(Value::from("a"), Value::Integer(1));
/// table.insert(Value::from("b"), Value::Integer(3));
///
/// let keys: Vec<String> = table.keys().map(ToString::to_string).collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(table.get(&Value::from("b")), Some(&Value::Integer(3)));
/// ```
#[derive(Debug, Clone)]
pub struct Table<V> {
    entries: Vec<(Value, V)>,
    index:   HashMap<Value, usize>,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self { entries: Vec::new(),
               index:   HashMap::new(), }
    }
}

impl<V> Table<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or replaces the entry of `key`.
    ///
    /// A replaced entry keeps its position.
    ///
    /// # Returns
    /// The value previously associated with `key`, if any.
    pub fn insert(&mut self, key: Value, value: V) -> Option<V> {
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Removes the entry of `key`, shifting the later entries.
    pub fn remove(&mut self, key: &Value) -> Option<V> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for entry in self.index.values_mut() {
            if *entry > position {
                *entry -= 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<V> FromIterator<(Value, V)> for Table<V> {
    fn from_iter<T: IntoIterator<Item = (Value, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<V> IntoIterator for Table<V> {
    type IntoIter = std::vec::IntoIter<(Value, V)>;
    type Item = (Value, V);

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Two tables are equal when they hold the same entries, in any order.
impl<V: PartialEq> PartialEq for Table<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
        && self.iter()
               .all(|(key, value)| other.get(key).is_some_and(|other| other == value))
    }
}
