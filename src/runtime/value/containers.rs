use std::{collections::VecDeque, rc::Rc};

use regex::Regex;

use crate::{
    ast::BinaryOperator,
    error::{ValueError, ValueResult},
    runtime::value::{Table, Value},
};

fn repeat_count(operand: &Value) -> ValueResult<usize> {
    Ok(usize::try_from(operand.as_int32()?).unwrap_or(0))
}

/// Operators of strings.
///
/// The right operand is taken in its textual form, except for `*` which
/// repeats the string.
pub(super) fn string_binary(text: &Rc<str>,
                            op: BinaryOperator,
                            operand: &Value)
                            -> ValueResult<Option<Value>> {
    if op == BinaryOperator::Times {
        return Ok(Some(Value::string(text.repeat(repeat_count(operand)?))));
    }
    let other = operand.to_string();
    let result = match op {
        BinaryOperator::Plus => return Ok(Some(Value::string(format!("{text}{other}")))),
        BinaryOperator::LessThan => **text < *other,
        BinaryOperator::LessThanOrEqual => **text <= *other,
        BinaryOperator::GreaterThan => **text > *other,
        BinaryOperator::GreaterThanOrEqual => **text >= *other,
        BinaryOperator::StartsWith => text.starts_with(&other),
        BinaryOperator::EndsWith => text.ends_with(&other),
        BinaryOperator::Contains => text.contains(&other),
        BinaryOperator::Matches => {
            let invalid = |error: regex::Error| {
                ValueError::InvalidPattern { pattern: other.clone(),
                                             message: error.to_string(), }
            };
            let pattern = Regex::new(&other).map_err(invalid)?;
            pattern.is_match(text)
        },
        _ => return Ok(None),
    };
    Ok(Some(Value::Boolean(result)))
}

/// Rebuilds a sequence of the same kind as `like` from items listed in
/// iteration order.
fn same_sequence(like: &Value, items: Vec<Value>) -> Value {
    match like {
        Value::Queue(_) => Value::queue(VecDeque::from(items)),
        Value::Stack(_) => Value::stack(items.into_iter().rev().collect()),
        _ => Value::list(items),
    }
}

/// Operators of lists, queues and stacks.
pub(super) fn sequence_binary(sequence: &Value,
                              op: BinaryOperator,
                              operand: &Value)
                              -> ValueResult<Option<Value>> {
    let items = sequence.as_list()?;
    match op {
        BinaryOperator::Plus => {
            let mut items = items;
            items.extend(operand.as_list()?);
            Ok(Some(same_sequence(sequence, items)))
        },
        BinaryOperator::Times => {
            let count = repeat_count(operand)?;
            let repeated = items.iter().cloned().cycle().take(items.len() * count).collect();
            Ok(Some(same_sequence(sequence, repeated)))
        },
        BinaryOperator::Contains => {
            Ok(Some(Value::Boolean(items.iter().any(|item| item.equals(operand)))))
        },
        _ => Ok(None),
    }
}

/// Operators of sets: union, difference, intersection, symmetric difference
/// and inclusion.
pub(super) fn set_binary(elements: &Table<()>,
                         op: BinaryOperator,
                         operand: &Value)
                         -> ValueResult<Option<Value>> {
    if op == BinaryOperator::Contains {
        return Ok(Some(Value::Boolean(elements.contains_key(operand))));
    }
    let is_set_operator = matches!(op,
                                   BinaryOperator::Plus
                                   | BinaryOperator::Or
                                   | BinaryOperator::Minus
                                   | BinaryOperator::And
                                   | BinaryOperator::ExclusiveOr
                                   | BinaryOperator::LessThan
                                   | BinaryOperator::LessThanOrEqual
                                   | BinaryOperator::GreaterThan
                                   | BinaryOperator::GreaterThanOrEqual);
    if !is_set_operator {
        return Ok(None);
    }
    let others = operand.as_set()?;
    let keep = |table: &Table<()>, predicate: &dyn Fn(&Value) -> bool| -> Table<()> {
        table.keys()
             .filter(|key| predicate(key))
             .map(|key| (key.clone(), ()))
             .collect()
    };
    let subset = |a: &Table<()>, b: &Table<()>| a.keys().all(|key| b.contains_key(key));
    let result = match op {
        BinaryOperator::Plus | BinaryOperator::Or => {
            let mut union = elements.clone();
            for key in others.keys() {
                union.insert(key.clone(), ());
            }
            Value::set(union)
        },
        BinaryOperator::Minus => Value::set(keep(elements, &|key| !others.contains_key(key))),
        BinaryOperator::And => Value::set(keep(elements, &|key| others.contains_key(key))),
        BinaryOperator::ExclusiveOr => {
            let mut difference = keep(elements, &|key| !others.contains_key(key));
            for key in others.keys().filter(|key| !elements.contains_key(key)) {
                difference.insert(key.clone(), ());
            }
            Value::set(difference)
        },
        BinaryOperator::LessThan => {
            Value::Boolean(elements.len() < others.len() && subset(elements, &others))
        },
        BinaryOperator::LessThanOrEqual => Value::Boolean(subset(elements, &others)),
        BinaryOperator::GreaterThan => {
            Value::Boolean(elements.len() > others.len() && subset(&others, elements))
        },
        _ => Value::Boolean(subset(&others, elements)),
    };
    Ok(Some(result))
}

/// Operators of maps: `+` merges two maps, the right entries winning, and
/// `contains` looks for a key.
pub(super) fn map_binary(entries: &Table<Value>,
                         op: BinaryOperator,
                         operand: &Value)
                         -> ValueResult<Option<Value>> {
    match op {
        BinaryOperator::Plus => {
            let mut merged = entries.clone();
            for (key, value) in operand.as_map()? {
                merged.insert(key, value);
            }
            Ok(Some(Value::map(merged)))
        },
        BinaryOperator::Contains => Ok(Some(Value::Boolean(entries.contains_key(operand)))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(left: &Value, op: BinaryOperator, right: &Value) -> Value {
        left.binary_operation(op, right).unwrap()
    }

    fn set_of(items: &[i32]) -> Value {
        Value::set(items.iter().map(|&item| (Value::Integer(item), ())).collect())
    }

    fn list_of(items: &[i32]) -> Value {
        Value::list(items.iter().copied().map(Value::Integer).collect())
    }

    #[test]
    fn strings() {
        let text = Value::from("abc");
        assert_eq!(apply(&text, BinaryOperator::Plus, &Value::Integer(1)), Value::from("abc1"));
        assert_eq!(apply(&Value::Integer(1), BinaryOperator::Plus, &text), Value::from("1abc"));
        assert_eq!(apply(&text, BinaryOperator::Times, &Value::Integer(2)), Value::from("abcabc"));
        assert_eq!(apply(&Value::Integer(2), BinaryOperator::Times, &text), Value::from("abcabc"));
        assert_eq!(apply(&text, BinaryOperator::StartsWith, &Value::from("ab")),
                   Value::Boolean(true));
        assert_eq!(apply(&text, BinaryOperator::Contains, &Value::from("d")),
                   Value::Boolean(false));
        assert_eq!(apply(&text, BinaryOperator::LessThan, &Value::from("abd")),
                   Value::Boolean(true));
    }

    #[test]
    fn patterns() {
        let text = Value::from("2024-03-01");
        assert_eq!(apply(&text, BinaryOperator::Matches, &Value::from(r"^\d{4}-\d{2}-\d{2}$")),
                   Value::Boolean(true));
        let error = text.binary_operation(BinaryOperator::Matches, &Value::from("(")).unwrap_err();
        assert!(matches!(error, ValueError::InvalidPattern { .. }));
    }

    #[test]
    fn sequences() {
        let list = list_of(&[1, 2]);
        assert_eq!(apply(&list, BinaryOperator::Plus, &list_of(&[3])), list_of(&[1, 2, 3]));
        assert_eq!(apply(&list, BinaryOperator::Times, &Value::Integer(2)), list_of(&[1, 2, 1, 2]));
        assert_eq!(apply(&list, BinaryOperator::Contains, &Value::Float(2.0)),
                   Value::Boolean(true));
        let stack = Value::stack(vec![Value::Integer(1), Value::Integer(2)]);
        let grown = apply(&stack, BinaryOperator::Plus, &list_of(&[3]));
        assert_eq!(grown.as_list().unwrap(),
                   vec![Value::Integer(2), Value::Integer(1), Value::Integer(3)]);
    }

    #[test]
    fn sets() {
        let (a, b) = (set_of(&[1, 2, 3]), set_of(&[3, 4]));
        assert_eq!(apply(&a, BinaryOperator::Or, &b), set_of(&[1, 2, 3, 4]));
        assert_eq!(apply(&a, BinaryOperator::Minus, &b), set_of(&[1, 2]));
        assert_eq!(apply(&a, BinaryOperator::And, &b), set_of(&[3]));
        assert_eq!(apply(&a, BinaryOperator::ExclusiveOr, &b), set_of(&[1, 2, 4]));
        assert_eq!(apply(&set_of(&[1]), BinaryOperator::LessThan, &a), Value::Boolean(true));
        assert_eq!(apply(&a, BinaryOperator::LessThan, &a), Value::Boolean(false));
        assert_eq!(apply(&a, BinaryOperator::GreaterThanOrEqual, &a), Value::Boolean(true));
        assert_eq!(apply(&a, BinaryOperator::Contains, &Value::Integer(2)), Value::Boolean(true));
    }

    #[test]
    fn maps() {
        let entry = |key: &str, value: i32| (Value::from(key), Value::Integer(value));
        let left = Value::map([entry("a", 1), entry("b", 2)].into_iter().collect());
        let right = Value::map([entry("b", 3)].into_iter().collect());
        let merged = apply(&left, BinaryOperator::Plus, &right);
        assert_eq!(merged.to_string(), "{a => 1, b => 3}");
        assert_eq!(apply(&merged, BinaryOperator::Contains, &Value::from("a")),
                   Value::Boolean(true));
    }
}
