use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::{
    error::{ValueError, ValueResult},
    runtime::value::Kind,
};

/// Converts an `f64` to an `i32`, truncating toward zero.
///
/// ## Errors
/// Returns `ValueError::Overflow` for non-finite values and values outside of
/// the `i32` range.
///
/// ## Example
/// ```
/// use addyscript::util::num::f64_to_i32_checked;
///
/// assert_eq!(f64_to_i32_checked(-2.9).unwrap(), -2);
/// assert!(f64_to_i32_checked(1e10).is_err());
/// assert!(f64_to_i32_checked(f64::NAN).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_checked(value: f64) -> ValueResult<i32> {
    let truncated = value.trunc();
    if !truncated.is_finite()
       || truncated < f64::from(i32::MIN)
       || truncated > f64::from(i32::MAX)
    {
        return Err(ValueError::Overflow { kind: Kind::Integer });
    }
    Ok(truncated as i32)
}

/// Converts an `f64` to an arbitrary precision integer, truncating toward
/// zero.
///
/// ## Errors
/// Returns `ValueError::Overflow` for NaN and infinite values.
///
/// ## Example
/// ```
/// use addyscript::util::num::f64_to_bigint_checked;
///
/// assert_eq!(f64_to_bigint_checked(1e20).unwrap().to_string(), "100000000000000000000");
/// assert!(f64_to_bigint_checked(f64::INFINITY).is_err());
/// ```
pub fn f64_to_bigint_checked(value: f64) -> ValueResult<BigInt> {
    BigInt::from_f64(value.trunc()).ok_or(ValueError::Overflow { kind: Kind::Long })
}

/// Converts a length to an `i32`, saturating at `i32::MAX`.
#[must_use]
pub fn usize_to_i32_saturating(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Resolves a possibly negative index into a sequence of `length` items.
///
/// Negative indices count from the end and wrap around as many times as
/// needed.
///
/// ## Returns
/// - `Some(position)`: The position designated by `index`.
/// - `None`: If the sequence is empty or `index` is past its end.
///
/// ## Example
/// ```
/// use addyscript::util::num::wrap_index;
///
/// assert_eq!(wrap_index(1, 3), Some(1));
/// assert_eq!(wrap_index(-1, 3), Some(2));
/// assert_eq!(wrap_index(-7, 3), Some(2));
/// assert_eq!(wrap_index(3, 3), None);
/// assert_eq!(wrap_index(0, 0), None);
/// ```
#[must_use]
pub fn wrap_index(index: i32, length: usize) -> Option<usize> {
    let length = i64::try_from(length).ok()?;
    let index = i64::from(index);
    if length == 0 || index >= length {
        return None;
    }
    usize::try_from(index.rem_euclid(length)).ok()
}

/// Resolves the bounds of a slice of a sequence of `length` items.
///
/// A missing lower bound means the start, a missing upper bound the end.
/// Negative bounds count from the end, then both bounds are clamped to the
/// sequence. An upper bound below the lower one yields an empty range.
///
/// ## Example
/// ```
/// use addyscript::util::num::adjust_bounds;
///
/// assert_eq!(adjust_bounds(Some(1), None, 5), (1, 5));
/// assert_eq!(adjust_bounds(Some(-2), None, 5), (3, 5));
/// assert_eq!(adjust_bounds(None, Some(-1), 5), (0, 4));
/// assert_eq!(adjust_bounds(Some(4), Some(2), 5), (4, 4));
/// assert_eq!(adjust_bounds(Some(-10), Some(10), 5), (0, 5));
/// ```
#[must_use]
pub fn adjust_bounds(lower: Option<i32>, upper: Option<i32>, length: usize) -> (usize, usize) {
    let signed_length = i64::try_from(length).unwrap_or(i64::MAX);
    let resolve = |bound: i64| {
        let bound = if bound < 0 { bound + signed_length } else { bound };
        usize::try_from(bound.clamp(0, signed_length)).unwrap_or(length)
    };
    let lower = lower.map_or(0, |bound| resolve(i64::from(bound)));
    let upper = upper.map_or(length, |bound| resolve(i64::from(bound)));
    (lower, upper.max(lower))
}
