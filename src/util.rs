/// Numeric conversion helpers.
///
/// This module provides checked conversions between floats and integers, and
/// the index arithmetic shared by strings and lists: negative indices wrapping
/// around, and slice bounds adjusted to the length of the sequence.
///
/// Conversions return a `Result`, which is `Ok` if the value fits the target
/// type, or a `ValueError::Overflow` otherwise.
pub mod num;
