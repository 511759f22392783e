/// Arbitrary precision decimal numbers.
///
/// Defines `BigDecimal`, an unscaled integer paired with a non-negative scale,
/// and the `DecimalError` raised by its fallible constructors and divisions.
///
/// # Responsibilities
/// - Parses decimal literals, exponents included.
/// - Aligns scales before every comparison and arithmetic operation.
/// - Divides with a long division capped at `MAX_SCALE` fractional digits.
/// - Rounds, truncates and converts to the other numeric kinds.
pub mod bigdecimal;
/// Complex number support.
///
/// Defines the `ComplexNumber` type used for arithmetic with real and imaginary
/// parts, along with the exponential and logarithm needed by complex powers.
pub mod complex;
/// Exact fractions of arbitrary precision integers, always kept reduced.
pub mod rational;
/// The dynamic values manipulated by scripts.
///
/// # Responsibilities
/// - Defines `Value`, a closed sum over every value kind, and `Kind`, its tag.
/// - Provides the coercion views and the promotion rule between kinds.
/// - Dispatches unary and binary operators per kind.
/// - Exposes properties, items, slices and the `(key, value)` iteration of
///   containers.
/// - Bridges host values in and out, with the compatibility ranking used to
///   select host overloads.
pub mod value;
