use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops::{Add, Div, Mul, Neg, Sub},
};

use ordered_float::OrderedFloat;

/// `0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);
/// The imaginary unit.
pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

/// A complex number with double precision parts.
///
/// Two numbers are equal when their parts are, `NaN` parts included, so
/// complex values can be used as map keys and set items.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    pub real:      f64,
    pub imaginary: f64,
}

impl ComplexNumber {
    /// Builds a number from its parts.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!((c.real, c.imaginary), (5.0, -1.0));
    /// assert_eq!(c.to_string(), "(5-i)");
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Builds a number from its magnitude and its phase in radians.
    #[must_use]
    pub fn from_polar(magnitude: f64, phase: f64) -> Self {
        let (sin, cos) = phase.sin_cos();
        Self::new(magnitude * cos, magnitude * sin)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }

    /// The magnitude of the number.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::complex::ComplexNumber;
    /// assert_eq!(ComplexNumber::new(3.0, 4.0).abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// The phase of the number in radians, in `(-pi, pi]`.
    #[must_use]
    pub fn arg(&self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    #[must_use]
    pub const fn conjugate(&self) -> Self {
        Self::new(self.real, -self.imaginary)
    }

    const fn norm_squared(&self) -> f64 {
        self.real * self.real + self.imaginary * self.imaginary
    }

    const fn scale(&self, factor: f64) -> Self {
        Self::new(self.real * factor, self.imaginary * factor)
    }

    /// Raises the number to a complex power using the principal branch of
    /// the logarithm. `0 ** w` is `0` for any nonzero `w`.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::complex::{ComplexNumber, I};
    /// let minus_one = I.pow(ComplexNumber::new(2.0, 0.0));
    /// assert!((minus_one.real + 1.0).abs() < 1e-10);
    /// assert!(minus_one.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        if exponent.is_zero() {
            return ONE;
        }
        if self.is_zero() {
            return ZERO;
        }
        let log = Self::new(self.abs().ln(), self.arg());
        let product = exponent * log;
        Self::from_polar(product.real.exp(), product.imaginary)
    }

    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.real), OrderedFloat(self.imaginary))
    }
}

/// Writes numbers the way complex literals are spelled: `2i`, `-i`, and a
/// parenthesized sum when both parts are present.
impl Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imaginary = match self.imaginary {
            -1.0 => "-i".to_string(),
            1.0 => "i".to_string(),
            value => format!("{value}i"),
        };
        if self.imaginary == 0.0 {
            write!(f, "{}", self.real)
        } else if self.real == 0.0 {
            f.write_str(&imaginary)
        } else if self.imaginary < 0.0 {
            write!(f, "({}{imaginary})", self.real)
        } else {
            write!(f, "({}+{imaginary})", self.real)
        }
    }
}

macro_rules! componentwise {
    ($($trait:ident :: $method:ident => $op:tt),* $(,)?) => {
        $(impl $trait for ComplexNumber {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self::new(self.real $op rhs.real, self.imaginary $op rhs.imaginary)
            }
        })*
    };
}

componentwise! {
    Add::add => +,
    Sub::sub => -,
}

impl Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let real = self.real * rhs.real - self.imaginary * rhs.imaginary;
        let imaginary = self.real * rhs.imaginary + self.imaginary * rhs.real;
        Self::new(real, imaginary)
    }
}

/// Dividing by zero yields infinite or `NaN` parts.
impl Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let numerator = self * rhs.conjugate();
        let denominator = rhs.norm_squared();
        Self::new(numerator.real / denominator, numerator.imaginary / denominator)
    }
}

impl Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl From<f64> for ComplexNumber {
    fn from(real: f64) -> Self {
        Self::new(real, 0.0)
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ComplexNumber {}

impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_literal_spelling() {
        assert_eq!(ComplexNumber::new(0.0, 1.0).to_string(), "i");
        assert_eq!(ComplexNumber::new(0.0, -1.0).to_string(), "-i");
        assert_eq!(ComplexNumber::new(0.0, 2.5).to_string(), "2.5i");
        assert_eq!(ComplexNumber::new(3.0, 0.0).to_string(), "3");
        assert_eq!(ComplexNumber::new(1.0, 2.0).to_string(), "(1+2i)");
        assert_eq!(ComplexNumber::new(1.0, -2.0).to_string(), "(1-2i)");
        assert_eq!(ZERO.to_string(), "0");
    }

    #[test]
    fn arithmetic() {
        let a = ComplexNumber::new(1.0, 2.0);
        let b = ComplexNumber::new(3.0, -1.0);
        assert_eq!(a + b, ComplexNumber::new(4.0, 1.0));
        assert_eq!(a - b, ComplexNumber::new(-2.0, 3.0));
        assert_eq!(a * b, ComplexNumber::new(5.0, 5.0));
        assert_eq!(ComplexNumber::new(5.0, 5.0) / b, a);
        assert_eq!(-a, ComplexNumber::new(-1.0, -2.0));
        assert_eq!(I * I, ComplexNumber::new(-1.0, 0.0));
    }

    #[test]
    fn powers() {
        let a = ComplexNumber::new(1.0, 2.0);
        assert_eq!(ZERO.pow(a), ZERO);
        assert_eq!(a.pow(ZERO), ONE);
        let square = a.pow(ComplexNumber::from(2.0));
        assert!((square.real + 3.0).abs() < 1e-10);
        assert!((square.imaginary - 4.0).abs() < 1e-10);
    }

    #[test]
    fn not_a_number_equals_itself() {
        let nan = ComplexNumber::new(f64::NAN, 0.0);
        assert_eq!(nan, nan);
    }
}
