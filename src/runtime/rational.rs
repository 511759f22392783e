use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops,
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::runtime::bigdecimal::BigDecimal;

/// An exact fraction of two arbitrary precision integers.
///
/// A `Rational` is always reduced and its denominator is always positive, so
/// the derived equality and hashing are structural.
///
/// # Example
/// ```
/// use addyscript::runtime::rational::Rational;
///
/// let half = Rational::new(2.into(), 4.into()).unwrap();
/// assert_eq!(half.to_string(), "1/2");
/// assert!(Rational::new(1.into(), 0.into()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator:   BigInt,
    denominator: BigInt,
}

impl Rational {
    /// Builds the reduced fraction `numerator / denominator`.
    ///
    /// # Returns
    /// `None` when the denominator is zero.
    #[must_use]
    pub fn new(numerator: BigInt, denominator: BigInt) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        let gcd = numerator.gcd(&denominator);
        let (mut numerator, mut denominator) = (numerator / &gcd, denominator / gcd);
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        Some(Self { numerator,
                    denominator })
    }

    #[must_use]
    pub fn from_integer(value: BigInt) -> Self {
        Self { numerator:   value,
               denominator: BigInt::one(), }
    }

    #[must_use]
    pub const fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    #[must_use]
    pub const fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Whether the fraction holds an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// The quotient truncated toward zero.
    #[must_use]
    pub fn trunc(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    #[must_use]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        Self::new(&self.numerator * &rhs.denominator, &self.denominator * &rhs.numerator)
    }

    /// The remainder of the truncated division.
    #[must_use]
    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        let quotient = Self::from_integer(self.checked_div(rhs)?.trunc());
        Some(self - &(&quotient * rhs))
    }

    /// Raises the fraction to an integer power.
    ///
    /// # Returns
    /// `None` when a negative power of zero is requested.
    #[must_use]
    pub fn pow(&self, exponent: i32) -> Option<Self> {
        let magnitude = exponent.unsigned_abs();
        let (numerator, denominator) = (self.numerator.pow(magnitude),
                                        self.denominator.pow(magnitude));
        if exponent >= 0 {
            Self::new(numerator, denominator)
        } else {
            Self::new(denominator, numerator)
        }
    }

    #[must_use]
    pub fn to_decimal(&self) -> BigDecimal {
        let numerator = BigDecimal::from(self.numerator.clone());
        let denominator = BigDecimal::from(self.denominator.clone());
        numerator.checked_div(&denominator).unwrap_or_default()
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match (self.numerator.to_f64(), self.denominator.to_f64()) {
            (Some(numerator), Some(denominator)) if numerator.is_finite()
                                                     && denominator.is_finite() =>
            {
                numerator / denominator
            },
            _ => self.to_decimal().to_f64(),
        }
    }
}

impl From<&BigDecimal> for Rational {
    fn from(value: &BigDecimal) -> Self {
        let (numerator, denominator) = value.to_fraction();
        Self { numerator,
               denominator }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl ops::Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { numerator:   -self.numerator,
               denominator: self.denominator, }
    }
}

impl ops::Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        let numerator = &self.numerator * &rhs.denominator + &rhs.numerator * &self.denominator;
        Rational::new(numerator, &self.denominator * &rhs.denominator).unwrap_or_default()
    }
}

impl ops::Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        let numerator = &self.numerator * &rhs.denominator - &rhs.numerator * &self.denominator;
        Rational::new(numerator, &self.denominator * &rhs.denominator).unwrap_or_default()
    }
}

impl ops::Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational::new(&self.numerator * &rhs.numerator, &self.denominator * &rhs.denominator)
            .unwrap_or_default()
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::from_integer(BigInt::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(numerator: i32, denominator: i32) -> Rational {
        Rational::new(numerator.into(), denominator.into()).unwrap()
    }

    #[test]
    fn always_reduced() {
        assert_eq!(ratio(6, -8), ratio(-3, 4));
        assert_eq!(ratio(6, -8).denominator(), &BigInt::from(4));
        assert!(ratio(10, 5).is_integer());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(&ratio(1, 2) + &ratio(1, 3), ratio(5, 6));
        assert_eq!(&ratio(1, 2) - &ratio(1, 2), ratio(0, 1));
        assert_eq!(&ratio(2, 3) * &ratio(3, 4), ratio(1, 2));
        assert_eq!(ratio(1, 2).checked_div(&ratio(1, 4)), Some(ratio(2, 1)));
        assert_eq!(ratio(1, 2).checked_div(&ratio(0, 1)), None);
        assert_eq!(ratio(7, 2).checked_rem(&ratio(1, 1)), Some(ratio(1, 2)));
        assert_eq!(ratio(2, 3).pow(-2), Some(ratio(9, 4)));
        assert_eq!(ratio(0, 1).pow(-1), None);
    }

    #[test]
    fn ordering_and_views() {
        assert!(ratio(1, 3) < ratio(1, 2));
        assert!(ratio(-1, 2) < ratio(1, 3));
        assert_eq!(ratio(3, 4).to_decimal().to_string(), "0.75");
        assert!((ratio(1, 4).to_f64() - 0.25).abs() < f64::EPSILON);
        assert_eq!(ratio(-7, 2).trunc(), BigInt::from(-3));
    }
}
