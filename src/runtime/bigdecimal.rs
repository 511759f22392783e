use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops,
    str::FromStr,
};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Maximal number of fractional digits produced by a division.
pub const MAX_SCALE: u32 = 50;
/// Largest scale, or power of ten in a literal exponent, a decimal may carry.
pub const MAX_MAGNITUDE: u32 = 100_000;
/// Largest size in bits of the unscaled value computed by a power.
const MAX_POWER_BITS: u64 = 4 * MAX_MAGNITUDE as u64;

/// Failures raised while building or dividing decimals.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecimalError {
    /// The text did not hold a decimal number.
    #[error("'{text}' is not a valid decimal number")]
    InvalidFormat {
        /// The rejected text.
        text: String,
    },
    /// A NaN or an infinite float has no decimal counterpart.
    #[error("{value} has no decimal representation")]
    NotFinite {
        /// The rejected float.
        value: f64,
    },
    /// The divisor was zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The quotient needs more than [`MAX_SCALE`] fractional digits.
    #[error("the quotient cannot be represented exactly with {MAX_SCALE} fractional digits")]
    Inexact,
    /// The result would need more than [`MAX_MAGNITUDE`] digits.
    #[error("the result is too large to be represented as a decimal")]
    Overflow,
}

/// An arbitrary precision base-10 number.
///
/// The represented value is `unscaled * 10^-scale`. Every operation returns a
/// deflated value, with all the trailing zeros of the fractional part
/// stripped, so two equal numbers always share the same representation.
///
/// # Example
/// ```
/// use addyscript::runtime::bigdecimal::BigDecimal;
///
/// let a: BigDecimal = "1.50".parse().unwrap();
/// let b: BigDecimal = "2.5".parse().unwrap();
/// assert_eq!((&a + &b).to_string(), "4");
/// assert_eq!(a.scale(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale:    u32,
}

fn ten_pow(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

impl BigDecimal {
    /// Builds `unscaled * 10^-scale`, deflated.
    #[must_use]
    pub fn new(unscaled: BigInt, scale: u32) -> Self {
        Self { unscaled, scale }.deflate()
    }

    /// The unscaled integer of the deflated representation.
    #[must_use]
    pub const fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// The number of fractional digits of the deflated representation.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn one() -> Self {
        Self::from(BigInt::one())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// Returns -1, 0 or 1 depending on the sign of the number.
    #[must_use]
    pub fn signum(&self) -> i32 {
        match self.unscaled.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self { unscaled: self.unscaled.abs(),
               scale:    self.scale, }
    }

    /// The unscaled value brought to a greater or equal scale.
    fn inflate(&self, scale: u32) -> BigInt {
        debug_assert!(scale >= self.scale);
        &self.unscaled * ten_pow(scale - self.scale)
    }

    fn deflate(mut self) -> Self {
        if self.unscaled.is_zero() {
            self.scale = 0;
            return self;
        }
        let ten = BigInt::from(10u32);
        while self.scale > 0 {
            let (quotient, remainder) = self.unscaled.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            self.unscaled = quotient;
            self.scale -= 1;
        }
        self
    }

    /// Brings both operands to their common scale.
    fn align(&self, other: &Self) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        (self.inflate(scale), other.inflate(scale), scale)
    }

    /// Divides `self` by `divisor`, keeping at most [`MAX_SCALE`] fractional
    /// digits.
    ///
    /// # Returns
    /// The truncated quotient and whether digits were dropped, or `None` when
    /// the divisor is zero.
    fn long_division(&self, divisor: &Self) -> Option<(Self, bool)> {
        if divisor.is_zero() {
            return None;
        }
        let (dividend, divisor, _) = self.align(divisor);
        let negative = dividend.is_negative() != divisor.is_negative();
        let (dividend, divisor) = (dividend.abs(), divisor.abs());

        let (mut quotient, mut remainder) = dividend.div_rem(&divisor);
        let mut scale = 0;
        let ten = BigInt::from(10u32);
        while !remainder.is_zero() && scale < MAX_SCALE {
            remainder *= &ten;
            let (digit, rest) = remainder.div_rem(&divisor);
            quotient = quotient * &ten + digit;
            remainder = rest;
            scale += 1;
        }

        if negative {
            quotient = -quotient;
        }
        Some((Self::new(quotient, scale), !remainder.is_zero()))
    }

    /// Divides by `divisor`, truncating the quotient after [`MAX_SCALE`]
    /// fractional digits.
    ///
    /// # Returns
    /// `None` when `divisor` is zero.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::bigdecimal::BigDecimal;
    ///
    /// let one = BigDecimal::one();
    /// let eight: BigDecimal = "8".parse().unwrap();
    /// assert_eq!(one.checked_div(&eight).unwrap().to_string(), "0.125");
    /// assert!(one.checked_div(&BigDecimal::zero()).is_none());
    /// ```
    #[must_use]
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.long_division(divisor).map(|(quotient, _)| quotient)
    }

    /// Divides by `divisor`, failing instead of truncating the quotient.
    pub fn div_exact(&self, divisor: &Self) -> Result<Self, DecimalError> {
        match self.long_division(divisor) {
            None => Err(DecimalError::DivisionByZero),
            Some((_, true)) => Err(DecimalError::Inexact),
            Some((quotient, false)) => Ok(quotient),
        }
    }

    /// The remainder of the truncated division, carrying the sign of `self`.
    ///
    /// # Returns
    /// `None` when `divisor` is zero.
    #[must_use]
    pub fn checked_rem(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        let (dividend, divisor, scale) = self.align(divisor);
        Some(Self::new(dividend % divisor, scale))
    }

    /// Raises the number to an integer power.
    ///
    /// A negative exponent divides one by the positive power, under the usual
    /// scale cap.
    ///
    /// # Errors
    /// `Overflow` when the power would exceed [`MAX_MAGNITUDE`] digits.
    pub fn pow(&self, exponent: i32) -> Result<Self, DecimalError> {
        let magnitude = exponent.unsigned_abs();
        let scale = self.scale
                        .checked_mul(magnitude)
                        .filter(|&scale| scale <= MAX_MAGNITUDE)
                        .ok_or(DecimalError::Overflow)?;
        if self.unscaled.magnitude() > &BigUint::one()
           && self.unscaled.bits().saturating_mul(u64::from(magnitude)) > MAX_POWER_BITS
        {
            return Err(DecimalError::Overflow);
        }
        let positive = Self { unscaled: self.unscaled.pow(magnitude),
                              scale }.deflate();
        if exponent >= 0 {
            Ok(positive)
        } else {
            Self::one().checked_div(&positive)
                       .ok_or(DecimalError::DivisionByZero)
        }
    }

    /// Multiplies, failing instead of exceeding [`MAX_MAGNITUDE`] fractional
    /// digits.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, DecimalError> {
        let scale = self.scale
                        .checked_add(rhs.scale)
                        .filter(|&scale| scale <= MAX_MAGNITUDE)
                        .ok_or(DecimalError::Overflow)?;
        Ok(Self::new(&self.unscaled * &rhs.unscaled, scale))
    }

    /// Rounds to `precision` fractional digits, halves away from zero.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::bigdecimal::BigDecimal;
    ///
    /// let x: BigDecimal = "-2.345".parse().unwrap();
    /// assert_eq!(x.round(2).to_string(), "-2.35");
    /// assert_eq!(x.round(0).to_string(), "-2");
    /// ```
    #[must_use]
    pub fn round(&self, precision: u32) -> Self {
        if self.scale <= precision {
            return self.clone();
        }
        let divisor = ten_pow(self.scale - precision);
        let (mut quotient, remainder) = self.unscaled.abs().div_rem(&divisor);
        if remainder * 2u32 >= divisor {
            quotient += 1u32;
        }
        if self.unscaled.is_negative() {
            quotient = -quotient;
        }
        Self::new(quotient, precision)
    }

    /// Drops the fractional part.
    #[must_use]
    pub fn truncate(&self) -> Self {
        Self::from(self.integer_part().0)
    }

    /// The greatest integer less than or equal to the number.
    #[must_use]
    pub fn floor(&self) -> Self {
        let (quotient, exact) = self.integer_part();
        if !exact && self.unscaled.is_negative() {
            Self::from(quotient - 1)
        } else {
            Self::from(quotient)
        }
    }

    /// The least integer greater than or equal to the number.
    #[must_use]
    pub fn ceiling(&self) -> Self {
        let (quotient, exact) = self.integer_part();
        if !exact && self.unscaled.is_positive() {
            Self::from(quotient + 1)
        } else {
            Self::from(quotient)
        }
    }

    /// The integer part truncated toward zero, and whether it is exact.
    fn integer_part(&self) -> (BigInt, bool) {
        let (quotient, remainder) = self.unscaled.div_rem(&ten_pow(self.scale));
        (quotient, remainder.is_zero())
    }

    /// Converts the number to the nearest integer.
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        self.round(0).integer_part().0
    }

    /// The number as a reduced fraction `(numerator, denominator)`.
    #[must_use]
    pub fn to_fraction(&self) -> (BigInt, BigInt) {
        let denominator = ten_pow(self.scale);
        let gcd = self.unscaled.gcd(&denominator);
        if gcd.is_zero() {
            return (BigInt::zero(), BigInt::one());
        }
        (&self.unscaled / &gcd, denominator / gcd)
    }

    /// The nearest double precision float.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or_else(|_| {
            if self.unscaled.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        })
    }

    #[must_use]
    pub fn to_i32(&self) -> Option<i32> {
        self.to_bigint().to_i32()
    }

    /// Converts a float through its shortest round-trip text.
    ///
    /// # Example
    /// ```
    /// use addyscript::runtime::bigdecimal::BigDecimal;
    ///
    /// assert_eq!(BigDecimal::from_f64(0.1).unwrap().to_string(), "0.1");
    /// assert!(BigDecimal::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, DecimalError> {
        if !value.is_finite() {
            return Err(DecimalError::NotFinite { value });
        }
        format!("{value:?}").parse()
    }
}

impl FromStr for BigDecimal {
    type Err = DecimalError;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`.
    ///
    /// Either the integer or the fractional digits may be missing, not both. A
    /// negative effective scale pads the unscaled value with zeros. Exponents
    /// beyond [`MAX_MAGNITUDE`] are rejected.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::InvalidFormat { text: text.to_string() };

        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(index) => {
                let exponent = &body[index + 1..];
                let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let exponent = exponent.parse::<i64>().map_err(|_| invalid())?;
                if exponent.unsigned_abs() > u64::from(MAX_MAGNITUDE) {
                    return Err(invalid());
                }
                (&body[..index], exponent)
            },
            None => (body, 0),
        };
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if (integer.is_empty() && fraction.is_empty())
           || !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let digits = format!("{integer}{fraction}");
        let mut unscaled: BigInt = digits.parse().map_err(|_| invalid())?;
        if negative {
            unscaled = -unscaled;
        }
        let fraction_len = i64::try_from(fraction.len()).map_err(|_| invalid())?;
        let scale = fraction_len - exponent;
        if scale > i64::from(MAX_MAGNITUDE) {
            return Err(invalid());
        }
        if scale < 0 {
            let padding = u32::try_from(-scale).map_err(|_| invalid())?;
            Ok(Self::new(unscaled * ten_pow(padding), 0))
        } else {
            Ok(Self::new(unscaled, u32::try_from(scale).map_err(|_| invalid())?))
        }
    }
}

impl Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = self.unscaled.abs().to_string();
        let scale = self.scale as usize;
        if scale > 0 {
            if scale >= digits.len() {
                digits.insert_str(0, &"0".repeat(scale - digits.len() + 1));
            }
            digits.insert(digits.len() - scale, '.');
        }
        if self.unscaled.is_negative() {
            digits.insert(0, '-');
        }
        f.write_str(&digits)
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        let (left, right, _) = self.align(other);
        left == right
    }
}

impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right, _) = self.align(other);
        left.cmp(&right)
    }
}

impl Hash for BigDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let deflated = self.clone().deflate();
        deflated.unscaled.hash(state);
        deflated.scale.hash(state);
    }
}

impl From<BigInt> for BigDecimal {
    fn from(value: BigInt) -> Self {
        Self { unscaled: value,
               scale:    0, }
    }
}

impl From<i32> for BigDecimal {
    fn from(value: i32) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<i64> for BigDecimal {
    fn from(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl ops::Neg for BigDecimal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { unscaled: -self.unscaled,
               scale:    self.scale, }
    }
}

impl ops::Add for &BigDecimal {
    type Output = BigDecimal;

    fn add(self, rhs: Self) -> Self::Output {
        let (left, right, scale) = self.align(rhs);
        BigDecimal::new(left + right, scale)
    }
}

impl ops::Sub for &BigDecimal {
    type Output = BigDecimal;

    fn sub(self, rhs: Self) -> Self::Output {
        let (left, right, scale) = self.align(rhs);
        BigDecimal::new(left - right, scale)
    }
}

impl ops::Mul for &BigDecimal {
    type Output = BigDecimal;

    fn mul(self, rhs: Self) -> Self::Output {
        BigDecimal::new(&self.unscaled * &rhs.unscaled, self.scale + rhs.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    #[test]
    fn parse_is_canonical() {
        assert_eq!(dec("1.2300").to_string(), "1.23");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(dec("-.5").to_string(), "-0.5");
        assert_eq!(dec("18E4").to_string(), "180000");
        assert_eq!(dec("6.4e+3").to_string(), "6400");
        assert_eq!(dec("6.4e-3").to_string(), "0.0064");
        assert_eq!(dec("0.000").to_string(), "0");
        assert_eq!(dec("+42").to_string(), "42");
        assert_eq!(dec("100").scale(), 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<BigDecimal>().is_err());
        assert!(".".parse::<BigDecimal>().is_err());
        assert!("1e".parse::<BigDecimal>().is_err());
        assert!("1.2.3".parse::<BigDecimal>().is_err());
        assert!("12a".parse::<BigDecimal>().is_err());
    }

    #[test]
    fn huge_exponents_are_rejected() {
        assert!("1e2000000000".parse::<BigDecimal>().is_err());
        assert!("1e-100001".parse::<BigDecimal>().is_err());
        assert_eq!(dec("1e100000").scale(), 0);
        assert_eq!(dec("1e-100000").scale(), MAX_MAGNITUDE);
    }

    #[test]
    fn oversized_results_overflow() {
        assert_eq!(dec("0.001").pow(i32::MAX), Err(DecimalError::Overflow));
        assert_eq!(dec("0.001").pow(i32::MIN), Err(DecimalError::Overflow));
        assert_eq!(dec("1.5").pow(1_000_000), Err(DecimalError::Overflow));
        assert_eq!(dec("1").pow(i32::MAX).unwrap(), dec("1"));
        assert_eq!(dec("-1").pow(i32::MAX).unwrap(), dec("-1"));
        let tiny = dec("1e-60000");
        assert_eq!(tiny.checked_mul(&tiny), Err(DecimalError::Overflow));
        assert_eq!(dec("0.5").checked_mul(&dec("0.2")).unwrap(), dec("0.1"));
    }

    #[test]
    fn alignment_does_not_change_results() {
        assert_eq!(&dec("1.5") + &dec("2.25"), dec("3.75"));
        assert_eq!(&dec("1.50") + &dec("2.250"), dec("3.75"));
        assert_eq!(&dec("10") - &dec("0.001"), dec("9.999"));
        assert_eq!(&dec("1.5") * &dec("0.2"), dec("0.3"));
        assert_eq!(dec("2.50"), dec("2.5"));
        assert!(dec("2.5") < dec("2.51"));
        assert!(dec("-3") < dec("-2.99"));
    }

    #[test]
    fn division() {
        let a = dec("987654321098765432109876.54321");
        let b = dec("1000000000000");
        assert_eq!(a.checked_div(&b).unwrap(), dec("987654321098.76543210987654321"));

        let third = dec("1").checked_div(&dec("3")).unwrap();
        assert_eq!(third.scale(), MAX_SCALE);
        assert_eq!(dec("1").div_exact(&dec("3")), Err(DecimalError::Inexact));
        assert_eq!(dec("1").div_exact(&dec("0")), Err(DecimalError::DivisionByZero));
        assert_eq!(dec("-7").checked_div(&dec("2")).unwrap(), dec("-3.5"));
    }

    #[test]
    fn terminating_division_is_exact() {
        let a = dec("12.375");
        let b = dec("0.125");
        let quotient = a.checked_div(&b).unwrap();
        assert_eq!(&quotient * &b, a);
    }

    #[test]
    fn remainder_and_power() {
        assert_eq!(dec("7.5").checked_rem(&dec("2")).unwrap(), dec("1.5"));
        assert_eq!(dec("-7.5").checked_rem(&dec("2")).unwrap(), dec("-1.5"));
        assert!(dec("1").checked_rem(&dec("0")).is_none());
        assert_eq!(dec("1.5").pow(2).unwrap(), dec("2.25"));
        assert_eq!(dec("2").pow(-2).unwrap(), dec("0.25"));
        assert_eq!(dec("0").pow(-1), Err(DecimalError::DivisionByZero));
    }

    #[test]
    fn rounding_family() {
        assert_eq!(dec("2.5").round(0), dec("3"));
        assert_eq!(dec("2.449").round(1), dec("2.4"));
        assert_eq!(dec("-2.5").round(0), dec("-3"));
        assert_eq!(dec("2.7").truncate(), dec("2"));
        assert_eq!(dec("-2.7").truncate(), dec("-2"));
        assert_eq!(dec("-2.7").floor(), dec("-3"));
        assert_eq!(dec("2.7").ceiling(), dec("3"));
        assert_eq!(dec("-2").floor(), dec("-2"));
        assert_eq!(dec("2").ceiling(), dec("2"));
    }

    #[test]
    fn conversions() {
        assert_eq!(dec("0.75").to_fraction(), (BigInt::from(3), BigInt::from(4)));
        assert_eq!(dec("2.5").to_bigint(), BigInt::from(3));
        assert!((dec("0.1").to_f64() - 0.1).abs() < f64::EPSILON);
        assert_eq!(BigDecimal::from_f64(1e20).unwrap(), dec("100000000000000000000"));
        assert_eq!(BigDecimal::from_f64(-2.5).unwrap(), dec("-2.5"));
    }
}
