//! Arbitrary precision rational numbers.
//!
//! The exact coefficient and bound type of the whole kernel. Rationals
//! are always stored in lowest terms with a positive denominator, so
//! structural equality coincides with numeric equality.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::Integer;

/// An arbitrary precision rational number.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let sign = denominator.signum();
        let numerator = if sign < 0 { -numerator } else { numerator };
        Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        ))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Converts a finite `f64` to the exact rational it denotes.
    ///
    /// The conversion is exact: the binary expansion of the double is
    /// taken as-is, so `from_f64(0.1)` is *not* 1/10. Returns `None`
    /// for NaN and the infinities.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Self::zero());
        }

        let bits = value.to_bits();
        let sign = if bits >> 63 == 1 { -1i64 } else { 1 };
        let biased_exp = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);

        // Subnormals have an implicit leading 0, normals a leading 1.
        let (mantissa, exp) = if biased_exp == 0 {
            (fraction, -1074i64)
        } else {
            (fraction | (1u64 << 52), biased_exp - 1075)
        };

        let two = Integer::new(2);
        #[allow(clippy::cast_possible_wrap)]
        let m = Integer::new(mantissa as i64);
        let m = if sign < 0 { -m } else { m };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let r = if exp >= 0 {
            Self::from_integer(m * two.pow(exp as u32))
        } else {
            Self::new(m, two.pow((-exp) as u32))
        };
        Some(r)
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            Some(self.numerator())
        } else {
            None
        }
    }

    /// Returns the largest integer not greater than this rational.
    #[must_use]
    pub fn floor(&self) -> Integer {
        self.numerator().div_floor(&self.denominator())
    }

    /// Returns the smallest integer not less than this rational.
    #[must_use]
    pub fn ceil(&self) -> Integer {
        self.numerator().div_ceil(&self.denominator())
    }

    /// Rounds to the nearest integer; half-way cases round up
    /// (`round(1/2) = 1`, `round(-1/2) = 0`).
    #[must_use]
    pub fn round(&self) -> Integer {
        (self + &Self::from_i64(1, 2)).floor()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Returns the smaller of two rationals.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Returns the larger of two rationals.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    /// Returns the inner `dashu::RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&Rational> for Rational {
    type Output = Self;

    fn div(self, rhs: &Rational) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Self::Output {
        Rational(&self.0 / &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(num: i64, den: i64) -> Rational {
        Rational::from_i64(num, den)
    }

    #[test]
    fn test_basic_ops() {
        // 1/2 + 1/3 = 5/6
        let sum = q(1, 2) + q(1, 3);
        assert_eq!(sum, q(5, 6));

        // 1/2 * 1/3 = 1/6
        let prod = q(1, 2) * q(1, 3);
        assert_eq!(prod, q(1, 6));
    }

    #[test]
    fn test_reduction_and_sign() {
        // 4/6 reduces to 2/3
        assert_eq!(q(4, 6), q(2, 3));
        // denominator sign is normalized away
        assert_eq!(q(1, -2), q(-1, 2));
        assert!(q(1, -2).is_negative());
    }

    #[test]
    fn test_floor_ceil_round() {
        assert_eq!(q(7, 2).floor(), Integer::new(3));
        assert_eq!(q(7, 2).ceil(), Integer::new(4));
        assert_eq!(q(-7, 2).floor(), Integer::new(-4));
        assert_eq!(q(-7, 2).ceil(), Integer::new(-3));
        assert_eq!(q(3, 1).floor(), Integer::new(3));
        assert_eq!(q(3, 1).ceil(), Integer::new(3));
        assert_eq!(q(7, 2).round(), Integer::new(4));
        assert_eq!(q(-7, 2).round(), Integer::new(-3));
    }

    #[test]
    fn test_from_f64_exact() {
        // -20.5 and 0.25 are exactly representable doubles
        assert_eq!(Rational::from_f64(-20.5), Some(q(-41, 2)));
        assert_eq!(Rational::from_f64(0.25), Some(q(1, 4)));
        assert_eq!(Rational::from_f64(3.0), Some(q(3, 1)));
        assert_eq!(Rational::from_f64(0.0), Some(Rational::zero()));
        assert_eq!(Rational::from_f64(f64::NAN), None);
        assert_eq!(Rational::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(q(3, 1).to_string(), "3");
        assert_eq!(q(2, 3).to_string(), "2/3");
        assert_eq!(q(-2, 3).to_string(), "-2/3");
    }

    #[test]
    fn test_min_max() {
        assert_eq!(q(1, 2).min(q(1, 3)), q(1, 3));
        assert_eq!(q(1, 2).max(q(1, 3)), q(1, 2));
    }
}
