//! Arbitrary precision integers.
//!
//! This module wraps `dashu::IBig` with the operations the kernel needs:
//! gcd/lcm for polynomial content computation and floor/ceiling division
//! for interval rounding.

use dashu::base::{Abs, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
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

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Computes the greatest common divisor.
    ///
    /// The result is always non-negative; `gcd(0, 0) = 0`.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Computes the least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Floor division: the largest integer `q` with `q * other <= self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_floor(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "division by zero");
        let q = &self.0 / &other.0;
        let r = &self.0 % &other.0;
        if r.is_zero() || DashuSigned::is_negative(&r) == DashuSigned::is_negative(&other.0) {
            Self(q)
        } else {
            Self(q - IBig::ONE)
        }
    }

    /// Ceiling division: the smallest integer `q` with `q * other >= self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_ceil(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "division by zero");
        let q = &self.0 / &other.0;
        let r = &self.0 % &other.0;
        if r.is_zero() || DashuSigned::is_negative(&r) != DashuSigned::is_negative(&other.0) {
            Self(q)
        } else {
            Self(q + IBig::ONE)
        }
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}

impl Div for Integer {
    type Output = Self;

    /// Truncating division.
    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Rem for Integer {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Self(self.0 % rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> Integer {
        Integer::new(v)
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(n(12).gcd(&n(8)), n(4));
        assert_eq!(n(-12).gcd(&n(8)), n(4));
        assert_eq!(n(0).gcd(&n(5)), n(5));
        assert_eq!(n(4).lcm(&n(6)), n(12));
        assert_eq!(n(0).lcm(&n(6)), n(0));
    }

    #[test]
    fn test_div_floor() {
        assert_eq!(n(7).div_floor(&n(2)), n(3));
        assert_eq!(n(-7).div_floor(&n(2)), n(-4));
        assert_eq!(n(7).div_floor(&n(-2)), n(-4));
        assert_eq!(n(-7).div_floor(&n(-2)), n(3));
        assert_eq!(n(6).div_floor(&n(2)), n(3));
    }

    #[test]
    fn test_div_ceil() {
        assert_eq!(n(7).div_ceil(&n(2)), n(4));
        assert_eq!(n(-7).div_ceil(&n(2)), n(-3));
        assert_eq!(n(7).div_ceil(&n(-2)), n(-3));
        assert_eq!(n(-7).div_ceil(&n(-2)), n(4));
        assert_eq!(n(6).div_ceil(&n(2)), n(3));
    }

    #[test]
    fn test_signum() {
        assert_eq!(n(5).signum(), 1);
        assert_eq!(n(-5).signum(), -1);
        assert_eq!(n(0).signum(), 0);
    }
}
