//! Interval arithmetic: ring operations, reciprocal, absolute value,
//! powers and the integer-envelope helpers.
//!
//! Multiplication works on extended endpoint values. Every endpoint is
//! read as "a value that is attained (weak) or only approached
//! (strict), or an infinity"; candidate products combine both the
//! value and the attainedness, and the result bounds are the extreme
//! candidates. Endpoint products use the convention `0 * oo = 0`: an
//! endpoint pinned at 0 contributes the product 0 no matter how far
//! the other factor stretches.

use num_traits::{One, Zero};
use numerus_integers::Rational;
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::bound::BoundType;
use crate::error::IntervalError;
use crate::interval::Interval;

/// An endpoint value extended with infinities and attainedness.
#[derive(Clone, Debug)]
enum ExtVal {
    NegInf,
    /// A finite value; the flag is true if the endpoint is attained
    /// (weak).
    Fin(Rational, bool),
    PosInf,
}

impl ExtVal {
    fn lower_of(i: &Interval) -> Self {
        if i.lower_bound.is_infinite() {
            ExtVal::NegInf
        } else {
            ExtVal::Fin(i.lower.clone(), i.lower_bound == BoundType::Weak)
        }
    }

    fn upper_of(i: &Interval) -> Self {
        if i.upper_bound.is_infinite() {
            ExtVal::PosInf
        } else {
            ExtVal::Fin(i.upper.clone(), i.upper_bound == BoundType::Weak)
        }
    }

    fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (ExtVal::Fin(a, wa), ExtVal::Fin(b, wb)) => {
                // a product of zero needs only its own zero endpoint to
                // be attained; the other factor contributes any point
                let attained =
                    (*wa && *wb) || (a.is_zero() && *wa) || (b.is_zero() && *wb);
                ExtVal::Fin(a * b, attained)
            }
            (ExtVal::Fin(a, wa), inf) | (inf, ExtVal::Fin(a, wa)) => {
                if a.is_zero() {
                    // an endpoint pinned at zero yields the product zero
                    ExtVal::Fin(Rational::zero(), *wa)
                } else {
                    let positive = matches!(inf, ExtVal::PosInf) == a.is_positive();
                    if positive {
                        ExtVal::PosInf
                    } else {
                        ExtVal::NegInf
                    }
                }
            }
            (ExtVal::PosInf, ExtVal::PosInf) | (ExtVal::NegInf, ExtVal::NegInf) => ExtVal::PosInf,
            _ => ExtVal::NegInf,
        }
    }

    /// Orders by value; ties between equal finite values are resolved
    /// in favour of the attained one by the min/max fold below.
    fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ExtVal::NegInf, ExtVal::NegInf) | (ExtVal::PosInf, ExtVal::PosInf) => {
                Ordering::Equal
            }
            (ExtVal::NegInf, _) | (_, ExtVal::PosInf) => Ordering::Less,
            (_, ExtVal::NegInf) | (ExtVal::PosInf, _) => Ordering::Greater,
            (ExtVal::Fin(a, _), ExtVal::Fin(b, _)) => a.cmp(b),
        }
    }

    fn merge_attained(self, other: &Self) -> Self {
        match (self, other) {
            (ExtVal::Fin(v, w1), ExtVal::Fin(_, w2)) => ExtVal::Fin(v, w1 || *w2),
            (s, _) => s,
        }
    }
}

fn fold_min(candidates: Vec<ExtVal>) -> ExtVal {
    let mut iter = candidates.into_iter();
    let mut best = iter.next().unwrap_or(ExtVal::NegInf);
    for c in iter {
        best = match best.cmp_value(&c) {
            Ordering::Greater => c,
            Ordering::Equal => best.merge_attained(&c),
            Ordering::Less => best,
        };
    }
    best
}

fn fold_max(candidates: Vec<ExtVal>) -> ExtVal {
    let mut iter = candidates.into_iter();
    let mut best = iter.next().unwrap_or(ExtVal::PosInf);
    for c in iter {
        best = match best.cmp_value(&c) {
            Ordering::Less => c,
            Ordering::Equal => best.merge_attained(&c),
            Ordering::Greater => best,
        };
    }
    best
}

fn interval_from(lower: ExtVal, upper: ExtVal) -> Interval {
    let (lo, lo_b) = match lower {
        ExtVal::NegInf => (Rational::zero(), BoundType::Infty),
        ExtVal::Fin(v, true) => (v, BoundType::Weak),
        ExtVal::Fin(v, false) => (v, BoundType::Strict),
        // an interval cannot start at +oo
        ExtVal::PosInf => unreachable!("lower bound at +oo"),
    };
    let (up, up_b) = match upper {
        ExtVal::PosInf => (Rational::zero(), BoundType::Infty),
        ExtVal::Fin(v, true) => (v, BoundType::Weak),
        ExtVal::Fin(v, false) => (v, BoundType::Strict),
        ExtVal::NegInf => unreachable!("upper bound at -oo"),
    };
    Interval::raw(lo, lo_b, up, up_b)
}

impl Interval {
    /// Adds two intervals.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::empty();
        }
        let (lower, lower_bound) =
            if self.lower_bound.is_infinite() || other.lower_bound.is_infinite() {
                (Rational::zero(), BoundType::Infty)
            } else {
                (
                    &self.lower + &other.lower,
                    combine_finite(self.lower_bound, other.lower_bound),
                )
            };
        let (upper, upper_bound) =
            if self.upper_bound.is_infinite() || other.upper_bound.is_infinite() {
                (Rational::zero(), BoundType::Infty)
            } else {
                (
                    &self.upper + &other.upper,
                    combine_finite(self.upper_bound, other.upper_bound),
                )
            };
        Self::raw(lower, lower_bound, upper, upper_bound)
    }

    /// Subtracts another interval.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Mirrors the interval at zero.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::raw(
            -&self.upper,
            self.upper_bound,
            -&self.lower,
            self.lower_bound,
        )
    }

    /// Multiplies two intervals.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::empty();
        }
        let endpoints_a = [ExtVal::lower_of(self), ExtVal::upper_of(self)];
        let endpoints_b = [ExtVal::lower_of(other), ExtVal::upper_of(other)];
        let mut candidates = Vec::with_capacity(4);
        for a in &endpoints_a {
            for b in &endpoints_b {
                candidates.push(a.mul(b));
            }
        }
        interval_from(fold_min(candidates.clone()), fold_max(candidates))
    }

    /// Computes the reciprocal interval `{1/x : x in self}`.
    ///
    /// When zero is an endpoint the result is the corresponding
    /// half-bounded ray; an interval with zero in its interior has no
    /// convex reciprocal.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::DivisionByZero`] for the point interval
    /// zero and for intervals containing zero in their interior.
    pub fn inverse(&self) -> Result<Self, IntervalError> {
        if self.is_empty() {
            return Ok(Self::empty());
        }
        if self.is_zero() {
            return Err(IntervalError::DivisionByZero);
        }

        let reaches_below_zero = self.lower_bound.is_infinite() || self.lower.is_negative();
        let reaches_above_zero = self.upper_bound.is_infinite() || self.upper.is_positive();
        if reaches_below_zero && reaches_above_zero {
            return Err(IntervalError::DivisionByZero);
        }

        if !reaches_below_zero {
            // non-negative side: endpoints invert and swap
            let (lower, lower_bound) = if self.upper_bound.is_infinite() {
                (Rational::zero(), BoundType::Strict)
            } else {
                (self.upper.recip(), self.upper_bound)
            };
            let (upper, upper_bound) = if self.lower.is_zero() {
                (Rational::zero(), BoundType::Infty)
            } else {
                (self.lower.recip(), self.lower_bound)
            };
            Ok(Self::raw(lower, lower_bound, upper, upper_bound))
        } else {
            // non-positive side, mirrored
            let (upper, upper_bound) = if self.lower_bound.is_infinite() {
                (Rational::zero(), BoundType::Strict)
            } else {
                (self.lower.recip(), self.lower_bound)
            };
            let (lower, lower_bound) = if self.upper.is_zero() {
                (Rational::zero(), BoundType::Infty)
            } else {
                (self.upper.recip(), self.upper_bound)
            };
            Ok(Self::raw(lower, lower_bound, upper, upper_bound))
        }
    }

    /// Divides by another interval.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::DivisionByZero`] if the divisor
    /// contains zero in its interior or is the point zero.
    pub fn div(&self, other: &Self) -> Result<Self, IntervalError> {
        if self.is_empty() || other.is_empty() {
            return Ok(Self::empty());
        }
        Ok(self.mul(&other.inverse()?))
    }

    /// Computes `{|x| : x in self}`.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        if self.is_semi_positive() {
            return self.clone();
        }
        if self.is_semi_negative() {
            return self.neg();
        }

        // straddles zero: minimum 0 is attained in the interior
        let magnitudes = [
            if self.lower_bound.is_infinite() {
                ExtVal::PosInf
            } else {
                ExtVal::Fin(self.lower.abs(), self.lower_bound == BoundType::Weak)
            },
            if self.upper_bound.is_infinite() {
                ExtVal::PosInf
            } else {
                ExtVal::Fin(self.upper.abs(), self.upper_bound == BoundType::Weak)
            },
        ];
        let [a, b] = magnitudes;
        let upper = fold_max(vec![a, b]);
        interval_from(ExtVal::Fin(Rational::zero(), true), upper)
    }

    /// Raises the interval to a non-negative integer power with
    /// sign-aware endpoint evaluation.
    ///
    /// Even powers of an interval straddling zero attain their minimum
    /// 0 in the interior; the upper bound comes from the endpoint of
    /// larger magnitude.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        if exp == 0 {
            return Self::point(Rational::one());
        }
        if exp % 2 == 1 {
            // odd powers are monotone
            let (lower, lower_bound) = if self.lower_bound.is_infinite() {
                (Rational::zero(), BoundType::Infty)
            } else {
                (self.lower.pow(exp), self.lower_bound)
            };
            let (upper, upper_bound) = if self.upper_bound.is_infinite() {
                (Rational::zero(), BoundType::Infty)
            } else {
                (self.upper.pow(exp), self.upper_bound)
            };
            return Self::raw(lower, lower_bound, upper, upper_bound);
        }
        // even powers factor through the absolute value
        let magnitude = self.abs();
        let (lower, lower_bound) = (magnitude.lower.pow(exp), magnitude.lower_bound);
        let (upper, upper_bound) = if magnitude.upper_bound.is_infinite() {
            (Rational::zero(), BoundType::Infty)
        } else {
            (magnitude.upper.pow(exp), magnitude.upper_bound)
        };
        Self::raw(lower, lower_bound, upper, upper_bound)
    }

    // === Integer envelope helpers ===

    /// Applies `floor` to both bounds, yielding weak integer bounds;
    /// infinite sides stay infinite.
    #[must_use]
    pub fn floor(i: &Self) -> Self {
        if i.is_empty() {
            return Self::empty();
        }
        let (lower, lower_bound) = if i.lower_bound.is_infinite() {
            (Rational::zero(), BoundType::Infty)
        } else {
            (Rational::from_integer(i.lower.floor()), BoundType::Weak)
        };
        let (upper, upper_bound) = if i.upper_bound.is_infinite() {
            (Rational::zero(), BoundType::Infty)
        } else {
            (Rational::from_integer(i.upper.floor()), BoundType::Weak)
        };
        Self::raw(lower, lower_bound, upper, upper_bound)
    }

    /// Applies `ceil` to both bounds, yielding weak integer bounds;
    /// infinite sides stay infinite.
    #[must_use]
    pub fn ceil(i: &Self) -> Self {
        if i.is_empty() {
            return Self::empty();
        }
        let (lower, lower_bound) = if i.lower_bound.is_infinite() {
            (Rational::zero(), BoundType::Infty)
        } else {
            (Rational::from_integer(i.lower.ceil()), BoundType::Weak)
        };
        let (upper, upper_bound) = if i.upper_bound.is_infinite() {
            (Rational::zero(), BoundType::Infty)
        } else {
            (Rational::from_integer(i.upper.ceil()), BoundType::Weak)
        };
        Self::raw(lower, lower_bound, upper, upper_bound)
    }

    /// Computes the floor-rounded quotient of two intervals.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::DivisionByZero`] if the divisor
    /// contains zero.
    pub fn quotient(a: &Self, b: &Self) -> Result<Self, IntervalError> {
        Ok(Self::floor(&a.div(b)?))
    }

    /// Returns true if the interval is a point at an integer value.
    #[must_use]
    pub fn is_integer(i: &Self) -> bool {
        i.is_point_interval() && i.lower.is_integer()
    }
}

/// Bound type of a sum endpoint: weak only when both contributors are
/// weak.
fn combine_finite(a: BoundType, b: BoundType) -> BoundType {
    if a == BoundType::Weak && b == BoundType::Weak {
        BoundType::Weak
    } else {
        BoundType::Strict
    }
}

impl Add for &Interval {
    type Output = Interval;

    fn add(self, rhs: Self) -> Self::Output {
        Interval::add(self, rhs)
    }
}

impl Sub for &Interval {
    type Output = Interval;

    fn sub(self, rhs: Self) -> Self::Output {
        Interval::sub(self, rhs)
    }
}

impl Mul for &Interval {
    type Output = Interval;

    fn mul(self, rhs: Self) -> Self::Output {
        Interval::mul(self, rhs)
    }
}

impl Div for &Interval {
    type Output = Result<Interval, IntervalError>;

    fn div(self, rhs: Self) -> Self::Output {
        Interval::div(self, rhs)
    }
}

impl Neg for &Interval {
    type Output = Interval;

    fn neg(self) -> Self::Output {
        Interval::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    fn qf(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    fn closed(l: i64, u: i64) -> Interval {
        Interval::closed(q(l), q(u)).unwrap()
    }

    fn open(l: i64, u: i64) -> Interval {
        Interval::new(q(l), BoundType::Strict, q(u), BoundType::Strict).unwrap()
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(closed(1, 2).add(&closed(10, 20)), closed(11, 22));
        assert_eq!(closed(1, 2).sub(&closed(10, 20)), closed(-19, -8));

        // strictness is contagious
        let sum = closed(1, 2).add(&open(0, 1));
        assert_eq!(sum, open(1, 3));

        // infinity absorbs
        let ray = Interval::at_least(q(0));
        assert_eq!(ray.add(&closed(1, 2)), Interval::at_least(q(1)));
        assert_eq!(ray.sub(&ray), Interval::unbounded());
    }

    #[test]
    fn test_neg() {
        let i = Interval::new(q(-1), BoundType::Strict, q(2), BoundType::Weak).unwrap();
        let n = i.neg();
        assert_eq!(
            n,
            Interval::new(q(-2), BoundType::Weak, q(1), BoundType::Strict).unwrap()
        );
        assert_eq!(Interval::at_least(q(3)).neg(), Interval::at_most(q(-3)));
    }

    #[test]
    fn test_mul_signs() {
        assert_eq!(closed(2, 3).mul(&closed(4, 5)), closed(8, 15));
        assert_eq!(closed(-3, -2).mul(&closed(4, 5)), closed(-15, -8));
        assert_eq!(closed(-3, -2).mul(&closed(-5, -4)), closed(8, 15));
        assert_eq!(closed(-2, 3).mul(&closed(4, 5)), closed(-10, 15));
        // both straddle zero
        assert_eq!(closed(-2, 3).mul(&closed(-5, 4)), closed(-15, 12));
    }

    #[test]
    fn test_mul_strictness() {
        // (0, 1) * (0, 1) = (0, 1)
        assert_eq!(open(0, 1).mul(&open(0, 1)), open(0, 1));
        // [0, 1] * (0, 1) keeps 0 attained
        let half = closed(0, 1).mul(&open(0, 1));
        assert_eq!(
            half,
            Interval::new(q(0), BoundType::Weak, q(1), BoundType::Strict).unwrap()
        );
    }

    #[test]
    fn test_mul_infinite() {
        let ray = Interval::at_least(q(2));
        assert_eq!(ray.mul(&closed(3, 4)), Interval::at_least(q(6)));
        assert_eq!(ray.mul(&closed(-4, -3)), Interval::at_most(q(-6)));
        // a zero endpoint pins the product
        let pos = Interval::at_least(q(0));
        assert_eq!(pos.mul(&pos), pos);
        // point zero times anything is zero
        assert_eq!(Interval::zero().mul(&Interval::unbounded()), Interval::zero());
        assert_eq!(
            closed(-2, 3).mul(&Interval::unbounded()),
            Interval::unbounded()
        );
    }

    #[test]
    fn test_inverse() {
        assert_eq!(closed(2, 4).inverse(), Ok(Interval::closed(qf(1, 4), qf(1, 2)).unwrap()));
        assert_eq!(
            closed(-4, -2).inverse(),
            Ok(Interval::closed(qf(-1, 2), qf(-1, 4)).unwrap())
        );

        // zero as a weak endpoint opens into a ray
        assert_eq!(
            closed(0, 2).inverse(),
            Ok(Interval::at_least(qf(1, 2)))
        );
        assert_eq!(
            closed(-2, 0).inverse(),
            Ok(Interval::at_most(qf(-1, 2)))
        );

        // rays invert toward zero
        assert_eq!(
            Interval::at_least(q(2)).inverse(),
            Ok(Interval::new(q(0), BoundType::Strict, qf(1, 2), BoundType::Weak).unwrap())
        );

        // zero in the interior is an error
        assert_eq!(closed(-1, 1).inverse(), Err(IntervalError::DivisionByZero));
        assert_eq!(
            Interval::unbounded().inverse(),
            Err(IntervalError::DivisionByZero)
        );
        assert_eq!(Interval::zero().inverse(), Err(IntervalError::DivisionByZero));

        assert_eq!(Interval::empty().inverse(), Ok(Interval::empty()));
    }

    #[test]
    fn test_div() {
        assert_eq!(closed(8, 16).div(&closed(2, 4)), Ok(closed(2, 8)));
        assert_eq!(
            closed(1, 2).div(&closed(-1, 1)),
            Err(IntervalError::DivisionByZero)
        );
        assert_eq!(closed(1, 2).div(&Interval::empty()), Ok(Interval::empty()));
    }

    #[test]
    fn test_abs() {
        assert_eq!(closed(2, 5).abs(), closed(2, 5));
        assert_eq!(closed(-5, -2).abs(), closed(2, 5));
        assert_eq!(closed(-2, 5).abs(), closed(0, 5));
        assert_eq!(closed(-5, 2).abs(), closed(0, 5));

        // tie of magnitudes: attained if either endpoint is weak
        let i = Interval::new(q(-3), BoundType::Strict, q(3), BoundType::Weak).unwrap();
        assert_eq!(i.abs(), closed(0, 3));
        assert_eq!(open(-3, 3).abs(), Interval::new(q(0), BoundType::Weak, q(3), BoundType::Strict).unwrap());

        assert_eq!(Interval::at_most(q(-2)).abs(), Interval::at_least(q(2)));
        assert_eq!(Interval::unbounded().abs(), Interval::at_least(q(0)));
    }

    #[test]
    fn test_pow() {
        assert_eq!(closed(2, 3).pow(2), closed(4, 9));
        assert_eq!(closed(-3, -2).pow(2), closed(4, 9));
        assert_eq!(closed(-3, 2).pow(2), closed(0, 9));
        assert_eq!(closed(-2, 3).pow(3), closed(-8, 27));
        assert_eq!(closed(-2, 3).pow(0), Interval::point(q(1)));
        assert_eq!(closed(-2, 3).pow(1), closed(-2, 3));

        // the even-power maximum follows the larger magnitude endpoint
        let i = Interval::new(q(-3), BoundType::Strict, q(2), BoundType::Weak).unwrap();
        assert_eq!(
            i.pow(2),
            Interval::new(q(0), BoundType::Weak, q(9), BoundType::Strict).unwrap()
        );

        let ray = Interval::at_most(q(-2));
        assert_eq!(ray.pow(2), Interval::at_least(q(4)));
        assert_eq!(ray.pow(3), Interval::at_most(q(-8)));
    }

    #[test]
    fn test_floor_ceil() {
        let i = Interval::closed(qf(-41, 2), qf(34567, 10000)).unwrap();
        assert_eq!(Interval::floor(&i), closed(-21, 3));
        assert_eq!(Interval::ceil(&i), closed(-20, 4));

        // idempotent on integral point intervals
        let p = Interval::point(q(7));
        assert_eq!(Interval::floor(&p), p);
        assert_eq!(Interval::ceil(&p), p);
        assert_eq!(Interval::floor(&Interval::floor(&i)), Interval::floor(&i));
        assert_eq!(Interval::ceil(&Interval::ceil(&i)), Interval::ceil(&i));

        let ray = Interval::at_least(qf(5, 2));
        assert_eq!(Interval::floor(&ray), Interval::at_least(q(2)));
        assert_eq!(Interval::ceil(&ray), Interval::at_least(q(3)));
    }

    #[test]
    fn test_quotient() {
        // [7, 8] / [2, 3] = [7/3, 4] -> floor [2, 4]
        assert_eq!(
            Interval::quotient(&closed(7, 8), &closed(2, 3)),
            Ok(closed(2, 4))
        );
        assert_eq!(
            Interval::quotient(&closed(7, 8), &closed(0, 3)),
            Err(IntervalError::DivisionByZero)
        );
    }

    #[test]
    fn test_is_integer() {
        assert!(Interval::is_integer(&Interval::point(q(3))));
        assert!(!Interval::is_integer(&Interval::point(qf(1, 2))));
        assert!(!Interval::is_integer(&closed(1, 2)));
    }
}
