//! The interval type: construction, predicates, containment and
//! derived values.

use num_traits::{One, Zero};
use numerus_integers::Rational;
use std::cmp::Ordering;
use std::fmt;

use crate::bound::BoundType;
use crate::error::IntervalError;

/// An interval over the rationals with typed bounds.
///
/// # Invariants
///
/// - if neither bound is `Infty`, then `lower <= upper`
/// - equal bounds with a `Strict` side denote the empty set; emptiness
///   is a derived predicate, never a stored flag
///
/// The stored value of an `Infty` bound is ignored everywhere
/// (equality, hashing, ordering included); constructors put 0 there.
#[derive(Clone, Debug)]
pub struct Interval {
    pub(crate) lower: Rational,
    pub(crate) lower_bound: BoundType,
    pub(crate) upper: Rational,
    pub(crate) upper_bound: BoundType,
}

impl Interval {
    // === Construction ===

    /// Creates an interval with explicit bound types.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::InvalidBounds`] if both bounds are
    /// finite and `lower > upper`. Equal bounds with a strict side are
    /// accepted and denote the empty interval.
    pub fn new(
        lower: Rational,
        lower_bound: BoundType,
        upper: Rational,
        upper_bound: BoundType,
    ) -> Result<Self, IntervalError> {
        if !lower_bound.is_infinite() && !upper_bound.is_infinite() && lower > upper {
            return Err(IntervalError::InvalidBounds { lower, upper });
        }
        Ok(Self::raw(lower, lower_bound, upper, upper_bound))
    }

    /// Creates a closed interval `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::InvalidBounds`] if `lower > upper`.
    pub fn closed(lower: Rational, upper: Rational) -> Result<Self, IntervalError> {
        Self::new(lower, BoundType::Weak, upper, BoundType::Weak)
    }

    /// Creates the point interval `[value, value]`.
    #[must_use]
    pub fn point(value: Rational) -> Self {
        Self {
            lower: value.clone(),
            lower_bound: BoundType::Weak,
            upper: value,
            upper_bound: BoundType::Weak,
        }
    }

    /// Creates the point interval at zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::point(Rational::zero())
    }

    /// Creates the canonical empty interval `(0, 0)`.
    #[must_use]
    pub fn empty() -> Self {
        Self::raw(
            Rational::zero(),
            BoundType::Strict,
            Rational::zero(),
            BoundType::Strict,
        )
    }

    /// Creates the unbounded interval `(-oo, oo)`.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::raw(
            Rational::zero(),
            BoundType::Infty,
            Rational::zero(),
            BoundType::Infty,
        )
    }

    /// Creates the ray `[value, oo)`.
    #[must_use]
    pub fn at_least(value: Rational) -> Self {
        Self::raw(value, BoundType::Weak, Rational::zero(), BoundType::Infty)
    }

    /// Creates the ray `(value, oo)`.
    #[must_use]
    pub fn greater_than(value: Rational) -> Self {
        Self::raw(value, BoundType::Strict, Rational::zero(), BoundType::Infty)
    }

    /// Creates the ray `(-oo, value]`.
    #[must_use]
    pub fn at_most(value: Rational) -> Self {
        Self::raw(Rational::zero(), BoundType::Infty, value, BoundType::Weak)
    }

    /// Creates the ray `(-oo, value)`.
    #[must_use]
    pub fn less_than(value: Rational) -> Self {
        Self::raw(Rational::zero(), BoundType::Infty, value, BoundType::Strict)
    }

    pub(crate) fn raw(
        lower: Rational,
        lower_bound: BoundType,
        upper: Rational,
        upper_bound: BoundType,
    ) -> Self {
        let lower = if lower_bound.is_infinite() {
            Rational::zero()
        } else {
            lower
        };
        let upper = if upper_bound.is_infinite() {
            Rational::zero()
        } else {
            upper
        };
        Self {
            lower,
            lower_bound,
            upper,
            upper_bound,
        }
    }

    // === Accessors and setters ===

    /// Returns the lower bound value (meaningless when the lower bound
    /// type is `Infty`).
    #[must_use]
    pub fn lower(&self) -> &Rational {
        &self.lower
    }

    /// Returns the upper bound value (meaningless when the upper bound
    /// type is `Infty`).
    #[must_use]
    pub fn upper(&self) -> &Rational {
        &self.upper
    }

    /// Returns the lower bound type.
    #[must_use]
    pub fn lower_bound_type(&self) -> BoundType {
        self.lower_bound
    }

    /// Returns the upper bound type.
    #[must_use]
    pub fn upper_bound_type(&self) -> BoundType {
        self.upper_bound
    }

    /// Replaces the lower bound value, keeping its type.
    ///
    /// Crossing the upper bound makes the interval empty.
    pub fn set_lower(&mut self, value: Rational) {
        self.lower = value;
    }

    /// Replaces the upper bound value, keeping its type.
    pub fn set_upper(&mut self, value: Rational) {
        self.upper = value;
    }

    /// Replaces the lower bound type.
    pub fn set_lower_bound_type(&mut self, bound: BoundType) {
        self.lower_bound = bound;
        if bound.is_infinite() {
            self.lower = Rational::zero();
        }
    }

    /// Replaces the upper bound type.
    pub fn set_upper_bound_type(&mut self, bound: BoundType) {
        self.upper_bound = bound;
        if bound.is_infinite() {
            self.upper = Rational::zero();
        }
    }

    // === Predicates ===

    /// Returns true if no rational is contained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.lower_bound.is_infinite() || self.upper_bound.is_infinite() {
            return false;
        }
        match self.lower.cmp(&self.upper) {
            Ordering::Greater => true,
            Ordering::Equal => {
                self.lower_bound != BoundType::Weak || self.upper_bound != BoundType::Weak
            }
            Ordering::Less => false,
        }
    }

    /// Returns true if the interval is a single point `[v, v]`.
    #[must_use]
    pub fn is_point_interval(&self) -> bool {
        self.lower_bound == BoundType::Weak
            && self.upper_bound == BoundType::Weak
            && self.lower == self.upper
    }

    /// Returns true if at least one side is infinite.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.lower_bound.is_infinite() || self.upper_bound.is_infinite()
    }

    /// Returns true if both sides are infinite.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.lower_bound.is_infinite() && self.upper_bound.is_infinite()
    }

    /// Returns true if exactly one side is infinite.
    #[must_use]
    pub fn is_half_bounded(&self) -> bool {
        self.lower_bound.is_infinite() != self.upper_bound.is_infinite()
    }

    /// Returns true for a finite interval with two strict bounds.
    #[must_use]
    pub fn is_open_interval(&self) -> bool {
        self.lower_bound == BoundType::Strict && self.upper_bound == BoundType::Strict
    }

    /// Returns true for a finite interval with two weak bounds.
    #[must_use]
    pub fn is_closed_interval(&self) -> bool {
        self.lower_bound == BoundType::Weak && self.upper_bound == BoundType::Weak
    }

    /// Returns true for the point interval at zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_point_interval() && self.lower.is_zero()
    }

    /// Returns true for the point interval at one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.is_point_interval() && self.lower.is_one()
    }

    /// Returns true if every contained rational is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        match self.lower_bound {
            BoundType::Infty => false,
            BoundType::Weak => self.lower.is_positive(),
            BoundType::Strict => !self.lower.is_negative(),
        }
    }

    /// Returns true if every contained rational is non-negative.
    #[must_use]
    pub fn is_semi_positive(&self) -> bool {
        !self.lower_bound.is_infinite() && !self.lower.is_negative()
    }

    /// Returns true if every contained rational is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self.upper_bound {
            BoundType::Infty => false,
            BoundType::Weak => self.upper.is_negative(),
            BoundType::Strict => !self.upper.is_positive(),
        }
    }

    /// Returns true if every contained rational is non-positive.
    #[must_use]
    pub fn is_semi_negative(&self) -> bool {
        !self.upper_bound.is_infinite() && !self.upper.is_positive()
    }

    // === Containment ===

    /// Returns true if the rational lies in the interval.
    #[must_use]
    pub fn contains(&self, value: &Rational) -> bool {
        let lower_ok = match self.lower_bound {
            BoundType::Infty => true,
            BoundType::Weak => self.lower <= *value,
            BoundType::Strict => self.lower < *value,
        };
        let upper_ok = match self.upper_bound {
            BoundType::Infty => true,
            BoundType::Weak => *value <= self.upper,
            BoundType::Strict => *value < self.upper,
        };
        lower_ok && upper_ok
    }

    /// Returns true if `other` is a subset of `self`.
    #[must_use]
    pub fn contains_interval(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        if self.is_empty() {
            return false;
        }
        let lower_ok = match self.lower_bound {
            BoundType::Infty => true,
            _ if other.lower_bound.is_infinite() => false,
            _ => match self.lower.cmp(&other.lower) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => {
                    !(self.lower_bound == BoundType::Strict
                        && other.lower_bound == BoundType::Weak)
                }
            },
        };
        let upper_ok = match self.upper_bound {
            BoundType::Infty => true,
            _ if other.upper_bound.is_infinite() => false,
            _ => match self.upper.cmp(&other.upper) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => {
                    !(self.upper_bound == BoundType::Strict
                        && other.upper_bound == BoundType::Weak)
                }
            },
        };
        lower_ok && upper_ok
    }

    /// Returns true if `self` is a subset of `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        other.contains_interval(self)
    }

    /// Returns true if `self` is a subset of `other` and differs from
    /// it.
    #[must_use]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && self != other
    }

    /// Returns true if the value lies in the closure of the interval:
    /// strict bounds count as touching.
    #[must_use]
    pub fn meets(&self, value: &Rational) -> bool {
        (self.lower_bound.is_infinite() || self.lower <= *value)
            && (self.upper_bound.is_infinite() || *value <= self.upper)
    }

    /// Computes the intersection.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let (lower, lower_bound) = lower_max(
            (&self.lower, self.lower_bound),
            (&other.lower, other.lower_bound),
        );
        let (upper, upper_bound) = upper_min(
            (&self.upper, self.upper_bound),
            (&other.upper, other.upper_bound),
        );
        let result = Self::raw(lower, lower_bound, upper, upper_bound);
        if result.is_empty() {
            Self::empty()
        } else {
            result
        }
    }

    /// Returns true if the intersection is non-empty.
    #[must_use]
    pub fn intersects_with(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    // === Derived values ===

    /// Returns the width `upper - lower`, or `None` when a side is
    /// infinite.
    #[must_use]
    pub fn diameter(&self) -> Option<Rational> {
        if self.is_infinite() {
            return None;
        }
        Some(&self.upper - &self.lower)
    }

    /// Returns the midpoint of a finite interval, the finite bound of a
    /// half-bounded one and 0 for the unbounded interval.
    #[must_use]
    pub fn center(&self) -> Rational {
        match (
            self.lower_bound.is_infinite(),
            self.upper_bound.is_infinite(),
        ) {
            (false, false) => (&self.lower + &self.upper) / &Rational::from(2),
            (true, false) => self.upper.clone(),
            (false, true) => self.lower.clone(),
            (true, true) => Rational::zero(),
        }
    }

    /// Returns the tightest enclosing interval with integer bounds and
    /// weak bound types: the lower bound rounds down, the upper bound
    /// rounds up, infinite sides stay infinite.
    #[must_use]
    pub fn integral_part(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        let (lower, lower_bound) = if self.lower_bound.is_infinite() {
            (Rational::zero(), BoundType::Infty)
        } else {
            (Rational::from_integer(self.lower.floor()), BoundType::Weak)
        };
        let (upper, upper_bound) = if self.upper_bound.is_infinite() {
            (Rational::zero(), BoundType::Infty)
        } else {
            (Rational::from_integer(self.upper.ceil()), BoundType::Weak)
        };
        Self::raw(lower, lower_bound, upper, upper_bound)
    }

    /// Returns some rational contained in the interval: the center when
    /// both bounds are finite, an integer near the finite bound when
    /// half-bounded, 0 when unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::EmptyInterval`] on the empty interval.
    pub fn sample(&self) -> Result<Rational, IntervalError> {
        if self.is_empty() {
            return Err(IntervalError::EmptyInterval);
        }
        let value = match (
            self.lower_bound.is_infinite(),
            self.upper_bound.is_infinite(),
        ) {
            (false, false) => self.center(),
            (true, false) => {
                let candidate = Rational::from_integer(self.upper.floor());
                if self.contains(&candidate) {
                    candidate
                } else {
                    candidate - Rational::one()
                }
            }
            (false, true) => {
                let candidate = Rational::from_integer(self.lower.ceil());
                if self.contains(&candidate) {
                    candidate
                } else {
                    candidate + Rational::one()
                }
            }
            (true, true) => Rational::zero(),
        };
        debug_assert!(self.contains(&value));
        Ok(value)
    }
}

/// Picks the larger of two lower bounds (the one excluding more), for
/// intersections. `Infty` is the least lower bound; on equal values the
/// strict bound wins.
pub(crate) fn lower_max(
    a: (&Rational, BoundType),
    b: (&Rational, BoundType),
) -> (Rational, BoundType) {
    match (a.1, b.1) {
        (BoundType::Infty, _) => (b.0.clone(), b.1),
        (_, BoundType::Infty) => (a.0.clone(), a.1),
        _ => match a.0.cmp(b.0) {
            Ordering::Greater => (a.0.clone(), a.1),
            Ordering::Less => (b.0.clone(), b.1),
            Ordering::Equal => {
                let bound = if a.1 == BoundType::Strict || b.1 == BoundType::Strict {
                    BoundType::Strict
                } else {
                    BoundType::Weak
                };
                (a.0.clone(), bound)
            }
        },
    }
}

/// Picks the smaller of two lower bounds (the one including more), for
/// convex hulls. On equal values the weak bound wins.
pub(crate) fn lower_min(
    a: (&Rational, BoundType),
    b: (&Rational, BoundType),
) -> (Rational, BoundType) {
    match (a.1, b.1) {
        (BoundType::Infty, _) | (_, BoundType::Infty) => (Rational::zero(), BoundType::Infty),
        _ => match a.0.cmp(b.0) {
            Ordering::Less => (a.0.clone(), a.1),
            Ordering::Greater => (b.0.clone(), b.1),
            Ordering::Equal => {
                let bound = if a.1 == BoundType::Weak || b.1 == BoundType::Weak {
                    BoundType::Weak
                } else {
                    BoundType::Strict
                };
                (a.0.clone(), bound)
            }
        },
    }
}

/// Picks the smaller of two upper bounds, for intersections. `Infty` is
/// the greatest upper bound; on equal values the strict bound wins.
pub(crate) fn upper_min(
    a: (&Rational, BoundType),
    b: (&Rational, BoundType),
) -> (Rational, BoundType) {
    match (a.1, b.1) {
        (BoundType::Infty, _) => (b.0.clone(), b.1),
        (_, BoundType::Infty) => (a.0.clone(), a.1),
        _ => match a.0.cmp(b.0) {
            Ordering::Less => (a.0.clone(), a.1),
            Ordering::Greater => (b.0.clone(), b.1),
            Ordering::Equal => {
                let bound = if a.1 == BoundType::Strict || b.1 == BoundType::Strict {
                    BoundType::Strict
                } else {
                    BoundType::Weak
                };
                (a.0.clone(), bound)
            }
        },
    }
}

/// Picks the larger of two upper bounds, for convex hulls. On equal
/// values the weak bound wins.
pub(crate) fn upper_max(
    a: (&Rational, BoundType),
    b: (&Rational, BoundType),
) -> (Rational, BoundType) {
    match (a.1, b.1) {
        (BoundType::Infty, _) | (_, BoundType::Infty) => (Rational::zero(), BoundType::Infty),
        _ => match a.0.cmp(b.0) {
            Ordering::Greater => (a.0.clone(), a.1),
            Ordering::Less => (b.0.clone(), b.1),
            Ordering::Equal => {
                let bound = if a.1 == BoundType::Weak || b.1 == BoundType::Weak {
                    BoundType::Weak
                } else {
                    BoundType::Strict
                };
                (a.0.clone(), bound)
            }
        },
    }
}

impl Default for Interval {
    /// The point interval at zero.
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.lower_bound == other.lower_bound
            && self.upper_bound == other.upper_bound
            && (self.lower_bound.is_infinite() || self.lower == other.lower)
            && (self.upper_bound.is_infinite() || self.upper == other.upper)
    }
}

impl Eq for Interval {}

impl std::hash::Hash for Interval {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.lower_bound.hash(state);
        if !self.lower_bound.is_infinite() {
            self.lower.hash(state);
        }
        self.upper_bound.hash(state);
        if !self.upper_bound.is_infinite() {
            self.upper.hash(state);
        }
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    /// Lexicographic order on `(lower, lower type, upper, upper type)`,
    /// reading an infinite lower bound as -oo and an infinite upper
    /// bound as +oo. On equal bound values a weak lower bound sorts
    /// before a strict one (it starts earlier) and a strict upper bound
    /// before a weak one (it ends earlier).
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_lower_bounds(self, other).then_with(|| cmp_upper_bounds(self, other))
    }
}

fn cmp_lower_bounds(a: &Interval, b: &Interval) -> Ordering {
    match (a.lower_bound.is_infinite(), b.lower_bound.is_infinite()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.lower.cmp(&b.lower).then_with(|| {
            // Weak starts earlier than Strict at the same value
            match (a.lower_bound, b.lower_bound) {
                (BoundType::Weak, BoundType::Strict) => Ordering::Less,
                (BoundType::Strict, BoundType::Weak) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        }),
    }
}

fn cmp_upper_bounds(a: &Interval, b: &Interval) -> Ordering {
    match (a.upper_bound.is_infinite(), b.upper_bound.is_infinite()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.upper.cmp(&b.upper).then_with(|| {
            // Strict ends earlier than Weak at the same value
            match (a.upper_bound, b.upper_bound) {
                (BoundType::Strict, BoundType::Weak) => Ordering::Less,
                (BoundType::Weak, BoundType::Strict) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        }),
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower_bound {
            BoundType::Infty => write!(f, "(-oo, ")?,
            BoundType::Strict => write!(f, "({}, ", self.lower)?,
            BoundType::Weak => write!(f, "[{}, ", self.lower)?,
        }
        match self.upper_bound {
            BoundType::Infty => write!(f, "oo)"),
            BoundType::Strict => write!(f, "{})", self.upper),
            BoundType::Weak => write!(f, "{}]", self.upper),
        }
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

    #[test]
    fn test_construction_rejects_crossed_bounds() {
        assert!(Interval::closed(q(1), q(0)).is_err());
        assert!(Interval::closed(q(0), q(0)).is_ok());
        // crossing is fine when a side is infinite: the value is ignored
        assert!(Interval::new(q(100), BoundType::Weak, q(0), BoundType::Infty).is_ok());
    }

    #[test]
    fn test_emptiness_is_derived() {
        assert!(Interval::empty().is_empty());
        let half_open = Interval::new(q(0), BoundType::Strict, q(0), BoundType::Weak).unwrap();
        assert!(half_open.is_empty());
        assert!(!Interval::point(q(0)).is_empty());
        assert!(!Interval::unbounded().is_empty());

        // setters may cross the bounds; the interval becomes empty
        let mut i = Interval::closed(q(0), q(10)).unwrap();
        i.set_lower(q(20));
        assert!(i.is_empty());
    }

    #[test]
    fn test_shape_predicates() {
        let bounded = Interval::closed(qf(-41, 2), qf(34567, 10000)).unwrap();
        assert!(bounded.is_closed_interval());
        assert!(!bounded.is_open_interval());
        assert!(!bounded.is_point_interval());
        assert!(!bounded.is_infinite());
        assert!(!bounded.is_half_bounded());

        let ray = Interval::at_least(q(-100));
        assert!(ray.is_infinite());
        assert!(ray.is_half_bounded());
        assert!(!ray.is_unbounded());

        assert!(Interval::unbounded().is_unbounded());
        assert!(Interval::zero().is_zero());
        assert!(Interval::point(q(1)).is_one());
    }

    #[test]
    fn test_sign_predicates() {
        let pos = Interval::closed(q(1), q(5)).unwrap();
        assert!(pos.is_positive() && pos.is_semi_positive());
        assert!(!pos.is_negative() && !pos.is_semi_negative());

        let semi = Interval::closed(q(0), q(5)).unwrap();
        assert!(!semi.is_positive());
        assert!(semi.is_semi_positive());

        // (0, 5] is strictly positive: 0 itself is excluded
        let open_at_zero =
            Interval::new(q(0), BoundType::Strict, q(5), BoundType::Weak).unwrap();
        assert!(open_at_zero.is_positive());

        let neg = Interval::closed(q(-5), q(-1)).unwrap();
        assert!(neg.is_negative() && neg.is_semi_negative());

        let straddle = Interval::closed(q(-1), q(1)).unwrap();
        assert!(!straddle.is_positive() && !straddle.is_semi_positive());
        assert!(!straddle.is_negative() && !straddle.is_semi_negative());

        assert!(!Interval::unbounded().is_semi_positive());
        assert!(!Interval::unbounded().is_semi_negative());
    }

    #[test]
    fn test_contains_and_meets() {
        // [-100, oo)
        let i = Interval::at_least(q(-100));
        assert!(i.contains(&q(0)));
        assert!(i.contains(&q(1000)));
        assert!(!i.contains(&q(-101)));

        let open = Interval::new(q(0), BoundType::Strict, q(1), BoundType::Strict).unwrap();
        assert!(!open.contains(&q(0)));
        assert!(!open.contains(&q(1)));
        assert!(open.contains(&qf(1, 2)));
        // the closure still touches the endpoints
        assert!(open.meets(&q(0)));
        assert!(open.meets(&q(1)));
        assert!(!open.meets(&q(2)));
    }

    #[test]
    fn test_subset_relations() {
        let small = Interval::closed(q(0), q(1)).unwrap();
        let big = Interval::closed(q(-1), q(2)).unwrap();
        assert!(small.is_subset(&big));
        assert!(big.contains_interval(&small));
        assert!(small.is_proper_subset(&big));
        assert!(!small.is_proper_subset(&small));
        assert!(small.is_subset(&small));

        // [0, 1] is not a subset of (0, 1]
        let open_left = Interval::new(q(0), BoundType::Strict, q(1), BoundType::Weak).unwrap();
        assert!(!small.is_subset(&open_left));
        assert!(open_left.is_subset(&small));

        // the empty interval is a subset of everything
        assert!(Interval::empty().is_subset(&small));
        assert!(!small.is_subset(&Interval::empty()));

        // everything is a subset of the unbounded interval
        assert!(Interval::at_least(q(3)).is_subset(&Interval::unbounded()));
    }

    #[test]
    fn test_intersect() {
        let a = Interval::closed(q(0), q(10)).unwrap();
        let b = Interval::closed(q(5), q(20)).unwrap();
        assert_eq!(a.intersect(&b), Interval::closed(q(5), q(10)).unwrap());
        assert!(a.intersects_with(&b));

        // touching at one weak endpoint gives the point
        let c = Interval::closed(q(10), q(12)).unwrap();
        assert_eq!(a.intersect(&c), Interval::point(q(10)));

        // strict vs weak at the same value: strict wins
        let d = Interval::new(q(10), BoundType::Strict, q(12), BoundType::Weak).unwrap();
        assert_eq!(a.intersect(&d), Interval::empty());
        assert!(!a.intersects_with(&d));

        let ray = Interval::at_least(q(8));
        assert_eq!(a.intersect(&ray), Interval::closed(q(8), q(10)).unwrap());
    }

    #[test]
    fn test_diameter_center() {
        // the concrete interval from the kernel contract:
        // [-20.5, 3.4567] has diameter 23.9567 and center -8.52165
        let i = Interval::closed(qf(-41, 2), qf(34567, 10000)).unwrap();
        assert_eq!(i.diameter(), Some(qf(239_567, 10000)));
        assert_eq!(i.center(), qf(-170_433, 20000));

        assert_eq!(Interval::at_least(q(3)).diameter(), None);
        assert_eq!(Interval::at_least(q(3)).center(), q(3));
        assert_eq!(Interval::at_most(q(-7)).center(), q(-7));
        assert_eq!(Interval::unbounded().center(), q(0));
    }

    #[test]
    fn test_integral_part() {
        let i = Interval::closed(qf(-41, 2), qf(34567, 10000)).unwrap();
        assert_eq!(i.integral_part(), Interval::closed(q(-21), q(4)).unwrap());

        // already integral point interval is untouched
        let p = Interval::point(q(3));
        assert_eq!(p.integral_part(), p);

        // infinite sides survive
        let ray = Interval::greater_than(qf(5, 2));
        assert_eq!(ray.integral_part(), Interval::at_least(q(2)));

        assert_eq!(Interval::empty().integral_part(), Interval::empty());
    }

    #[test]
    fn test_sample_always_contained() {
        let cases = [
            Interval::closed(qf(-41, 2), qf(34567, 10000)).unwrap(),
            Interval::new(q(0), BoundType::Strict, q(1), BoundType::Strict).unwrap(),
            Interval::point(qf(7, 3)),
            Interval::at_least(q(5)),
            Interval::greater_than(q(5)),
            Interval::at_most(q(-3)),
            Interval::less_than(q(-3)),
            Interval::unbounded(),
        ];
        for i in &cases {
            let s = i.sample().unwrap();
            assert!(i.contains(&s), "sample {s} escapes {i}");
        }
        assert_eq!(
            Interval::empty().sample(),
            Err(IntervalError::EmptyInterval)
        );
        assert_eq!(Interval::unbounded().sample(), Ok(q(0)));
    }

    #[test]
    fn test_equality_ignores_infinite_values() {
        let a = Interval::new(q(100), BoundType::Weak, q(999), BoundType::Infty).unwrap();
        let b = Interval::new(q(100), BoundType::Weak, q(-5), BoundType::Infty).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lexicographic_order() {
        let a = Interval::closed(q(0), q(1)).unwrap();
        let b = Interval::closed(q(0), q(2)).unwrap();
        let c = Interval::closed(q(1), q(1)).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert!(Interval::unbounded() < a);

        // weak lower starts earlier than strict lower at the same value
        let strict = Interval::new(q(0), BoundType::Strict, q(1), BoundType::Weak).unwrap();
        assert!(a < strict);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Interval::closed(qf(-1, 2), q(3)).unwrap().to_string(),
            "[-1/2, 3]"
        );
        assert_eq!(Interval::greater_than(q(0)).to_string(), "(0, oo)");
        assert_eq!(Interval::less_than(q(0)).to_string(), "(-oo, 0)");
        assert_eq!(Interval::empty().to_string(), "(0, 0)");
    }
}
