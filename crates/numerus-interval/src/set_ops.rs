//! Non-convex set operations.
//!
//! Union, difference, complement and symmetric difference of intervals
//! can produce a disconnected result, which a single interval cannot
//! represent. Each operation therefore returns [`IntervalPieces`]:
//! zero, one or two convex pieces in ascending order. At every cut
//! point the bound type flips (`Weak` <-> `Strict`), so the pieces
//! never overlap and together with the removed region reconstruct the
//! input exactly.

use num_traits::Zero;
use numerus_integers::Rational;
use std::fmt;

use crate::bound::BoundType;
use crate::interval::{lower_min, upper_max, Interval};

/// Zero, one or two disjoint convex pieces, in ascending order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum IntervalPieces {
    /// The empty set.
    Empty,
    /// A single convex piece.
    One(Interval),
    /// Two disjoint pieces; the first lies entirely below the second.
    Two(Interval, Interval),
}

impl IntervalPieces {
    /// Converts into the classic two-output-slot form, filling unused
    /// slots with the empty interval.
    #[must_use]
    pub fn into_slots(self) -> (Interval, Interval) {
        match self {
            IntervalPieces::Empty => (Interval::empty(), Interval::empty()),
            IntervalPieces::One(a) => (a, Interval::empty()),
            IntervalPieces::Two(a, b) => (a, b),
        }
    }

    /// Returns the number of pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            IntervalPieces::Empty => 0,
            IntervalPieces::One(_) => 1,
            IntervalPieces::Two(..) => 2,
        }
    }

    /// Returns true if there are no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, IntervalPieces::Empty)
    }

    /// Iterates over the pieces.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        let (a, b) = match self {
            IntervalPieces::Empty => (None, None),
            IntervalPieces::One(a) => (Some(a), None),
            IntervalPieces::Two(a, b) => (Some(a), Some(b)),
        };
        a.into_iter().chain(b)
    }

    /// Returns true if any piece contains the value.
    #[must_use]
    pub fn contains(&self, value: &Rational) -> bool {
        self.iter().any(|i| i.contains(value))
    }

    fn from_pieces(mut pieces: Vec<Interval>) -> Self {
        pieces.retain(|i| !i.is_empty());
        pieces.sort();
        match pieces.len() {
            0 => IntervalPieces::Empty,
            1 => IntervalPieces::One(pieces.pop().expect("one piece")),
            2 => {
                let b = pieces.pop().expect("two pieces");
                let a = pieces.pop().expect("two pieces");
                IntervalPieces::Two(a, b)
            }
            _ => unreachable!("interval set operations produce at most two pieces"),
        }
    }
}

impl fmt::Display for IntervalPieces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalPieces::Empty => write!(f, "{{}}"),
            IntervalPieces::One(a) => write!(f, "{a}"),
            IntervalPieces::Two(a, b) => write!(f, "{a} u {b}"),
        }
    }
}

impl Interval {
    /// Computes the set union.
    ///
    /// Overlapping or touching intervals merge into their convex hull;
    /// otherwise both inputs are returned in ascending order.
    #[must_use]
    pub fn unite(&self, other: &Self) -> IntervalPieces {
        if self.is_empty() && other.is_empty() {
            return IntervalPieces::Empty;
        }
        if self.is_empty() {
            return IntervalPieces::One(other.clone());
        }
        if other.is_empty() {
            return IntervalPieces::One(self.clone());
        }

        if self.intersects_with(other) || touches(self, other) {
            let (lower, lower_bound) = lower_min(
                (&self.lower, self.lower_bound),
                (&other.lower, other.lower_bound),
            );
            let (upper, upper_bound) = upper_max(
                (&self.upper, self.upper_bound),
                (&other.upper, other.upper_bound),
            );
            return IntervalPieces::One(Self::raw(lower, lower_bound, upper, upper_bound));
        }

        let (a, b) = if self <= other {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };
        IntervalPieces::Two(a, b)
    }

    /// Computes the complement within the rational line.
    ///
    /// A bounded interval yields the two outward rays, a ray yields the
    /// opposite ray, the unbounded interval yields nothing and the
    /// empty interval yields the whole line. Bound types flip at the
    /// cut points.
    #[must_use]
    pub fn complement(&self) -> IntervalPieces {
        if self.is_empty() {
            return IntervalPieces::One(Self::unbounded());
        }
        let left = if self.lower_bound.is_infinite() {
            None
        } else {
            Some(Self::raw(
                Rational::zero(),
                BoundType::Infty,
                self.lower.clone(),
                self.lower_bound.flip(),
            ))
        };
        let right = if self.upper_bound.is_infinite() {
            None
        } else {
            Some(Self::raw(
                self.upper.clone(),
                self.upper_bound.flip(),
                Rational::zero(),
                BoundType::Infty,
            ))
        };
        match (left, right) {
            (None, None) => IntervalPieces::Empty,
            (Some(a), None) => IntervalPieces::One(a),
            (None, Some(b)) => IntervalPieces::One(b),
            (Some(a), Some(b)) => IntervalPieces::Two(a, b),
        }
    }

    /// Computes the set difference `self \ other`.
    ///
    /// If `other` splits `self`, both remaining pieces are returned in
    /// ascending order; if `other` covers `self`, the result is empty.
    #[must_use]
    pub fn difference(&self, other: &Self) -> IntervalPieces {
        if self.is_empty() {
            return IntervalPieces::Empty;
        }
        // self \ other = self n complement(other)
        let pieces = other
            .complement()
            .iter()
            .map(|ray| self.intersect(ray))
            .collect();
        IntervalPieces::from_pieces(pieces)
    }

    /// Computes the symmetric difference: everything in exactly one of
    /// the two intervals.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> IntervalPieces {
        if self.intersect(other).is_empty() {
            return self.unite(other);
        }
        let mut pieces: Vec<Interval> = self.difference(other).iter().cloned().collect();
        pieces.extend(other.difference(self).iter().cloned());
        IntervalPieces::from_pieces(pieces)
    }
}

/// True if the intervals touch in a single shared cut point without
/// overlapping, with at least one side including the point.
fn touches(a: &Interval, b: &Interval) -> bool {
    let touch_right = !a.upper_bound.is_infinite()
        && !b.lower_bound.is_infinite()
        && a.upper == b.lower
        && (a.upper_bound == BoundType::Weak || b.lower_bound == BoundType::Weak);
    let touch_left = !a.lower_bound.is_infinite()
        && !b.upper_bound.is_infinite()
        && a.lower == b.upper
        && (a.lower_bound == BoundType::Weak || b.upper_bound == BoundType::Weak);
    touch_right || touch_left
}
