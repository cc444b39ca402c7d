//! Property-based tests for interval arithmetic and set algebra.

use proptest::prelude::*;

use crate::bound::BoundType;
use crate::interval::Interval;
use numerus_integers::Rational;

fn bound_type() -> impl Strategy<Value = BoundType> {
    prop_oneof![
        Just(BoundType::Infty),
        Just(BoundType::Strict),
        Just(BoundType::Weak),
    ]
}

fn rational() -> impl Strategy<Value = Rational> {
    (-40i64..40, 1i64..8).prop_map(|(n, d)| Rational::from_i64(n, d))
}

/// Arbitrary valid intervals, including empty, point, open, half-open
/// and infinite shapes.
fn interval() -> impl Strategy<Value = Interval> {
    (rational(), bound_type(), rational(), bound_type()).prop_map(|(a, lb, b, ub)| {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        Interval::new(lower, lb, upper, ub).expect("ordered bounds are always valid")
    })
}

fn probe_points(i: &Interval) -> Vec<Rational> {
    let mut points = vec![
        i.lower().clone(),
        i.upper().clone(),
        i.lower() + &Rational::from_i64(1, 97),
        i.upper() - &Rational::from_i64(1, 97),
        i.center(),
        Rational::from(0),
        Rational::from(-50),
        Rational::from(50),
    ];
    if let Ok(s) = i.sample() {
        points.push(s);
    }
    points
}

proptest! {
    #[test]
    fn empty_iff_nothing_contained(i in interval()) {
        if i.is_empty() {
            for p in probe_points(&i) {
                prop_assert!(!i.contains(&p));
            }
        } else {
            prop_assert!(i.sample().is_ok());
        }
    }

    #[test]
    fn sample_is_contained(i in interval()) {
        if let Ok(s) = i.sample() {
            prop_assert!(i.contains(&s));
        }
    }

    #[test]
    fn complement_partitions_the_line(i in interval()) {
        let pieces = i.complement();
        for p in probe_points(&i) {
            prop_assert!(
                i.contains(&p) != pieces.contains(&p),
                "point {p} not covered exactly once for {i}"
            );
        }
    }

    #[test]
    fn unite_covers_both(a in interval(), b in interval()) {
        let pieces = a.unite(&b);
        for p in probe_points(&a).into_iter().chain(probe_points(&b)) {
            let in_input = a.contains(&p) || b.contains(&p);
            prop_assert_eq!(in_input, pieces.contains(&p));
        }
    }

    #[test]
    fn difference_is_membership_difference(a in interval(), b in interval()) {
        let pieces = a.difference(&b);
        for p in probe_points(&a).into_iter().chain(probe_points(&b)) {
            let expected = a.contains(&p) && !b.contains(&p);
            prop_assert_eq!(expected, pieces.contains(&p));
        }
    }

    #[test]
    fn symmetric_difference_is_xor(a in interval(), b in interval()) {
        let pieces = a.symmetric_difference(&b);
        for p in probe_points(&a).into_iter().chain(probe_points(&b)) {
            let expected = a.contains(&p) != b.contains(&p);
            prop_assert_eq!(expected, pieces.contains(&p));
        }
    }

    #[test]
    fn set_operation_pieces_are_disjoint(a in interval(), b in interval()) {
        for pieces in [a.unite(&b), a.difference(&b), a.symmetric_difference(&b)] {
            if let crate::set_ops::IntervalPieces::Two(p, q) = pieces {
                prop_assert!(!p.intersects_with(&q));
                prop_assert!(p < q);
            }
        }
    }

    #[test]
    fn intersection_is_membership_and(a in interval(), b in interval()) {
        let inter = a.intersect(&b);
        for p in probe_points(&a).into_iter().chain(probe_points(&b)) {
            prop_assert_eq!(a.contains(&p) && b.contains(&p), inter.contains(&p));
        }
    }

    #[test]
    fn add_respects_membership(a in interval(), b in interval()) {
        if let (Ok(x), Ok(y)) = (a.sample(), b.sample()) {
            prop_assert!(a.add(&b).contains(&(x + y)));
        }
    }

    #[test]
    fn mul_respects_membership(a in interval(), b in interval()) {
        if let (Ok(x), Ok(y)) = (a.sample(), b.sample()) {
            prop_assert!(a.mul(&b).contains(&(x * y)));
        }
    }

    #[test]
    fn neg_is_involution(a in interval()) {
        prop_assert_eq!(a.neg().neg(), a);
    }

    #[test]
    fn floor_ceil_envelope(a in interval()) {
        prop_assume!(!a.is_empty());
        let floor = Interval::floor(&a);
        let ceil = Interval::ceil(&a);
        if !a.lower_bound_type().is_infinite() {
            prop_assert!(floor.lower() <= a.lower());
        }
        if !a.upper_bound_type().is_infinite() {
            prop_assert!(ceil.upper() >= a.upper());
        }
    }

    #[test]
    fn integral_part_encloses(a in interval()) {
        prop_assume!(!a.is_empty());
        prop_assert!(a.is_subset(&a.integral_part()));
    }

    #[test]
    fn inverse_respects_membership(a in interval()) {
        if let Ok(inv) = a.inverse() {
            if let Ok(x) = a.sample() {
                if !num_traits::Zero::is_zero(&x) {
                    prop_assert!(inv.contains(&x.recip()));
                }
            }
        }
    }

    #[test]
    fn pow_respects_membership(a in interval(), n in 0u32..4) {
        if let Ok(x) = a.sample() {
            prop_assert!(a.pow(n).contains(&x.pow(n)));
        }
    }
}
