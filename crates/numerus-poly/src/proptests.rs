//! Property-based tests for polynomial arithmetic.

use proptest::prelude::*;

use crate::assignment::Assignment;
use crate::polynomial::Polynomial;
use crate::variable::{Variable, VariableKind, VariablePool};
use numerus_integers::Rational;
use std::sync::OnceLock;

// A small fixed variable set shared across generated polynomials, so
// that distinct generated values can still interact.
fn test_vars() -> &'static [Variable; 3] {
    static VARS: OnceLock<[Variable; 3]> = OnceLock::new();
    VARS.get_or_init(|| {
        [
            VariablePool::named("pp_x", VariableKind::Real),
            VariablePool::named("pp_y", VariableKind::Real),
            VariablePool::named("pp_z", VariableKind::Real),
        ]
    })
}

fn small_poly() -> impl Strategy<Value = Polynomial> {
    proptest::collection::vec(((-20i64..20), (0u32..3), (0u32..2)), 0..5).prop_map(|raw| {
        let [x, y, _] = *test_vars();
        let terms = raw
            .into_iter()
            .map(|(c, ex, ey)| {
                crate::term::Term::new(
                    Rational::from(c),
                    crate::monomial::Monomial::from_exponents([(x, ex), (y, ey)]),
                )
            })
            .collect();
        Polynomial::from_terms(terms)
    })
}

fn total_assignment() -> impl Strategy<Value = Assignment> {
    ((-9i64..9), (-9i64..9), (-9i64..9)).prop_map(|(a, b, c)| {
        let [x, y, z] = *test_vars();
        [
            (x, Rational::from(a)),
            (y, Rational::from(b)),
            (z, Rational::from(c)),
        ]
        .into_iter()
        .collect()
    })
}

proptest! {
    #[test]
    fn poly_add_commutative(a in small_poly(), b in small_poly()) {
        prop_assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
        prop_assert_eq!(a.mul(&b), b.mul(&a));
    }

    #[test]
    fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
        prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
    }

    #[test]
    fn poly_sub_self_is_zero(a in small_poly()) {
        prop_assert!(a.sub(&a).is_zero());
    }

    #[test]
    fn evaluation_is_ring_homomorphism(
        a in small_poly(),
        b in small_poly(),
        sigma in total_assignment(),
    ) {
        let lhs = a.mul(&b).evaluate(&sigma).unwrap();
        let rhs = a.evaluate(&sigma).unwrap() * b.evaluate(&sigma).unwrap();
        prop_assert_eq!(lhs, rhs);

        let lhs = a.add(&b).evaluate(&sigma).unwrap();
        let rhs = a.evaluate(&sigma).unwrap() + b.evaluate(&sigma).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn content_times_primitive_reconstructs(a in small_poly()) {
        prop_assume!(!a.is_zero());
        prop_assert_eq!(a.primitive_part().scale(&a.content()), a);
    }

    #[test]
    fn primitive_part_is_canonical(a in small_poly(), k in 1i64..10) {
        prop_assume!(!a.is_zero());
        // scaling by a nonzero unit never changes the primitive part
        let scaled = a.scale(&Rational::from_i64(-k, 7));
        prop_assert_eq!(scaled.primitive_part(), a.primitive_part());
    }
}
