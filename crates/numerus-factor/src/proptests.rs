//! Property-based tests for factorization and the cache contracts.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::FactorizationCache;
use crate::factorize::factorize;
use crate::factorized::FactorizedPolynomial;
use numerus_integers::Rational;
use numerus_poly::{Assignment, Polynomial, Variable, VariableKind, VariablePool};
use std::sync::OnceLock;

fn var_x() -> Variable {
    static X: OnceLock<Variable> = OnceLock::new();
    *X.get_or_init(|| VariablePool::named("factor_pp_x", VariableKind::Real))
}

/// Products of small linear factors with a rational unit: the shapes
/// the partial factorization fully decomposes.
fn linear_product() -> impl Strategy<Value = Polynomial> {
    (
        proptest::collection::vec((-4i64..4, 1u32..3), 0..4),
        -5i64..5,
        1i64..4,
    )
        .prop_map(|(roots, num, den)| {
            let x = var_x();
            let mut acc = Polynomial::constant(Rational::from_i64(num, den));
            for (root, mult) in roots {
                let linear = Polynomial::from_univariate(
                    x,
                    &[Rational::from(root), Rational::from(1)],
                );
                acc = acc.mul(&linear.pow(mult));
            }
            acc
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn factorize_expand_roundtrips(p in linear_product()) {
        let f = factorize(&p);
        prop_assert_eq!(f.expand(), p);
    }

    #[test]
    fn factors_are_canonical_and_distinct(p in linear_product()) {
        let f = factorize(&p);
        for (i, (factor, exp)) in f.factors.iter().enumerate() {
            prop_assert!(*exp >= 1);
            prop_assert_eq!(factor.clone(), factor.primitive_part());
            for (other, _) in &f.factors[i + 1..] {
                prop_assert_ne!(factor, other);
            }
        }
    }

    #[test]
    fn interning_equal_inputs_shares_entries(p in linear_product()) {
        prop_assume!(!p.is_constant());
        let cache = Arc::new(FactorizationCache::new());
        let a = FactorizedPolynomial::from_polynomial(&p, &cache).unwrap();
        let entries_after_first = cache.len();
        let b = FactorizedPolynomial::from_polynomial(&p, &cache).unwrap();
        // the second construction reuses every entry
        prop_assert_eq!(cache.len(), entries_after_first);
        prop_assert_eq!(a.factors(), b.factors());
    }

    #[test]
    fn equality_agrees_with_expansion(p in linear_product(), r in linear_product()) {
        let cache = Arc::new(FactorizationCache::new());
        let fp = FactorizedPolynomial::from_polynomial(&p, &cache).unwrap();
        let fr = FactorizedPolynomial::from_polynomial(&r, &cache).unwrap();
        let expansion_equal = fp.expand().unwrap() == fr.expand().unwrap();
        prop_assert_eq!(fp == fr, expansion_equal);

        // the cross-cache slow path must agree with the fast path
        let other_cache = Arc::new(FactorizationCache::new());
        let fr2 = FactorizedPolynomial::from_polynomial(&r, &other_cache).unwrap();
        prop_assert_eq!(fp == fr2, expansion_equal);
    }

    #[test]
    fn evaluate_matches_expanded_evaluation(p in linear_product(), at in -6i64..6) {
        let cache = Arc::new(FactorizationCache::new());
        let fp = FactorizedPolynomial::from_polynomial(&p, &cache).unwrap();
        let mut sigma = Assignment::new();
        sigma.set(var_x(), Rational::from(at));
        prop_assert_eq!(
            fp.evaluate(&sigma).unwrap(),
            p.evaluate(&sigma).unwrap()
        );
    }

    #[test]
    fn mul_matches_polynomial_mul(p in linear_product(), r in linear_product()) {
        let cache = Arc::new(FactorizationCache::new());
        let fp = FactorizedPolynomial::from_polynomial(&p, &cache).unwrap();
        let fr = FactorizedPolynomial::from_polynomial(&r, &cache).unwrap();
        prop_assert_eq!(fp.mul(&fr).unwrap().expand().unwrap(), p.mul(&r));
    }
}
