//! Property-based tests for exact integer and rational arithmetic.

use num_traits::Zero;
use proptest::prelude::*;

use crate::{Integer, Rational};

fn small_rational() -> impl Strategy<Value = Rational> {
    (-1000i64..1000, 1i64..200).prop_map(|(n, d)| Rational::from_i64(n, d))
}

proptest! {
    #[test]
    fn rational_add_commutative(a in small_rational(), b in small_rational()) {
        prop_assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn rational_mul_commutative(a in small_rational(), b in small_rational()) {
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn rational_add_neg_is_zero(a in small_rational()) {
        prop_assert!((&a + &(-&a)).is_zero());
    }

    #[test]
    fn rational_recip_involutive(a in small_rational()) {
        prop_assume!(!a.is_zero());
        prop_assert_eq!(a.recip().recip(), a);
    }

    #[test]
    fn floor_le_value_le_ceil(a in small_rational()) {
        let floor = Rational::from_integer(a.floor());
        let ceil = Rational::from_integer(a.ceil());
        prop_assert!(floor <= a);
        prop_assert!(a <= ceil);
        // the two integer bounds differ by at most one
        prop_assert!(&ceil - &floor <= Rational::from(1));
    }

    #[test]
    fn div_floor_ceil_bracket(n in -500i64..500, d in 1i64..50) {
        let (n, d) = (Integer::new(n), Integer::new(d));
        let fl = n.div_floor(&d);
        let ce = n.div_ceil(&d);
        prop_assert!(fl.clone() * d.clone() <= n);
        prop_assert!(ce.clone() * d.clone() >= n);
    }

    #[test]
    fn from_f64_roundtrips_small_halves(k in -1000i64..1000) {
        // k/2 is exactly representable as a double
        #[allow(clippy::cast_precision_loss)]
        let v = k as f64 / 2.0;
        prop_assert_eq!(Rational::from_f64(v), Some(Rational::from_i64(k, 2)));
    }
}
