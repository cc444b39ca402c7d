//! Heuristic partial factorization.
//!
//! The decomposition extracts, in order: the rational unit (content and
//! sign), the monomial content (one linear factor per variable), and a
//! Yun squarefree split when the remainder is univariate. A
//! multivariate remainder is kept whole with exponent 1. The invariant
//! `unit * prod factor_i^exp_i == input` holds exactly at every stage.
//!
//! Only degree-1 factors are reported as known irreducible; everything
//! else makes no irreducibility claim.

use num_traits::Zero;
use numerus_integers::Rational;
use numerus_poly::{Monomial, Polynomial, Term};

/// The result of partially factoring a polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialFactorization {
    /// The rational unit split off the factor product.
    pub unit: Rational,
    /// Pairwise distinct factors with positive multiplicities, each in
    /// canonical primitive form.
    pub factors: Vec<(Polynomial, u32)>,
}

impl PartialFactorization {
    /// Multiplies the factorization back together.
    #[must_use]
    pub fn expand(&self) -> Polynomial {
        let mut acc = Polynomial::constant(self.unit.clone());
        for (factor, exp) in &self.factors {
            acc = acc.mul(&factor.pow(*exp));
        }
        acc
    }
}

/// Partially factors a polynomial.
#[must_use]
pub fn factorize(poly: &Polynomial) -> PartialFactorization {
    if poly.is_constant() {
        return PartialFactorization {
            unit: poly.constant_part(),
            factors: Vec::new(),
        };
    }

    let mut unit = poly.content();
    let mut rest = poly.primitive_part();
    let mut factors: Vec<(Polynomial, u32)> = Vec::new();

    // monomial content: x^2*y + x*y^2 = x*y * (x + y)
    let monomial_gcd = rest
        .terms()
        .iter()
        .skip(1)
        .fold(rest.terms()[0].monomial().clone(), |g, t| {
            g.gcd(t.monomial())
        });
    if !monomial_gcd.is_one() {
        for &(var, exp) in monomial_gcd.exponents() {
            factors.push((Polynomial::from(var), exp));
        }
        rest = divide_monomial(&rest, &monomial_gcd);
    }

    if rest.is_constant() {
        // the input was a pure term; only the unit remains
        unit = unit * rest.constant_part();
    } else if let Some(var) = rest.single_variable() {
        let coeffs = rest
            .coeffs_in(var)
            .expect("single-variable polynomial has univariate coefficients");
        let lead = coeffs.last().cloned().unwrap_or_else(Rational::zero);
        unit = unit * &lead;
        let monic: Vec<Rational> = coeffs.iter().map(|c| c / &lead).collect();

        for (factor_coeffs, multiplicity) in yun_squarefree(&monic) {
            let factor = Polynomial::from_univariate(var, &factor_coeffs);
            // re-normalize each monic factor into primitive form
            let content = factor.content();
            unit = unit * content.pow(multiplicity);
            factors.push((factor.primitive_part(), multiplicity));
        }
    } else {
        factors.push((rest, 1));
    }

    PartialFactorization { unit, factors }
}

/// Returns true if this factorization step may claim irreducibility of
/// a factor: only linear polynomials qualify here.
#[must_use]
pub fn is_certainly_irreducible(factor: &Polynomial) -> bool {
    factor.total_degree() == 1
}

fn divide_monomial(poly: &Polynomial, divisor: &Monomial) -> Polynomial {
    let terms = poly
        .terms()
        .iter()
        .map(|t| {
            let m = t
                .monomial()
                .try_div(divisor)
                .expect("monomial gcd divides every term");
            Term::new(t.coeff().clone(), m)
        })
        .collect();
    Polynomial::from_terms(terms)
}

// === Dense univariate helpers over Q ===
//
// Coefficients ascending, the zero polynomial is the empty vector.

fn trim(mut v: Vec<Rational>) -> Vec<Rational> {
    while v.last().is_some_and(Rational::is_zero) {
        v.pop();
    }
    v
}

fn derivative(f: &[Rational]) -> Vec<Rational> {
    trim(
        f.iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| {
                #[allow(clippy::cast_possible_wrap)]
                let k = Rational::from(i as i64);
                c * &k
            })
            .collect(),
    )
}

fn sub(a: &[Rational], b: &[Rational]) -> Vec<Rational> {
    let mut out = vec![Rational::zero(); a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        out[i] = c.clone();
    }
    for (i, c) in b.iter().enumerate() {
        out[i] = &out[i] - c;
    }
    trim(out)
}

/// Long division over Q; the divisor must be non-zero.
fn divmod(a: &[Rational], b: &[Rational]) -> (Vec<Rational>, Vec<Rational>) {
    assert!(!b.is_empty(), "polynomial division by zero");
    if a.len() < b.len() {
        return (Vec::new(), a.to_vec());
    }
    let mut rem = a.to_vec();
    let mut quot = vec![Rational::zero(); a.len() - b.len() + 1];
    let lead = &b[b.len() - 1];

    for i in (0..quot.len()).rev() {
        let c = &rem[i + b.len() - 1] / lead;
        if c.is_zero() {
            continue;
        }
        for (j, bc) in b.iter().enumerate() {
            rem[i + j] = &rem[i + j] - &(&c * bc);
        }
        quot[i] = c;
    }
    (trim(quot), trim(rem))
}

fn div_exact(a: &[Rational], b: &[Rational]) -> Vec<Rational> {
    let (q, r) = divmod(a, b);
    debug_assert!(r.is_empty(), "inexact polynomial division");
    q
}

fn monic(f: &[Rational]) -> Vec<Rational> {
    let lead = &f[f.len() - 1];
    f.iter().map(|c| c / lead).collect()
}

/// Monic gcd over Q via the Euclidean algorithm.
fn gcd_monic(a: &[Rational], b: &[Rational]) -> Vec<Rational> {
    let (mut a, mut b) = (trim(a.to_vec()), trim(b.to_vec()));
    while !b.is_empty() {
        let (_, r) = divmod(&a, &b);
        a = b;
        b = r;
    }
    if a.is_empty() {
        a
    } else {
        monic(&a)
    }
}

/// Yun's squarefree decomposition of a monic polynomial over Q.
///
/// Returns monic squarefree factors with their multiplicities; the
/// product of `factor^multiplicity` reconstructs the input exactly.
fn yun_squarefree(f: &[Rational]) -> Vec<(Vec<Rational>, u32)> {
    let mut result = Vec::new();
    if f.len() <= 1 {
        return result;
    }

    let f_prime = derivative(f);
    let a0 = gcd_monic(f, &f_prime);
    let mut b = div_exact(f, &a0);
    let mut d = sub(&div_exact(&f_prime, &a0), &derivative(&b));
    let mut multiplicity = 1u32;

    while b.len() > 1 {
        let a = gcd_monic(&b, &d);
        if a.len() > 1 {
            result.push((a.clone(), multiplicity));
        }
        b = div_exact(&b, &a);
        d = sub(&div_exact(&d, &a), &derivative(&b));
        multiplicity += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use numerus_poly::{Variable, VariableKind, VariablePool};

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    fn x() -> Variable {
        VariablePool::named("fact_test_x", VariableKind::Real)
    }

    fn y() -> Variable {
        VariablePool::named("fact_test_y", VariableKind::Real)
    }

    fn x_plus(c: i64) -> Polynomial {
        Polynomial::from_univariate(x(), &[q(c), q(1)])
    }

    #[test]
    fn test_constant() {
        let f = factorize(&Polynomial::constant(q(7)));
        assert_eq!(f.unit, q(7));
        assert!(f.factors.is_empty());

        let f = factorize(&Polynomial::zero());
        assert_eq!(f.unit, q(0));
        assert!(f.factors.is_empty());
    }

    #[test]
    fn test_unit_extraction() {
        // -2x - 2 = -2 * (x + 1)
        let p = x_plus(1).scale(&q(-2));
        let f = factorize(&p);
        assert_eq!(f.unit, q(-2));
        assert_eq!(f.factors, vec![(x_plus(1), 1)]);
        assert_eq!(f.expand(), p);
    }

    #[test]
    fn test_monomial_content() {
        // x^2*y + x*y^2 = x * y * (x + y)
        let p = Polynomial::from(Monomial::from_exponents([(x(), 2), (y(), 1)])).add(
            &Polynomial::from(Monomial::from_exponents([(x(), 1), (y(), 2)])),
        );
        let f = factorize(&p);
        assert_eq!(f.unit, q(1));
        assert_eq!(f.factors.len(), 3);
        assert!(f.factors.contains(&(Polynomial::from(x()), 1)));
        assert!(f.factors.contains(&(Polynomial::from(y()), 1)));
        assert_eq!(f.expand(), p);
    }

    #[test]
    fn test_pure_term() {
        // -3x^2 = -3 * x^2
        let p = Polynomial::from(Monomial::with_exponent(x(), 2)).scale(&q(-3));
        let f = factorize(&p);
        assert_eq!(f.unit, q(-3));
        assert_eq!(f.factors, vec![(Polynomial::from(x()), 2)]);
        assert_eq!(f.expand(), p);
    }

    #[test]
    fn test_squarefree_split() {
        // (x + 1)^2 * (x + 2)
        let p = x_plus(1).mul(&x_plus(1)).mul(&x_plus(2));
        let f = factorize(&p);
        assert_eq!(f.unit, q(1));
        assert_eq!(f.factors.len(), 2);
        assert!(f.factors.contains(&(x_plus(1), 2)));
        assert!(f.factors.contains(&(x_plus(2), 1)));
        assert_eq!(f.expand(), p);
    }

    #[test]
    fn test_squarefree_with_unit_and_monomial() {
        // 6x^3 * (x + 1)^2 = 6 * x^3 * (x + 1)^2
        let p = Polynomial::from(Monomial::with_exponent(x(), 3))
            .scale(&q(6))
            .mul(&x_plus(1).pow(2));
        let f = factorize(&p);
        assert_eq!(f.unit, q(6));
        assert!(f.factors.contains(&(Polynomial::from(x()), 3)));
        assert!(f.factors.contains(&(x_plus(1), 2)));
        assert_eq!(f.expand(), p);
    }

    #[test]
    fn test_multivariate_kept_whole() {
        // x + y is kept as a single factor
        let p = Polynomial::from(x()).add(&Polynomial::from(y()));
        let f = factorize(&p);
        assert_eq!(f.unit, q(1));
        assert_eq!(f.factors, vec![(p.clone(), 1)]);
        assert_eq!(f.expand(), p);
    }

    #[test]
    fn test_rational_coefficients() {
        // x/2 + 1/2 = 1/2 * (x + 1)
        let p = Polynomial::from_univariate(x(), &[Rational::from_i64(1, 2), Rational::from_i64(1, 2)]);
        let f = factorize(&p);
        assert_eq!(f.unit, Rational::from_i64(1, 2));
        assert_eq!(f.factors, vec![(x_plus(1), 1)]);
        assert_eq!(f.expand(), p);
    }

    #[test]
    fn test_irreducibility_claim() {
        assert!(is_certainly_irreducible(&x_plus(1)));
        assert!(!is_certainly_irreducible(&x_plus(1).mul(&x_plus(2))));
    }

    #[test]
    fn test_yun_high_multiplicity() {
        // (x + 3)^4
        let p = x_plus(3).pow(4);
        let f = factorize(&p);
        assert_eq!(f.factors, vec![(x_plus(3), 4)]);
        assert_eq!(f.expand(), p);
    }
}
