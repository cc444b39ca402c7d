//! Sparse multivariate polynomials over exact rationals.
//!
//! Polynomials are kept in a normal form: terms sorted by the graded
//! lexicographic monomial order (leading term first), like terms
//! combined, zero coefficients dropped. Derived `PartialEq`/`Hash`
//! therefore decide mathematical equality, which the factorization
//! cache depends on when it keys its table by polynomial.

use num_traits::{One, Zero};
use numerus_integers::{Integer, Rational};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::assignment::Assignment;
use crate::error::EvalError;
use crate::monomial::Monomial;
use crate::term::Term;
use crate::variable::Variable;

/// A multivariate polynomial with rational coefficients.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Polynomial {
    /// Terms in strictly decreasing monomial order, none zero.
    terms: Vec<Term>,
}

impl Polynomial {
    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(Rational::one())
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        if c.is_zero() {
            Self::zero()
        } else {
            Self {
                terms: vec![Term::constant(c)],
            }
        }
    }

    /// Creates a polynomial from arbitrary terms.
    ///
    /// Terms are sorted and combined; zero terms vanish.
    #[must_use]
    pub fn from_terms(terms: Vec<Term>) -> Self {
        let mut poly = Self { terms };
        poly.normalize();
        poly
    }

    /// Returns the terms, leading term first.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if this is the constant polynomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.is_constant() && self.constant_part().is_one()
    }

    /// Returns true if no variable occurs.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self.terms.as_slice() {
            [] => true,
            [t] => t.is_constant(),
            _ => false,
        }
    }

    /// Returns the coefficient of the constant monomial (0 if absent).
    #[must_use]
    pub fn constant_part(&self) -> Rational {
        self.terms
            .last()
            .filter(|t| t.is_constant())
            .map_or_else(Rational::zero, |t| t.coeff().clone())
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn nr_terms(&self) -> usize {
        self.terms.len()
    }

    /// Returns the total storage size: one slot per coefficient plus
    /// one per variable-exponent pair.
    #[must_use]
    pub fn size(&self) -> usize {
        self.terms
            .iter()
            .map(|t| 1 + t.monomial().nr_variables())
            .sum()
    }

    /// Returns the total degree, or 0 for the zero polynomial.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|t| t.monomial().total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Returns the degree in a single variable.
    #[must_use]
    pub fn degree(&self, var: Variable) -> u32 {
        self.terms
            .iter()
            .map(|t| t.degree_of(var))
            .max()
            .unwrap_or(0)
    }

    /// Returns the leading term, if any.
    #[must_use]
    pub fn leading_term(&self) -> Option<&Term> {
        self.terms.first()
    }

    /// Returns the leading coefficient, if any.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&Rational> {
        self.terms.first().map(Term::coeff)
    }

    /// Returns all variables in first-seen order over the sorted terms.
    #[must_use]
    pub fn gather_variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        for term in &self.terms {
            for var in term.monomial().variables() {
                if !vars.contains(&var) {
                    vars.push(var);
                }
            }
        }
        vars
    }

    /// Returns the only variable of this polynomial, if it is
    /// univariate and non-constant.
    #[must_use]
    pub fn single_variable(&self) -> Option<Variable> {
        let mut found = None;
        for term in &self.terms {
            for var in term.monomial().variables() {
                match found {
                    None => found = Some(var),
                    Some(v) if v == var => {}
                    Some(_) => return None,
                }
            }
        }
        found
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len());
        let (mut i, mut j) = (0, 0);
        while i < self.terms.len() && j < other.terms.len() {
            let a = &self.terms[i];
            let b = &other.terms[j];
            match b.monomial().cmp(a.monomial()) {
                Ordering::Less => {
                    terms.push(a.clone());
                    i += 1;
                }
                Ordering::Greater => {
                    terms.push(b.clone());
                    j += 1;
                }
                Ordering::Equal => {
                    let c = a.coeff() + b.coeff();
                    if !c.is_zero() {
                        terms.push(Term::new(c, a.monomial().clone()));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        terms.extend_from_slice(&self.terms[i..]);
        terms.extend_from_slice(&other.terms[j..]);
        Self { terms }
    }

    /// Subtracts another polynomial.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Negates all coefficients.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(Term::neg).collect(),
        }
    }

    /// Multiplies two polynomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                terms.push(a.mul(b));
            }
        }
        Self::from_terms(terms)
    }

    /// Multiplies every coefficient by a rational.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        if factor.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter().map(|t| t.scale(factor)).collect(),
        }
    }

    /// Raises the polynomial to a non-negative power.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        let mut acc = Self::one();
        for _ in 0..exp {
            acc = acc.mul(self);
        }
        acc
    }

    /// Evaluates under a substitution that must cover every variable.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Unassigned`] if a variable has no value.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Rational, EvalError> {
        let mut acc = Rational::zero();
        for term in &self.terms {
            acc = acc + term.evaluate(assignment)?;
        }
        Ok(acc)
    }

    /// Substitutes a single variable by a rational value.
    #[must_use]
    pub fn substitute(&self, var: Variable, value: &Rational) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|t| {
                let e = t.degree_of(var);
                if e == 0 {
                    return t.clone();
                }
                let rest = Monomial::from_exponents(
                    t.monomial()
                        .exponents()
                        .iter()
                        .filter(|&&(v, _)| v != var)
                        .copied(),
                );
                Term::new(t.coeff() * &value.pow(e), rest)
            })
            .collect();
        Self::from_terms(terms)
    }

    /// Formal partial derivative with respect to a variable.
    #[must_use]
    pub fn derivative(&self, var: Variable) -> Self {
        let terms = self
            .terms
            .iter()
            .filter_map(|t| {
                let e = t.degree_of(var);
                if e == 0 {
                    return None;
                }
                let lowered = Monomial::from_exponents(
                    t.monomial()
                        .exponents()
                        .iter()
                        .map(|&(v, k)| if v == var { (v, k - 1) } else { (v, k) }),
                );
                Some(Term::new(
                    t.coeff() * &Rational::from(i64::from(e)),
                    lowered,
                ))
            })
            .collect();
        Self::from_terms(terms)
    }

    /// Returns the signed content: the rational `c` such that
    /// `self = c * primitive_part()`.
    ///
    /// The magnitude is `gcd(numerators) / lcm(denominators)` over all
    /// coefficients; the sign is the sign of the leading coefficient.
    /// The content of the zero polynomial is 0.
    #[must_use]
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return Rational::zero();
        }
        let mut num = Integer::zero();
        let mut den = Integer::one();
        for term in &self.terms {
            num = num.gcd(&term.coeff().numerator());
            den = den.lcm(&term.coeff().denominator());
        }
        let magnitude = Rational::new(num, den);
        if self.terms[0].coeff().is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Returns the primitive part: coprime integer coefficients with a
    /// positive leading coefficient.
    ///
    /// This is the canonical form used as the factorization cache key;
    /// two polynomials equal up to a rational unit have the same
    /// primitive part.
    #[must_use]
    pub fn primitive_part(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.scale(&self.content().recip())
    }

    /// Returns the dense coefficient list of a univariate polynomial in
    /// `var`, constant coefficient first.
    ///
    /// Returns `None` if any other variable occurs.
    #[must_use]
    pub fn coeffs_in(&self, var: Variable) -> Option<Vec<Rational>> {
        let mut coeffs = vec![Rational::zero(); self.degree(var) as usize + 1];
        for term in &self.terms {
            let e = term.degree_of(var);
            if term.monomial().total_degree() != e {
                return None;
            }
            coeffs[e as usize] = term.coeff().clone();
        }
        Some(coeffs)
    }

    /// Builds a univariate polynomial from dense coefficients, constant
    /// coefficient first.
    #[must_use]
    pub fn from_univariate(var: Variable, coeffs: &[Rational]) -> Self {
        let terms = coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(e, c)| {
                #[allow(clippy::cast_possible_truncation)]
                Term::new(c.clone(), Monomial::with_exponent(var, e as u32))
            })
            .collect();
        Self::from_terms(terms)
    }

    fn normalize(&mut self) {
        self.terms
            .sort_by(|a, b| b.monomial().cmp(a.monomial()));

        let mut merged: Vec<Term> = Vec::with_capacity(self.terms.len());
        for term in self.terms.drain(..) {
            match merged.last_mut() {
                Some(last) if last.monomial() == term.monomial() => {
                    let c = last.coeff() + term.coeff();
                    *last = Term::new(c, term.monomial().clone());
                }
                _ => merged.push(term),
            }
        }
        merged.retain(|t| !t.is_zero());
        self.terms = merged;
    }
}

impl From<Rational> for Polynomial {
    fn from(c: Rational) -> Self {
        Self::constant(c)
    }
}

impl From<Variable> for Polynomial {
    fn from(var: Variable) -> Self {
        Self::from(Monomial::new(var))
    }
}

impl From<Monomial> for Polynomial {
    fn from(m: Monomial) -> Self {
        Self::from_terms(vec![Term::new(Rational::one(), m)])
    }
}

impl From<Term> for Polynomial {
    fn from(t: Term) -> Self {
        Self::from_terms(vec![t])
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        Polynomial::add(self, rhs)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        Polynomial::sub(self, rhs)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        Polynomial::mul(self, rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::neg(self)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i == 0 {
                write!(f, "{term}")?;
            } else if term.coeff().is_negative() {
                write!(f, " - {}", term.neg())?;
            } else {
                write!(f, " + {term}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::{VariableKind, VariablePool};

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    fn var() -> Variable {
        VariablePool::fresh(VariableKind::Real)
    }

    #[test]
    fn test_normal_form() {
        let x = var();
        // x + x = 2x, built from unsorted duplicate terms
        let p = Polynomial::from_terms(vec![
            Term::new(q(1), Monomial::new(x)),
            Term::new(q(1), Monomial::new(x)),
        ]);
        assert_eq!(p.nr_terms(), 1);
        assert_eq!(p.leading_coeff(), Some(&q(2)));

        // x - x = 0
        let zero = p.sub(&p);
        assert!(zero.is_zero());
        assert_eq!(zero, Polynomial::zero());
    }

    #[test]
    fn test_structural_equality() {
        let x = var();
        let y = var();
        // (x + y)^2 == x^2 + 2xy + y^2 structurally after expansion
        let xy = Polynomial::from(x).add(&Polynomial::from(y));
        let lhs = xy.mul(&xy);
        let rhs = Polynomial::from_terms(vec![
            Term::new(q(1), Monomial::with_exponent(x, 2)),
            Term::new(q(2), Monomial::new(x).mul(&Monomial::new(y))),
            Term::new(q(1), Monomial::with_exponent(y, 2)),
        ]);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_degrees_and_size() {
        let x = var();
        let y = var();
        let p = Polynomial::from_terms(vec![
            Term::new(q(3), Monomial::from_exponents([(x, 2), (y, 1)])),
            Term::new(q(1), Monomial::new(y)),
            Term::constant(q(-4)),
        ]);
        assert_eq!(p.total_degree(), 3);
        assert_eq!(p.degree(x), 2);
        assert_eq!(p.degree(y), 1);
        assert_eq!(p.nr_terms(), 3);
        // 3 coefficients + 3 variable-exponent pairs
        assert_eq!(p.size(), 6);
        assert_eq!(p.constant_part(), q(-4));
        assert_eq!(p.gather_variables(), vec![x, y]);
    }

    #[test]
    fn test_evaluate() {
        let x = var();
        let y = var();
        // 2x^2 + 3y - 1 at x = 2, y = 1/3
        let p = Polynomial::from_terms(vec![
            Term::new(q(2), Monomial::with_exponent(x, 2)),
            Term::new(q(3), Monomial::new(y)),
            Term::constant(q(-1)),
        ]);
        let mut sigma = Assignment::new();
        sigma.set(x, q(2));
        sigma.set(y, Rational::from_i64(1, 3));
        assert_eq!(p.evaluate(&sigma), Ok(q(8)));

        let empty = Assignment::new();
        assert_eq!(p.evaluate(&empty), Err(EvalError::Unassigned(x)));
    }

    #[test]
    fn test_substitute() {
        let x = var();
        let y = var();
        // x^2*y at x = 3 gives 9y
        let p = Polynomial::from(Monomial::from_exponents([(x, 2), (y, 1)]));
        let s = p.substitute(x, &q(3));
        assert_eq!(
            s,
            Polynomial::from_terms(vec![Term::new(q(9), Monomial::new(y))])
        );
    }

    #[test]
    fn test_derivative() {
        let x = var();
        // d/dx (x^3 + 2x^2 + x + 1) = 3x^2 + 4x + 1
        let p = Polynomial::from_univariate(x, &[q(1), q(1), q(2), q(1)]);
        let dp = p.derivative(x);
        assert_eq!(dp, Polynomial::from_univariate(x, &[q(1), q(4), q(3)]));
    }

    #[test]
    fn test_content_primitive() {
        let x = var();
        // -4x^2 - 6 has content -2, primitive part 2x^2 + 3
        let p = Polynomial::from_univariate(x, &[q(-6), q(0), q(-4)]);
        assert_eq!(p.content(), q(-2));
        let pp = p.primitive_part();
        assert_eq!(pp, Polynomial::from_univariate(x, &[q(3), q(0), q(2)]));
        // reconstruction
        assert_eq!(pp.scale(&p.content()), p);

        // rational coefficients: 3/2 x + 9/4 has content 3/4
        let r = Polynomial::from_univariate(
            x,
            &[Rational::from_i64(9, 4), Rational::from_i64(3, 2)],
        );
        assert_eq!(r.content(), Rational::from_i64(3, 4));
        assert_eq!(
            r.primitive_part(),
            Polynomial::from_univariate(x, &[q(3), q(2)])
        );
    }

    #[test]
    fn test_univariate_roundtrip() {
        let x = var();
        let y = var();
        let p = Polynomial::from_univariate(x, &[q(1), q(0), q(5)]);
        assert_eq!(p.single_variable(), Some(x));
        assert_eq!(p.coeffs_in(x), Some(vec![q(1), q(0), q(5)]));

        let mixed = p.mul(&Polynomial::from(y));
        assert_eq!(mixed.single_variable(), None);
        assert_eq!(mixed.coeffs_in(x), None);
    }

    #[test]
    fn test_display_deterministic() {
        let x = VariablePool::named("poly_disp_x", VariableKind::Real);
        let p = Polynomial::from_terms(vec![
            Term::new(q(-1), Monomial::new(x)),
            Term::constant(q(2)),
        ]);
        assert_eq!(p.to_string(), "-poly_disp_x + 2");
    }
}
