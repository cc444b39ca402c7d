//! Terms: a rational coefficient times a monomial.

use num_traits::Zero;
use numerus_integers::Rational;
use std::fmt;

use crate::assignment::Assignment;
use crate::error::EvalError;
use crate::monomial::Monomial;
use crate::variable::Variable;

/// A single polynomial term, e.g. `5/2*x^3`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Term {
    coeff: Rational,
    monomial: Monomial,
}

impl Term {
    /// Creates a term from a coefficient and a monomial.
    #[must_use]
    pub fn new(coeff: Rational, monomial: Monomial) -> Self {
        Self { coeff, monomial }
    }

    /// Creates a constant term.
    #[must_use]
    pub fn constant(coeff: Rational) -> Self {
        Self {
            coeff,
            monomial: Monomial::one(),
        }
    }

    /// Returns the coefficient.
    #[must_use]
    pub fn coeff(&self) -> &Rational {
        &self.coeff
    }

    /// Returns the monomial.
    #[must_use]
    pub fn monomial(&self) -> &Monomial {
        &self.monomial
    }

    /// Returns true if the coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeff.is_zero()
    }

    /// Returns true if this is a constant term.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.monomial.is_one()
    }

    /// Multiplies two terms.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            coeff: &self.coeff * &other.coeff,
            monomial: self.monomial.mul(&other.monomial),
        }
    }

    /// Negates the coefficient.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            coeff: -&self.coeff,
            monomial: self.monomial.clone(),
        }
    }

    /// Scales the coefficient.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        Self {
            coeff: &self.coeff * factor,
            monomial: self.monomial.clone(),
        }
    }

    /// Returns the degree of a variable in this term.
    #[must_use]
    pub fn degree_of(&self, var: Variable) -> u32 {
        self.monomial.degree_of(var)
    }

    /// Evaluates the term under a substitution.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Unassigned`] if a variable has no value.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Rational, EvalError> {
        Ok(&self.coeff * &self.monomial.evaluate(assignment)?)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use num_traits::One;
        if self.monomial.is_one() {
            write!(f, "{}", self.coeff)
        } else if self.coeff.is_one() {
            write!(f, "{}", self.monomial)
        } else if (-&self.coeff).is_one() {
            write!(f, "-{}", self.monomial)
        } else {
            write!(f, "{}*{}", self.coeff, self.monomial)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::{VariableKind, VariablePool};

    #[test]
    fn test_display() {
        let x = VariablePool::named("term_test_x", VariableKind::Real);
        let t = Term::new(
            Rational::from_i64(11, 2),
            Monomial::with_exponent(x, 3),
        );
        assert_eq!(t.to_string(), "11/2*term_test_x^3");
        assert_eq!(Term::constant(Rational::from(7)).to_string(), "7");
    }

    #[test]
    fn test_mul() {
        let x = VariablePool::fresh(VariableKind::Real);
        let a = Term::new(Rational::from(2), Monomial::new(x));
        let b = Term::new(Rational::from(3), Monomial::with_exponent(x, 2));
        let ab = a.mul(&b);
        assert_eq!(ab.coeff(), &Rational::from(6));
        assert_eq!(ab.monomial().degree_of(x), 3);
    }
}
