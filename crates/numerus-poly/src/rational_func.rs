//! Rational functions: quotients of multivariate polynomials.
//!
//! The representation is lightly normalized: the denominator carries a
//! positive leading coefficient and no constant content. Full
//! numerator/denominator coprimality would need multivariate gcd, so
//! equality is decided by exact cross-multiplication instead.

use num_traits::Zero;
use numerus_integers::Rational;
use std::fmt;

use crate::assignment::Assignment;
use crate::error::EvalError;
use crate::polynomial::Polynomial;
use crate::variable::Variable;

/// A quotient `P/Q` of two multivariate polynomials, `Q != 0`.
#[derive(Clone, Debug)]
pub struct RationalFunction {
    numerator: Polynomial,
    denominator: Polynomial,
}

impl RationalFunction {
    /// Creates a new rational function.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is the zero polynomial.
    #[must_use]
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        assert!(
            !denominator.is_zero(),
            "denominator cannot be zero"
        );
        let content = denominator.content();
        Self {
            numerator: numerator.scale(&content.recip()),
            denominator: denominator.scale(&content.recip()),
        }
    }

    /// Creates a rational function from a polynomial (denominator 1).
    #[must_use]
    pub fn from_polynomial(p: Polynomial) -> Self {
        Self {
            numerator: p,
            denominator: Polynomial::one(),
        }
    }

    /// Returns the numerator polynomial.
    #[must_use]
    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    /// Alias for [`Self::numerator`] kept for the classic
    /// nominator/denominator pairing.
    #[must_use]
    pub fn nominator(&self) -> &Polynomial {
        self.numerator()
    }

    /// Returns the denominator polynomial.
    #[must_use]
    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    /// Returns true if the numerator is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns true if the denominator is constant.
    #[must_use]
    pub fn is_polynomial(&self) -> bool {
        self.denominator.is_constant()
    }

    /// Evaluates the quotient under a substitution.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Unassigned`] for missing assignments and
    /// [`EvalError::DivisionByZero`] if the denominator vanishes at the
    /// given point.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Rational, EvalError> {
        let den = self.denominator.evaluate(assignment)?;
        if den.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        let num = self.numerator.evaluate(assignment)?;
        Ok(num / den)
    }

    /// Returns the variables of numerator and denominator, numerator
    /// first, without duplicates.
    #[must_use]
    pub fn gather_variables(&self) -> Vec<Variable> {
        let mut vars = self.numerator.gather_variables();
        for var in self.denominator.gather_variables() {
            if !vars.contains(&var) {
                vars.push(var);
            }
        }
        vars
    }
}

impl PartialEq for RationalFunction {
    /// Mathematical equality via cross-multiplication:
    /// `a/b == c/d  iff  a*d == c*b`.
    fn eq(&self, other: &Self) -> bool {
        self.numerator.mul(&other.denominator) == other.numerator.mul(&self.denominator)
    }
}

impl Eq for RationalFunction {}

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "({}) / ({})", self.numerator, self.denominator)
        }
    }
}
