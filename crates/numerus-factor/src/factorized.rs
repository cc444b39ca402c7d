//! Lazily factorized polynomials.
//!
//! A factorized polynomial is `constant * prod factor_i^exp_i` where
//! every factor is a handle into a shared [`FactorizationCache`]. The
//! representation is canonical per cache: factors are pairwise distinct
//! handles sorted by slot, exponents are at least 1, and a constant
//! value has no factors and no cache. Equality between values built
//! against the same cache is decided on handles alone; everything else
//! falls back to comparing expansions.

use log::warn;
use num_traits::{One, Zero};
use numerus_integers::Rational;
use numerus_poly::{Assignment, EvalError, Polynomial, Variable};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::cache::{CacheError, FactorHandle, FactorizationCache};
use crate::factorize::{factorize, is_certainly_irreducible};

/// Errors raised by factorized polynomial operations.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FactorizedError {
    /// A cache usage error (foreign handle and friends).
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// An evaluation error from the polynomial layer.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// A polynomial represented as a constant times a product of cached
/// factors.
pub struct FactorizedPolynomial {
    constant: Rational,
    /// Sorted by handle slot, pairwise distinct, exponents >= 1.
    factors: Vec<(FactorHandle, u32)>,
    /// Present exactly when `factors` is non-empty.
    cache: Option<Arc<FactorizationCache>>,
}

impl FactorizedPolynomial {
    /// Creates a constant value without touching any cache.
    #[must_use]
    pub fn from_constant(value: Rational) -> Self {
        Self {
            constant: value,
            factors: Vec::new(),
            cache: None,
        }
    }

    /// Factors a polynomial and interns its factors in the given
    /// cache.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError`]s from interning; with a well-formed
    /// factorization this does not happen.
    pub fn from_polynomial(
        polynomial: &Polynomial,
        cache: &Arc<FactorizationCache>,
    ) -> Result<Self, FactorizedError> {
        let decomposition = factorize(polynomial);
        if decomposition.factors.is_empty() {
            return Ok(Self::from_constant(decomposition.unit));
        }

        let mut factors: Vec<(FactorHandle, u32)> = Vec::new();
        for (factor, exponent) in &decomposition.factors {
            let handle = cache.intern(factor)?;
            if is_certainly_irreducible(factor) {
                cache.mark_irreducible(handle)?;
            }
            match factors.iter_mut().find(|(h, _)| *h == handle) {
                Some((_, e)) => {
                    // duplicate canonical factor: merge and drop the
                    // extra reference taken by intern
                    *e += exponent;
                    cache.release(handle)?;
                }
                None => factors.push((handle, *exponent)),
            }
        }
        factors.sort_by_key(|&(h, _)| h);

        Ok(Self {
            constant: decomposition.unit,
            factors,
            cache: Some(Arc::clone(cache)),
        })
    }

    /// Returns true if the value is a plain constant.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.factors.is_empty()
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_constant() && self.constant.is_zero()
    }

    /// Returns true if the value is one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.is_constant() && self.constant.is_one()
    }

    /// Returns the constant if the factor sequence is empty, `None`
    /// otherwise: the constant part alone does not describe a value
    /// that still carries polynomial factors.
    #[must_use]
    pub fn constant_part(&self) -> Option<&Rational> {
        if self.is_constant() {
            Some(&self.constant)
        } else {
            None
        }
    }

    /// Returns the constant coefficient in front of the factor
    /// product.
    #[must_use]
    pub fn coefficient(&self) -> &Rational {
        &self.constant
    }

    /// Returns the `(handle, exponent)` pairs in canonical order.
    #[must_use]
    pub fn factors(&self) -> &[(FactorHandle, u32)] {
        &self.factors
    }

    /// Returns the number of distinct factors.
    #[must_use]
    pub fn nr_factors(&self) -> usize {
        self.factors.len()
    }

    /// Returns the cache this value shares, if it has factors.
    #[must_use]
    pub fn cache(&self) -> Option<&Arc<FactorizationCache>> {
        self.cache.as_ref()
    }

    /// Expands to an ordinary polynomial.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError`]s; with a well-formed value this does
    /// not happen.
    pub fn expand(&self) -> Result<Polynomial, FactorizedError> {
        let mut acc = Polynomial::constant(self.constant.clone());
        if let Some(cache) = &self.cache {
            for &(handle, exponent) in &self.factors {
                let factor = cache.lookup_polynomial(handle)?;
                acc = acc.mul(&factor.pow(exponent));
            }
        }
        Ok(acc)
    }

    /// Evaluates under a substitution without expanding the product:
    /// each factor is evaluated on its own and the results are
    /// multiplied.
    ///
    /// # Errors
    ///
    /// Returns an evaluation error for unassigned variables, or a
    /// cache error for a malformed value.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Rational, FactorizedError> {
        let mut acc = self.constant.clone();
        if let Some(cache) = &self.cache {
            for &(handle, exponent) in &self.factors {
                let factor = cache.lookup_polynomial(handle)?;
                let value = factor.evaluate(assignment)?;
                acc = acc * value.pow(exponent);
            }
        }
        Ok(acc)
    }

    /// Returns the set union of the variables of all factors, in
    /// first-seen order over the canonical factor order.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError`]s; with a well-formed value this does
    /// not happen.
    pub fn gather_variables(&self) -> Result<Vec<Variable>, FactorizedError> {
        let mut vars = Vec::new();
        if let Some(cache) = &self.cache {
            for &(handle, _) in &self.factors {
                for var in cache.lookup_polynomial(handle)?.gather_variables() {
                    if !vars.contains(&var) {
                        vars.push(var);
                    }
                }
            }
        }
        Ok(vars)
    }

    /// Multiplies two factorized polynomials.
    ///
    /// Operands sharing one cache (or constant operands) merge their
    /// factor multisets directly; operands from different caches are
    /// expanded, multiplied and re-factored into the left operand's
    /// cache.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError`]s from the involved caches.
    pub fn mul(&self, other: &Self) -> Result<Self, FactorizedError> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::from_constant(Rational::zero()));
        }

        let cache = match (&self.cache, &other.cache) {
            (None, None) => {
                return Ok(Self::from_constant(&self.constant * &other.constant));
            }
            (Some(a), Some(b)) if !Arc::ptr_eq(a, b) => {
                // cross-cache product: re-factor the expansion
                let product = self.expand()?.mul(&other.expand()?);
                return Self::from_polynomial(&product, a);
            }
            (Some(a), _) => Arc::clone(a),
            (None, Some(b)) => Arc::clone(b),
        };

        let mut factors: Vec<(FactorHandle, u32)> = Vec::new();
        for &(handle, exponent) in self.factors.iter().chain(&other.factors) {
            match factors.iter_mut().find(|(h, _)| *h == handle) {
                Some((_, e)) => *e += exponent,
                None => {
                    cache.retain(handle)?;
                    factors.push((handle, exponent));
                }
            }
        }
        factors.sort_by_key(|&(h, _)| h);

        Ok(Self {
            constant: &self.constant * &other.constant,
            factors,
            cache: Some(cache),
        })
    }

    /// Raises the value to a non-negative power.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError`]s from retaining the factors.
    pub fn pow(&self, exponent: u32) -> Result<Self, FactorizedError> {
        if exponent == 0 {
            return Ok(Self::from_constant(Rational::one()));
        }
        let mut factors = Vec::with_capacity(self.factors.len());
        if let Some(cache) = &self.cache {
            for &(handle, e) in &self.factors {
                cache.retain(handle)?;
                factors.push((handle, e * exponent));
            }
        }
        Ok(Self {
            constant: self.constant.pow(exponent),
            factors,
            cache: self.cache.clone(),
        })
    }
}

impl Clone for FactorizedPolynomial {
    fn clone(&self) -> Self {
        if let Some(cache) = &self.cache {
            for &(handle, _) in &self.factors {
                if let Err(err) = cache.retain(handle) {
                    warn!("retain on clone failed: {err}");
                }
            }
        }
        Self {
            constant: self.constant.clone(),
            factors: self.factors.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl Drop for FactorizedPolynomial {
    fn drop(&mut self) {
        if let Some(cache) = &self.cache {
            for &(handle, _) in &self.factors {
                if let Err(err) = cache.release(handle) {
                    warn!("release on drop failed: {err}");
                }
            }
        }
    }
}

impl PartialEq for FactorizedPolynomial {
    fn eq(&self, other: &Self) -> bool {
        match (&self.cache, &other.cache) {
            // constants never touch a cache
            (None, None) => self.constant == other.constant,
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => {
                // same cache: handle identity decides in O(#factors)
                self.constant == other.constant && self.factors == other.factors
            }
            _ => match (self.expand(), other.expand()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for FactorizedPolynomial {}

impl fmt::Debug for FactorizedPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactorizedPolynomial")
            .field("constant", &self.constant)
            .field("factors", &self.factors)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FactorizedPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_constant() {
            return write!(f, "{}", self.constant);
        }
        let mut lead = false;
        if !self.constant.is_one() {
            write!(f, "{}", self.constant)?;
            lead = true;
        }
        if let Some(cache) = &self.cache {
            for &(handle, exponent) in &self.factors {
                if lead {
                    write!(f, " * ")?;
                }
                lead = true;
                match cache.lookup_polynomial(handle) {
                    Ok(p) if exponent == 1 => write!(f, "({p})")?,
                    Ok(p) => write!(f, "({p})^{exponent}")?,
                    Err(_) => write!(f, "(<foreign factor>)")?,
                }
            }
        }
        Ok(())
    }
}
