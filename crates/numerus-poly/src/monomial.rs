//! Monomials: finite products of variable powers.
//!
//! A monomial is stored as a sorted list of `(variable, exponent)`
//! pairs with all exponents at least 1; the constant monomial is the
//! empty product. The short-vector representation keeps the common
//! low-arity case allocation-free.

use num_traits::One;
use numerus_integers::Rational;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

use crate::assignment::Assignment;
use crate::error::EvalError;
use crate::variable::Variable;

/// A power product of variables, e.g. `x^3*y`.
///
/// # Invariants
///
/// - variables strictly increasing in the variable order
/// - every stored exponent is at least 1
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Monomial {
    exps: SmallVec<[(Variable, u32); 4]>,
}

impl Monomial {
    /// Creates the constant monomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::default()
    }

    /// Creates the monomial consisting of a single variable.
    #[must_use]
    pub fn new(var: Variable) -> Self {
        Self::with_exponent(var, 1)
    }

    /// Creates the monomial `var^exp`; exponent 0 yields the constant
    /// monomial.
    #[must_use]
    pub fn with_exponent(var: Variable, exp: u32) -> Self {
        if exp == 0 {
            return Self::one();
        }
        let mut exps = SmallVec::new();
        exps.push((var, exp));
        Self { exps }
    }

    /// Creates a monomial from arbitrary `(variable, exponent)` pairs.
    ///
    /// Pairs are sorted, duplicates combined and zero exponents
    /// dropped.
    #[must_use]
    pub fn from_exponents<I: IntoIterator<Item = (Variable, u32)>>(pairs: I) -> Self {
        let mut exps: SmallVec<[(Variable, u32); 4]> =
            pairs.into_iter().filter(|&(_, e)| e > 0).collect();
        exps.sort_by(|a, b| a.0.cmp(&b.0));

        let mut merged: SmallVec<[(Variable, u32); 4]> = SmallVec::new();
        for (var, exp) in exps {
            match merged.last_mut() {
                Some((last, e)) if *last == var => *e += exp,
                _ => merged.push((var, exp)),
            }
        }
        Self { exps: merged }
    }

    /// Returns true if this is the constant monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.exps.is_empty()
    }

    /// Returns the number of distinct variables.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.exps.len()
    }

    /// Returns the total degree (sum of all exponents).
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.exps.iter().map(|&(_, e)| e).sum()
    }

    /// Returns the sorted `(variable, exponent)` pairs.
    #[must_use]
    pub fn exponents(&self) -> &[(Variable, u32)] {
        &self.exps
    }

    /// Returns the exponent of a variable (0 if absent).
    #[must_use]
    pub fn degree_of(&self, var: Variable) -> u32 {
        self.exps
            .iter()
            .find(|&&(v, _)| v == var)
            .map_or(0, |&(_, e)| e)
    }

    /// Returns an iterator over the variables of this monomial.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.exps.iter().map(|&(v, _)| v)
    }

    /// Multiplies two monomials by adding exponents.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut exps: SmallVec<[(Variable, u32); 4]> = SmallVec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.exps.len() && j < other.exps.len() {
            let (va, ea) = self.exps[i];
            let (vb, eb) = other.exps[j];
            match va.cmp(&vb) {
                Ordering::Less => {
                    exps.push((va, ea));
                    i += 1;
                }
                Ordering::Greater => {
                    exps.push((vb, eb));
                    j += 1;
                }
                Ordering::Equal => {
                    exps.push((va, ea + eb));
                    i += 1;
                    j += 1;
                }
            }
        }
        exps.extend_from_slice(&self.exps[i..]);
        exps.extend_from_slice(&other.exps[j..]);
        Self { exps }
    }

    /// Divides by another monomial if every exponent allows it.
    #[must_use]
    pub fn try_div(&self, other: &Self) -> Option<Self> {
        let mut exps: SmallVec<[(Variable, u32); 4]> = SmallVec::new();
        let mut i = 0;
        for &(vb, eb) in &other.exps {
            loop {
                let &(va, ea) = self.exps.get(i)?;
                if va < vb {
                    exps.push((va, ea));
                    i += 1;
                } else if va == vb {
                    if ea < eb {
                        return None;
                    }
                    if ea > eb {
                        exps.push((va, ea - eb));
                    }
                    i += 1;
                    break;
                } else {
                    return None;
                }
            }
        }
        exps.extend_from_slice(&self.exps[i..]);
        Some(Self { exps })
    }

    /// Computes the greatest common divisor (pointwise minimum of
    /// exponents).
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let mut exps: SmallVec<[(Variable, u32); 4]> = SmallVec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.exps.len() && j < other.exps.len() {
            let (va, ea) = self.exps[i];
            let (vb, eb) = other.exps[j];
            match va.cmp(&vb) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    exps.push((va, ea.min(eb)));
                    i += 1;
                    j += 1;
                }
            }
        }
        Self { exps }
    }

    /// Raises the monomial to a non-negative power.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        if exp == 0 {
            return Self::one();
        }
        Self {
            exps: self.exps.iter().map(|&(v, e)| (v, e * exp)).collect(),
        }
    }

    /// Evaluates the monomial under a substitution.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Unassigned`] if a variable has no value.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Rational, EvalError> {
        let mut acc = Rational::one();
        for &(var, exp) in &self.exps {
            let value = assignment.get(var).ok_or(EvalError::Unassigned(var))?;
            acc = acc * value.pow(exp);
        }
        Ok(acc)
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monomial {
    /// Graded lexicographic order: first by total degree, then
    /// lexicographically by exponents over the variable order.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.total_degree().cmp(&other.total_degree()) {
            Ordering::Equal => {}
            ord => return ord,
        }

        let (mut i, mut j) = (0, 0);
        loop {
            match (self.exps.get(i), other.exps.get(j)) {
                (None, None) => return Ordering::Equal,
                // a variable missing on one side is exponent 0 there;
                // the side carrying the earlier variable is greater
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some(&(va, ea)), Some(&(vb, eb))) => match va.cmp(&vb) {
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                    Ordering::Equal => {
                        match ea.cmp(&eb) {
                            Ordering::Equal => {}
                            ord => return ord,
                        }
                        i += 1;
                        j += 1;
                    }
                },
            }
        }
    }
}

impl From<Variable> for Monomial {
    fn from(var: Variable) -> Self {
        Self::new(var)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        let mut first = true;
        for &(var, exp) in &self.exps {
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{var}")?;
            } else {
                write!(f, "{var}^{exp}")?;
            }
        }
        Ok(())
    }
}
