//! # Numerus
//!
//! An exact arithmetic kernel for algebraic objects used by decision
//! procedures: variables, exact-rational-bounded intervals, monomials,
//! terms, multivariate polynomials, rational functions and factorized
//! polynomials backed by a shared factorization cache.
//!
//! This crate re-exports the public surface of the workspace:
//!
//! - [`Integer`] / [`Rational`]: arbitrary precision exact numbers
//! - [`Variable`], [`Monomial`], [`Term`], [`Polynomial`],
//!   [`RationalFunction`]: the polynomial stack
//! - [`Interval`] with [`BoundType`] and [`IntervalPieces`]: exact
//!   interval arithmetic with non-convex set operations
//! - [`FactorizationCache`] and [`FactorizedPolynomial`]: interned,
//!   physically shared polynomial factors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use numerus_integers::{Integer, Rational};

pub use numerus_poly::{
    Assignment, EvalError, Monomial, Polynomial, RationalFunction, Term, Variable, VariableKind,
    VariablePool,
};

pub use numerus_interval::{BoundType, Interval, IntervalError, IntervalPieces};

pub use numerus_factor::{
    factorize, CacheError, FactorHandle, FactorizationCache, FactorizedError,
    FactorizedPolynomial, PartialFactorization,
};
