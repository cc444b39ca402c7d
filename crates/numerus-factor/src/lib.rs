//! # numerus-factor
//!
//! Factorized polynomial representation backed by a shared
//! factorization cache.
//!
//! The cache interns polynomial factors so that structurally equal
//! factors are physically shared: equality and hashing of factorized
//! polynomials built against the same cache cost one handle comparison
//! per factor instead of a full multivariate polynomial comparison.
//!
//! Factorization itself is heuristic and partial (constant unit,
//! monomial content, univariate squarefree split); the cache contracts
//! only rely on canonical equality of whatever decomposition is
//! produced, never on irreducibility.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod factorize;
pub mod factorized;

#[cfg(test)]
mod proptests;

pub use cache::{CacheError, FactorHandle, FactorizationCache};
pub use factorize::{factorize, PartialFactorization};
pub use factorized::{FactorizedError, FactorizedPolynomial};
