//! # numerus-integers
//!
//! Arbitrary precision integer and rational arithmetic for the Numerus
//! exact arithmetic kernel.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`), always in lowest terms
//!
//! Every operation is exact. There is no rounding anywhere in the kernel
//! except for the explicit `floor`/`ceil`/`round` conversions to
//! `Integer`, which downstream interval arithmetic uses for integral
//! envelopes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
