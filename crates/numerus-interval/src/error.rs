//! Interval domain errors.

use numerus_integers::Rational;
use thiserror::Error;

/// Errors raised by interval construction and arithmetic.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum IntervalError {
    /// Construction with crossed finite bounds.
    #[error("invalid interval bounds: lower {lower} exceeds upper {upper}")]
    InvalidBounds {
        /// The offending lower bound.
        lower: Rational,
        /// The offending upper bound.
        upper: Rational,
    },

    /// Inverse or division where the divisor contains zero.
    #[error("interval division by an interval containing zero")]
    DivisionByZero,

    /// An operation that needs an element of the interval was given an
    /// empty one.
    #[error("operation undefined on the empty interval")]
    EmptyInterval,
}
