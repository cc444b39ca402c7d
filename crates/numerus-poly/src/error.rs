//! Evaluation errors.

use crate::variable::Variable;
use thiserror::Error;

/// Errors raised when evaluating polynomials or rational functions
/// under a substitution.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// The substitution map does not assign a value to a variable that
    /// occurs in the expression.
    #[error("no value assigned to variable {0}")]
    Unassigned(Variable),

    /// A denominator evaluated to zero.
    #[error("division by zero during evaluation")]
    DivisionByZero,
}
