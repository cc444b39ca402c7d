//! Variable-to-value substitution maps.

use numerus_integers::Rational;
use rustc_hash::FxHashMap;

use crate::variable::Variable;

/// A substitution assigning exact rational values to variables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    map: FxHashMap<Variable, Rational>,
}

impl Assignment {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a variable, replacing any previous value.
    pub fn set(&mut self, var: Variable, value: Rational) {
        self.map.insert(var, value);
    }

    /// Returns the value assigned to a variable, if any.
    #[must_use]
    pub fn get(&self, var: Variable) -> Option<&Rational> {
        self.map.get(&var)
    }

    /// Returns true if the variable has an assigned value.
    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        self.map.contains_key(&var)
    }

    /// Returns the number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no variable is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(Variable, Rational)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, Rational)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
