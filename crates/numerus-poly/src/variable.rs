//! Variables and the global variable allocator.
//!
//! A variable is a lightweight copyable identifier with a semantic kind
//! (boolean, integer, real) and an allocation-order rank. Identity is
//! the numeric id; names are bookkeeping held by the allocator and only
//! consulted for display.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// The semantic kind of a variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum VariableKind {
    /// A boolean variable.
    Bool,
    /// An integer-valued variable.
    Int,
    /// A real-valued variable.
    Real,
}

impl VariableKind {
    /// One-letter tag used when printing anonymous variables.
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            VariableKind::Bool => 'b',
            VariableKind::Int => 'i',
            VariableKind::Real => 'r',
        }
    }
}

/// An opaque variable identifier.
///
/// Variables are created through [`VariablePool`] and are immutable.
/// Equality and hashing go by `id`; the order is by `rank`, then `id`.
#[derive(Clone, Copy, Debug)]
pub struct Variable {
    id: u32,
    kind: VariableKind,
    rank: u32,
}

impl Variable {
    /// Returns the numeric id.
    #[must_use]
    pub fn id(self) -> u32 {
        self.id
    }

    /// Returns the semantic kind.
    #[must_use]
    pub fn kind(self) -> VariableKind {
        self.kind
    }

    /// Returns the allocation-order rank.
    #[must_use]
    pub fn rank(self) -> u32 {
        self.rank
    }

    /// Returns the name this variable was allocated under, if any.
    #[must_use]
    pub fn name(self) -> Option<String> {
        VariablePool::name_of(self)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank).then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match VariablePool::name_of(*self) {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "_{}{}", self.kind.tag(), self.id),
        }
    }
}

struct PoolInner {
    by_name: FxHashMap<String, Variable>,
    names: Vec<Option<String>>,
    kinds: Vec<VariableKind>,
}

fn pool() -> &'static Mutex<PoolInner> {
    static POOL: OnceLock<Mutex<PoolInner>> = OnceLock::new();
    POOL.get_or_init(|| {
        Mutex::new(PoolInner {
            by_name: FxHashMap::default(),
            names: Vec::new(),
            kinds: Vec::new(),
        })
    })
}

/// The process-wide variable allocator.
///
/// Hands out fresh ids in allocation order. Asking for the same name
/// twice returns the same variable; anonymous variables are always
/// fresh.
pub struct VariablePool;

impl VariablePool {
    /// Returns the variable with the given name, allocating it on first
    /// use with the given kind.
    ///
    /// A later request for an existing name returns the original
    /// variable, ignoring the requested kind.
    #[must_use]
    pub fn named(name: &str, kind: VariableKind) -> Variable {
        let mut inner = pool().lock();
        if let Some(&var) = inner.by_name.get(name) {
            return var;
        }
        let var = Self::allocate(&mut inner, Some(name.to_string()), kind);
        inner.by_name.insert(name.to_string(), var);
        var
    }

    /// Allocates a fresh anonymous variable of the given kind.
    #[must_use]
    pub fn fresh(kind: VariableKind) -> Variable {
        let mut inner = pool().lock();
        Self::allocate(&mut inner, None, kind)
    }

    /// Returns the name a variable was allocated under, if it has one.
    #[must_use]
    pub fn name_of(var: Variable) -> Option<String> {
        let inner = pool().lock();
        inner.names.get(var.id as usize).cloned().flatten()
    }

    /// Returns the kind a variable was allocated with.
    #[must_use]
    pub fn kind_of(var: Variable) -> Option<VariableKind> {
        let inner = pool().lock();
        inner.kinds.get(var.id as usize).copied()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn allocate(inner: &mut PoolInner, name: Option<String>, kind: VariableKind) -> Variable {
        let id = inner.names.len() as u32;
        inner.names.push(name);
        inner.kinds.push(kind);
        Variable {
            id,
            kind,
            rank: id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_is_stable() {
        let x1 = VariablePool::named("stable_x", VariableKind::Real);
        let x2 = VariablePool::named("stable_x", VariableKind::Real);
        assert_eq!(x1, x2);
        assert_eq!(x1.name().as_deref(), Some("stable_x"));
    }

    #[test]
    fn test_fresh_is_fresh() {
        let a = VariablePool::fresh(VariableKind::Int);
        let b = VariablePool::fresh(VariableKind::Int);
        assert_ne!(a, b);
        assert!(a.name().is_none());
    }

    #[test]
    fn test_order_by_rank() {
        let a = VariablePool::fresh(VariableKind::Real);
        let b = VariablePool::fresh(VariableKind::Real);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a);
        assert!(a >= a);
    }

    #[test]
    fn test_anonymous_display() {
        let v = VariablePool::fresh(VariableKind::Bool);
        assert_eq!(v.to_string(), format!("_b{}", v.id()));
    }
}
