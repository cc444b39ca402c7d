//! The factorization cache: an interning table for polynomial factors.
//!
//! Within one cache instance, two factors that are mathematically equal
//! up to a rational unit map to the same entry. Sharing is part of the
//! contract, not an optimization: factorized polynomial equality relies
//! on handle identity.
//!
//! The whole read-check-insert sequence of [`FactorizationCache::intern`]
//! runs under one exclusive lock, so concurrent interning can never
//! create two entries for the same canonical key.

use hashbrown::HashMap;
use log::debug;
use numerus_poly::Polynomial;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors raised by cache usage, distinct from arithmetic domain
/// errors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// The handle was issued by a different cache instance.
    #[error("factor handle belongs to a different factorization cache")]
    ForeignHandle,

    /// Constants carry no factor structure and are never interned.
    #[error("constant polynomials are not cached as factors")]
    ConstantPolynomial,

    /// A release without a matching retain.
    #[error("factor released more often than retained")]
    ReleaseUnderflow,
}

/// An opaque reference to one interned factor.
///
/// Handles from the same cache compare equal exactly when they refer to
/// the same entry. A handle is only meaningful together with the cache
/// that issued it; every cache operation rejects foreign handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactorHandle {
    cache_id: u64,
    index: u32,
}

impl FactorHandle {
    /// Returns the slot index inside the owning cache.
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Debug for FactorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Factor({}.{})", self.cache_id, self.index)
    }
}

#[derive(Debug)]
struct FactorEntry {
    polynomial: Polynomial,
    ref_count: usize,
    irreducible_known: bool,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: Vec<FactorEntry>,
    index: HashMap<Polynomial, u32>,
}

static NEXT_CACHE_ID: AtomicU64 = AtomicU64::new(0);

/// A process-lifetime store interning polynomial factors.
///
/// Shared between factorized polynomials as `Arc<FactorizationCache>`;
/// interior locking keeps `&self` methods safe to call from anywhere.
/// Entries whose reference count drops to zero are retained and stay
/// queryable.
#[derive(Debug)]
pub struct FactorizationCache {
    id: u64,
    inner: Mutex<CacheInner>,
}

impl Default for FactorizationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FactorizationCache {
    /// Creates an empty cache with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_CACHE_ID.fetch_add(1, Ordering::Relaxed),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Interns a factor, returning its canonical handle.
    ///
    /// The polynomial is normalized to its primitive part (coprime
    /// integer coefficients, positive leading coefficient) before the
    /// lookup, so inputs equal up to a rational unit share one entry.
    /// An existing entry has its reference count incremented; a new
    /// entry starts at count 1.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConstantPolynomial`] for constant inputs
    /// (including zero), which have no factor structure.
    pub fn intern(&self, polynomial: &Polynomial) -> Result<FactorHandle, CacheError> {
        if polynomial.is_constant() {
            return Err(CacheError::ConstantPolynomial);
        }
        let canonical = polynomial.primitive_part();

        let mut inner = self.inner.lock();
        if let Some(&slot) = inner.index.get(&canonical) {
            let entry = &mut inner.entries[slot as usize];
            entry.ref_count += 1;
            debug!(
                "factor cache {} hit: slot {slot}, refs {}",
                self.id, entry.ref_count
            );
            return Ok(FactorHandle {
                cache_id: self.id,
                index: slot,
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let slot = inner.entries.len() as u32;
        inner.entries.push(FactorEntry {
            polynomial: canonical.clone(),
            ref_count: 1,
            irreducible_known: false,
        });
        inner.index.insert(canonical, slot);
        debug!("factor cache {} miss: new slot {slot}", self.id);
        Ok(FactorHandle {
            cache_id: self.id,
            index: slot,
        })
    }

    /// Increments the reference count of an interned factor.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ForeignHandle`] for handles this cache did
    /// not issue.
    pub fn retain(&self, handle: FactorHandle) -> Result<(), CacheError> {
        let mut inner = self.inner.lock();
        let entry = Self::entry_mut(self.id, &mut inner, handle)?;
        entry.ref_count += 1;
        Ok(())
    }

    /// Decrements the reference count of an interned factor. The entry
    /// itself is retained even at count zero and stays queryable.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ForeignHandle`] for handles this cache did
    /// not issue and [`CacheError::ReleaseUnderflow`] when the count is
    /// already zero.
    pub fn release(&self, handle: FactorHandle) -> Result<(), CacheError> {
        let mut inner = self.inner.lock();
        let entry = Self::entry_mut(self.id, &mut inner, handle)?;
        if entry.ref_count == 0 {
            return Err(CacheError::ReleaseUnderflow);
        }
        entry.ref_count -= 1;
        debug!(
            "factor cache {} release: slot {}, refs {}",
            self.id,
            handle.index,
            entry.ref_count
        );
        Ok(())
    }

    /// Returns the canonical polynomial stored for a handle.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ForeignHandle`] for handles this cache did
    /// not issue.
    pub fn lookup_polynomial(&self, handle: FactorHandle) -> Result<Polynomial, CacheError> {
        let inner = self.inner.lock();
        Ok(Self::entry(self.id, &inner, handle)?.polynomial.clone())
    }

    /// Returns the current reference count of a handle.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ForeignHandle`] for handles this cache did
    /// not issue.
    pub fn ref_count(&self, handle: FactorHandle) -> Result<usize, CacheError> {
        let inner = self.inner.lock();
        Ok(Self::entry(self.id, &inner, handle)?.ref_count)
    }

    /// Marks a factor as known irreducible.
    ///
    /// The cache itself never claims irreducibility; only the routine
    /// that produced the decomposition may.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ForeignHandle`] for handles this cache did
    /// not issue.
    pub fn mark_irreducible(&self, handle: FactorHandle) -> Result<(), CacheError> {
        let mut inner = self.inner.lock();
        Self::entry_mut(self.id, &mut inner, handle)?.irreducible_known = true;
        Ok(())
    }

    /// Returns true if a factor is known irreducible.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ForeignHandle`] for handles this cache did
    /// not issue.
    pub fn is_irreducible_known(&self, handle: FactorHandle) -> Result<bool, CacheError> {
        let inner = self.inner.lock();
        Ok(Self::entry(self.id, &inner, handle)?.irreducible_known)
    }

    /// Returns true if the handle was issued by this cache.
    #[must_use]
    pub fn owns(&self, handle: FactorHandle) -> bool {
        handle.cache_id == self.id
    }

    /// Returns the number of distinct interned factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    fn entry<'a>(
        id: u64,
        inner: &'a CacheInner,
        handle: FactorHandle,
    ) -> Result<&'a FactorEntry, CacheError> {
        if handle.cache_id != id {
            return Err(CacheError::ForeignHandle);
        }
        inner
            .entries
            .get(handle.index as usize)
            .ok_or(CacheError::ForeignHandle)
    }

    fn entry_mut<'a>(
        id: u64,
        inner: &'a mut CacheInner,
        handle: FactorHandle,
    ) -> Result<&'a mut FactorEntry, CacheError> {
        if handle.cache_id != id {
            return Err(CacheError::ForeignHandle);
        }
        inner
            .entries
            .get_mut(handle.index as usize)
            .ok_or(CacheError::ForeignHandle)
    }
}
