//! Kernel value cache
//!
//! The solver evaluates K(i, j) for the same index pairs many times while it
//! refreshes the error cache. `KernelCache` keeps recently used values in an LRU
//! map. The kernel matrix is symmetric, so (i, j) and (j, i) share one entry.

use lru::LruCache;
use std::num::NonZeroUsize;

/// Approximate bytes per cached entry (key, value and map overhead)
pub const BYTES_PER_ENTRY: usize = 16;

/// Index pair normalized so that `lo <= hi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PairKey {
    lo: usize,
    hi: usize,
}

impl PairKey {
    fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { lo: i, hi: j }
        } else {
            Self { lo: j, hi: i }
        }
    }
}

/// LRU cache of kernel matrix entries
pub struct KernelCache {
    entries: LruCache<PairKey, f64>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    /// Create a cache holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Size a cache for a training set of `n_examples` within `memory_bytes`.
    ///
    /// Returns `None` when no memory is granted. The capacity never exceeds the
    /// number of distinct pairs, `n(n+1)/2`.
    pub fn for_problem(memory_bytes: usize, n_examples: usize) -> Option<Self> {
        let budget = memory_bytes / BYTES_PER_ENTRY;
        if budget == 0 || n_examples == 0 {
            return None;
        }
        let distinct_pairs = n_examples.saturating_mul(n_examples + 1) / 2;
        Some(Self::new(budget.min(distinct_pairs)))
    }

    /// Look up K(i, j)
    pub fn get(&mut self, i: usize, j: usize) -> Option<f64> {
        match self.entries.get(&PairKey::new(i, j)) {
            Some(&value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store K(i, j)
    pub fn put(&mut self, i: usize, j: usize, value: f64) {
        self.entries.put(PairKey::new(i, j), value);
    }

    /// Return the cached value or compute and store it
    pub fn get_or_insert_with<F>(&mut self, i: usize, j: usize, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        if let Some(value) = self.get(i, j) {
            return value;
        }
        let value = compute();
        self.put(i, j, value);
        value
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.capacity(),
            size: self.entries.len(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}
