use std::num::NonZeroUsize;

use lru::LruCache;

use crate::bitset::Bitset;
use crate::error::{GeneticError, Result};

/// Remembers the bit patterns admitted into the current candidate pool.
///
/// Keyed by the exact cell content of a [`Bitset`]. Bounded by an LRU
/// policy, so very large pools may readmit a pattern evicted earlier in the
/// same phase.
#[derive(Debug)]
pub struct DuplicateFilter {
    cache: LruCache<Vec<u8>, ()>,
}

impl DuplicateFilter {
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            GeneticError::Configuration("LRU size cannot be zero".to_string())
        })?;

        Ok(Self {
            cache: LruCache::new(capacity),
        })
    }

    /// Records `bits` and returns `true` if the pattern was not seen yet.
    /// A pattern that was already present is left as is and `false` is
    /// returned.
    pub fn admit(&mut self, bits: &Bitset) -> bool {
        if self.cache.contains(bits.as_bytes()) {
            return false;
        }
        self.cache.put(bits.as_bytes().to_vec(), ());
        true
    }

    /// Records `bits` whether or not it was present.
    pub fn record(&mut self, bits: &Bitset) {
        self.cache.put(bits.as_bytes().to_vec(), ());
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}
