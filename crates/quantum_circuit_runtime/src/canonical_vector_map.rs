// =============================================================================
// Qubit Lens - Canonical Vector Map
// =============================================================================
// Table of Contents:
//   1. Quantised hashing
//   2. CanonicalVectorMap - tolerance-keyed, insertion-ordered map
// =============================================================================
// Purpose: Groups complex vectors that are equal within tolerance. Keys are
//          hashed over quantised components so near-equal vectors share a
//          bucket; equality is always re-verified inside the bucket.
// =============================================================================

use complex_algebra::{ComplexVector, Tolerance};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// =============================================================================
// 1. Quantised hashing
// =============================================================================

// Components are snapped to multiples of 2^-16 before hashing.
const QUANTISATION_SCALE: f64 = 65536.0;

fn quantised_hash(vector: &ComplexVector) -> u64 {
    let mut hasher = DefaultHasher::new();
    vector.len().hash(&mut hasher);
    for value in vector.interleaved_buffer() {
        // Saturating cast; -0.0 and 0.0 both land on 0.
        let cell = (value * QUANTISATION_SCALE).round() as i64;
        cell.hash(&mut hasher);
    }
    hasher.finish()
}

// =============================================================================
// 2. CanonicalVectorMap
// =============================================================================

#[derive(Debug, Clone)]
pub struct CanonicalVectorMap<V> {
    tolerance: Tolerance,
    buckets: HashMap<u64, Vec<usize>>,
    entries: Vec<(ComplexVector, V)>,
}

impl<V> Default for CanonicalVectorMap<V> {
    fn default() -> Self {
        Self::new(Tolerance::default())
    }
}

impl<V> CanonicalVectorMap<V> {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            buckets: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find_index(&self, hash: u64, key: &ComplexVector) -> Option<usize> {
        self.buckets.get(&hash)?.iter().copied().find(|&index| {
            self.entries[index]
                .0
                .approximately_equal_with(key, self.tolerance)
        })
    }

    pub fn get(&self, key: &ComplexVector) -> Option<&V> {
        let index = self.find_index(quantised_hash(key), key)?;
        Some(&self.entries[index].1)
    }

    pub fn get_mut(&mut self, key: &ComplexVector) -> Option<&mut V> {
        let index = self.find_index(quantised_hash(key), key)?;
        Some(&mut self.entries[index].1)
    }

    /// Stores `value` under `key`, returning the previous value of an equal key.
    pub fn insert(&mut self, key: ComplexVector, value: V) -> Option<V> {
        let hash = quantised_hash(&key);
        match self.find_index(hash, &key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.push_entry(hash, key, value);
                None
            }
        }
    }

    /// Value stored under a key equal to `key`, inserting `default()` first
    /// if there is none. The first inserted key is kept as the representative.
    pub fn get_or_insert_with<F>(&mut self, key: ComplexVector, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let hash = quantised_hash(&key);
        let index = match self.find_index(hash, &key) {
            Some(index) => index,
            None => self.push_entry(hash, key, default()),
        };
        &mut self.entries[index].1
    }

    fn push_entry(&mut self, hash: u64, key: ComplexVector, value: V) -> usize {
        let index = self.entries.len();
        self.entries.push((key, value));
        self.buckets.entry(hash).or_default().push(index);
        index
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComplexVector, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn into_entries(self) -> Vec<(ComplexVector, V)> {
        self.entries
    }
}
