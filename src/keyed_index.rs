// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Default upper bound on the ratio of entries to buckets in a [KeyedIndex].
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.5;

const INITIAL_BUCKET_COUNT: usize = 8;

/// Pure hash function used by a [KeyedIndex] to pick a bucket for a key.
///
/// Keys which compare equal must produce the same hash.
pub type HashFn<K> = fn(&K) -> u64;

/// KeyedIndex is a resizable hash map built from an array of independent
/// collision chains.
///
/// The hash function is injected by the caller, while key equality comes from [Eq].
/// Whenever an insertion of a new key would push the ratio of entries to buckets
/// over the maximum load factor, the bucket array is doubled and every entry
/// is rehashed, before the new key is added.
#[derive(Clone)]
pub struct KeyedIndex<K, V> {
    hash: HashFn<K>,
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    max_load_factor: f64,
}

impl<K: Eq, V> KeyedIndex<K, V> {
    /// Creates an empty index with the [DEFAULT_MAX_LOAD_FACTOR].
    pub fn new(hash: HashFn<K>) -> Self {
        Self::with_max_load_factor(hash, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Creates an empty index with a custom maximum load factor.
    ///
    /// Panics if `max_load_factor` is not a positive, finite number.
    pub fn with_max_load_factor(hash: HashFn<K>, max_load_factor: f64) -> Self {
        assert!(
            max_load_factor.is_finite() && max_load_factor > 0.0,
            "max load factor must be positive and finite, got {max_load_factor}"
        );

        Self {
            hash,
            buckets: empty_buckets(INITIAL_BUCKET_COUNT),
            len: 0,
            max_load_factor,
        }
    }

    /// Returns the number of distinct keys in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all entries and shrinks the index back to its initial bucket count.
    pub fn reset(&mut self) {
        self.buckets = empty_buckets(INITIAL_BUCKET_COUNT);
        self.len = 0;
    }

    /// Retrieves the value associated with `key`.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find_map(|(k, v)| if *k == *key { Some(v) } else { None })
    }

    /// Retrieves a mutable reference to the value associated with `key`.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let b = self.bucket_of(key);
        self.buckets[b]
            .iter_mut()
            .find_map(|(k, v)| if *k == *key { Some(v) } else { None })
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Associates `value` with `key`, overwriting any previous value.
    /// Returns the previous value, if there was one.
    pub fn associate(&mut self, key: K, value: V) -> Option<V> {
        if let Some(existing) = self.find_mut(&key) {
            return Some(std::mem::replace(existing, value));
        }

        self.insert_new(key, value);
        None
    }

    /// Returns the value associated with `key`, first associating
    /// the result of `make` if there is no such value.
    pub fn find_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, make: F) -> &mut V {
        let b = self.bucket_of(&key);
        if let Some(idx) = self.buckets[b].iter().position(|(k, _)| *k == key) {
            return &mut self.buckets[b][idx].1;
        }

        let (b, idx) = self.insert_new(key, make());
        &mut self.buckets[b][idx].1
    }

    /// Returns an iterator over all entries, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    /// Adds an entry for a key which is known to be absent, growing the
    /// bucket array first if necessary. Returns the position of the new entry.
    fn insert_new(&mut self, key: K, value: V) -> (usize, usize) {
        let new_load_factor = (self.len + 1) as f64 / self.buckets.len() as f64;
        if new_load_factor > self.max_load_factor {
            self.grow();
        }

        let b = self.bucket_of(&key);
        let bucket = &mut self.buckets[b];
        bucket.push((key, value));
        self.len += 1;
        (b, bucket.len() - 1)
    }

    fn grow(&mut self) {
        let new_bucket_count = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_bucket_count));

        for (k, v) in old.into_iter().flatten() {
            let b = self.bucket_of(&k);
            self.buckets[b].push((k, v));
        }

        debug_assert_eq!(self.iter().count(), self.len);
    }

    #[inline]
    fn bucket_of(&self, key: &K) -> usize {
        ((self.hash)(key) % self.buckets.len() as u64) as usize
    }
}

impl<K: Hash + Eq, V> Default for KeyedIndex<K, V> {
    /// Creates an empty index hashing keys with the standard library's [DefaultHasher].
    fn default() -> Self {
        Self::new(default_hash::<K>)
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for KeyedIndex<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().flatten().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Hashes a value with a [DefaultHasher] created with fixed keys,
/// so results are stable between runs.
pub(crate) fn default_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut h = DefaultHasher::new();
    key.hash(&mut h);
    h.finish()
}

fn empty_buckets<K, V>(count: usize) -> Vec<Vec<(K, V)>> {
    (0..count).map(|_| Vec::new()).collect()
}
