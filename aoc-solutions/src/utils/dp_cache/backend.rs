//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// Where a [`DpCache`](super::DpCache) keeps resolved values.
///
/// A backend never evicts: once an index holds a value, `get` keeps
/// returning it and `get_or_insert` never calls its closure again.
pub trait Backend<I, K> {
    /// The cached value for `index`, if it has been computed.
    fn get(&self, index: &I) -> Option<&K>;

    /// Return the cached value, computing and storing it with `f` if absent.
    fn get_or_insert<F>(&mut self, index: I, f: F) -> &K
    where
        F: FnOnce() -> K;
}

/// Dense backend for `usize` indices starting at 0. Grows on demand.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Pre-size for indices `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, || None);
        Self { data }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn get_or_insert<F>(&mut self, index: usize, f: F) -> &K
    where
        F: FnOnce() -> K,
    {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index].get_or_insert_with(f)
    }
}

/// Sparse backend for any hashable index.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert<F>(&mut self, index: I, f: F) -> &K
    where
        F: FnOnce() -> K,
    {
        self.data.entry(index).or_insert_with(f)
    }
}
