// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read cache with explicit invalidation.
//!
//! Every cached read is filed under a [`QueryKey`] whose `tag` names the
//! table it came from. Writers call [`QueryCache::invalidate`] with the tags
//! they touched; nothing expires on its own.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub tag: &'static str,
    pub params: Vec<String>,
}

impl QueryKey {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            params: Vec::new(),
        }
    }

    pub fn with(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }
}

#[derive(Debug)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, V>,
    hits: u64,
    misses: u64,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &QueryKey) -> Option<V> {
        match self.entries.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: QueryKey, value: V) {
        self.entries.insert(key, value);
    }

    /// Cached value for `key`, running `load` on a miss. A failed load
    /// caches nothing.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: QueryKey,
        load: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(v) = self.get(&key) {
            tracing::trace!(tag = key.tag, params = ?key.params, "cache hit");
            return Ok(v);
        }
        tracing::trace!(tag = key.tag, params = ?key.params, "cache miss");
        let value = load()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Drop every entry filed under `tag`. Returns how many went.
    pub fn invalidate(&mut self, tag: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| k.tag != tag);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(tag, dropped, "cache invalidated");
        }
        dropped
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
