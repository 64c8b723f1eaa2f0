use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    hash::Hash,
    rc::Rc,
};

use crate::{animation::keyframe::Keyframe, motion::fingerprint::BuildFingerprint};

/// Number of built keyframe lists kept per thread.
pub const KEYFRAME_CACHE_CAPACITY: usize = 40;

/// Bounded map with least-recently-used eviction.
///
/// Recency is tracked in a queue (front = least recent). Reads through [`BoundedCache::get`]
/// refresh an entry; [`BoundedCache::has`] does not.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    order: VecDeque<K>,
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash + Clone, V: Clone> BoundedCache<K, V> {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return `true` when `key` is cached, without refreshing it.
    pub fn has(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up `key` and mark it most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let value = self.entries.get(key)?.clone();
        self.touch(key);
        Some(value)
    }

    /// Insert or replace `key`, evicting the least recently used entry when full.
    pub fn set(&mut self, key: K, value: V) {
        if self.entries.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return;
        }
        if self.entries.len() > self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
        }
        self.order.push_back(key);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key)
            && let Some(k) = self.order.remove(pos)
        {
            self.order.push_back(k);
        }
    }
}

/// Cache of built motion-path keyframe lists.
pub type KeyframeCache = BoundedCache<BuildFingerprint, Rc<[Keyframe]>>;

/// Handle to a keyframe cache shared between motion paths on one thread.
pub type SharedKeyframeCache = Rc<RefCell<KeyframeCache>>;

thread_local! {
    static SHARED: SharedKeyframeCache =
        Rc::new(RefCell::new(KeyframeCache::new(KEYFRAME_CACHE_CAPACITY)));
}

/// The calling thread's default keyframe cache.
pub fn shared_keyframe_cache() -> SharedKeyframeCache {
    SHARED.with(Rc::clone)
}

#[cfg(test)]
#[path = "../../tests/unit/motion/cache.rs"]
mod tests;
