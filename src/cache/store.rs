//! Cache Store Module
//!
//! Single-namespace cache engine combining HashMap storage with LRU eviction
//! and TTL expiration.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and TTL support.
///
/// Values are handed out by clone, so large payloads should be stored behind
/// an `Arc`.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Access tick -> key, oldest first; holds exactly one tick per entry
    recency: BTreeMap<u64, String>,
    stats: CacheStats,
    max_entries: usize,
    ttl: Option<Duration>,
    /// Monotonic access counter
    tick: u64,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and entry lifetime.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries, at least one is always allowed
    /// * `ttl` - Lifetime of each entry, `None` to keep entries until evicted
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl,
            tick: 0,
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(&entry.last_used);
        Some(entry)
    }

    // == Insert ==
    /// Stores a value, replacing any previous value and resetting its TTL.
    ///
    /// If the store is at capacity and the key is new, the least recently
    /// used entry is evicted first.
    pub fn insert(&mut self, key: String, value: V) {
        if self.remove_entry(&key).is_none() && self.entries.len() >= self.max_entries {
            self.evict_least_recent();
        }

        let tick = self.next_tick();
        self.recency.insert(tick, key.clone());
        self.entries
            .insert(key, CacheEntry::new(value, self.ttl, tick));
        self.stats.set_total_entries(self.entries.len());
    }

    fn evict_least_recent(&mut self) {
        if let Some((_, key)) = self.recency.pop_first() {
            self.entries.remove(&key);
            self.stats.record_eviction();
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let tick = self.next_tick();
        let now = Instant::now();

        if let Some(entry) = self.entries.get_mut(key) {
            if !entry.is_expired_at(now) {
                let previous = std::mem::replace(&mut entry.last_used, tick);
                let value = entry.value.clone();
                if let Some(owned) = self.recency.remove(&previous) {
                    self.recency.insert(tick, owned);
                }
                self.stats.record_hit();
                return Some(value);
            }
            self.remove_entry(key);
            self.stats.set_total_entries(self.entries.len());
        }

        self.stats.record_miss();
        None
    }

    /// Checks for a live entry without touching LRU order or statistics.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Invalidate ==
    /// Removes an entry by key, returning whether it was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key).is_some();
        if removed {
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    /// Removes every entry, returning how many were dropped.
    pub fn invalidate_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.recency.clear();
        self.stats.record_invalidations(count);
        self.stats.set_total_entries(0);
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        let recency = &mut self.recency;
        self.entries.retain(|_, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                recency.remove(&entry.last_used);
            }
            !expired
        });
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
