//! Employee Cache Layer
//!
//! Four typed namespaces, each an independent [`CacheStore`] behind its own
//! lock, plus the generation counter that keeps values computed before a
//! mutation from being stored after it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use super::invalidation::{Eviction, Mutation};
use super::keys::{search_key, DerivedKey, Namespace, ALL_KEY};
use super::{CacheStats, CacheStore};
use crate::models::Employee;

/// Values of the DERIVED namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedValue {
    HighestSalary(i64),
    TopTenEarners(Arc<Vec<String>>),
}

/// Generation observed before a cache fill; stores made with a stale token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

// == Employee Cache ==
/// Process-local cache shared by every request.
///
/// Locks are synchronous and only held for the duration of a single map
/// operation, never across an upstream call.
#[derive(Debug)]
pub struct EmployeeCache {
    list_all: RwLock<CacheStore<Arc<Vec<Employee>>>>,
    by_id: RwLock<CacheStore<Arc<Employee>>>,
    search: RwLock<CacheStore<Arc<Vec<Employee>>>>,
    derived: RwLock<CacheStore<DerivedValue>>,
    generation: AtomicU64,
}

impl EmployeeCache {
    /// Creates a cache whose namespaces each hold up to `max_entries` entries for `ttl`.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            list_all: RwLock::new(CacheStore::new(max_entries, ttl)),
            by_id: RwLock::new(CacheStore::new(max_entries, ttl)),
            search: RwLock::new(CacheStore::new(max_entries, ttl)),
            derived: RwLock::new(CacheStore::new(max_entries, ttl)),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the generation, taken before a miss is filled.
    pub fn generation(&self) -> Generation {
        Generation(self.generation.load(Ordering::Acquire))
    }

    fn is_current(&self, generation: Generation) -> bool {
        self.generation.load(Ordering::Acquire) == generation.0
    }

    /// Inserts under the namespace lock unless an invalidation happened since `generation`.
    fn store_if_current<V: Clone>(
        &self,
        namespace: Namespace,
        store: &RwLock<CacheStore<V>>,
        generation: Generation,
        key: String,
        value: V,
    ) -> bool {
        let mut guard = store.write();
        if !self.is_current(generation) {
            debug!(%namespace, key = %key, "Dropping cache fill computed before an invalidation");
            return false;
        }
        guard.insert(key, value);
        true
    }

    // == LIST_ALL ==
    pub fn all_employees(&self) -> Option<Arc<Vec<Employee>>> {
        // Write lock: reads update LRU order and stats
        self.list_all.write().get(ALL_KEY)
    }

    pub fn store_all_employees(&self, generation: Generation, employees: Arc<Vec<Employee>>) -> bool {
        self.store_if_current(
            Namespace::ListAll,
            &self.list_all,
            generation,
            ALL_KEY.to_string(),
            employees,
        )
    }

    // == BY_ID ==
    pub fn employee(&self, id: &str) -> Option<Arc<Employee>> {
        self.by_id.write().get(id)
    }

    pub fn store_employee(&self, generation: Generation, id: &str, employee: Arc<Employee>) -> bool {
        self.store_if_current(Namespace::ById, &self.by_id, generation, id.to_string(), employee)
    }

    // == SEARCH ==
    pub fn search_results(&self, query: &str) -> Option<Arc<Vec<Employee>>> {
        self.search.write().get(&search_key(query))
    }

    pub fn store_search_results(
        &self,
        generation: Generation,
        query: &str,
        results: Arc<Vec<Employee>>,
    ) -> bool {
        self.store_if_current(
            Namespace::Search,
            &self.search,
            generation,
            search_key(query),
            results,
        )
    }

    // == DERIVED ==
    pub fn derived(&self, key: DerivedKey) -> Option<DerivedValue> {
        self.derived.write().get(key.as_str())
    }

    pub fn store_derived(&self, generation: Generation, key: DerivedKey, value: DerivedValue) -> bool {
        self.store_if_current(
            Namespace::Derived,
            &self.derived,
            generation,
            key.as_str().to_string(),
            value,
        )
    }

    // == Invalidation ==
    /// Applies the invalidation matrix row of `mutation`.
    ///
    /// Each eviction is atomic within its namespace; readers may observe the
    /// namespaces clearing one after another.
    pub fn invalidate(&self, mutation: &Mutation) {
        self.generation.fetch_add(1, Ordering::AcqRel);

        for eviction in mutation.evictions() {
            match eviction {
                Eviction::All(namespace) => {
                    let removed = self.invalidate_namespace(namespace);
                    debug!(%namespace, removed, "Invalidated cache namespace");
                }
                Eviction::Key(namespace, key) => {
                    let removed = self.invalidate_key(namespace, &key);
                    debug!(%namespace, key = %key, removed, "Invalidated cache key");
                }
            }
        }
    }

    fn invalidate_namespace(&self, namespace: Namespace) -> usize {
        match namespace {
            Namespace::ListAll => self.list_all.write().invalidate_all(),
            Namespace::ById => self.by_id.write().invalidate_all(),
            Namespace::Search => self.search.write().invalidate_all(),
            Namespace::Derived => self.derived.write().invalidate_all(),
        }
    }

    fn invalidate_key(&self, namespace: Namespace, key: &str) -> bool {
        match namespace {
            Namespace::ListAll => self.list_all.write().invalidate(key),
            Namespace::ById => self.by_id.write().invalidate(key),
            Namespace::Search => self.search.write().invalidate(key),
            Namespace::Derived => self.derived.write().invalidate(key),
        }
    }

    /// Checks for a live entry without affecting statistics.
    pub fn contains(&self, namespace: Namespace, key: &str) -> bool {
        match namespace {
            Namespace::ListAll => self.list_all.read().contains(key),
            Namespace::ById => self.by_id.read().contains(key),
            Namespace::Search => self.search.read().contains(key),
            Namespace::Derived => self.derived.read().contains(key),
        }
    }

    /// Number of live or not-yet-swept entries in a namespace.
    pub fn len(&self, namespace: Namespace) -> usize {
        match namespace {
            Namespace::ListAll => self.list_all.read().len(),
            Namespace::ById => self.by_id.read().len(),
            Namespace::Search => self.search.read().len(),
            Namespace::Derived => self.derived.read().len(),
        }
    }

    // == Maintenance ==
    /// Sweeps expired entries from every namespace, returning the total removed.
    pub fn cleanup_expired(&self) -> usize {
        self.list_all.write().cleanup_expired()
            + self.by_id.write().cleanup_expired()
            + self.search.write().cleanup_expired()
            + self.derived.write().cleanup_expired()
    }

    pub fn stats(&self) -> BTreeMap<Namespace, CacheStats> {
        BTreeMap::from([
            (Namespace::ListAll, self.list_all.read().stats()),
            (Namespace::ById, self.by_id.read().stats()),
            (Namespace::Search, self.search.read().stats()),
            (Namespace::Derived, self.derived.read().stats()),
        ])
    }
}
