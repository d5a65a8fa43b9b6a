//! Cache Module
//!
//! Process-local memoization of upstream reads: typed namespaces with TTL
//! expiration, LRU capacity eviction and a mutation-driven invalidation matrix.

mod entry;
mod invalidation;
mod keys;
mod layer;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use invalidation::{Eviction, Mutation};
pub use keys::{fingerprint, search_key, DerivedKey, Namespace, ALL_KEY};
pub use layer::{DerivedValue, EmployeeCache, Generation};
pub use stats::CacheStats;
pub use store::CacheStore;
