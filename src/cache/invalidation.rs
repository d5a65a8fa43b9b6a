//! Invalidation matrix
//!
//! Maps each successful upstream mutation to the cache entries it makes stale.

use super::keys::Namespace;

/// A successful upstream mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create,
    DeleteById(String),
}

/// One row of the invalidation matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eviction {
    /// Drop every entry of the namespace
    All(Namespace),
    /// Drop a single key
    Key(Namespace, String),
}

/// Evictions shared by every mutation. LIST_ALL goes first and DERIVED always
/// travels with it.
const LIST_DEPENDENT: [Namespace; 3] = [Namespace::ListAll, Namespace::Search, Namespace::Derived];

impl Mutation {
    /// Entries that must be evicted once this mutation has succeeded upstream.
    pub fn evictions(&self) -> Vec<Eviction> {
        let mut evictions: Vec<Eviction> = LIST_DEPENDENT.into_iter().map(Eviction::All).collect();
        if let Mutation::DeleteById(id) = self {
            evictions.push(Eviction::Key(Namespace::ById, id.clone()));
        }
        evictions
    }
}
