//! Response DTOs for the gateway's auxiliary endpoints
//!
//! Employee endpoints answer with the upstream shapes directly; these cover
//! health and cache introspection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::{CacheStats, Namespace};

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Statistics of one cache namespace, with its hit rate precomputed.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceStats {
    #[serde(flatten)]
    pub counters: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for NamespaceStats {
    fn from(counters: CacheStats) -> Self {
        let hit_rate = counters.hit_rate();
        Self { counters, hit_rate }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Sum over every namespace
    pub total: NamespaceStats,
    /// Per-namespace breakdown keyed by namespace name
    pub namespaces: BTreeMap<&'static str, NamespaceStats>,
}

impl StatsResponse {
    pub fn new(stats: BTreeMap<Namespace, CacheStats>) -> Self {
        let mut total = CacheStats::new();
        for counters in stats.values() {
            total.merge(counters);
        }

        Self {
            total: total.into(),
            namespaces: stats
                .into_iter()
                .map(|(namespace, counters)| (namespace.as_str(), counters.into()))
                .collect(),
        }
    }
}
