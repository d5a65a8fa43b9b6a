//! Cache namespaces and key fingerprints.

use std::fmt;

/// Sentinel key of the single LIST_ALL entry
pub const ALL_KEY: &str = "all";

// == Namespace ==
/// Independent key spaces of the employee cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// The full employee list, keyed by [`ALL_KEY`]
    ListAll,
    /// Individual employees keyed by id
    ById,
    /// Name searches keyed by [`search_key`]
    Search,
    /// Aggregates computed from the full list, keyed by [`DerivedKey`]
    Derived,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::ListAll,
        Namespace::ById,
        Namespace::Search,
        Namespace::Derived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::ListAll => "list_all",
            Namespace::ById => "by_id",
            Namespace::Search => "search",
            Namespace::Derived => "derived",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys of the DERIVED namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedKey {
    HighestSalary,
    TopTenEarners,
}

impl DerivedKey {
    pub fn as_str(self) -> &'static str {
        match self {
            DerivedKey::HighestSalary => "highest",
            DerivedKey::TopTenEarners => "top10",
        }
    }
}

// == Fingerprint ==
/// Builds a cache key from an operation name and its arguments.
///
/// Renders as `op:[a, b]`, or bare `op` without arguments.
pub fn fingerprint(operation: &str, args: &[&dyn fmt::Display]) -> String {
    if args.is_empty() {
        return operation.to_string();
    }

    let rendered: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    format!("{}:[{}]", operation, rendered.join(", "))
}

/// Key of a name search; case variants of one query share an entry.
pub fn search_key(query: &str) -> String {
    fingerprint("search", &[&query.to_lowercase()])
}
