//! Employee Gateway - a caching, retry-aware facade over an employee registry
//!
//! Validates requests, memoizes upstream reads in typed cache namespaces,
//! retries throttled or failing upstream calls with jittered backoff, and
//! computes salary aggregates from a single list call.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod retry;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{ErrorKind, GatewayError};
pub use service::EmployeeService;
pub use tasks::spawn_cleanup_task;
