//! Retry Module
//!
//! Bounded exponential backoff for upstream calls that failed with a
//! retryable error kind.

mod policy;

pub use policy::{RetryConfig, RetryPolicy};
