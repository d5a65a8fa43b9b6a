//! Request and Response models for the gateway
//!
//! Upstream wire types, the validated create request, and the DTOs of the
//! auxiliary endpoints.

pub mod employee;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use employee::{DeleteByName, Employee, Envelope};
pub use requests::{CreateEmployeeInput, NewEmployee};
pub use responses::{HealthResponse, NamespaceStats, StatsResponse};
