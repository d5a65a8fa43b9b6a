//! Service Module
//!
//! The validated, cached facade over the upstream registry.

mod employees;

pub use employees::EmployeeService;
