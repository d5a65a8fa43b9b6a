//! API Module
//!
//! HTTP handlers and routing for the gateway's REST API.
//!
//! # Endpoints
//! - `GET|POST /api/v1/employee` - List or create employees
//! - `GET /api/v1/employee/search/:search_string` - Case-insensitive name search
//! - `GET /api/v1/employee/highestSalary` - Highest salary
//! - `GET /api/v1/employee/topTenHighestEarningEmployeeNames` - Top ten earners
//! - `GET|DELETE /api/v1/employee/:id` - Fetch or delete by id
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, EMPLOYEE_PATH};
