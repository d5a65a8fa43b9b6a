//! Upstream Transport Module
//!
//! The four primitive calls against the upstream employee registry, behind
//! the [`EmployeeApi`] trait.

mod classify;
mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Employee, NewEmployee};

pub use classify::classify_status;
pub use http::HttpEmployeeClient;

/// Primitive operations of the upstream registry.
///
/// Every failure is a classified [`GatewayError`](crate::error::GatewayError);
/// implementations do not retry.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    /// `GET {base}`; an absent `data` array is an empty list.
    async fn list_all(&self) -> Result<Vec<Employee>>;

    /// `GET {base}/{id}`
    async fn get_by_id(&self, id: &str) -> Result<Employee>;

    /// `POST {base}` returning the server-assigned employee.
    async fn create(&self, employee: &NewEmployee) -> Result<Employee>;

    /// `DELETE {base}` with `{name}`; `true` when the upstream deleted a record.
    async fn delete_by_name(&self, name: &str) -> Result<bool>;
}
