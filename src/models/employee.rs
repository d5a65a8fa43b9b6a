//! Employee wire types
//!
//! Mirrors the upstream registry's JSON shapes. Every read payload is wrapped
//! in an [`Envelope`].

use serde::{Deserialize, Serialize};

/// An employee snapshot as reported by the upstream registry.
///
/// Everything but the id may be `null` on the wire; the derived queries
/// skip records with missing names or salaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub employee_salary: Option<i64>,
    #[serde(default)]
    pub employee_age: Option<i64>,
    #[serde(default)]
    pub employee_title: Option<String>,
    #[serde(default)]
    pub employee_email: Option<String>,
}

/// Upstream response wrapper `{data, status}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of the upstream `DELETE` call.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteByName<'a> {
    pub name: &'a str,
}
