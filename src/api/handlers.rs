//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::debug;

use crate::cache::EmployeeCache;
use crate::client::HttpEmployeeClient;
use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::models::{CreateEmployeeInput, Employee, HealthResponse, StatsResponse};
use crate::retry::RetryPolicy;
use crate::service::EmployeeService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmployeeService>,
}

impl AppState {
    pub fn new(service: EmployeeService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the upstream HTTP client, retry policy and cache described by the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpEmployeeClient::new(
            &config.base_url,
            std::time::Duration::from_secs(config.request_timeout),
        )?;
        let cache = EmployeeCache::new(config.cache_max_entries, config.cache_ttl());
        let retry = RetryPolicy::new(config.retry.clone());

        Ok(Self::new(EmployeeService::new(Arc::new(client), retry, cache)))
    }
}

/// Handler for GET /api/v1/employee
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Arc<Vec<Employee>>>> {
    let employees = state.service.get_all().await?;
    debug!("Returning {} employees", employees.len());
    Ok(Json(employees))
}

/// Handler for GET /api/v1/employee/search/:search_string
pub async fn search_employees(
    State(state): State<AppState>,
    Path(search_string): Path<String>,
) -> Result<Json<Arc<Vec<Employee>>>> {
    Ok(Json(state.service.search(&search_string).await?))
}

/// Handler for GET /api/v1/employee/:id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Arc<Employee>>> {
    Ok(Json(state.service.get_by_id(&id).await?))
}

/// Handler for GET /api/v1/employee/highestSalary
pub async fn highest_salary(State(state): State<AppState>) -> Result<Json<i64>> {
    Ok(Json(state.service.highest_salary().await?))
}

/// Handler for GET /api/v1/employee/topTenHighestEarningEmployeeNames
pub async fn top_ten_earners(State(state): State<AppState>) -> Result<Json<Arc<Vec<String>>>> {
    Ok(Json(state.service.top_ten_earners().await?))
}

/// Handler for POST /api/v1/employee
///
/// A body that cannot be read as a create request is a validation failure,
/// reported under the `body` field.
pub async fn create_employee(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateEmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>> {
    let Json(input) = payload.map_err(|rejection| {
        GatewayError::invalid_field("body", rejection.body_text())
    })?;

    Ok(Json(state.service.create(&input).await?))
}

/// Handler for DELETE /api/v1/employee/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>> {
    Ok(Json(state.service.delete_by_id(&id).await?))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.service.cache_stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
