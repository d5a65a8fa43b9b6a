//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_employee, delete_employee, get_employee, health_handler, highest_salary,
    list_employees, search_employees, stats_handler, top_ten_earners, AppState,
};

/// Prefix shared by every employee endpoint
pub const EMPLOYEE_PATH: &str = "/api/v1/employee";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/v1/employee` - List every employee
/// - `POST /api/v1/employee` - Create an employee
/// - `GET /api/v1/employee/search/:search_string` - Name search
/// - `GET /api/v1/employee/highestSalary` - Highest salary
/// - `GET /api/v1/employee/topTenHighestEarningEmployeeNames` - Top ten earners
/// - `GET /api/v1/employee/:id` - Employee by id
/// - `DELETE /api/v1/employee/:id` - Delete by id, returning the name
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Static segments take priority over `:id`
    Router::new()
        .route(EMPLOYEE_PATH, get(list_employees).post(create_employee))
        .route(
            &format!("{}/search/:search_string", EMPLOYEE_PATH),
            get(search_employees),
        )
        .route(&format!("{}/highestSalary", EMPLOYEE_PATH), get(highest_salary))
        .route(
            &format!("{}/topTenHighestEarningEmployeeNames", EMPLOYEE_PATH),
            get(top_ten_earners),
        )
        .route(
            &format!("{}/:id", EMPLOYEE_PATH),
            get(get_employee).delete(delete_employee),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
