//! Integration Tests for API Endpoints
//!
//! Drives the full router against a mock upstream registry.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use employee_gateway::{api::create_router, retry::RetryConfig, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPSTREAM_PATH: &str = "/api/v1/employee";

// == Helper Functions ==

fn create_test_app(server: &MockServer) -> Router {
    let config = Config {
        base_url: format!("{}{}", server.uri(), UPSTREAM_PATH),
        request_timeout: 5,
        retry: RetryConfig {
            max_attempts: 8,
            base_delay: Duration::from_millis(1),
            multiplier: 2.0,
            max_delay: Duration::from_millis(5),
            jitter: false,
        },
        ..Config::default()
    };
    create_router(AppState::from_config(&config).unwrap())
}

fn employee(id: &str, name: Option<&str>, salary: i64) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 30,
        "employee_title": "Engineer",
        "employee_email": null
    })
}

fn two_employees() -> Value {
    json!([
        employee("1", Some("Soumadipta Roy"), 50000),
        employee("2", Some("Somantika Sarkar"), 60000)
    ])
}

fn envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data, "status": "success" }))
}

async fn mount_list(server: &MockServer, data: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(envelope(data))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header("content-type", "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn upstream_requests(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |requests| requests.len())
}

// == Validation ==

#[tokio::test]
async fn test_create_validation_reports_every_field() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/employee",
        Some(r#"{"name":"","salary":-1000,"age":15,"title":""}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "error": "Validation failed",
            "details": {
                "name": "Name is required",
                "salary": "Salary must be greater than zero",
                "age": "Age must be at least 16",
                "title": "Title is required"
            }
        })
    );
    assert_eq!(upstream_requests(&server).await, 0);
}

#[tokio::test]
async fn test_create_with_non_integer_salary_is_rejected() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/employee",
        Some(r#"{"name":"A","salary":"lots","age":30,"title":"Dev"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Validation failed");
    assert!(json["details"]["body"].is_string());
    assert_eq!(upstream_requests(&server).await, 0);
}

// == Reads and Derived Queries ==

#[tokio::test]
async fn test_list_and_derived_queries_share_one_upstream_call() {
    let server = MockServer::start().await;
    mount_list(&server, two_employees(), 1).await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/api/v1/employee", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["employee_name"], "Soumadipta Roy");

    let (status, json) = send(&app, "GET", "/api/v1/employee/highestSalary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!(60000));

    let (status, json) = send(
        &app,
        "GET",
        "/api/v1/employee/topTenHighestEarningEmployeeNames",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!(["Somantika Sarkar", "Soumadipta Roy"]));
}

#[tokio::test]
async fn test_nameless_employee_is_skipped_by_name_queries() {
    let server = MockServer::start().await;
    let data = json!([
        employee("1", Some("Soumadipta Roy"), 50000),
        employee("2", Some("Somantika Sarkar"), 60000),
        employee("3", None, 70000)
    ]);
    mount_list(&server, data, 1).await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/api/v1/employee/search/Sou", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1"]);

    let (_, json) = send(&app, "GET", "/api/v1/employee/highestSalary", None).await;
    assert_eq!(json, json!(70000));

    let (_, json) = send(
        &app,
        "GET",
        "/api/v1/employee/topTenHighestEarningEmployeeNames",
        None,
    )
    .await;
    assert_eq!(json, json!(["Somantika Sarkar", "Soumadipta Roy"]));
}

#[tokio::test]
async fn test_search_ignores_case_and_is_cached() {
    let server = MockServer::start().await;
    mount_list(&server, two_employees(), 1).await;
    let app = create_test_app(&server);

    let (_, lower) = send(&app, "GET", "/api/v1/employee/search/som", None).await;
    let (_, upper) = send(&app, "GET", "/api/v1/employee/search/SOM", None).await;

    assert_eq!(lower, upper);
    assert_eq!(lower.as_array().unwrap().len(), 1);
    assert_eq!(lower[0]["employee_name"], "Somantika Sarkar");

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["namespaces"]["search"]["hits"], 1);
}

#[tokio::test]
async fn test_get_by_id_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/employee/1"))
        .respond_with(envelope(employee("1", Some("Soumadipta Roy"), 50000)))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (first_status, first) = send(&app, "GET", "/api/v1/employee/1", None).await;
    let (second_status, second) = send(&app, "GET", "/api/v1/employee/1", None).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["employee_salary"], 50000);
}

#[tokio::test]
async fn test_unknown_employee_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/employee/999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/api/v1/employee/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        json!({ "error": "Employee not found", "message": "Employee not found: 999" })
    );
}

// == Mutations ==

#[tokio::test]
async fn test_delete_returns_name_and_invalidates_list() {
    let server = MockServer::start().await;
    mount_list(&server, two_employees(), 2).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/employee/123"))
        .respond_with(envelope(employee("123", Some("Soumadipta Roy"), 50000)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(UPSTREAM_PATH))
        .and(body_json(json!({ "name": "Soumadipta Roy" })))
        .respond_with(envelope(json!(true)))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, _) = send(&app, "GET", "/api/v1/employee", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "DELETE", "/api/v1/employee/123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!("Soumadipta Roy"));

    let (status, _) = send(&app, "GET", "/api/v1/employee", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refused_delete_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/employee/5"))
        .respond_with(envelope(employee("5", Some("Ada"), 1000)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(UPSTREAM_PATH))
        .respond_with(envelope(json!(false)))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "DELETE", "/api/v1/employee/5", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Service error");
    assert!(json["message"].as_str().unwrap().contains("Couldn't delete Ada"));
}

#[tokio::test]
async fn test_create_invalidates_list_and_derived() {
    let server = MockServer::start().await;
    mount_list(&server, two_employees(), 2).await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .and(body_json(
            json!({ "name": "Ada", "salary": 90000, "age": 36, "title": "Engineer" }),
        ))
        .respond_with(envelope(employee("4", Some("Ada"), 90000)))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (_, json) = send(&app, "GET", "/api/v1/employee/highestSalary", None).await;
    assert_eq!(json, json!(60000));

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/employee",
        Some(r#"{"name":"Ada","salary":90000,"age":36,"title":"Engineer"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], "4");

    // Recomputed from a fresh list call
    let (status, _) = send(&app, "GET", "/api/v1/employee/highestSalary", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert!(stats["namespaces"]["derived"]["invalidations"].as_u64().unwrap() >= 1);
}

// == Retry ==

#[tokio::test]
async fn test_rate_limited_calls_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(3)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_list(&server, two_employees(), 1).await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/api/v1/employee", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(upstream_requests(&server).await, 4);
}

#[tokio::test]
async fn test_exhausted_retries_are_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(8)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/api/v1/employee", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Service error");
}

#[tokio::test]
async fn test_rate_limit_exhaustion_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(8)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/api/v1/employee/highestSalary", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Service error");
    assert_eq!(upstream_requests(&server).await, 8);
}

#[tokio::test]
async fn test_missing_upstream_collection_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    for uri in [
        "/api/v1/employee",
        "/api/v1/employee/highestSalary",
        "/api/v1/employee/search/Sou",
    ] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(json["error"], "Service error", "{}", uri);
    }
}

#[tokio::test]
async fn test_create_against_missing_collection_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/employee",
        Some(r#"{"name":"Ada","salary":90000,"age":36,"title":"Engineer"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Service error");
}

#[tokio::test]
async fn test_permanent_upstream_rejection_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/api/v1/employee", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Service error");
}

// == Auxiliary Endpoints ==

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
