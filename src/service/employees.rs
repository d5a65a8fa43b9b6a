//! Employee Service
//!
//! Validates input, answers reads from the cache, fills misses through the
//! retry policy, and applies the invalidation matrix after mutations.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{CacheStats, DerivedKey, DerivedValue, EmployeeCache, Mutation, Namespace};
use crate::client::EmployeeApi;
use crate::error::{GatewayError, Result};
use crate::models::{CreateEmployeeInput, Employee};
use crate::query;
use crate::retry::RetryPolicy;

/// The gateway's outward-facing operations.
pub struct EmployeeService {
    api: Arc<dyn EmployeeApi>,
    retry: RetryPolicy,
    cache: EmployeeCache,
}

impl EmployeeService {
    pub fn new(api: Arc<dyn EmployeeApi>, retry: RetryPolicy, cache: EmployeeCache) -> Self {
        Self { api, retry, cache }
    }

    pub fn cache(&self) -> &EmployeeCache {
        &self.cache
    }

    // == Reads ==
    /// Every employee, from the cache or a single upstream list call.
    pub async fn get_all(&self) -> Result<Arc<Vec<Employee>>> {
        if let Some(employees) = self.cache.all_employees() {
            debug!("Cache hit: {} employees", employees.len());
            return Ok(employees);
        }

        let generation = self.cache.generation();
        let employees = Arc::new(self.retry.run("list_all", || self.api.list_all()).await?);
        self.cache.store_all_employees(generation, employees.clone());
        debug!("Cached {} employees", employees.len());
        Ok(employees)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Arc<Employee>> {
        if let Some(employee) = self.cache.employee(id) {
            debug!("Cache hit: employee {}", id);
            return Ok(employee);
        }

        let generation = self.cache.generation();
        let employee = Arc::new(self.retry.run("get_by_id", || self.api.get_by_id(id)).await?);
        self.cache.store_employee(generation, id, employee.clone());
        Ok(employee)
    }

    /// Employees whose name contains `query`, ignoring case.
    pub async fn search(&self, query: &str) -> Result<Arc<Vec<Employee>>> {
        if let Some(results) = self.cache.search_results(query) {
            debug!("Cache hit: search '{}'", query);
            return Ok(results);
        }

        // Taken before the list so a mutation in between discards this fill
        let generation = self.cache.generation();
        let employees = self.get_all().await?;
        let results = Arc::new(query::search(&employees, query));
        self.cache
            .store_search_results(generation, query, results.clone());
        Ok(results)
    }

    pub async fn highest_salary(&self) -> Result<i64> {
        if let Some(DerivedValue::HighestSalary(salary)) =
            self.cache.derived(DerivedKey::HighestSalary)
        {
            return Ok(salary);
        }

        let generation = self.cache.generation();
        let employees = self.get_all().await?;
        let salary = query::highest_salary(&employees);
        self.cache.store_derived(
            generation,
            DerivedKey::HighestSalary,
            DerivedValue::HighestSalary(salary),
        );
        Ok(salary)
    }

    pub async fn top_ten_earners(&self) -> Result<Arc<Vec<String>>> {
        if let Some(DerivedValue::TopTenEarners(names)) =
            self.cache.derived(DerivedKey::TopTenEarners)
        {
            return Ok(names);
        }

        let generation = self.cache.generation();
        let employees = self.get_all().await?;
        let names = Arc::new(query::top_ten_earners(&employees));
        self.cache.store_derived(
            generation,
            DerivedKey::TopTenEarners,
            DerivedValue::TopTenEarners(names.clone()),
        );
        Ok(names)
    }

    // == Mutations ==
    /// Validates and creates an employee upstream.
    ///
    /// Invalid input is rejected before the cache or the upstream is touched.
    pub async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee> {
        let new_employee = input.validate()?;
        info!("Creating new employee: {}", new_employee.name);

        let created = self
            .retry
            .run("create", || self.api.create(&new_employee))
            .await?;

        self.cache.invalidate(&Mutation::Create);
        Ok(created)
    }

    /// Deletes the employee with `id`, returning its name.
    ///
    /// The upstream deletes by name, so the id is resolved first (possibly
    /// from the cache).
    pub async fn delete_by_id(&self, id: &str) -> Result<String> {
        let employee = self.get_by_id(id).await?;
        let name = employee
            .employee_name
            .clone()
            .ok_or_else(|| GatewayError::Protocol(format!("Employee {} has no name", id)))?;

        let deleted = self
            .retry
            .run("delete_by_name", || self.api.delete_by_name(&name))
            .await?;
        if !deleted {
            return Err(GatewayError::UpstreamPermanent(format!("Couldn't delete {}", name)));
        }

        self.cache.invalidate(&Mutation::DeleteById(id.to_string()));
        info!("Deleted employee: {} ({})", name, id);
        Ok(name)
    }

    pub fn cache_stats(&self) -> BTreeMap<Namespace, CacheStats> {
        self.cache.stats()
    }
}
