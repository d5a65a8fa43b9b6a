//! reqwest-backed implementation of [`EmployeeApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{classify_status, EmployeeApi};
use crate::error::{GatewayError, Result};
use crate::models::{DeleteByName, Employee, Envelope, NewEmployee};

/// HTTP client for the upstream employee registry.
#[derive(Debug, Clone)]
pub struct HttpEmployeeClient {
    http: Client,
    base_url: Url,
}

impl HttpEmployeeClient {
    /// Creates a client rooted at `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            GatewayError::Internal(format!("Invalid upstream base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Internal(format!(
                "Upstream base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    fn employee_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Internal(format!("Cannot append id to {}", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Sends a request and unwraps the `{data, status}` envelope.
    ///
    /// Non-2xx statuses are classified; transport and decoding failures are
    /// protocol errors. `subject` is the employee a 404 refers to, `None` for
    /// collection calls.
    async fn exchange<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        subject: Option<&str>,
        context: &str,
    ) -> Result<Envelope<T>> {
        debug!("Upstream call: {}", context);

        let response = request.send().await.map_err(|e| {
            warn!("Upstream call {} failed: {}", context, e);
            GatewayError::Protocol(format!("{} failed: {}", context, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error = classify_status(status, subject, context);
            warn!("Upstream call {} returned {}", context, status);
            return Err(error);
        }

        response.json::<Envelope<T>>().await.map_err(|e| {
            warn!("Upstream call {} returned an unreadable body: {}", context, e);
            GatewayError::Protocol(format!("{} returned an unreadable body: {}", context, e))
        })
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeClient {
    async fn list_all(&self) -> Result<Vec<Employee>> {
        let context = format!("GET {}", self.base_url);
        let envelope: Envelope<Vec<Employee>> = self
            .exchange(self.http.get(self.base_url.clone()), None, &context)
            .await?;

        let employees = envelope.data.unwrap_or_default();
        debug!("Got {} employees from upstream", employees.len());
        Ok(employees)
    }

    async fn get_by_id(&self, id: &str) -> Result<Employee> {
        let url = self.employee_url(id)?;
        let context = format!("GET {}", url);
        let envelope: Envelope<Employee> = self
            .exchange(self.http.get(url), Some(id), &context)
            .await?;

        envelope
            .data
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee> {
        let context = format!("POST {}", self.base_url);
        let request = self.http.post(self.base_url.clone()).json(employee);
        let envelope: Envelope<Employee> = self.exchange(request, None, &context).await?;

        let created = envelope.data.ok_or_else(|| {
            GatewayError::Protocol(format!("{} returned no employee", context))
        })?;
        info!(
            "Created employee: {} ({})",
            created.employee_name.as_deref().unwrap_or("<unnamed>"),
            created.id
        );
        Ok(created)
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let context = format!("DELETE {}", self.base_url);
        let request = self
            .http
            .delete(self.base_url.clone())
            .json(&DeleteByName { name });
        let envelope: Envelope<bool> = self.exchange(request, Some(name), &context).await?;

        Ok(envelope.data.unwrap_or(false))
    }
}
