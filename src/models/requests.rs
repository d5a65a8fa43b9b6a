//! Request DTOs for the gateway API
//!
//! Defines the structure of incoming HTTP request bodies and the validation
//! that turns them into upstream payloads.

use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, GatewayError, Result};

/// Youngest age the registry accepts
pub const MIN_AGE: i64 = 16;
/// Oldest age the registry accepts
pub const MAX_AGE: i64 = 75;

/// Request body for creating an employee (POST /api/v1/employee)
///
/// Every field is optional at this stage so that missing fields surface as
/// per-field validation messages rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEmployeeInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A validated create request, serialized with the upstream's plain keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub salary: i64,
    pub age: i64,
    pub title: String,
}

impl CreateEmployeeInput {
    /// Validates the request data.
    ///
    /// Collects every violation before failing so clients see all of them at once.
    pub fn validate(&self) -> Result<NewEmployee> {
        let mut errors = FieldErrors::new();

        let name = required_text(&self.name);
        if name.is_none() {
            errors.insert("name".into(), "Name is required".into());
        }

        match self.salary {
            None => {
                errors.insert("salary".into(), "Salary is required".into());
            }
            Some(salary) if salary <= 0 => {
                errors.insert("salary".into(), "Salary must be greater than zero".into());
            }
            Some(_) => {}
        }

        match self.age {
            None => {
                errors.insert("age".into(), "Age is required".into());
            }
            Some(age) if age < MIN_AGE => {
                errors.insert("age".into(), format!("Age must be at least {}", MIN_AGE));
            }
            Some(age) if age > MAX_AGE => {
                errors.insert("age".into(), format!("Age must be at most {}", MAX_AGE));
            }
            Some(_) => {}
        }

        let title = required_text(&self.title);
        if title.is_none() {
            errors.insert("title".into(), "Title is required".into());
        }

        match (name, self.salary, self.age, title) {
            (Some(name), Some(salary), Some(age), Some(title)) if errors.is_empty() => {
                Ok(NewEmployee {
                    name: name.to_string(),
                    salary,
                    age,
                    title: title.to_string(),
                })
            }
            _ => Err(GatewayError::InvalidInput(errors)),
        }
    }
}

fn required_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
