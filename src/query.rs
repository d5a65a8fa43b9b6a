//! Derived queries
//!
//! Pure functions over a full employee list. None of them talk to the
//! upstream; the facade feeds them the (possibly cached) list-all result.

use crate::models::Employee;

/// How many names [`top_ten_earners`] returns at most
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `query`, ignoring case, in input order.
///
/// Employees without a name never match.
pub fn search(employees: &[Employee], query: &str) -> Vec<Employee> {
    let needle = query.to_lowercase();
    employees
        .iter()
        .filter(|employee| {
            employee
                .employee_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Largest known salary, or 0 when no employee has one.
pub fn highest_salary(employees: &[Employee]) -> i64 {
    employees
        .iter()
        .filter_map(|employee| employee.employee_salary)
        .max()
        .unwrap_or(0)
}

/// Names of the best-paid employees, highest salary first.
///
/// Employees missing a name or a salary are skipped. Equal salaries keep
/// their input order.
pub fn top_ten_earners(employees: &[Employee]) -> Vec<String> {
    let mut earners: Vec<(i64, &str)> = employees
        .iter()
        .filter_map(|employee| {
            Some((employee.employee_salary?, employee.employee_name.as_deref()?))
        })
        .collect();

    // sort_by is stable
    earners.sort_by(|a, b| b.0.cmp(&a.0));

    earners
        .into_iter()
        .take(TOP_EARNERS_LIMIT)
        .map(|(_, name)| name.to_string())
        .collect()
}
