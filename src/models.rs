//! Row types that mirror the SQLite schema. The plain structs match single
//! tables and come back from inserts; the `*Listing` structs hold the joined
//! rows shown in the "View all" tables.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// A row of the `department` table.
pub struct Department {
    /// Primary key assigned by SQLite.
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A row of the `role` table as inserted.
pub struct Role {
    pub id: i64,
    pub title: String,
    pub salary: f64,
    /// Foreign key into `department`.
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
/// A row of the `employee` table as inserted.
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Foreign key into `role`.
    pub role_id: i64,
    /// Self-reference to the employee's manager, if any.
    pub manager_id: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A role joined to the name of its department.
pub struct RoleListing {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub salary: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// An employee joined to their role, the role's department and the manager's
/// full name. `manager` is `None` when the employee reports to nobody.
pub struct EmployeeListing {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub department: String,
    pub salary: f64,
    pub manager: Option<String>,
}

/// Render a salary without a trailing `.0` for whole amounts and with two
/// decimals otherwise.
pub fn format_salary(salary: f64) -> String {
    if salary.fract() == 0.0 {
        format!("{salary:.0}")
    } else {
        format!("{salary:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_salaries_drop_the_fraction() {
        assert_eq!(format_salary(85000.0), "85000");
        assert_eq!(format_salary(85000.5), "85000.50");
    }

    #[test]
    fn employee_full_name_joins_both_parts() {
        let employee = Employee {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role_id: 1,
            manager_id: None,
        };
        assert_eq!(employee.full_name(), "Ada Lovelace");
    }
}
