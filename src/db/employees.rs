use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::Result;
use crate::models::{Employee, EmployeeListing};

/// Every employee with role title, department and salary. The manager is
/// resolved through a left self-join, so employees without one still show up
/// with `manager` set to `None`.
pub fn list_employees(conn: &Connection) -> Result<Vec<EmployeeListing>> {
    let mut stmt = conn.prepare(
        "SELECT e.id, e.first_name, e.last_name, r.title, d.name AS department, r.salary,
                m.first_name || ' ' || m.last_name AS manager
         FROM employee e
         JOIN role r ON e.role_id = r.id
         JOIN department d ON r.department_id = d.id
         LEFT JOIN employee m ON e.manager_id = m.id",
    )?;

    let employees = stmt
        .query_map([], |row| {
            Ok(EmployeeListing {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                title: row.get(3)?,
                department: row.get(4)?,
                salary: row.get(5)?,
                manager: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(employees)
}

/// Insert an employee. Both `role_id` and a present `manager_id` must point at
/// existing rows or SQLite rejects the insert.
pub fn add_employee(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
    role_id: i64,
    manager_id: Option<i64>,
) -> Result<Employee> {
    conn.execute(
        "INSERT INTO employee (first_name, last_name, role_id, manager_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![first_name, last_name, role_id, manager_id],
    )?;

    let id = conn.last_insert_rowid();
    debug!(id, role_id, ?manager_id, "employee inserted");
    Ok(Employee {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role_id,
        manager_id,
    })
}

/// Move an employee to another role and return how many rows changed. Zero
/// means no employee has that id; callers report it rather than fail.
pub fn update_employee_role(conn: &Connection, employee_id: i64, role_id: i64) -> Result<usize> {
    let changed = conn.execute(
        "UPDATE employee SET role_id = ?1 WHERE id = ?2",
        params![role_id, employee_id],
    )?;

    debug!(employee_id, role_id, changed, "employee role updated");
    Ok(changed)
}
