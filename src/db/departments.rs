use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::Result;
use crate::models::Department;

/// Retrieve every department in storage order.
pub fn list_departments(conn: &Connection) -> Result<Vec<Department>> {
    let mut stmt = conn.prepare("SELECT id, name FROM department")?;

    let departments = stmt
        .query_map([], |row| {
            Ok(Department {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(departments)
}

/// Insert a department and echo it back with the id SQLite assigned.
pub fn add_department(conn: &Connection, name: &str) -> Result<Department> {
    conn.execute("INSERT INTO department (name) VALUES (?1)", params![name])?;

    let id = conn.last_insert_rowid();
    debug!(id, name, "department inserted");
    Ok(Department {
        id,
        name: name.to_string(),
    })
}
