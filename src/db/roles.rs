use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::Result;
use crate::models::{Role, RoleListing};

/// Every role joined to its department name. Roles whose department is gone
/// are skipped by the inner join.
pub fn list_roles(conn: &Connection) -> Result<Vec<RoleListing>> {
    let mut stmt = conn.prepare(
        "SELECT role.id, role.title, department.name AS department, role.salary
         FROM role
         JOIN department ON role.department_id = department.id",
    )?;

    let roles = stmt
        .query_map([], |row| {
            Ok(RoleListing {
                id: row.get(0)?,
                title: row.get(1)?,
                department: row.get(2)?,
                salary: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(roles)
}

/// Insert a role under `department_id`. An unknown department is rejected by
/// the foreign key and nothing is written.
pub fn add_role(conn: &Connection, title: &str, salary: f64, department_id: i64) -> Result<Role> {
    conn.execute(
        "INSERT INTO role (title, salary, department_id) VALUES (?1, ?2, ?3)",
        params![title, salary, department_id],
    )?;

    let id = conn.last_insert_rowid();
    debug!(id, title, department_id, "role inserted");
    Ok(Role {
        id,
        title: title.to_string(),
        salary,
        department_id,
    })
}
