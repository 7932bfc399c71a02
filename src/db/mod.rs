//! Persistence module split across logical submodules. Every query takes the
//! connection explicitly; nothing here holds state between calls.

mod connection;
mod departments;
mod employees;
mod roles;
mod schema;

pub use connection::{data_dir, default_db_path, open_in_memory, open_store};
pub use departments::{add_department, list_departments};
pub use employees::{add_employee, list_employees, update_employee_role};
pub use roles::{add_role, list_roles};
pub use schema::{ensure_schema, initialize, is_initialized, Scripts};
