//! Core library surface for the employee tracker.
//!
//! `db` holds the schema loader and one function per SQL statement, `ui` the
//! terminal menu that drives them. The binary only parses flags and wires the
//! two together.
pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod ui;

pub use cli::Cli;

/// Convenience re-exports for the persistence layer.
pub use db::{ensure_schema, open_store, Scripts};

pub use error::{Error, Result};

/// Row types handed out by the data-access functions.
pub use models::{Department, Employee, EmployeeListing, Role, RoleListing};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
