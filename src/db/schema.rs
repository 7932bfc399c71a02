//! Table definitions and seed rows. Both scripts are bundled into the binary
//! and can be swapped for files on disk with the same names.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::{error, info};

use crate::error::{Error, Result};

const SCHEMA_FILE: &str = "schema.sql";
const SEEDS_FILE: &str = "seeds.sql";

const BUNDLED_SCHEMA: &str = include_str!("../../db/schema.sql");
const BUNDLED_SEEDS: &str = include_str!("../../db/seeds.sql");

/// The pair of SQL batches applied at initialization, schema first.
#[derive(Debug, Clone)]
pub struct Scripts {
    pub schema: String,
    pub seeds: String,
}

impl Scripts {
    /// Scripts compiled in from `db/`.
    pub fn bundled() -> Self {
        Self {
            schema: BUNDLED_SCHEMA.to_string(),
            seeds: BUNDLED_SEEDS.to_string(),
        }
    }

    /// Read `schema.sql` and `seeds.sql` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            schema: read_script(&dir.join(SCHEMA_FILE))?,
            seeds: read_script(&dir.join(SEEDS_FILE))?,
        })
    }
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Script {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply the schema batch and then the seed batch. A failing batch stops
/// initialization where it is; statements that already ran stay applied.
pub fn initialize(conn: &Connection, scripts: &Scripts) -> Result<()> {
    conn.execute_batch(&scripts.schema).map_err(|err| {
        error!(%err, "error creating schema");
        Error::from(err)
    })?;
    conn.execute_batch(&scripts.seeds).map_err(|err| {
        error!(%err, "error inserting seeds");
        Error::from(err)
    })?;
    info!("database initialized successfully");
    Ok(())
}

/// True once all three tables exist.
pub fn is_initialized(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('department', 'role', 'employee')",
        [],
        |row| row.get(0),
    )?;
    Ok(count == 3)
}

/// Initialize a fresh store, or re-initialize when `reset` is set. Returns
/// whether the scripts ran.
pub fn ensure_schema(conn: &Connection, scripts: &Scripts, reset: bool) -> Result<bool> {
    if !reset && is_initialized(conn)? {
        return Ok(false);
    }
    if reset {
        info!("resetting database from schema and seed scripts");
    }
    initialize(conn, scripts)?;
    Ok(true)
}
