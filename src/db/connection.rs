use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".employee-tracker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "company.db";

/// Open (or create) the SQLite file at `path` and enable foreign keys so the
/// `role` and `employee` references are enforced on every statement.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    debug!(path = %path.display(), "opening database");
    let conn = Connection::open(path)?;
    enable_foreign_keys(&conn)?;
    Ok(conn)
}

/// Open a throwaway store that lives only as long as the connection.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    enable_foreign_keys(&conn)?;
    Ok(conn)
}

fn enable_foreign_keys(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(())
}

/// Directory under the user's home that holds the database and the log file.
/// `None` when no home directory can be located.
pub fn data_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
}

/// Resolve the default database path inside [`data_dir`].
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DB_FILE_NAME))
}
