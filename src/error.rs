//! Error type shared by the persistence layer and the prompt parsers.

use std::io;
use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Any failure raised by SQLite, passed through untouched.
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A prompt value that could not be turned into the typed argument.
    #[error("{0}")]
    InvalidInput(String),

    #[error("failed to read script {}: {source}", path.display())]
    Script { path: PathBuf, source: io::Error },

    #[error("failed to create data directory {}: {source}", path.display())]
    DataDir { path: PathBuf, source: io::Error },
}

impl Error {
    /// Whether SQLite rejected the statement because of a constraint (foreign
    /// key, unique, check or not-null).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Error::Storage(err) => {
                matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation))
            }
            _ => false,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
