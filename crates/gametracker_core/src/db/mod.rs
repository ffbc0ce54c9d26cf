//! SQLite storage bootstrap, schema migrations and the storage driver seam.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the game tracker.
//! - Apply schema migrations in deterministic order.
//! - Expose the `StorageDriver` contract repositories are written against.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Engine errors are passed through unchanged inside `DbError::Sqlite`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod driver;
pub mod migrations;
mod open;

pub use driver::{ColumnIndex, SqlRow, SqlRows, StorageDriver};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Error raised by the SQL engine (connectivity, constraint, syntax).
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
