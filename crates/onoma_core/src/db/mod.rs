//! SQLite storage bootstrap and table setup entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the name store.
//! - Ensure the `name` table exists before any data access.
//! - Register the custom SQL functions queries rely on.
//!
//! # Invariants
//! - Core code must not read/write name data before `ensure_schema` succeeds.
//! - There is no schema versioning; setup is `CREATE TABLE IF NOT EXISTS` only.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod functions;
mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Table creation failed while bootstrapping a connection.
    SchemaSetup {
        table: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaSetup { table, .. } => {
                write!(f, "table `{table}` could not be created")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaSetup { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
