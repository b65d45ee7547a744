//! `name` table definition and setup.
//!
//! # Responsibility
//! - Own the single table DDL of the name store.
//! - Report which columns a usable `name` table must carry.
//!
//! # Invariants
//! - Declared column widths are enforced with `CHECK` constraints, so an
//!   oversized value is rejected by SQLite rather than stored silently.

use crate::db::{DbError, DbResult};
use log::warn;
use rusqlite::Connection;

/// Name of the only table managed by this crate.
pub const NAME_TABLE: &str = "name";

/// Columns read and written by the repository.
pub const NAME_COLUMNS: [&str; 7] = [
    "id",
    "culture",
    "component",
    "gender",
    "alphabetic",
    "ideographic",
    "phonetic",
];

const CREATE_NAME_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS name (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    culture VARCHAR(8) CHECK (length(culture) <= 8),
    component VARCHAR(16) CHECK (length(component) <= 16),
    gender VARCHAR(4) CHECK (length(gender) <= 4),
    alphabetic VARCHAR(64) CHECK (length(alphabetic) <= 64),
    ideographic VARCHAR(64) CHECK (length(ideographic) <= 64),
    phonetic VARCHAR(64) CHECK (length(phonetic) <= 64)
);";

/// Creates the `name` table when it does not exist yet.
///
/// Existing tables are left untouched, whatever their shape.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_NAME_TABLE_SQL)
        .map_err(|source| {
            warn!(
                "event=schema_setup module=db status=error table={} error={}",
                NAME_TABLE, source
            );
            DbError::SchemaSetup {
                table: NAME_TABLE,
                source,
            }
        })
}

/// Returns whether `table` exists in the main schema.
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `table` has a column called `column`.
pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([table])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(0)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, table_exists, table_has_column, NAME_COLUMNS, NAME_TABLE};
    use rusqlite::Connection;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        assert!(table_exists(&conn, NAME_TABLE).unwrap());
        for column in NAME_COLUMNS {
            assert!(table_has_column(&conn, NAME_TABLE, column).unwrap());
        }
    }

    #[test]
    fn check_constraints_reject_oversized_values() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        let too_long = "a".repeat(65);
        let result = conn.execute(
            "INSERT INTO name (culture, component, gender, alphabetic, ideographic, phonetic)
             VALUES ('PL', 'given', 'F', ?1, '', '');",
            [too_long.as_str()],
        );
        assert!(result.is_err());
    }
}
