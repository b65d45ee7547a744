//! Custom SQL scalar functions.
//!
//! # Responsibility
//! - Register Unicode-aware helpers that the bundled SQLite lacks.
//!
//! # Invariants
//! - `fold(x)` lowercases with Rust's Unicode tables; `fold(NULL)` is NULL.
//! - Registration is idempotent per connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// SQL name of the Unicode lowercase function.
pub const FOLD_FUNCTION: &str = "fold";

/// Registers every custom function on `conn`.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| fold_case(&text)))
        },
    )
}

/// Case folding shared by SQL `fold()` and bound search patterns.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}
