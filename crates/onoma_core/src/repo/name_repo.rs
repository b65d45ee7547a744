//! Name repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Be the only gateway between `PersonName` values and the `name` table.
//! - Build filtered queries with bound parameters only.
//!
//! # Invariants
//! - The repository exclusively owns its connection.
//! - Rows that cannot be mapped to a `PersonName` are reported as absent
//!   (and logged), never as errors. Store-level failures still propagate.
//! - `insert_names` commits all rows or none.

use crate::db::functions::{fold_case, register_functions};
use crate::db::schema::{table_exists, table_has_column, NAME_COLUMNS, NAME_TABLE};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::person_name::{
    Component, Gender, NameId, NameParseError, PersonName, SpellingField,
};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Statement};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const NAME_SELECT_SQL: &str = "SELECT
    id,
    culture,
    component,
    gender,
    alphabetic,
    ideographic,
    phonetic
FROM name";

const NAME_INSERT_SQL: &str = "INSERT INTO name (
    culture,
    component,
    gender,
    alphabetic,
    ideographic,
    phonetic
) VALUES (?1, ?2, ?3, ?4, ?5, ?6);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for name persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Substring search options for [`NameRepository::select_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameQuery {
    /// Case-insensitive substring of the alphabetic spelling. Empty matches all.
    pub pattern: String,
    /// Exact culture code; `None` or empty means every culture.
    pub culture: Option<String>,
    pub gender: Option<Gender>,
    pub component: Option<Component>,
    /// Maximum rows to return; `None` or `Some(0)` means unbounded.
    pub limit: Option<u32>,
}

impl NameQuery {
    /// Creates an unfiltered, unbounded query for `pattern`.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }
}

/// Sampling options for [`NameRepository::select_names_random`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomNameQuery {
    /// Upper bound on returned values.
    pub count: u32,
    /// Cultures to draw from; empty means every supported culture.
    pub cultures: Vec<String>,
    pub gender: Option<Gender>,
    pub component: Option<Component>,
    /// Spelling returned for each sampled record.
    pub field: SpellingField,
}

impl RandomNameQuery {
    /// Creates a query for `count` alphabetic spellings from any culture.
    pub fn new(count: u32) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }
}

/// Repository interface for name lookups and inserts.
pub trait NameRepository {
    /// Distinct culture codes in store order (not sorted).
    fn supported_cultures(&self) -> RepoResult<Vec<String>>;
    /// Gets one record by id; `None` when absent or malformed.
    fn select_name(&self, id: NameId) -> RepoResult<Option<PersonName>>;
    /// Lists records matching a substring pattern and optional filters.
    fn select_names(&self, query: &NameQuery) -> RepoResult<Vec<PersonName>>;
    /// Samples up to `count` spellings in random order.
    fn select_names_random(&self, query: &RandomNameQuery) -> RepoResult<Vec<String>>;
    /// Appends one record and returns the store-assigned id.
    fn insert_name(&self, name: &PersonName) -> RepoResult<NameId>;
    /// Appends all records in one transaction and returns their ids in order.
    fn insert_names(&mut self, names: &[PersonName]) -> RepoResult<Vec<NameId>>;
}

/// SQLite-backed name repository owning its connection.
pub struct SqliteNameRepository {
    conn: Connection,
}

impl SqliteNameRepository {
    /// Opens the database file at `path`, creating the `name` table if absent.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Adopts an existing connection after checking the `name` table shape.
    ///
    /// Registers the SQL functions queries depend on, so raw connections work too.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        register_functions(&conn)?;
        ensure_name_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl NameRepository for SqliteNameRepository {
    fn supported_cultures(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT culture FROM name WHERE culture IS NOT NULL;")?;
        let mut rows = stmt.query([])?;
        let mut cultures = Vec::new();
        while let Some(row) = rows.next()? {
            cultures.push(row.get(0)?);
        }
        Ok(cultures)
    }

    fn select_name(&self, id: NameId) -> RepoResult<Option<PersonName>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NAME_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(map_name_row(row)),
            None => Ok(None),
        }
    }

    fn select_names(&self, query: &NameQuery) -> RepoResult<Vec<PersonName>> {
        // Both sides are folded; LIKE alone only folds ASCII.
        let mut sql = format!("{NAME_SELECT_SQL} WHERE fold(alphabetic) LIKE ? ESCAPE '\\'");
        let mut bind_values: Vec<Value> =
            vec![Value::Text(contains_pattern(&fold_case(&query.pattern)))];

        if let Some(culture) = query.culture.as_deref().filter(|value| !value.is_empty()) {
            sql.push_str(" AND culture = ?");
            bind_values.push(Value::Text(culture.to_string()));
        }
        push_tag_filters(&mut sql, &mut bind_values, query.gender, query.component);

        sql.push_str(" ORDER BY id ASC");
        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            if let Some(name) = map_name_row(row) {
                names.push(name);
            }
        }

        Ok(names)
    }

    fn select_names_random(&self, query: &RandomNameQuery) -> RepoResult<Vec<String>> {
        if query.count == 0 {
            return Ok(Vec::new());
        }

        let cultures = if query.cultures.is_empty() {
            self.supported_cultures()?
        } else {
            query.cultures.clone()
        };
        if cultures.is_empty() {
            debug!("event=name_random module=repo status=skipped reason=no_cultures");
            return Ok(Vec::new());
        }

        let mut sql = format!(
            "SELECT {} FROM name WHERE culture IN ({})",
            query.field.column(),
            placeholders(cultures.len())
        );
        let mut bind_values: Vec<Value> = cultures.into_iter().map(Value::Text).collect();
        push_tag_filters(&mut sql, &mut bind_values, query.gender, query.component);

        sql.push_str(" ORDER BY RANDOM() LIMIT ?");
        bind_values.push(Value::Integer(i64::from(query.count)));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            let value: Option<String> = row.get(0)?;
            values.push(value.unwrap_or_default());
        }

        Ok(values)
    }

    fn insert_name(&self, name: &PersonName) -> RepoResult<NameId> {
        let mut stmt = self.conn.prepare_cached(NAME_INSERT_SQL)?;
        insert_row(&mut stmt, name)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_names(&mut self, names: &[PersonName]) -> RepoResult<Vec<NameId>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(names.len());
        {
            let mut stmt = tx.prepare(NAME_INSERT_SQL)?;
            for name in names {
                insert_row(&mut stmt, name)?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;

        debug!(
            "event=name_insert_batch module=repo status=ok rows={}",
            ids.len()
        );
        Ok(ids)
    }
}

fn insert_row(stmt: &mut Statement<'_>, name: &PersonName) -> rusqlite::Result<usize> {
    stmt.execute(params![
        name.culture.as_str(),
        name.component.as_code(),
        name.gender.as_code(),
        name.alphabetic.as_str(),
        name.ideographic.as_str(),
        name.phonetic.as_str(),
    ])
}

fn push_tag_filters(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    gender: Option<Gender>,
    component: Option<Component>,
) {
    if let Some(gender) = gender {
        push_spelling_filter(sql, bind_values, "gender", gender.spellings());
    }
    if let Some(component) = component {
        push_spelling_filter(sql, bind_values, "component", component.spellings());
    }
}

/// Matches every stored spelling the row mapper accepts for a tag.
fn push_spelling_filter(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    column: &str,
    spellings: &[&str],
) {
    sql.push_str(&format!(
        " AND lower(trim({column})) IN ({})",
        placeholders(spellings.len())
    ));
    bind_values.extend(spellings.iter().map(|spelling| Value::Text(spelling.to_string())));
}

/// Wraps `pattern` for a literal containment match under `ESCAPE '\'`.
fn contains_pattern(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len() + 2);
    escaped.push('%');
    for ch in pattern.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Failure to turn a fetched row into a `PersonName`.
#[derive(Debug)]
enum RowError {
    Column(rusqlite::Error),
    Tag(NameParseError),
}

impl Display for RowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column(err) => write!(f, "{err}"),
            Self::Tag(err) => write!(f, "{err}"),
        }
    }
}

impl From<rusqlite::Error> for RowError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Column(value)
    }
}

impl From<NameParseError> for RowError {
    fn from(value: NameParseError) -> Self {
        Self::Tag(value)
    }
}

fn map_name_row(row: &Row<'_>) -> Option<PersonName> {
    match parse_name_row(row) {
        Ok(name) => Some(name),
        Err(err) => {
            let id = row.get::<_, i64>("id").ok();
            warn!(
                "event=name_row_skipped module=repo status=error id={} error={}",
                id.map_or_else(|| "unknown".to_string(), |id| id.to_string()),
                err
            );
            None
        }
    }
}

fn parse_name_row(row: &Row<'_>) -> Result<PersonName, RowError> {
    let gender: String = row.get("gender")?;
    let component: String = row.get("component")?;

    Ok(PersonName {
        id: Some(row.get("id")?),
        culture: text_or_empty(row, "culture")?,
        gender: gender.parse()?,
        component: component.parse()?,
        alphabetic: text_or_empty(row, "alphabetic")?,
        ideographic: text_or_empty(row, "ideographic")?,
        phonetic: text_or_empty(row, "phonetic")?,
    })
}

fn text_or_empty(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn ensure_name_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, NAME_TABLE)? {
        return Err(RepoError::MissingRequiredTable(NAME_TABLE));
    }

    for column in NAME_COLUMNS {
        if !table_has_column(conn, NAME_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: NAME_TABLE,
                column,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{contains_pattern, placeholders, push_tag_filters};
    use crate::model::person_name::{Component, Gender};
    use rusqlite::types::Value;

    #[test]
    fn contains_pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("agni"), "%agni%");
        assert_eq!(contains_pattern(""), "%%");
        assert_eq!(contains_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[test]
    fn placeholders_are_comma_separated() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }

    #[test]
    fn tag_filters_bind_every_accepted_spelling() {
        let mut sql = String::new();
        let mut bind_values = Vec::new();
        push_tag_filters(
            &mut sql,
            &mut bind_values,
            Some(Gender::Unisex),
            Some(Component::Family),
        );

        assert_eq!(
            sql,
            " AND lower(trim(gender)) IN (?, ?, ?) AND lower(trim(component)) IN (?)"
        );
        assert_eq!(
            bind_values,
            ["u", "unisex", "indifferent", "family"]
                .into_iter()
                .map(|value| Value::Text(value.to_string()))
                .collect::<Vec<_>>()
        );
    }
}
