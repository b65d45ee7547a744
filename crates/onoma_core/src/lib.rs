//! Core library for the Onoma name store.
//! Culturally-tagged personal names in one SQLite table, with lookup,
//! substring search, random sampling and bulk import.

pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult};
pub use import::delimited::{parse_name_line, parse_name_lines, ImportError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person_name::{
    Component, Gender, NameId, NameParseError, NameParseErrorKind, PersonName, SpellingField,
};
pub use repo::name_repo::{
    NameQuery, NameRepository, RandomNameQuery, RepoError, RepoResult, SqliteNameRepository,
};
pub use service::name_service::{ImportSummary, NameService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
