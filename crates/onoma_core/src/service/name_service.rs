//! Name use-case service.
//!
//! # Responsibility
//! - Provide stable lookup/insert entry points for core callers.
//! - Orchestrate delimited-file import on top of batch insert.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.
//! - A failed import leaves the store unchanged.

use crate::import::delimited::{parse_name_lines, ImportError};
use crate::model::person_name::{NameId, PersonName};
use crate::repo::name_repo::{NameQuery, NameRepository, RandomNameQuery, RepoError, RepoResult};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from service-level orchestration.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    Import(ImportError),
    /// Import source could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Outcome of a successful file import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Ids assigned to the imported records, in file order.
    pub ids: Vec<NameId>,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.ids.len()
    }
}

/// Use-case service wrapper for name lookups and imports.
pub struct NameService<R: NameRepository> {
    repo: R,
}

impl<R: NameRepository> NameService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn supported_cultures(&self) -> RepoResult<Vec<String>> {
        self.repo.supported_cultures()
    }

    pub fn select_name(&self, id: NameId) -> RepoResult<Option<PersonName>> {
        self.repo.select_name(id)
    }

    pub fn select_names(&self, query: &NameQuery) -> RepoResult<Vec<PersonName>> {
        self.repo.select_names(query)
    }

    pub fn select_names_random(&self, query: &RandomNameQuery) -> RepoResult<Vec<String>> {
        self.repo.select_names_random(query)
    }

    pub fn insert_name(&self, name: &PersonName) -> RepoResult<NameId> {
        self.repo.insert_name(name)
    }

    pub fn insert_names(&mut self, names: &[PersonName]) -> RepoResult<Vec<NameId>> {
        self.repo.insert_names(names)
    }

    /// Imports a `;`-delimited UTF-8 name list in one transaction.
    ///
    /// # Side effects
    /// - Emits `name_import` logging events with row count and duration.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read.
    /// - `Import` for the first malformed line; nothing is inserted.
    /// - `Repo` when the store rejects a row; the whole batch is rolled back.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> ServiceResult<ImportSummary> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("event=name_import module=service status=start");

        let result = self.import_file_inner(path);
        match &result {
            Ok(summary) => info!(
                "event=name_import module=service status=ok rows={} duration_ms={}",
                summary.imported(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=name_import module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn import_file_inner(&mut self, path: &Path) -> ServiceResult<ImportSummary> {
        let text = std::fs::read_to_string(path).map_err(|source| ServiceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let names = parse_name_lines(&text)?;
        let ids = self.repo.insert_names(&names)?;
        Ok(ImportSummary { ids })
    }
}
