//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `reposervice-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Attributes, Query, RecordId, Row, Stub, StubKind};
use crate::error::RepoServiceResult;

/// Port for record persistence.
///
/// Implemented by:
/// - `reposervice_adapters::storage::InMemoryStorage`
///
/// ## Design Notes
///
/// - Tables are addressed by name; rows are `(id, attributes)` pairs
/// - `insert` assigns the primary key
/// - `update` replaces the stored attributes of an existing row
/// - `begin` / `commit` / `rollback` delimit one transaction; implementations
///   may support nesting
#[cfg_attr(test, mockall::automock)]
pub trait Storage: Send + Sync {
    fn begin(&self) -> RepoServiceResult<()>;

    fn commit(&self) -> RepoServiceResult<()>;

    fn rollback(&self) -> RepoServiceResult<()>;

    /// Rows of `table` matching `query`, ordered, windowed and projected.
    fn select(&self, table: &str, query: &Query) -> RepoServiceResult<Vec<Row>>;

    /// Number of rows matching `query`'s conditions, ignoring its window.
    fn count(&self, table: &str, query: &Query) -> RepoServiceResult<usize>;

    fn find(&self, table: &str, id: RecordId) -> RepoServiceResult<Option<Row>>;

    fn insert(&self, table: &str, attributes: Attributes) -> RepoServiceResult<RecordId>;

    /// Fails with `RecordNotFound` when there is no such row.
    fn update(&self, table: &str, id: RecordId, attributes: Attributes) -> RepoServiceResult<()>;

    /// `false` when there was nothing to delete.
    fn delete(&self, table: &str, id: RecordId) -> RepoServiceResult<bool>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `reposervice_adapters::filesystem::LocalFilesystem` (production)
/// - `reposervice_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> RepoServiceResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> RepoServiceResult<()>;

    fn read_file(&self, path: &Path) -> RepoServiceResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for stub retrieval.
///
/// Implemented by:
/// - `reposervice_adapters::stubs::BuiltinStubs`
/// - `reposervice_adapters::stubs::DirectoryStubs` (user overrides)
#[cfg_attr(test, mockall::automock)]
pub trait StubStore: Send + Sync {
    fn load(&self, kind: StubKind) -> RepoServiceResult<Stub>;
}

/// Port for the interactive console the generator talks to.
#[cfg_attr(test, mockall::automock)]
pub trait Console: Send + Sync {
    /// Ask a yes/no question.
    fn confirm(&self, question: &str) -> RepoServiceResult<bool>;

    /// Informational line.
    fn line(&self, message: &str);

    /// Error line.
    fn error(&self, message: &str);
}
