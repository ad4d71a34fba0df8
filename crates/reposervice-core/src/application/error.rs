//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the ports, not
//! business rules. Business rule errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A mutating repository operation failed and was rolled back.
    ///
    /// The underlying cause is logged, not carried.
    #[error("{message}")]
    InvalidArgument { message: &'static str },

    /// The storage port failed.
    #[error("Storage error: {reason}")]
    Storage { reason: String },

    /// The record has no primary key yet.
    #[error("Record of '{table}' has not been persisted")]
    NotPersisted { table: String },

    /// No record with that id in the table.
    #[error("Record {id} not found in '{table}'")]
    RecordNotFound { table: String, id: u64 },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A stub could not be loaded.
    #[error("Stub '{name}' not found: {reason}")]
    StubNotFound { name: String, reason: String },

    /// Reading an answer from the console failed.
    #[error("Console error: {reason}")]
    Console { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Storage lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    pub const UNABLE_TO_SAVE: &'static str = "Unable to save model data";
    pub const UNABLE_TO_UPDATE: &'static str = "Unable to update model data";
    pub const UNABLE_TO_UPSERT: &'static str = "Unable to update or save model data";
    pub const UNABLE_TO_DELETE: &'static str = "Unable to delete model data";

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidArgument { .. } => vec![
                "The operation was rolled back".into(),
                "Run with -vv to see the payload and the underlying error".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StubNotFound { name, .. } => vec![
                format!("Add {} to the configured stub directory", name),
                "Or remove `stubs` from the configuration to use the built-in stubs".into(),
            ],
            Self::StoreLockError => vec![
                "A previous operation panicked while holding the storage lock".into(),
            ],
            Self::Console { .. } => vec![
                "Run with --no-interaction or --force when no terminal is attached".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Validation,
            Self::NotPersisted { .. } => ErrorCategory::Validation,
            Self::RecordNotFound { .. } | Self::StubNotFound { .. } => ErrorCategory::NotFound,
            Self::Storage { .. }
            | Self::FilesystemError { .. }
            | Self::Console { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
