// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through logs and reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("'{name}' is not a valid identifier: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    #[error("Invalid model reference '{reference}': {reason}")]
    InvalidModelReference { reference: String, reason: String },

    #[error("Invalid scope directives: {0}")]
    InvalidScopeDirectives(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Registry Errors
    // ========================================================================
    #[error("{registry} '{name}' is already registered")]
    DuplicateScope {
        registry: &'static str,
        name: String,
    },

    #[error("{registry} '{name}' is not registered")]
    UnknownScope {
        registry: &'static str,
        name: String,
    },

    #[error("{registry} '{name}' requires a parameter")]
    MissingScopeParameter {
        registry: &'static str,
        name: String,
    },

    #[error("{registry} '{name}' rejected its parameter: {reason}")]
    InvalidScopeParameter {
        registry: &'static str,
        name: String,
        reason: String,
    },

    // ========================================================================
    // Record Mapping
    // ========================================================================
    #[error("Record of '{table}' could not be mapped: {reason}")]
    Hydration { table: &'static str, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { name, .. } => vec![
                format!("'{}' cannot be used as a name", name),
                "Names start with a letter or '_' and contain only letters, digits and '_'".into(),
            ],
            Self::InvalidModelReference { .. } => vec![
                "Pass the model as 'Post', 'Blog/Post' or 'blog::Post'".into(),
                "Example: reposervice generate Blog/Post".into(),
            ],
            Self::UnknownScope { registry, name } => vec![
                format!("Register the {} '{}' before using it", registry, name),
                "Scope names are case-sensitive".into(),
            ],
            Self::MissingScopeParameter { name, .. } => vec![
                format!("Pass a parameter with the directive: {{\"{}\": <value>}}", name),
            ],
            Self::DuplicateScope { name, .. } => {
                vec![format!("Choose a different name than '{}'", name)]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentifier { .. }
            | Self::InvalidModelReference { .. }
            | Self::InvalidScopeDirectives(_)
            | Self::AbsolutePathNotAllowed { .. }
            | Self::MissingScopeParameter { .. }
            | Self::InvalidScopeParameter { .. } => ErrorCategory::Validation,
            Self::UnknownScope { .. } => ErrorCategory::NotFound,
            Self::DuplicateScope { .. } | Self::Hydration { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
