//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the taxonomy or navigation rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid choice '{choice}', expected one of: {}", .options.join(", "))]
    InvalidChoice {
        choice: String,
        options: Vec<String>,
    },

    #[error("already at the top level, nothing to go back to")]
    NothingToGoBack,

    #[error("category name must not be empty (below '{parent}')")]
    EmptyCategoryName { parent: String },

    #[error("duplicate category '{name}' below '{parent}'")]
    DuplicateSibling { name: String, parent: String },

    #[error("category not found: {0}")]
    UnknownCategory(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
