//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the store and the workspace.
///
/// Every failure leaves the store untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A live repository already uses the name.
    #[error("repository '{0}' already exists")]
    RepositoryExists(String),

    /// No live repository has the name.
    #[error("repository '{0}' not found")]
    RepositoryNotFound(String),

    /// The repository already holds a file with the name.
    #[error("file '{name}' already exists in repository '{repository}'")]
    FileExists {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
    },

    /// The repository holds no file with the name.
    #[error("file '{name}' not found in repository '{repository}'")]
    FileNotFound {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
    },

    /// The task queue of the repository is empty.
    #[error("repository '{0}' has no tasks")]
    EmptyQueue(String),

    /// The undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,

    /// The redo stack is empty.
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Coarse failure taxonomy shared by all store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Duplicate repository or file name on create.
    AlreadyExists,
    /// Missing repository or file.
    NotFound,
    /// Task queue or undo/redo stack underflow.
    Empty,
}

impl StoreError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RepositoryExists(_) | Self::FileExists { .. } => ErrorKind::AlreadyExists,
            Self::RepositoryNotFound(_) | Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyQueue(_) | Self::NothingToUndo | Self::NothingToRedo => ErrorKind::Empty,
        }
    }

    pub(crate) fn file_exists(repository: &str, name: &str) -> Self {
        Self::FileExists {
            repository: repository.to_owned(),
            name: name.to_owned(),
        }
    }

    pub(crate) fn file_not_found(repository: &str, name: &str) -> Self {
        Self::FileNotFound {
            repository: repository.to_owned(),
            name: name.to_owned(),
        }
    }
}
