use std::path::PathBuf;

/// Errors from content and record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested file was not found.
    #[error("file not found: {0}")]
    NotFound(String),

    /// The name is empty, contains a path separator, or would escape the root.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// A generated name collided with an existing file.
    #[error("file already exists: {0}")]
    AlreadyExists(String),

    /// Serialization failure while encoding the record document.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Replacing the record document failed.
    #[error("failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the error means "nothing there" from a client's perspective.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidName(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
