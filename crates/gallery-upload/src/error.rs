use gallery_store::StoreError;
use gallery_types::TypeError;

use crate::validation::ValidationError;

/// Errors produced by an upload submission.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The submission was rejected before any storage I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing a file or the record document failed. Files already written
    /// by the same submission have been removed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The new record could not be encoded.
    #[error("record error: {0}")]
    Record(#[from] TypeError),
}

impl UploadError {
    /// Whether the caller sent bad input (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result alias for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
