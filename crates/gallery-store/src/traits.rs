use gallery_types::{ImageExtension, ImageRole, RecordCollection};

use crate::error::StoreResult;
use crate::naming;

/// Directory-rooted storage for uploaded image files.
///
/// All implementations must satisfy these invariants:
/// - `put` never overwrites an existing file.
/// - `get`, `delete` and `exists` only ever touch files directly under the
///   root; names that fail [`naming::validate_filename`] are rejected.
/// - `delete` of an absent file is not an error.
pub trait ContentStore: Send + Sync {
    /// Store `data` under a freshly generated name and return that name.
    fn put(&self, role: ImageRole, ext: ImageExtension, data: &[u8]) -> StoreResult<String>;

    /// Read a stored file.
    ///
    /// Returns `StoreError::NotFound` if absent and `StoreError::InvalidName`
    /// for names that would resolve outside the root.
    fn get(&self, filename: &str) -> StoreResult<Vec<u8>>;

    /// Remove a stored file. Returns `true` if it existed.
    fn delete(&self, filename: &str) -> StoreResult<bool>;

    /// Check whether a stored file exists.
    fn exists(&self, filename: &str) -> StoreResult<bool>;

    /// Names of all stored files, sorted.
    fn list(&self) -> StoreResult<Vec<String>>;

    /// Public fetch path for `filename`.
    fn resolve_url(&self, filename: &str) -> String {
        naming::resolve_url(filename)
    }
}

/// Whole-collection persistence for work records.
///
/// Callers follow a load-modify-save pattern; there is no long-lived cache.
/// Implementations must make `save` all-or-nothing from any reader's point
/// of view but do not isolate concurrent read-modify-write cycles.
pub trait RecordStore: Send + Sync {
    /// Load the full collection.
    ///
    /// Never fails: a missing, empty, or corrupt document yields an empty
    /// collection and the cause is logged.
    fn load(&self) -> RecordCollection;

    /// Replace the stored collection with `records`.
    fn save(&self, records: &RecordCollection) -> StoreResult<()>;

    /// Create an empty document if none exists, otherwise check it loads.
    fn ensure_initialized(&self) -> StoreResult<()>;
}
