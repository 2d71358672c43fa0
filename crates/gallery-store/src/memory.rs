use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use gallery_types::{ImageExtension, ImageRole, RecordCollection};

use crate::error::{StoreError, StoreResult};
use crate::naming::{generate_filename, validate_filename};
use crate::traits::{ContentStore, RecordStore};

/// In-memory content store.
///
/// Intended for tests and embedding. Files are held in a `BTreeMap` behind
/// a `RwLock` and cloned on read.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentStore for InMemoryContentStore {
    fn put(&self, role: ImageRole, ext: ImageExtension, data: &[u8]) -> StoreResult<String> {
        let filename = generate_filename(role, ext);
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        if files.contains_key(&filename) {
            return Err(StoreError::AlreadyExists(filename));
        }
        files.insert(filename.clone(), data.to_vec());
        Ok(filename)
    }

    fn get(&self, filename: &str) -> StoreResult<Vec<u8>> {
        validate_filename(filename)?;
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files
            .get(filename)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(filename.to_string()))
    }

    fn delete(&self, filename: &str) -> StoreResult<bool> {
        validate_filename(filename)?;
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        Ok(files.remove(filename).is_some())
    }

    fn exists(&self, filename: &str) -> StoreResult<bool> {
        validate_filename(filename)?;
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        Ok(files.contains_key(filename))
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        Ok(files.keys().cloned().collect())
    }
}

/// In-memory record store for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<RecordCollection>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection.
    pub fn with_records(records: RecordCollection) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self) -> RecordCollection {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, records: &RecordCollection) -> StoreResult<()> {
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records.clone();
        Ok(())
    }

    fn ensure_initialized(&self) -> StoreResult<()> {
        Ok(())
    }
}
