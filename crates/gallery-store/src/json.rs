use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gallery_types::RecordCollection;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

/// Record store persisted as one pretty-printed JSON array document.
///
/// Saves go through a temporary file in the same directory followed by an
/// atomic rename over the target, so the document on disk is always either
/// the previous version or the new one.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn write_atomic(&self, records: &RecordCollection) -> StoreResult<()> {
        let bytes = encode_document(records)?;
        let dir = self.parent_dir();

        // The temp file is unlinked on drop, so every early return below
        // cleans up after itself.
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StoreError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        #[cfg(unix)]
        {
            if let Ok(dir) = fs::File::open(dir) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn load(&self) -> RecordCollection {
        debug!(path = %self.path.display(), "loading records");
        match fs::read_to_string(&self.path) {
            Ok(content) => decode_document(&content, &self.path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "record document absent, treating as empty");
                RecordCollection::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read record document, treating as empty");
                RecordCollection::new()
            }
        }
    }

    fn save(&self, records: &RecordCollection) -> StoreResult<()> {
        debug!(path = %self.path.display(), count = records.len(), "saving records");
        self.write_atomic(records).inspect_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to save record document");
        })
    }

    fn ensure_initialized(&self) -> StoreResult<()> {
        if self.path.try_exists()? {
            let records = self.load();
            info!(path = %self.path.display(), count = records.len(), "record document ready");
            return Ok(());
        }
        fs::create_dir_all(self.parent_dir())?;
        self.save(&RecordCollection::new())?;
        info!(path = %self.path.display(), "created empty record document");
        Ok(())
    }
}

/// Serialize with a four-space indent; non-ASCII text is written as-is.
fn encode_document(records: &RecordCollection) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut ser)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}

fn decode_document(content: &str, path: &Path) -> RecordCollection {
    if content.trim().is_empty() {
        debug!(path = %path.display(), "record document empty, treating as empty");
        return RecordCollection::new();
    }
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(entries)) => {
            debug!(path = %path.display(), count = entries.len(), "loaded records");
            RecordCollection::from_entries(entries)
        }
        Ok(_) => {
            warn!(path = %path.display(), "record document is not a JSON array, treating as empty");
            RecordCollection::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "record document is not valid JSON, treating as empty");
            RecordCollection::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_types::{value_text, WorkId, WorkRecord};

    fn record(author: &str) -> WorkRecord {
        WorkRecord::new(WorkId::new(), author, "habits", "reflection", "s.png", "c.png")
    }

    fn temp_store() -> (tempfile::TempDir, JsonRecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecordStore::new(dir.path().join("works_data.json"));
        (dir, store)
    }

    fn entries_in(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn load_missing_document_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_blank_document_is_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "  \n\t ").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_non_array_is_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), r#"{"not": "a list"}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_truncated_json_is_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), r#"[{"id": "abc", "author": "#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let (_dir, store) = temp_store();
        let mut records = RecordCollection::new();
        let names = ["first", "second", "third"];
        for name in names {
            records.push(&record(name)).unwrap();
        }
        store.save(&records).unwrap();

        let loaded = store.load();
        let authors: Vec<String> = loaded
            .records()
            .map(|r| value_text(&r.unwrap().author))
            .collect();
        assert_eq!(authors, names);
    }

    #[test]
    fn save_keeps_unicode_readable_and_indented() {
        let (_dir, store) = temp_store();
        let mut records = RecordCollection::new();
        records.push(&record("小明")).unwrap();
        store.save(&records).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("小明"));
        assert!(text.contains("\n    {"));
    }

    #[test]
    fn save_replaces_whole_document() {
        let (_dir, store) = temp_store();
        let mut records = RecordCollection::new();
        records.push(&record("a")).unwrap();
        records.push(&record("b")).unwrap();
        store.save(&records).unwrap();

        let mut shorter = RecordCollection::new();
        shorter.push(&record("c")).unwrap();
        store.save(&shorter).unwrap();
        assert_eq!(store.load(), shorter);
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let (dir, store) = temp_store();
        store.save(&RecordCollection::new()).unwrap();
        store.save(&RecordCollection::new()).unwrap();
        assert_eq!(entries_in(dir.path()), 1);
    }

    #[test]
    fn save_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecordStore::new(dir.path().join("gone").join("works.json"));
        assert!(store.save(&RecordCollection::new()).is_err());
        assert_eq!(entries_in(dir.path()), 0);
    }

    #[test]
    fn save_over_directory_fails_and_cleans_temp() {
        let (dir, store) = temp_store();
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("keep"), b"x").unwrap();

        let err = store.save(&RecordCollection::new()).unwrap_err();
        assert!(matches!(err, StoreError::Persist { .. }));
        assert_eq!(entries_in(dir.path()), 1);
    }

    #[test]
    fn ensure_initialized_creates_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecordStore::new(dir.path().join("data").join("works.json"));
        store.ensure_initialized().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn ensure_initialized_tolerates_corrupt_document() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "not json").unwrap();
        store.ensure_initialized().unwrap();
        // Left untouched until the next successful save.
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "not json");
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_entries_survive_a_save_cycle() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), r#"[{"legacy": true}]"#).unwrap();

        let mut records = store.load();
        records.push(&record("new")).unwrap();
        store.save(&records).unwrap();

        let reloaded = store.load();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.entries()[0], serde_json::json!({"legacy": true}));
    }
}
