use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gallery_types::{ImageExtension, ImageRole};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::naming::{generate_filename, validate_filename};
use crate::traits::ContentStore;

/// Content store backed by a single flat directory.
#[derive(Debug)]
pub struct FsContentStore {
    /// Canonical path of the content directory.
    root: PathBuf,
}

impl FsContentStore {
    /// Open (or create) the content directory at `root`.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let root = fs::canonicalize(root)?;
        info!(root = %root.display(), "content directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, filename: &str) -> StoreResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.root.join(filename))
    }

    /// Resolve an existing file, refusing anything whose canonical location
    /// is not under the root (e.g. a symlink pointing elsewhere).
    fn resolve_existing(&self, filename: &str) -> StoreResult<PathBuf> {
        let path = self.path_for(filename)?;
        let canonical = match fs::canonicalize(&path) {
            Ok(p) => p,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(filename.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        if !canonical.starts_with(&self.root) {
            warn!(filename, resolved = %canonical.display(), "refusing file outside content root");
            return Err(StoreError::InvalidName(filename.to_string()));
        }
        if !canonical.is_file() {
            return Err(StoreError::NotFound(filename.to_string()));
        }
        Ok(canonical)
    }
}

impl ContentStore for FsContentStore {
    fn put(&self, role: ImageRole, ext: ImageExtension, data: &[u8]) -> StoreResult<String> {
        let filename = generate_filename(role, ext);
        let path = self.path_for(&filename)?;
        debug!(path = %path.display(), %role, "writing upload");

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(filename))
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = file.write_all(data).and_then(|()| file.sync_all()) {
            drop(file);
            // Leave nothing half-written behind.
            if let Err(remove_err) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %remove_err, "failed to remove partial upload");
            }
            return Err(e.into());
        }

        info!(%filename, bytes = data.len(), %role, "stored upload");
        Ok(filename)
    }

    fn get(&self, filename: &str) -> StoreResult<Vec<u8>> {
        let path = self.resolve_existing(filename)?;
        Ok(fs::read(path)?)
    }

    fn delete(&self, filename: &str) -> StoreResult<bool> {
        let path = self.path_for(filename)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(%filename, "deleted upload");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, filename: &str) -> StoreResult<bool> {
        match self.resolve_existing(filename) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
