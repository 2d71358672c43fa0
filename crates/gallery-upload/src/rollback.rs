//! Compensating actions for a partially applied submission.

use gallery_store::ContentStore;
use tracing::{error, info};

/// Files written so far by one submission.
///
/// Unless [`Rollback::commit`] is called, dropping the guard deletes every
/// registered file, most recent first. This also covers panics between two
/// steps of a submission.
pub struct Rollback<'a> {
    store: &'a dyn ContentStore,
    written: Vec<String>,
    committed: bool,
}

impl<'a> Rollback<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self {
            store,
            written: Vec::new(),
            committed: false,
        }
    }

    /// Register a file that must be removed if the submission fails.
    pub fn push(&mut self, filename: String) {
        self.written.push(filename);
    }

    /// Files registered so far, in write order.
    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Keep everything; nothing will be deleted.
    pub fn commit(mut self) {
        self.committed = true;
    }

    fn unwind(&mut self) {
        while let Some(filename) = self.written.pop() {
            match self.store.delete(&filename) {
                Ok(_) => info!(%filename, "removed file from failed upload"),
                Err(e) => error!(%filename, error = %e, "failed to remove file from failed upload"),
            }
        }
    }
}

impl Drop for Rollback<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.unwind();
        }
    }
}
