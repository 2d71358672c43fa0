use std::sync::{Arc, Mutex, PoisonError};

use gallery_store::{ContentStore, RecordStore};
use gallery_types::{ImageRole, WorkId, WorkRecord};
use tracing::{debug, error, info};

use crate::error::UploadResult;
use crate::form::UploadForm;
use crate::projection::{project_works, Projection};
use crate::rollback::Rollback;
use crate::validation::{validate, ValidatedUpload};

/// Message returned to the uploader on success.
pub const SUCCESS_MESSAGE: &str = "分享成功!";

/// Coordinates submissions against the content and record stores.
///
/// One service must own all writes to a given record document: its writer
/// lock is what keeps two concurrent submissions from both loading the same
/// collection and one overwriting the other's record.
pub struct UploadService {
    content: Arc<dyn ContentStore>,
    records: Arc<dyn RecordStore>,
    writer: Mutex<()>,
}

impl UploadService {
    pub fn new(content: Arc<dyn ContentStore>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            content,
            records,
            writer: Mutex::new(()),
        }
    }

    pub fn content(&self) -> &Arc<dyn ContentStore> {
        &self.content
    }

    pub fn records(&self) -> &Arc<dyn RecordStore> {
        &self.records
    }

    /// Validate and durably store one submission.
    ///
    /// On success exactly two files and one record have been added. On any
    /// error nothing has: validation fails before storage is touched, and
    /// later failures remove the files this call wrote.
    pub fn submit(&self, form: UploadForm) -> UploadResult<WorkId> {
        let upload = validate(form).inspect_err(|e| debug!(error = %e, "upload rejected"))?;

        let mut rollback = Rollback::new(self.content.as_ref());
        match self.store(&upload, &mut rollback) {
            Ok(id) => {
                rollback.commit();
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, written = rollback.written().len(), "upload failed, rolling back");
                drop(rollback);
                Err(e)
            }
        }
    }

    fn store(&self, upload: &ValidatedUpload, rollback: &mut Rollback<'_>) -> UploadResult<WorkId> {
        let scorecard = self.put_file(ImageRole::Scorecard, upload, rollback)?;
        let comic = self.put_file(ImageRole::Comic, upload, rollback)?;

        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.records.load();

        let mut id = WorkId::new();
        while records.contains_id(&id.to_string()) {
            id = WorkId::new();
        }
        let record = WorkRecord::new(
            id,
            upload.author.as_str(),
            upload.current_habits.as_str(),
            upload.reflection.as_str(),
            scorecard,
            comic,
        );
        records.push(&record)?;
        self.records.save(&records)?;

        info!(
            work_id = %id,
            author = %upload.author,
            scorecard = %record.scorecard_filename,
            comic = %record.comic_filename,
            total = records.len(),
            "stored work"
        );
        Ok(id)
    }

    fn put_file(
        &self,
        role: ImageRole,
        upload: &ValidatedUpload,
        rollback: &mut Rollback<'_>,
    ) -> UploadResult<String> {
        let file = upload.file(role);
        let filename = self.content.put(role, file.ext, &file.data)?;
        rollback.push(filename.clone());
        Ok(filename)
    }

    /// Current public listing.
    pub fn list(&self) -> Projection {
        project_works(&self.records.load(), self.content.as_ref())
    }
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService").finish_non_exhaustive()
    }
}
