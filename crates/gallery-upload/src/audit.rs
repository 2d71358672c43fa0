use gallery_store::{ContentStore, StoreResult};
use gallery_types::{ImageRole, RecordCollection, SkippedEntry};

/// A record pointing at a file the content store no longer has.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingFile {
    pub work_id: String,
    pub role: ImageRole,
    pub filename: String,
}

/// Consistency report over the stored collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditReport {
    pub record_count: usize,
    pub skipped: Vec<SkippedEntry>,
    pub dangling: Vec<DanglingFile>,
}

impl AuditReport {
    /// Returns `true` if no problems were found.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.dangling.is_empty()
    }
}

/// Check every stored entry for missing fields and missing image files.
///
/// Files deleted out-of-band are otherwise invisible: the listing keeps
/// serving their URLs and the fetch returns 404.
pub fn audit(records: &RecordCollection, content: &dyn ContentStore) -> StoreResult<AuditReport> {
    let mut report = AuditReport {
        record_count: records.len(),
        ..AuditReport::default()
    };
    for entry in records.records() {
        let record = match entry {
            Ok(record) => record,
            Err(skipped) => {
                report.skipped.push(skipped);
                continue;
            }
        };
        for (role, filename) in [
            (ImageRole::Scorecard, &record.scorecard_filename),
            (ImageRole::Comic, &record.comic_filename),
        ] {
            // A name that cannot be resolved under the root counts as missing.
            let present = content.exists(filename).or_else(|e| {
                if e.is_not_found() {
                    Ok(false)
                } else {
                    Err(e)
                }
            })?;
            if !present {
                report.dangling.push(DanglingFile {
                    work_id: record.id_text(),
                    role,
                    filename: filename.clone(),
                });
            }
        }
    }
    Ok(report)
}
