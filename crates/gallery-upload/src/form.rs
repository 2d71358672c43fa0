use bytes::Bytes;
use gallery_types::ImageRole;

/// Text fields of the upload form, in form order.
pub const TEXT_FIELDS: [&str; 3] = ["author-name", "current-habits", "reflection"];

/// One uploaded file as received from the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    /// Client-supplied name; only its extension is ever used.
    pub filename: String,
    pub data: Bytes,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Raw upload inputs, each `None` when the client did not send it.
///
/// When a field is sent more than once the first value wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub author: Option<String>,
    pub current_habits: Option<String>,
    pub reflection: Option<String>,
    pub scorecard: Option<FileUpload>,
    pub comic: Option<FileUpload>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text field by its form name. Returns `false` for unknown
    /// names and for repeats.
    pub fn set_text(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "author-name" => &mut self.author,
            "current-habits" => &mut self.current_habits,
            "reflection" => &mut self.reflection,
            _ => return false,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(value.into());
        true
    }

    /// Record a file field by its form name. Returns `false` for unknown
    /// names and for repeats.
    pub fn set_file(&mut self, field: &str, file: FileUpload) -> bool {
        let slot = if field == ImageRole::Scorecard.field_name() {
            &mut self.scorecard
        } else if field == ImageRole::Comic.field_name() {
            &mut self.comic
        } else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(file);
        true
    }

    pub fn file(&self, role: ImageRole) -> Option<&FileUpload> {
        match role {
            ImageRole::Scorecard => self.scorecard.as_ref(),
            ImageRole::Comic => self.comic.as_ref(),
        }
    }
}
