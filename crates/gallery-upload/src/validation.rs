use bytes::Bytes;
use gallery_types::{raw_extension, ImageExtension, ImageRole};

use crate::form::{FileUpload, UploadForm, TEXT_FIELDS};

/// Why a submission was rejected. Messages are shown to the uploader.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("缺少必要的文字欄位: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("缺少必要的圖片檔案: {}", .0.join(", "))]
    MissingFiles(Vec<&'static str>),

    #[error("作者姓名不能為空")]
    EmptyAuthor,

    #[error("目前的習慣描述不能為空")]
    EmptyHabits,

    #[error("反思與展望不能為空")]
    EmptyReflection,

    #[error("未選擇{}檔案或檔案無效", .0.label())]
    InvalidFile(ImageRole),

    #[error("不允許的{}檔案格式 ({ext})", .role.label())]
    DisallowedExtension { role: ImageRole, ext: String },
}

impl ValidationError {
    /// Form fields the error refers to.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::MissingFields(fields) | Self::MissingFiles(fields) => fields.clone(),
            Self::EmptyAuthor => vec!["author-name"],
            Self::EmptyHabits => vec!["current-habits"],
            Self::EmptyReflection => vec!["reflection"],
            Self::InvalidFile(role) | Self::DisallowedExtension { role, .. } => {
                vec![role.field_name()]
            }
        }
    }
}

/// A file that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedFile {
    pub ext: ImageExtension,
    pub data: Bytes,
}

/// A submission that passed validation; text is trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub author: String,
    pub current_habits: String,
    pub reflection: String,
    pub scorecard: ValidatedFile,
    pub comic: ValidatedFile,
}

impl ValidatedUpload {
    pub fn file(&self, role: ImageRole) -> &ValidatedFile {
        match role {
            ImageRole::Scorecard => &self.scorecard,
            ImageRole::Comic => &self.comic,
        }
    }
}

/// Check a raw form. The first failing rule wins:
///
/// 1. missing text fields (all listed),
/// 2. missing files (all listed),
/// 3. blank author, habits, reflection,
/// 4. blank file names,
/// 5. extensions outside png/jpg/jpeg/gif.
pub fn validate(form: UploadForm) -> Result<ValidatedUpload, ValidationError> {
    let UploadForm {
        author,
        current_habits,
        reflection,
        scorecard,
        comic,
    } = form;

    let (author, current_habits, reflection) = match (author, current_habits, reflection) {
        (Some(a), Some(h), Some(r)) => (a, h, r),
        (a, h, r) => {
            let missing = TEXT_FIELDS
                .iter()
                .zip([a.is_none(), h.is_none(), r.is_none()])
                .filter(|(_, absent)| *absent)
                .map(|(field, _)| *field)
                .collect();
            return Err(ValidationError::MissingFields(missing));
        }
    };

    let (scorecard, comic) = match (scorecard, comic) {
        (Some(s), Some(c)) => (s, c),
        (s, c) => {
            let missing = ImageRole::ALL
                .iter()
                .zip([s.is_none(), c.is_none()])
                .filter(|(_, absent)| *absent)
                .map(|(role, _)| role.field_name())
                .collect();
            return Err(ValidationError::MissingFiles(missing));
        }
    };

    let author = non_blank(author, ValidationError::EmptyAuthor)?;
    let current_habits = non_blank(current_habits, ValidationError::EmptyHabits)?;
    let reflection = non_blank(reflection, ValidationError::EmptyReflection)?;

    if scorecard.filename.is_empty() {
        return Err(ValidationError::InvalidFile(ImageRole::Scorecard));
    }
    if comic.filename.is_empty() {
        return Err(ValidationError::InvalidFile(ImageRole::Comic));
    }

    let scorecard = check_file(ImageRole::Scorecard, scorecard)?;
    let comic = check_file(ImageRole::Comic, comic)?;

    Ok(ValidatedUpload {
        author,
        current_habits,
        reflection,
        scorecard,
        comic,
    })
}

fn non_blank(value: String, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

fn check_file(role: ImageRole, file: FileUpload) -> Result<ValidatedFile, ValidationError> {
    match ImageExtension::from_filename(&file.filename) {
        Some(ext) => Ok(ValidatedFile {
            ext,
            data: file.data,
        }),
        None => Err(ValidationError::DisallowedExtension {
            role,
            ext: raw_extension(&file.filename).unwrap_or_default().to_string(),
        }),
    }
}
