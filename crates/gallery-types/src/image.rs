use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two upload slots a file belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    /// The habit scorecard.
    Scorecard,
    /// The six-panel comic.
    Comic,
}

impl ImageRole {
    /// Both roles, in submission order.
    pub const ALL: [ImageRole; 2] = [ImageRole::Scorecard, ImageRole::Comic];

    /// Tag embedded in stored filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scorecard => "scorecard",
            Self::Comic => "comic",
        }
    }

    /// Multipart form field carrying this file.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Scorecard => "scorecard-image",
            Self::Comic => "comic-image",
        }
    }

    /// Display name used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scorecard => "習慣計分卡",
            Self::Comic => "六格漫畫",
        }
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed image formats. Matching is case-insensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExtension {
    Png,
    Jpg,
    Jpeg,
    Gif,
}

impl ImageExtension {
    pub const ALL: [ImageExtension; 4] = [
        ImageExtension::Png,
        ImageExtension::Jpg,
        ImageExtension::Jpeg,
        ImageExtension::Gif,
    ];

    /// Parse a bare extension (no dot).
    pub fn parse(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Extension of a client-supplied filename, if it is an allowed one.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::parse(raw_extension(filename)?)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }

    /// MIME type served for files of this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpg | Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text after the last `.` of `filename`, or `None` when there is no dot.
pub fn raw_extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}
