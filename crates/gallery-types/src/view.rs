use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::WorkRecord;

/// Public listing shape of a work: stored filenames replaced by fetch URLs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkView {
    pub id: Value,
    pub author: Value,
    pub current_habits: Value,
    pub reflection: Value,
    pub scorecard_image_url: String,
    pub comic_image_url: String,
}

impl WorkView {
    pub fn from_record(
        record: WorkRecord,
        scorecard_image_url: String,
        comic_image_url: String,
    ) -> Self {
        Self {
            id: record.id,
            author: record.author,
            current_habits: record.current_habits,
            reflection: record.reflection,
            scorecard_image_url,
            comic_image_url,
        }
    }
}
