use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TypeError, TypeResult};
use crate::id::WorkId;

/// JSON keys every stored record must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "id",
    "author",
    "currentHabits",
    "reflection",
    "scorecardFilename",
    "comicFilename",
];

/// One persisted submission.
///
/// Records are created once by a successful upload and never mutated.
/// The four text fields hold the JSON value found on disk: new records
/// always write strings, but historical entries with numeric ids or other
/// non-string values still load and list unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    pub id: Value,
    pub author: Value,
    pub current_habits: Value,
    pub reflection: Value,
    pub scorecard_filename: String,
    pub comic_filename: String,
}

impl WorkRecord {
    pub fn new(
        id: WorkId,
        author: impl Into<String>,
        current_habits: impl Into<String>,
        reflection: impl Into<String>,
        scorecard_filename: impl Into<String>,
        comic_filename: impl Into<String>,
    ) -> Self {
        Self {
            id: Value::String(id.to_string()),
            author: Value::String(author.into()),
            current_habits: Value::String(current_habits.into()),
            reflection: Value::String(reflection.into()),
            scorecard_filename: scorecard_filename.into(),
            comic_filename: comic_filename.into(),
        }
    }

    /// Decode a raw stored entry, explaining why it is unusable on failure.
    ///
    /// Only a non-object entry or a missing key makes an entry unusable.
    /// Filenames that are not strings are taken as their JSON text.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let Some(object) = value.as_object() else {
            return Err(format!("expected an object, found {}", json_kind(value)));
        };
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| !object.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(format!("missing fields: {}", missing.join(", ")));
        }
        Ok(Self {
            id: object["id"].clone(),
            author: object["author"].clone(),
            current_habits: object["currentHabits"].clone(),
            reflection: object["reflection"].clone(),
            scorecard_filename: value_text(&object["scorecardFilename"]),
            comic_filename: value_text(&object["comicFilename"]),
        })
    }

    /// The id as display text.
    pub fn id_text(&self) -> String {
        value_text(&self.id)
    }
}

/// A string value as-is, anything else as its JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A stored entry the listing had to leave out.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedEntry {
    /// Position in the stored collection.
    pub index: usize,
    pub reason: String,
    /// The entry exactly as it was found.
    pub raw: Value,
}

/// Ordered list of stored entries, in append order.
///
/// Entries are held as raw JSON so a malformed historical entry survives a
/// load-append-save cycle byte-for-byte instead of being dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection {
    entries: Vec<Value>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Value>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Append a record at the end.
    pub fn push(&mut self, record: &WorkRecord) -> TypeResult<()> {
        let value =
            serde_json::to_value(record).map_err(|e| TypeError::Serialization(e.to_string()))?;
        self.entries.push(value);
        Ok(())
    }

    /// Decode every entry in order.
    pub fn records(&self) -> impl Iterator<Item = Result<WorkRecord, SkippedEntry>> + '_ {
        self.entries.iter().enumerate().map(|(index, raw)| {
            WorkRecord::from_value(raw).map_err(|reason| SkippedEntry {
                index,
                reason,
                raw: raw.clone(),
            })
        })
    }

    /// Whether any entry carries `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
