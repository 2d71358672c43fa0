use gallery_store::ContentStore;
use gallery_types::{RecordCollection, SkippedEntry, WorkRecord, WorkView};
use tracing::{debug, warn};

/// Public listing built from the stored collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    /// Usable records, in stored order.
    pub views: Vec<WorkView>,
    /// Entries left out because they lack required fields.
    pub skipped: Vec<SkippedEntry>,
}

/// Map one record to its public view.
pub fn project_record(record: WorkRecord, content: &dyn ContentStore) -> WorkView {
    let scorecard_url = content.resolve_url(&record.scorecard_filename);
    let comic_url = content.resolve_url(&record.comic_filename);
    WorkView::from_record(record, scorecard_url, comic_url)
}

/// Project every stored entry, preserving order.
///
/// Malformed entries never fail the listing. Each one is logged with its
/// position and raw JSON so it can be repaired by hand.
pub fn project_works(records: &RecordCollection, content: &dyn ContentStore) -> Projection {
    let mut projection = Projection::default();
    for entry in records.records() {
        match entry {
            Ok(record) => projection.views.push(project_record(record, content)),
            Err(skipped) => {
                warn!(
                    index = skipped.index,
                    reason = %skipped.reason,
                    raw = %skipped.raw,
                    "skipping malformed work record"
                );
                projection.skipped.push(skipped);
            }
        }
    }
    debug!(
        listed = projection.views.len(),
        skipped = projection.skipped.len(),
        "projected works"
    );
    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_store::InMemoryContentStore;
    use gallery_types::WorkId;
    use serde_json::json;

    fn record(author: &str) -> WorkRecord {
        WorkRecord::new(
            WorkId::new(),
            author,
            "habits",
            "reflection",
            format!("{author}_scorecard.png"),
            format!("{author}_comic.gif"),
        )
    }

    #[test]
    fn urls_are_resolved() {
        let content = InMemoryContentStore::new();
        let view = project_record(record("alice"), &content);
        assert_eq!(view.scorecard_image_url, "/uploads/alice_scorecard.png");
        assert_eq!(view.comic_image_url, "/uploads/alice_comic.gif");
        assert_eq!(view.author, "alice");
    }

    #[test]
    fn order_is_preserved() {
        let content = InMemoryContentStore::new();
        let mut records = RecordCollection::new();
        for name in ["c", "a", "b"] {
            records.push(&record(name)).unwrap();
        }
        let projection = project_works(&records, &content);
        let authors: Vec<&str> = projection
            .views
            .iter()
            .filter_map(|v| v.author.as_str())
            .collect();
        assert_eq!(authors, ["c", "a", "b"]);
        assert!(projection.skipped.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let content = InMemoryContentStore::new();
        let mut records = RecordCollection::from_entries(vec![
            json!({"id": "1", "author": "no files"}),
            json!("just a string"),
        ]);
        records.push(&record("ok")).unwrap();

        let projection = project_works(&records, &content);
        assert_eq!(projection.views.len(), 1);
        assert_eq!(projection.views[0].author, "ok");
        let indexes: Vec<usize> = projection.skipped.iter().map(|s| s.index).collect();
        assert_eq!(indexes, [0, 1]);
    }

    #[test]
    fn non_string_values_are_listed() {
        let content = InMemoryContentStore::new();
        let records = RecordCollection::from_entries(vec![json!({
            "id": 7,
            "author": "a",
            "currentHabits": "h",
            "reflection": "r",
            "scorecardFilename": "s.png",
            "comicFilename": "c.png"
        })]);

        let projection = project_works(&records, &content);
        assert!(projection.skipped.is_empty());
        assert_eq!(projection.views.len(), 1);
        let listed = serde_json::to_value(&projection.views[0]).unwrap();
        assert_eq!(listed["id"], json!(7));
        assert_eq!(listed["scorecardImageUrl"], "/uploads/s.png");
    }

    #[test]
    fn empty_collection() {
        let content = InMemoryContentStore::new();
        let projection = project_works(&RecordCollection::new(), &content);
        assert_eq!(projection, Projection::default());
    }
}
