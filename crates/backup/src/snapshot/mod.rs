//! Serialized form of a library backup.
//!
//! Snapshot records refer to each other only by natural identity (URLs,
//! names, service ids) or by position within the snapshot. Database ids are
//! never written, since they mean nothing on another install.

mod entry;
mod library;

pub use self::entry::{ChapterSnapshot, EntrySnapshot, HistorySnapshot, MergedReferenceSnapshot, TrackSnapshot};
pub use self::library::{CategorySnapshot, SavedSearchSnapshot};
use serde::{Deserialize, Serialize};
use shelf_models::timestamp;
use std::collections::BTreeMap;
use time::UtcDateTime;

/// Version of the snapshot payload layout.
pub const SNAPSHOT_VERSION: u16 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u16,
    #[serde(default)]
    pub entries: Vec<EntrySnapshot>,
    /// Entries refer to categories by position in this list.
    #[serde(default)]
    pub categories: Vec<CategorySnapshot>,
    /// Display names of the sources entries came from, by source id.
    #[serde(default)]
    pub sources: BTreeMap<i64, String>,
    #[serde(default)]
    pub saved_searches: Vec<SavedSearchSnapshot>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            entries: Vec::new(),
            categories: Vec::new(),
            sources: BTreeMap::new(),
            saved_searches: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Name recorded for a source, or its id when the backup did not know it.
    pub fn source_name(&self, source: i64) -> String {
        self.sources.get(&source).cloned().unwrap_or_else(|| source.to_string())
    }
}

fn to_millis(at: Option<UtcDateTime>) -> Option<i64> {
    at.map(timestamp::to_millis)
}

/// Out-of-range timestamps are treated as absent.
fn from_millis(millis: Option<i64>) -> Option<UtcDateTime> {
    millis.and_then(timestamp::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"version":1}"#).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_source_keys_survive_json() {
        let mut snapshot = Snapshot::default();
        snapshot.sources.insert(2_499_283_573_021_220_255, "MangaDex".to_string());
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.source_name(2_499_283_573_021_220_255), "MangaDex");
        assert_eq!(parsed.source_name(7), "7");
    }
}
