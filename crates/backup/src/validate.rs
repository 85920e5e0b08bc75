use crate::snapshot::Snapshot;
use shelf_source::{SourceResolver, TrackerSessions};
use std::collections::BTreeSet;

/// What a restore of a snapshot would be missing on this install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotValidation {
    /// Display names of sources that entries need but are not installed.
    pub missing_sources: Vec<String>,
    /// Tracking services with backed-up state but no active login.
    pub missing_trackers: Vec<i64>,
}

impl SnapshotValidation {
    pub fn is_complete(&self) -> bool {
        self.missing_sources.is_empty() && self.missing_trackers.is_empty()
    }
}

/// Check a decoded snapshot against the installed sources and tracker logins.
///
/// Nothing here is fatal; entries of missing sources are restored offline
/// and tracks of missing services are skipped.
pub fn validate(
    snapshot: &Snapshot,
    resolver: &dyn SourceResolver,
    trackers: &dyn TrackerSessions,
) -> SnapshotValidation {
    let sources: BTreeSet<i64> = snapshot
        .entries
        .iter()
        .filter(|entry| !entry.is_merged())
        .map(|entry| entry.source)
        .filter(|&source| resolver.get(source).is_none())
        .collect();
    let mut missing_sources: Vec<String> = sources.into_iter().map(|source| snapshot.source_name(source)).collect();
    missing_sources.sort();
    missing_sources.dedup();

    let missing_trackers: BTreeSet<i64> = snapshot
        .entries
        .iter()
        .flat_map(|entry| &entry.tracking)
        .map(|track| track.service)
        .filter(|&service| !trackers.is_logged_in(service))
        .collect();

    SnapshotValidation {
        missing_sources,
        missing_trackers: missing_trackers.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{EntrySnapshot, TrackSnapshot};
    use shelf_models::MERGED_SOURCE_ID;
    use shelf_source::{ActiveSessions, MockSource, SourceRegistry};
    use std::sync::Arc;

    fn entry(source: i64, url: &str, services: &[i64]) -> EntrySnapshot {
        EntrySnapshot {
            source,
            url: url.to_string(),
            title: url.to_string(),
            tracking: services
                .iter()
                .map(|&service| TrackSnapshot {
                    service,
                    media_id: 1,
                    library_id: None,
                    title: url.to_string(),
                    last_chapter_read: 0.0,
                    total_chapters: 0,
                    score: 0.0,
                    status: 0,
                    tracking_url: String::new(),
                    started_at: None,
                    finished_at: None,
                })
                .collect(),
            ..EntrySnapshot::default()
        }
    }

    #[test]
    fn test_reports_missing_sources_and_trackers() {
        let mut snapshot = Snapshot::default();
        snapshot.sources.insert(2, "Gone".to_string());
        snapshot.entries = vec![
            entry(1, "/a", &[10]),
            entry(2, "/b", &[10, 20]),
            entry(2, "/c", &[]),
            entry(3, "/d", &[]),
            entry(MERGED_SOURCE_ID, "/merged", &[]),
        ];
        let registry = SourceRegistry::new().with(Arc::new(MockSource::new(1, "Installed")));
        let sessions: ActiveSessions = [10].into_iter().collect();

        let validation = validate(&snapshot, &registry, &sessions);
        assert_eq!(validation.missing_sources, ["3", "Gone"]);
        assert_eq!(validation.missing_trackers, [20]);
        assert!(!validation.is_complete());
    }

    #[test]
    fn test_empty_snapshot_is_complete() {
        let validation = validate(&Snapshot::default(), &SourceRegistry::new(), &ActiveSessions::new());
        assert!(validation.is_complete());
    }
}
