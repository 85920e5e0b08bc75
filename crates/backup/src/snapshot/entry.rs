use super::{from_millis, to_millis};
use serde::{Deserialize, Serialize};
use shelf_models::{Chapter, Entry, EntryStatus, History, MERGED_SOURCE_ID, MergedReference, Track, timestamp};
use time::UtcDateTime;

/// One library entry with everything attached to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySnapshot {
    pub source: i64,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    pub status: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
    pub viewer_flags: i64,
    pub chapter_flags: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<ChapterSnapshot>,
    /// Positions in [`Snapshot::categories`](super::Snapshot::categories).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistorySnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tracking: Vec<TrackSnapshot>,
    /// Only present on merge-roots.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merged_references: Vec<MergedReferenceSnapshot>,
}

impl From<&Entry> for EntrySnapshot {
    fn from(entry: &Entry) -> Self {
        Self {
            source: entry.source,
            url: entry.url.clone(),
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            author: entry.author.clone(),
            description: entry.description.clone(),
            genres: entry.genres.clone(),
            status: entry.status.as_i64(),
            thumbnail_url: entry.thumbnail_url.clone(),
            favorite: entry.favorite,
            date_added: to_millis(entry.date_added),
            last_update: to_millis(entry.last_update),
            viewer_flags: entry.viewer_flags,
            chapter_flags: entry.chapter_flags,
            ..Self::default()
        }
    }
}

impl EntrySnapshot {
    pub fn is_merged(&self) -> bool {
        self.source == MERGED_SOURCE_ID
    }

    /// The entry as it would be created from this backup alone.
    ///
    /// It counts as initialized when the backup carried a description,
    /// i.e. details had been fetched at some point before the backup.
    pub fn to_entry(&self) -> Entry {
        Entry {
            id: None,
            source: self.source,
            url: self.url.clone(),
            title: self.title.clone(),
            artist: self.artist.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            genres: self.genres.clone(),
            status: EntryStatus::from(self.status),
            thumbnail_url: self.thumbnail_url.clone(),
            favorite: self.favorite,
            initialized: self.description.is_some(),
            last_update: from_millis(self.last_update),
            date_added: from_millis(self.date_added),
            viewer_flags: self.viewer_flags,
            chapter_flags: self.chapter_flags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSnapshot {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanlator: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub bookmark: bool,
    #[serde(default)]
    pub last_page_read: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_fetch: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_upload: Option<i64>,
    /// Negative when the source could not recognize a number.
    #[serde(default = "unrecognized_number")]
    pub chapter_number: f64,
    #[serde(default)]
    pub source_order: i64,
}

fn unrecognized_number() -> f64 {
    -1.0
}

impl From<&Chapter> for ChapterSnapshot {
    fn from(chapter: &Chapter) -> Self {
        Self {
            url: chapter.url.clone(),
            name: chapter.name.clone(),
            scanlator: chapter.scanlator.clone(),
            read: chapter.read,
            bookmark: chapter.bookmark,
            last_page_read: chapter.last_page_read,
            date_fetch: to_millis(chapter.date_fetch),
            date_upload: to_millis(chapter.date_upload),
            chapter_number: chapter.number,
            source_order: chapter.source_order,
        }
    }
}

impl ChapterSnapshot {
    pub fn is_recognized_number(&self) -> bool {
        self.chapter_number >= 0.0
    }

    pub fn to_chapter(&self) -> Chapter {
        Chapter {
            id: None,
            entry_id: None,
            url: self.url.clone(),
            name: self.name.clone(),
            scanlator: self.scanlator.clone(),
            number: self.chapter_number,
            source_order: self.source_order,
            read: self.read,
            bookmark: self.bookmark,
            last_page_read: self.last_page_read,
            date_fetch: from_millis(self.date_fetch),
            date_upload: from_millis(self.date_upload),
        }
    }
}

/// Reading history of one chapter, identified by the chapter's URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub url: String,
    pub last_read: i64,
    /// Accumulated reading time in milliseconds.
    #[serde(default)]
    pub time_read: i64,
}

impl HistorySnapshot {
    pub fn new(url: impl Into<String>, history: &History) -> Self {
        Self {
            url: url.into(),
            last_read: timestamp::to_millis(history.last_read),
            time_read: history.time_read,
        }
    }

    pub fn last_read(&self) -> Option<UtcDateTime> {
        timestamp::from_millis(self.last_read)
    }
}

/// Sync state with one external tracking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub service: i64,
    pub media_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub last_chapter_read: f64,
    #[serde(default)]
    pub total_chapters: i64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub tracking_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<i64>,
}

impl From<&Track> for TrackSnapshot {
    fn from(track: &Track) -> Self {
        Self {
            service: track.service,
            media_id: track.media_id,
            library_id: track.library_id,
            title: track.title.clone(),
            last_chapter_read: track.last_chapter_read,
            total_chapters: track.total_chapters,
            score: track.score,
            status: track.status,
            tracking_url: track.tracking_url.clone(),
            started_at: to_millis(track.started_at),
            finished_at: to_millis(track.finished_at),
        }
    }
}

impl TrackSnapshot {
    pub fn to_track(&self) -> Track {
        Track {
            id: None,
            entry_id: None,
            service: self.service,
            media_id: self.media_id,
            library_id: self.library_id,
            title: self.title.clone(),
            last_chapter_read: self.last_chapter_read,
            total_chapters: self.total_chapters,
            score: self.score,
            status: self.status,
            tracking_url: self.tracking_url.clone(),
            started_at: from_millis(self.started_at),
            finished_at: from_millis(self.finished_at),
        }
    }
}

/// Edge from a merge-root to one of its constituents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedReferenceSnapshot {
    pub merge_url: String,
    pub entry_url: String,
    pub entry_source: i64,
    #[serde(default)]
    pub is_info_entry: bool,
    #[serde(default = "enabled")]
    pub get_chapter_updates: bool,
    #[serde(default = "enabled")]
    pub download_chapters: bool,
    #[serde(default)]
    pub chapter_priority: i64,
    #[serde(default)]
    pub chapter_sort_mode: i64,
}

fn enabled() -> bool {
    true
}

impl From<&MergedReference> for MergedReferenceSnapshot {
    fn from(reference: &MergedReference) -> Self {
        Self {
            merge_url: reference.merge_url.clone(),
            entry_url: reference.entry_url.clone(),
            entry_source: reference.entry_source,
            is_info_entry: reference.is_info_entry,
            get_chapter_updates: reference.get_chapter_updates,
            download_chapters: reference.download_chapters,
            chapter_priority: reference.chapter_priority,
            chapter_sort_mode: reference.chapter_sort_mode,
        }
    }
}

impl MergedReferenceSnapshot {
    /// The edge as stored locally, between two persisted entries.
    pub fn to_reference(&self, merge_id: i64, entry_id: i64) -> MergedReference {
        MergedReference {
            id: None,
            merge_id,
            merge_url: self.merge_url.clone(),
            entry_id: Some(entry_id),
            entry_url: self.entry_url.clone(),
            entry_source: self.entry_source,
            is_info_entry: self.is_info_entry,
            get_chapter_updates: self.get_chapter_updates,
            download_chapters: self.download_chapters,
            chapter_priority: self.chapter_priority,
            chapter_sort_mode: self.chapter_sort_mode,
        }
    }
}
