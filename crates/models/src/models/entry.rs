use super::EntryStatus;
use crate::MERGED_SOURCE_ID;
use time::UtcDateTime;

/// A logical library item (a series), identified by `(url, source)`.
///
/// The numeric `id` is local to one database; it is `None` until the entry
/// has been persisted and is never carried across installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: Option<i64>,
    /// Id of the content source that serves this entry
    pub source: i64,
    /// Source-relative URL; unique within a source
    pub url: String,
    pub title: String,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub status: EntryStatus,
    pub thumbnail_url: Option<String>,
    /// In the user's library
    pub favorite: bool,
    /// Details have been fetched from the source at least once
    pub initialized: bool,
    pub last_update: Option<UtcDateTime>,
    pub date_added: Option<UtcDateTime>,
    /// Reader preferences (bitmask owned by the reader)
    pub viewer_flags: i64,
    /// Chapter list display preferences (bitmask owned by the UI)
    pub chapter_flags: i64,
}
impl Entry {
    /// New, unpersisted entry with only its identity and title filled in.
    pub fn new(source: i64, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            source,
            url: url.into(),
            title: title.into(),
            artist: None,
            author: None,
            description: None,
            genres: Vec::new(),
            status: EntryStatus::Unknown,
            thumbnail_url: None,
            favorite: false,
            initialized: false,
            last_update: None,
            date_added: None,
            viewer_flags: 0,
            chapter_flags: 0,
        }
    }

    /// Whether this is a synthetic merge-root aggregating other entries.
    pub fn is_merged(&self) -> bool {
        self.source == MERGED_SOURCE_ID
    }

    /// Copy the fields a source is authoritative for from `details`.
    ///
    /// Library state (favorite, dates, flags) is left untouched.
    pub fn apply_details(&mut self, details: &Entry) {
        if !details.title.is_empty() {
            self.title = details.title.clone();
        }
        self.artist = details.artist.clone().or(self.artist.take());
        self.author = details.author.clone().or(self.author.take());
        self.description = details.description.clone().or(self.description.take());
        if !details.genres.is_empty() {
            self.genres = details.genres.clone();
        }
        if details.status != EntryStatus::Unknown {
            self.status = details.status;
        }
        self.thumbnail_url = details.thumbnail_url.clone().or(self.thumbnail_url.take());
        self.initialized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_source() {
        assert!(Entry::new(MERGED_SOURCE_ID, "/merged/1", "Merged").is_merged());
        assert!(!Entry::new(1, "/m/1", "Plain").is_merged());
    }

    #[test]
    fn test_apply_details_keeps_library_state() {
        let mut entry = Entry::new(1, "/m/1", "Old title");
        entry.favorite = true;
        entry.author = Some("Kept".to_string());
        entry.viewer_flags = 4;
        let mut details = Entry::new(1, "/m/1", "New title");
        details.description = Some("Fresh".to_string());
        details.status = EntryStatus::Ongoing;
        entry.apply_details(&details);
        assert_eq!(entry.title, "New title");
        assert_eq!(entry.author.as_deref(), Some("Kept"));
        assert_eq!(entry.description.as_deref(), Some("Fresh"));
        assert_eq!(entry.status, EntryStatus::Ongoing);
        assert!(entry.favorite);
        assert!(entry.initialized);
        assert_eq!(entry.viewer_flags, 4);
    }
}
