/// A directed edge from a merge-root entry to one of its constituents.
///
/// Identified by `(merge_url, entry_url)`; the numeric ids are resolved
/// against the local database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedReference {
    pub id: Option<i64>,
    /// Local id of the merge-root
    pub merge_id: i64,
    pub merge_url: String,
    /// Local id of the constituent, once it exists locally
    pub entry_id: Option<i64>,
    pub entry_url: String,
    pub entry_source: i64,
    /// The constituent provides the merged entry's displayed details
    pub is_info_entry: bool,
    /// New chapters of the constituent flow into the merged entry
    pub get_chapter_updates: bool,
    pub download_chapters: bool,
    pub chapter_priority: i64,
    pub chapter_sort_mode: i64,
}
