use shelf_models::MergedReference;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MergedReferenceRow {
    pub(crate) id: Option<i64>,
    pub(crate) merge_id: i64,
    pub(crate) merge_url: String,
    pub(crate) entry_id: Option<i64>,
    pub(crate) entry_url: String,
    pub(crate) entry_source: i64,
    pub(crate) is_info_entry: bool,
    pub(crate) get_chapter_updates: bool,
    pub(crate) download_chapters: bool,
    pub(crate) chapter_priority: i64,
    pub(crate) chapter_sort_mode: i64,
}
impl From<&MergedReference> for MergedReferenceRow {
    fn from(reference: &MergedReference) -> Self {
        Self {
            id: reference.id,
            merge_id: reference.merge_id,
            merge_url: reference.merge_url.clone(),
            entry_id: reference.entry_id,
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
impl From<MergedReferenceRow> for MergedReference {
    fn from(row: MergedReferenceRow) -> Self {
        Self {
            id: row.id,
            merge_id: row.merge_id,
            merge_url: row.merge_url,
            entry_id: row.entry_id,
            entry_url: row.entry_url,
            entry_source: row.entry_source,
            is_info_entry: row.is_info_entry,
            get_chapter_updates: row.get_chapter_updates,
            download_chapters: row.download_chapters,
            chapter_priority: row.chapter_priority,
            chapter_sort_mode: row.chapter_sort_mode,
        }
    }
}
