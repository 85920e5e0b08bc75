use super::{from_millis, to_millis};
use crate::error::Error;
use shelf_models::Chapter;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ChapterRow {
    pub(crate) id: Option<i64>,
    pub(crate) entry_id: Option<i64>,
    pub(crate) url: String,
    pub(crate) name: String,
    pub(crate) scanlator: Option<String>,
    pub(crate) number: f64,
    pub(crate) source_order: i64,
    pub(crate) read: bool,
    pub(crate) bookmark: bool,
    pub(crate) last_page_read: i64,
    pub(crate) date_fetch: Option<i64>,
    pub(crate) date_upload: Option<i64>,
}
impl From<&Chapter> for ChapterRow {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id,
            entry_id: chapter.entry_id,
            url: chapter.url.clone(),
            name: chapter.name.clone(),
            scanlator: chapter.scanlator.clone(),
            number: chapter.number,
            source_order: chapter.source_order,
            read: chapter.read,
            bookmark: chapter.bookmark,
            last_page_read: chapter.last_page_read,
            date_fetch: to_millis(chapter.date_fetch),
            date_upload: to_millis(chapter.date_upload),
        }
    }
}
impl TryFrom<ChapterRow> for Chapter {
    type Error = Error;
    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            entry_id: row.entry_id,
            url: row.url,
            name: row.name,
            scanlator: row.scanlator,
            number: row.number,
            source_order: row.source_order,
            read: row.read,
            bookmark: row.bookmark,
            last_page_read: row.last_page_read,
            date_fetch: from_millis(row.date_fetch, "chapter fetch date")?,
            date_upload: from_millis(row.date_upload, "chapter upload date")?,
        })
    }
}
