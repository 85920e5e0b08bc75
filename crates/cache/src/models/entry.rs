use super::{from_millis, to_millis};
use crate::error::{Error, ErrorKind};
use exn::ResultExt;
use shelf_models::{Entry, EntryStatus};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EntryRow {
    pub(crate) id: Option<i64>,
    pub(crate) source: i64,
    pub(crate) url: String,
    pub(crate) title: String,
    pub(crate) artist: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) genres: String,
    pub(crate) status: i64,
    pub(crate) thumbnail_url: Option<String>,
    pub(crate) favorite: bool,
    pub(crate) initialized: bool,
    pub(crate) last_update: Option<i64>,
    pub(crate) date_added: Option<i64>,
    pub(crate) viewer_flags: i64,
    pub(crate) chapter_flags: i64,
}
impl TryFrom<&Entry> for EntryRow {
    type Error = Error;
    fn try_from(entry: &Entry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id,
            source: entry.source,
            url: entry.url.clone(),
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            author: entry.author.clone(),
            description: entry.description.clone(),
            genres: serde_json::to_string(&entry.genres).or_raise(|| ErrorKind::InvalidData("genres"))?,
            status: entry.status.as_i64(),
            thumbnail_url: entry.thumbnail_url.clone(),
            favorite: entry.favorite,
            initialized: entry.initialized,
            last_update: to_millis(entry.last_update),
            date_added: to_millis(entry.date_added),
            viewer_flags: entry.viewer_flags,
            chapter_flags: entry.chapter_flags,
        })
    }
}
impl TryFrom<EntryRow> for Entry {
    type Error = Error;
    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            source: row.source,
            url: row.url,
            title: row.title,
            artist: row.artist,
            author: row.author,
            description: row.description,
            genres: serde_json::from_str(&row.genres).or_raise(|| ErrorKind::InvalidData("genres"))?,
            status: EntryStatus::from(row.status),
            thumbnail_url: row.thumbnail_url,
            favorite: row.favorite,
            initialized: row.initialized,
            last_update: from_millis(row.last_update, "last update")?,
            date_added: from_millis(row.date_added, "date added")?,
            viewer_flags: row.viewer_flags,
            chapter_flags: row.chapter_flags,
        })
    }
}
