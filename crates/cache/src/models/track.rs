use super::{from_millis, to_millis};
use crate::error::Error;
use shelf_models::Track;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TrackRow {
    pub(crate) id: Option<i64>,
    pub(crate) entry_id: Option<i64>,
    pub(crate) service: i64,
    pub(crate) media_id: i64,
    pub(crate) library_id: Option<i64>,
    pub(crate) title: String,
    pub(crate) last_chapter_read: f64,
    pub(crate) total_chapters: i64,
    pub(crate) score: f64,
    pub(crate) status: i64,
    pub(crate) tracking_url: String,
    pub(crate) started_at: Option<i64>,
    pub(crate) finished_at: Option<i64>,
}
impl From<&Track> for TrackRow {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id,
            entry_id: track.entry_id,
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
impl TryFrom<TrackRow> for Track {
    type Error = Error;
    fn try_from(row: TrackRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            entry_id: row.entry_id,
            service: row.service,
            media_id: row.media_id,
            library_id: row.library_id,
            title: row.title,
            last_chapter_read: row.last_chapter_read,
            total_chapters: row.total_chapters,
            score: row.score,
            status: row.status,
            tracking_url: row.tracking_url,
            started_at: from_millis(row.started_at, "track start date")?,
            finished_at: from_millis(row.finished_at, "track finish date")?,
        })
    }
}
