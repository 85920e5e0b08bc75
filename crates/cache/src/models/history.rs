use crate::error::{Error, ErrorKind};
use exn::OptionExt;
use shelf_models::{History, timestamp};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct HistoryRow {
    pub(crate) id: Option<i64>,
    pub(crate) chapter_id: i64,
    pub(crate) last_read: i64,
    pub(crate) time_read: i64,
}
impl From<&History> for HistoryRow {
    fn from(history: &History) -> Self {
        Self {
            id: history.id,
            chapter_id: history.chapter_id,
            last_read: timestamp::to_millis(history.last_read),
            time_read: history.time_read,
        }
    }
}
impl TryFrom<HistoryRow> for History {
    type Error = Error;
    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            chapter_id: row.chapter_id,
            last_read: timestamp::from_millis(row.last_read).ok_or_raise(|| ErrorKind::InvalidData("last read"))?,
            time_read: row.time_read,
        })
    }
}

/// History joined with the URL of the chapter it belongs to.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct HistoryUrlRow {
    #[sqlx(flatten)]
    pub(crate) history: HistoryRow,
    pub(crate) chapter_url: String,
}
impl TryFrom<HistoryUrlRow> for (String, History) {
    type Error = Error;
    fn try_from(row: HistoryUrlRow) -> Result<Self, Self::Error> {
        Ok((row.chapter_url, row.history.try_into()?))
    }
}
