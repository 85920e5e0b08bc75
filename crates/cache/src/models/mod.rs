mod category;
mod chapter;
mod entry;
mod history;
mod merged;
mod saved_search;
mod track;

pub(crate) use self::category::CategoryRow;
pub(crate) use self::chapter::ChapterRow;
pub(crate) use self::entry::EntryRow;
pub(crate) use self::history::{HistoryRow, HistoryUrlRow};
pub(crate) use self::merged::MergedReferenceRow;
pub(crate) use self::saved_search::SavedSearchRow;
pub(crate) use self::track::TrackRow;

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use shelf_models::timestamp;
use time::UtcDateTime;

fn to_millis(at: Option<UtcDateTime>) -> Option<i64> {
    at.map(timestamp::to_millis)
}

fn from_millis(millis: Option<i64>, field: &'static str) -> Result<Option<UtcDateTime>> {
    millis
        .map(|m| timestamp::from_millis(m).ok_or_raise(|| ErrorKind::InvalidData(field)))
        .transpose()
}
