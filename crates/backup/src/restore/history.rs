use crate::report::{Outcome, Tally};
use crate::snapshot::HistorySnapshot;
use exn::OptionExt;
use shelf_cache::Transaction;
use shelf_cache::error::{ErrorKind, Result};
use shelf_models::History;

/// Restore reading history, resolving each record to a chapter of this
/// entry by url. Both the last read time and the time spent only grow.
pub(crate) async fn restore(tx: &mut Transaction, entry_id: i64, backup: &[HistorySnapshot]) -> Result<Tally> {
    let mut tally = Tally::default();
    for item in backup {
        let Some(last_read) = item.last_read() else {
            tally.record(Outcome::Skipped);
            continue;
        };
        let Some(chapter) = tx.find_chapter_by_url(entry_id, &item.url).await? else {
            tracing::trace!(url = %item.url, "history for unknown chapter skipped");
            tally.record(Outcome::Skipped);
            continue;
        };
        let chapter_id = chapter.id.ok_or_raise(|| ErrorKind::MissingId("chapter"))?;

        let outcome = match tx.find_history_by_chapter(chapter_id).await? {
            Some(local) => {
                let merged = History {
                    last_read: local.last_read.max(last_read),
                    time_read: local.time_read.max(item.time_read),
                    ..local.clone()
                };
                if merged == local {
                    Outcome::Unchanged
                } else {
                    tx.update_history(&merged).await?;
                    Outcome::Updated
                }
            }
            None => {
                let history = History { id: None, chapter_id, last_read, time_read: item.time_read };
                tx.insert_history(&history).await?;
                Outcome::Inserted
            }
        };
        tally.record(outcome);
    }
    Ok(tally)
}
