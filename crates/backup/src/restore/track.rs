use crate::report::{Outcome, Tally};
use crate::snapshot::TrackSnapshot;
use shelf_cache::Transaction;
use shelf_cache::error::Result;
use shelf_models::Track;
use shelf_source::TrackerSessions;

/// Restore tracking for services the user is logged in to.
pub(crate) async fn restore(
    tx: &mut Transaction,
    entry_id: i64,
    backup: &[TrackSnapshot],
    sessions: &dyn TrackerSessions,
) -> Result<Tally> {
    let mut local = tx.tracks_for_entry(entry_id).await?;
    let mut tally = Tally::default();

    for item in backup {
        if !sessions.is_logged_in(item.service) {
            tracing::debug!(service = item.service, "no tracker session, track skipped");
            tally.record(Outcome::Skipped);
            continue;
        }
        if let Some(existing) = local.iter_mut().find(|t| t.service == item.service) {
            let merged = merge(existing, item);
            if merged == *existing {
                tally.record(Outcome::Unchanged);
                continue;
            }
            tx.update_track(&merged).await?;
            *existing = merged;
            tally.record(Outcome::Updated);
            continue;
        }
        let mut created = item.to_track();
        created.entry_id = Some(entry_id);
        created.id = Some(tx.insert_track(entry_id, &created).await?);
        local.push(created);
        tally.record(Outcome::Inserted);
    }
    Ok(tally)
}

fn merge(local: &Track, backup: &TrackSnapshot) -> Track {
    let mut merged = local.clone();
    merged.media_id = backup.media_id;
    if backup.library_id.is_some() {
        merged.library_id = backup.library_id;
    }
    merged.last_chapter_read = local.last_chapter_read.max(backup.last_chapter_read);
    merged
}
