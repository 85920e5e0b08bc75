use crate::report::Outcome;
use crate::snapshot::EntrySnapshot;
use exn::OptionExt;
use shelf_cache::Transaction;
use shelf_cache::error::{ErrorKind, Result};
use shelf_models::{Entry, EntryStatus};

/// Upsert the entry by `(url, source)`, returning its local id.
///
/// A new entry takes `fresh` details over the backup's where the source
/// provided them. An existing entry keeps its id and its metadata.
pub(crate) async fn reconcile(
    tx: &mut Transaction,
    backup: &EntrySnapshot,
    fresh: Option<&Entry>,
) -> Result<(i64, Outcome)> {
    if let Some(local) = tx.find_entry(&backup.url, backup.source).await? {
        let id = local.id.ok_or_raise(|| ErrorKind::MissingId("entry"))?;
        let merged = merge_existing(&local, backup);
        if merged == local {
            return Ok((id, Outcome::Unchanged));
        }
        tx.update_entry(&merged).await?;
        return Ok((id, Outcome::Updated));
    }

    let mut entry = backup.to_entry();
    if let Some(fresh) = fresh {
        entry.apply_details(fresh);
    }
    let id = tx.insert_entry(&entry).await?;
    Ok((id, Outcome::Inserted))
}

/// Library state comes from the backup; metadata gaps are filled from it.
fn merge_existing(local: &Entry, backup: &EntrySnapshot) -> Entry {
    let restored = backup.to_entry();
    let mut merged = local.clone();

    merged.favorite = restored.favorite;
    merged.date_added = restored.date_added.or(local.date_added);
    merged.viewer_flags = restored.viewer_flags;
    merged.chapter_flags = restored.chapter_flags;

    if merged.title.is_empty() {
        merged.title = restored.title;
    }
    merged.artist = merged.artist.or(restored.artist);
    merged.author = merged.author.or(restored.author);
    merged.description = merged.description.or(restored.description);
    merged.thumbnail_url = merged.thumbnail_url.or(restored.thumbnail_url);
    merged.last_update = merged.last_update.or(restored.last_update);
    if merged.genres.is_empty() {
        merged.genres = restored.genres;
    }
    if merged.status == EntryStatus::Unknown {
        merged.status = restored.status;
    }
    merged.initialized = local.initialized || restored.initialized;
    merged
}
