//! Chapter reconciliation.
//!
//! The source owns a chapter's name, number, scanlator, ordering and upload
//! date. The user owns read state, bookmarks and page progress, and that is
//! all a backup contributes to a chapter that already exists locally.

use crate::report::{Outcome, Tally};
use crate::snapshot::ChapterSnapshot;
use shelf_cache::Transaction;
use shelf_cache::error::Result;
use shelf_models::{Chapter, timestamp};

/// Bring the local list up to date with a freshly fetched one.
///
/// Known chapters (by url) get the source-owned fields; new ones are
/// inserted. Nothing is deleted.
pub(crate) async fn sync(tx: &mut Transaction, entry_id: i64, fetched: &[Chapter]) -> Result<Tally> {
    let mut local = tx.chapters_for_entry(entry_id).await?;
    let mut tally = Tally::default();

    for chapter in fetched {
        if let Some(known) = local.iter_mut().find(|c| c.url == chapter.url) {
            let mut updated = known.clone();
            updated.name = chapter.name.clone();
            updated.scanlator = chapter.scanlator.clone();
            updated.number = chapter.number;
            updated.source_order = chapter.source_order;
            updated.date_upload = chapter.date_upload.or(known.date_upload);
            if updated == *known {
                tally.record(Outcome::Unchanged);
                continue;
            }
            tx.update_chapter(&updated).await?;
            *known = updated;
            tally.record(Outcome::Updated);
            continue;
        }

        let mut created = chapter.clone();
        created.id = None;
        created.entry_id = Some(entry_id);
        created.date_fetch = Some(timestamp::now());
        created.id = Some(tx.insert_chapter(entry_id, &created).await?);
        local.push(created);
        tally.record(Outcome::Inserted);
    }
    Ok(tally)
}

/// Lay the backup's reading progress over the local chapters.
///
/// Backup chapters without a local counterpart are inserted when
/// `insert_unmatched` is set and skipped otherwise.
pub(crate) async fn overlay(
    tx: &mut Transaction,
    entry_id: i64,
    backup: &[ChapterSnapshot],
    insert_unmatched: bool,
) -> Result<Tally> {
    let mut local = tx.chapters_for_entry(entry_id).await?;
    let mut claimed = vec![false; local.len()];
    let mut tally = Tally::default();

    for chapter in backup {
        if let Some(index) = find_match(&local, &claimed, chapter) {
            claimed[index] = true;
            let Some(updated) = merge_progress(&local[index], chapter) else {
                tally.record(Outcome::Unchanged);
                continue;
            };
            tx.update_chapter(&updated).await?;
            local[index] = updated;
            tally.record(Outcome::Updated);
            continue;
        }

        // Repeated url within the backup, already consumed by an earlier one.
        if !insert_unmatched || local.iter().any(|c| c.url == chapter.url) {
            tracing::trace!(url = %chapter.url, "backup chapter left unmatched");
            tally.record(Outcome::Skipped);
            continue;
        }
        let mut created = chapter.to_chapter();
        created.entry_id = Some(entry_id);
        created.id = Some(tx.insert_chapter(entry_id, &created).await?);
        local.push(created);
        claimed.push(true);
        tally.record(Outcome::Inserted);
    }
    Ok(tally)
}

/// Index of the first unclaimed local chapter matching `chapter`, trying
/// progressively looser identities.
fn find_match(local: &[Chapter], claimed: &[bool], chapter: &ChapterSnapshot) -> Option<usize> {
    let unclaimed = |pred: &dyn Fn(&Chapter) -> bool| (0..local.len()).find(|&i| !claimed[i] && pred(&local[i]));
    unclaimed(&|c| c.url == chapter.url && c.name == chapter.name && c.scanlator == chapter.scanlator)
        .or_else(|| unclaimed(&|c| c.url == chapter.url))
        .or_else(|| {
            if !chapter.is_recognized_number() {
                return None;
            }
            unclaimed(&|c| {
                c.is_recognized_number() && c.number == chapter.chapter_number && c.scanlator == chapter.scanlator
            })
        })
}

/// The local chapter with the backup's progress folded in, if that changes it.
fn merge_progress(local: &Chapter, backup: &ChapterSnapshot) -> Option<Chapter> {
    let mut merged = local.clone();
    merged.read |= backup.read;
    merged.bookmark |= backup.bookmark;
    merged.last_page_read = merged.last_page_read.max(backup.last_page_read);
    (merged != *local).then_some(merged)
}
