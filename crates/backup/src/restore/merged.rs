use crate::report::{Outcome, Tally};
use crate::snapshot::MergedReferenceSnapshot;
use exn::OptionExt;
use shelf_cache::Transaction;
use shelf_cache::error::{ErrorKind, Result};

/// Recreate the edges of one merge-root.
///
/// Runs after every entry has been upserted, so a constituent that appears
/// later in the snapshot than its root still resolves.
pub(crate) async fn restore(tx: &mut Transaction, root_id: i64, backup: &[MergedReferenceSnapshot]) -> Result<Tally> {
    let mut tally = Tally::default();
    for reference in backup {
        if tx.find_merged_reference(&reference.merge_url, &reference.entry_url).await?.is_some() {
            tally.record(Outcome::Unchanged);
            continue;
        }
        let Some(constituent) = tx.find_entry(&reference.entry_url, reference.entry_source).await? else {
            tracing::debug!(url = %reference.entry_url, "merged constituent not in library, edge skipped");
            tally.record(Outcome::Skipped);
            continue;
        };
        let entry_id = constituent.id.ok_or_raise(|| ErrorKind::MissingId("entry"))?;
        tx.insert_merged_reference(&reference.to_reference(root_id, entry_id)).await?;
        tally.record(Outcome::Inserted);
    }
    Ok(tally)
}
