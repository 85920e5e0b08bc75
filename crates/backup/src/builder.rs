use crate::codec;
use crate::error::{ErrorKind, Result};
use crate::flags::BackupFlags;
use crate::snapshot::{
    CategorySnapshot, ChapterSnapshot, EntrySnapshot, HistorySnapshot, MergedReferenceSnapshot, SavedSearchSnapshot,
    Snapshot, TrackSnapshot,
};
use exn::{OptionExt, ResultExt};
use shelf_cache::{Repository, Transaction};
use shelf_compress::Compression;
use shelf_models::Entry;
use shelf_source::SourceResolver;
use std::collections::{BTreeMap, HashMap};
use tracing::instrument;

/// Reads the library into a [`Snapshot`].
///
/// The whole read happens inside one transaction, so the snapshot is
/// consistent even if the library changes while it is being built. Nothing
/// is written.
pub struct SnapshotBuilder<'a> {
    repo: &'a Repository,
    resolver: &'a dyn SourceResolver,
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(repo: &'a Repository, resolver: &'a dyn SourceResolver) -> Self {
        Self { repo, resolver }
    }

    /// Build a snapshot of every favorited entry, followed by every
    /// constituent of a favorited merged entry.
    #[instrument(skip(self))]
    pub async fn build(&self, flags: BackupFlags) -> Result<Snapshot> {
        let mut tx = self.repo.begin().await.or_raise(|| ErrorKind::Encode)?;

        let categories = tx.list_categories().await.or_raise(|| ErrorKind::Encode)?;
        // Local category id to position in the snapshot list.
        let positions: HashMap<i64, usize> = categories
            .iter()
            .enumerate()
            .filter_map(|(position, category)| category.id.map(|id| (id, position)))
            .collect();

        let mut entries = tx.list_favorite_entries().await.or_raise(|| ErrorKind::Encode)?;
        entries.extend(tx.list_merged_constituents().await.or_raise(|| ErrorKind::Encode)?);

        let mut sources = BTreeMap::new();
        let mut snapshots = Vec::with_capacity(entries.len());
        for entry in &entries {
            if !entry.is_merged() {
                sources.entry(entry.source).or_insert_with(|| self.source_name(entry.source));
            }
            let snapshot = entry_snapshot(&mut tx, entry, flags, &positions).await.or_raise(|| ErrorKind::Encode)?;
            snapshots.push(snapshot);
        }

        let saved_searches = tx.list_saved_searches().await.or_raise(|| ErrorKind::Encode)?;
        tx.rollback().await.or_raise(|| ErrorKind::Encode)?;

        tracing::info!(entries = snapshots.len(), categories = categories.len(), "snapshot built");
        Ok(Snapshot {
            entries: snapshots,
            categories: categories.iter().map(CategorySnapshot::from).collect(),
            sources,
            saved_searches: saved_searches.iter().map(SavedSearchSnapshot::from).collect(),
            ..Snapshot::default()
        })
    }

    fn source_name(&self, source: i64) -> String {
        match self.resolver.get(source) {
            Some(installed) => installed.name().to_string(),
            None => source.to_string(),
        }
    }
}

async fn entry_snapshot(
    tx: &mut Transaction,
    entry: &Entry,
    flags: BackupFlags,
    positions: &HashMap<i64, usize>,
) -> shelf_cache::error::Result<EntrySnapshot> {
    let id = entry.id.ok_or_raise(|| shelf_cache::error::ErrorKind::MissingId("entry"))?;
    let mut snapshot = EntrySnapshot::from(entry);
    if flags.contains(BackupFlags::CHAPTERS) {
        snapshot.chapters = tx.chapters_for_entry(id).await?.iter().map(ChapterSnapshot::from).collect();
    }
    if flags.contains(BackupFlags::CATEGORIES) {
        snapshot.categories = tx
            .categories_for_entry(id)
            .await?
            .iter()
            .filter_map(|category| category.id.and_then(|id| positions.get(&id).copied()))
            .collect();
    }
    if flags.contains(BackupFlags::HISTORY) {
        snapshot.history = tx
            .history_for_entry(id)
            .await?
            .iter()
            .map(|(url, history)| HistorySnapshot::new(url.as_str(), history))
            .collect();
    }
    if flags.contains(BackupFlags::TRACKING) {
        snapshot.tracking = tx.tracks_for_entry(id).await?.iter().map(TrackSnapshot::from).collect();
    }
    if entry.is_merged() {
        snapshot.merged_references =
            tx.merged_references_for_root(id).await?.iter().map(MergedReferenceSnapshot::from).collect();
    }
    Ok(snapshot)
}

/// Build a snapshot and encode it in one go.
pub async fn create_backup(
    repo: &Repository,
    resolver: &dyn SourceResolver,
    flags: BackupFlags,
    compression: Compression,
) -> Result<Vec<u8>> {
    let snapshot = SnapshotBuilder::new(repo, resolver).build(flags).await?;
    codec::encode(&snapshot, compression)
}
