//! Merging a snapshot into a live library.
//!
//! A restore runs as a fixed sequence of units: categories, saved searches,
//! each entry in snapshot order, then merged references. Entries are
//! restored one at a time, and each is written in two transactions: the
//! entry row itself, then its extras (category links, chapters, history,
//! tracks). Network calls happen between the two, never while a transaction
//! is open. A failed extras transaction is rolled back on its own and the
//! run moves on to the next entry.

mod category;
mod chapter;
mod entry;
mod history;
mod merged;
mod saved_search;
mod track;

use self::category::CategoryLookup;
use crate::codec;
use crate::error::{ErrorKind, Result};
use crate::flags::BackupFlags;
use crate::notify::Notifier;
use crate::report::{Outcome, RestoreError, RestoreReport, RestoreSummary, Tally};
use crate::snapshot::{EntrySnapshot, Snapshot};
use shelf_cache::{Repository, Transaction};
use shelf_models::{Chapter, Entry, timestamp};
use shelf_source::{SourceHandle, SourceResolver, Throttle, TrackerSessions};
use std::collections::HashMap;
use std::fmt::Display;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

type CacheResult<T> = shelf_cache::error::Result<T>;

/// Which parts of a snapshot to restore, and whether to use sources at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreOptions {
    /// Entries are always restored; these select their extras.
    pub include: BackupFlags,
    /// Restore from the backup alone, without asking any source.
    pub offline: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self { include: BackupFlags::ALL, offline: false }
    }
}

pub struct RestoreCoordinator<'a> {
    repo: &'a Repository,
    resolver: &'a dyn SourceResolver,
    trackers: &'a dyn TrackerSessions,
    notifier: &'a dyn Notifier,
    options: RestoreOptions,
}

impl<'a> RestoreCoordinator<'a> {
    pub fn new(
        repo: &'a Repository,
        resolver: &'a dyn SourceResolver,
        trackers: &'a dyn TrackerSessions,
        notifier: &'a dyn Notifier,
        options: RestoreOptions,
    ) -> Self {
        Self { repo, resolver, trackers, notifier, options }
    }

    /// Decode a backup file and restore it.
    ///
    /// # Errors
    /// Only a backup that cannot be decoded fails the call, with
    /// [`ErrorKind::Format`], before anything is written. Every other
    /// problem ends up in the returned report.
    pub async fn restore(&self, bytes: &[u8], cancel: &CancellationToken) -> Result<RestoreReport> {
        let snapshot = codec::decode(bytes)?;
        Ok(self.restore_snapshot(&snapshot, cancel).await)
    }

    /// Restore an already decoded snapshot.
    ///
    /// Cancellation is checked before each entry. Entries restored up to
    /// that point stay restored; merged references are not processed.
    #[instrument(skip_all, fields(entries = snapshot.entries.len(), offline = self.options.offline))]
    pub async fn restore_snapshot(&self, snapshot: &Snapshot, cancel: &CancellationToken) -> RestoreReport {
        let mut run = Run {
            coordinator: self,
            snapshot,
            report: RestoreReport::new(snapshot.entries.len() + 2),
            categories: CategoryLookup::default(),
            throttles: HashMap::new(),
            deferred: Vec::new(),
        };
        run.execute(cancel).await;

        let report = run.report;
        tracing::info!(
            completed = report.completed,
            total = report.total,
            changed = report.summary.changed(),
            errors = report.errors.len(),
            cancelled = report.cancelled,
            "restore finished",
        );
        report
    }
}

/// State of a single restore run.
struct Run<'r, 'a> {
    coordinator: &'r RestoreCoordinator<'a>,
    snapshot: &'r Snapshot,
    report: RestoreReport,
    categories: CategoryLookup,
    /// One throttle per source that asked for one.
    throttles: HashMap<i64, Throttle>,
    /// Merge-roots whose references wait until every entry exists, as
    /// `(index into snapshot.entries, local root id)`.
    deferred: Vec<(usize, i64)>,
}

impl Run<'_, '_> {
    async fn execute(&mut self, cancel: &CancellationToken) {
        let snapshot = self.snapshot;

        if self.includes(BackupFlags::CATEGORIES) {
            match self.restore_categories().await {
                Ok((lookup, tally)) => {
                    self.categories = lookup;
                    self.report.summary.categories.merge(tally);
                }
                Err(err) => self.record("categories", ErrorKind::Persistence, &*err),
            }
        }
        self.advance("categories");

        match self.restore_saved_searches().await {
            Ok(tally) => self.report.summary.saved_searches.merge(tally),
            Err(err) => self.record("saved searches", ErrorKind::Persistence, &*err),
        }
        self.advance("saved searches");

        for (index, backup) in snapshot.entries.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::warn!(remaining = snapshot.entries.len() - index, "restore cancelled");
                self.report.cancelled = true;
                return;
            }
            self.restore_entry(index, backup).await;
            self.advance(&backup.title);
        }

        let deferred = std::mem::take(&mut self.deferred);
        for (index, root_id) in deferred {
            let root = &snapshot.entries[index];
            match self.restore_references(root_id, root).await {
                Ok(tally) => self.report.summary.merged_references.merge(tally),
                Err(err) => self.record(&root.title, ErrorKind::Persistence, &*err),
            }
        }
    }

    fn includes(&self, flag: BackupFlags) -> bool {
        self.coordinator.options.include.contains(flag)
    }

    fn advance(&mut self, label: &str) {
        self.report.completed += 1;
        self.coordinator.notifier.on_progress(self.report.completed, self.report.total, label);
    }

    fn record(&mut self, title: &str, kind: ErrorKind, cause: &dyn Display) {
        let message = cause.to_string();
        tracing::warn!(title, kind = kind.label(), %message, "restore problem recorded");
        self.report.errors.push(RestoreError { at: timestamp::now(), title: title.to_string(), kind, message });
    }

    async fn throttle(&mut self, source: &SourceHandle) {
        if let Some(interval) = source.throttle() {
            self.throttles.entry(source.id()).or_insert_with(|| Throttle::new(interval)).wait().await;
        }
    }

    async fn restore_categories(&self) -> CacheResult<(CategoryLookup, Tally)> {
        let mut tx = self.coordinator.repo.begin().await?;
        let restored = category::restore(&mut tx, &self.snapshot.categories).await?;
        tx.commit().await?;
        Ok(restored)
    }

    async fn restore_saved_searches(&self) -> CacheResult<Tally> {
        let mut tx = self.coordinator.repo.begin().await?;
        let tally = saved_search::restore(&mut tx, &self.snapshot.saved_searches).await?;
        tx.commit().await?;
        Ok(tally)
    }

    async fn restore_references(&self, root_id: i64, root: &EntrySnapshot) -> CacheResult<Tally> {
        let mut tx = self.coordinator.repo.begin().await?;
        let tally = merged::restore(&mut tx, root_id, &root.merged_references).await?;
        tx.commit().await?;
        Ok(tally)
    }

    /// Source to use for this entry, or `None` to restore it offline.
    fn resolve_source(&mut self, backup: &EntrySnapshot) -> Option<SourceHandle> {
        if backup.is_merged() || self.coordinator.options.offline {
            return None;
        }
        let source = self.coordinator.resolver.get(backup.source);
        if source.is_none() {
            let name = self.snapshot.source_name(backup.source);
            let kind = ErrorKind::SourceMissing(name);
            self.record(&backup.title, kind.clone(), &kind);
        }
        source
    }

    #[instrument(skip_all, fields(url = %backup.url, source = backup.source))]
    async fn restore_entry(&mut self, index: usize, backup: &EntrySnapshot) {
        let mut source = self.resolve_source(backup);

        let fresh = match source.clone() {
            Some(handle) => match self.is_known(backup).await {
                Ok(true) => None,
                Ok(false) => {
                    let fetched = self.fetch_details(&handle, backup).await;
                    // After a failed fetch the entry finishes offline.
                    if fetched.is_none() {
                        source = None;
                    }
                    fetched
                }
                Err(err) => {
                    self.record(&backup.title, ErrorKind::Persistence, &*err);
                    return;
                }
            },
            None => None,
        };

        let (entry_id, outcome, local_chapters) = match self.upsert_entry(backup, fresh.as_ref()).await {
            Ok(upserted) => upserted,
            Err(err) => {
                self.record(&backup.title, ErrorKind::Persistence, &*err);
                return;
            }
        };
        self.report.summary.entries.record(outcome);
        tracing::debug!(entry_id, ?outcome, "entry upserted");

        let fetched = match &source {
            Some(source) if self.includes(BackupFlags::CHAPTERS) && local_chapters < backup.chapters.len() => {
                self.fetch_chapters(source, backup, entry_id).await
            }
            _ => None,
        };

        match self.restore_extras(entry_id, backup, fetched.as_deref()).await {
            Ok(summary) => self.report.summary.merge(&summary),
            Err(err) => self.record(&backup.title, ErrorKind::Persistence, &*err),
        }

        if !backup.merged_references.is_empty() {
            self.deferred.push((index, entry_id));
        }
    }

    async fn is_known(&self, backup: &EntrySnapshot) -> CacheResult<bool> {
        let mut tx = self.coordinator.repo.begin().await?;
        let known = tx.find_entry(&backup.url, backup.source).await?.is_some();
        tx.rollback().await?;
        Ok(known)
    }

    async fn fetch_details(&mut self, source: &SourceHandle, backup: &EntrySnapshot) -> Option<Entry> {
        self.throttle(source).await;
        match source.fetch_details(&backup.to_entry()).await {
            Ok(details) => Some(details),
            Err(err) => {
                self.record(&backup.title, ErrorKind::Fetch, &*err);
                None
            }
        }
    }

    async fn fetch_chapters(
        &mut self,
        source: &SourceHandle,
        backup: &EntrySnapshot,
        entry_id: i64,
    ) -> Option<Vec<Chapter>> {
        self.throttle(source).await;
        let mut entry = backup.to_entry();
        entry.id = Some(entry_id);
        match source.fetch_chapter_list(&entry).await {
            Ok(chapters) => Some(chapters),
            Err(err) => {
                self.record(&backup.title, ErrorKind::Fetch, &*err);
                None
            }
        }
    }

    /// Returns the entry id, what happened to it and how many chapters it
    /// has locally.
    async fn upsert_entry(&self, backup: &EntrySnapshot, fresh: Option<&Entry>) -> CacheResult<(i64, Outcome, usize)> {
        let mut tx = self.coordinator.repo.begin().await?;
        let (entry_id, outcome) = entry::reconcile(&mut tx, backup, fresh).await?;
        let chapters = tx.count_chapters(entry_id).await?;
        tx.commit().await?;
        Ok((entry_id, outcome, chapters))
    }

    /// Everything hanging off the entry, in one transaction.
    async fn restore_extras(
        &self,
        entry_id: i64,
        backup: &EntrySnapshot,
        fetched: Option<&[Chapter]>,
    ) -> CacheResult<RestoreSummary> {
        let mut tx = self.coordinator.repo.begin().await?;
        let summary = self.write_extras(&mut tx, entry_id, backup, fetched).await?;
        tx.commit().await?;
        Ok(summary)
    }

    async fn write_extras(
        &self,
        tx: &mut Transaction,
        entry_id: i64,
        backup: &EntrySnapshot,
        fetched: Option<&[Chapter]>,
    ) -> CacheResult<RestoreSummary> {
        let mut summary = RestoreSummary::default();
        if self.includes(BackupFlags::CATEGORIES) {
            summary.category_links = category::link(tx, entry_id, &backup.categories, &self.categories).await?;
        }
        if self.includes(BackupFlags::CHAPTERS) {
            if let Some(fetched) = fetched {
                summary.source_chapters = chapter::sync(tx, entry_id, fetched).await?;
            }
            summary.chapters = chapter::overlay(tx, entry_id, &backup.chapters, fetched.is_none()).await?;
        }
        if self.includes(BackupFlags::HISTORY) {
            summary.history = history::restore(tx, entry_id, &backup.history).await?;
        }
        if self.includes(BackupFlags::TRACKING) {
            summary.tracks = track::restore(tx, entry_id, &backup.tracking, self.coordinator.trackers).await?;
        }
        Ok(summary)
    }
}
