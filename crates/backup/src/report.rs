use crate::error::ErrorKind;
use std::io::{self, Write};
use time::UtcDateTime;
use time::format_description::well_known::Rfc3339;

/// What happened to a single record during a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    Updated,
    Unchanged,
    /// Not written: unresolvable reference, excluded service, and so on.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Inserted => self.inserted += 1,
            Outcome::Updated => self.updated += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: Tally) {
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
        self.skipped += other.skipped;
    }

    /// Records written, either inserted or updated.
    pub fn changed(&self) -> usize {
        self.inserted + self.updated
    }

    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.unchanged + self.skipped
    }
}

/// Per-kind tallies of a restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub categories: Tally,
    pub saved_searches: Tally,
    pub entries: Tally,
    pub category_links: Tally,
    /// Chapters from the backup overlaid onto the local list.
    pub chapters: Tally,
    /// Chapters taken from a freshly fetched source list.
    pub source_chapters: Tally,
    pub history: Tally,
    pub tracks: Tally,
    pub merged_references: Tally,
}

impl RestoreSummary {
    pub fn merge(&mut self, other: &RestoreSummary) {
        for (mine, theirs) in self.tallies_mut().into_iter().zip(other.tallies()) {
            mine.merge(theirs);
        }
    }

    /// Records written across all kinds.
    pub fn changed(&self) -> usize {
        self.tallies().iter().map(Tally::changed).sum()
    }

    fn tallies(&self) -> [Tally; 9] {
        [
            self.categories,
            self.saved_searches,
            self.entries,
            self.category_links,
            self.chapters,
            self.source_chapters,
            self.history,
            self.tracks,
            self.merged_references,
        ]
    }

    fn tallies_mut(&mut self) -> [&mut Tally; 9] {
        [
            &mut self.categories,
            &mut self.saved_searches,
            &mut self.entries,
            &mut self.category_links,
            &mut self.chapters,
            &mut self.source_chapters,
            &mut self.history,
            &mut self.tracks,
            &mut self.merged_references,
        ]
    }

    fn labelled(&self) -> [(&'static str, Tally); 9] {
        let [a, b, c, d, e, f, g, h, i] = self.tallies();
        [
            ("categories", a),
            ("saved searches", b),
            ("entries", c),
            ("category links", d),
            ("chapters", e),
            ("source chapters", f),
            ("history", g),
            ("tracks", h),
            ("merged references", i),
        ]
    }
}

/// A problem recorded while restoring one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreError {
    pub at: UtcDateTime,
    /// Title of the entry, or the name of the step outside the entry loop.
    pub title: String,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Units of work: one per entry plus the categories and saved searches
    /// steps. Merged references are linked after the last entry, uncounted.
    pub total: usize,
    pub completed: usize,
    pub cancelled: bool,
    pub summary: RestoreSummary,
    pub errors: Vec<RestoreError>,
}

impl RestoreReport {
    pub(crate) fn new(total: usize) -> Self {
        Self { total, ..Self::default() }
    }

    pub fn is_clean(&self) -> bool {
        !self.cancelled && self.errors.is_empty()
    }

    /// Errors of one kind, e.g. to list every missing source.
    pub fn errors_of<'a>(&'a self, kind: &'a ErrorKind) -> impl Iterator<Item = &'a RestoreError> + 'a {
        self.errors.iter().filter(move |e| &e.kind == kind)
    }

    /// Write a plain-text restore log.
    pub fn write_log(&self, mut out: impl Write) -> io::Result<()> {
        let state = if self.cancelled { "cancelled" } else { "finished" };
        writeln!(out, "Restore {state}: {}/{} steps", self.completed, self.total)?;
        for (label, tally) in self.summary.labelled() {
            if tally.total() == 0 {
                continue;
            }
            writeln!(
                out,
                "  {label}: {} inserted, {} updated, {} unchanged, {} skipped",
                tally.inserted, tally.updated, tally.unchanged, tally.skipped
            )?;
        }
        if self.errors.is_empty() {
            return writeln!(out, "No errors");
        }
        writeln!(out, "{} error(s):", self.errors.len())?;
        for error in &self.errors {
            let at = error.at.format(&Rfc3339).map_err(io::Error::other)?;
            writeln!(out, "  {at} [{}] {}: {}", error.kind.label(), error.title, error.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::utc_datetime;

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        for outcome in [Outcome::Inserted, Outcome::Updated, Outcome::Unchanged, Outcome::Unchanged, Outcome::Skipped] {
            tally.record(outcome);
        }
        assert_eq!(tally.changed(), 2);
        assert_eq!(tally.total(), 5);
    }

    #[test]
    fn test_summary_merge() {
        let mut left = RestoreSummary::default();
        left.chapters.record(Outcome::Inserted);
        let mut right = RestoreSummary::default();
        right.chapters.record(Outcome::Inserted);
        right.tracks.record(Outcome::Updated);
        left.merge(&right);
        assert_eq!(left.chapters.inserted, 2);
        assert_eq!(left.tracks.updated, 1);
        assert_eq!(left.changed(), 3);
    }

    #[test]
    fn test_log() {
        let mut report = RestoreReport::new(3);
        report.completed = 3;
        report.summary.entries.record(Outcome::Inserted);
        report.errors.push(RestoreError {
            at: utc_datetime!(2024-01-02 03:04:05),
            title: "Some Series".to_string(),
            kind: ErrorKind::SourceMissing("MangaDex".to_string()),
            message: "source not installed: MangaDex".to_string(),
        });
        let mut log = Vec::new();
        report.write_log(&mut log).unwrap();
        assert_eq!(
            String::from_utf8(log).unwrap(),
            "Restore finished: 3/3 steps\n\
             \x20 entries: 1 inserted, 0 updated, 0 unchanged, 0 skipped\n\
             1 error(s):\n\
             \x20 2024-01-02T03:04:05Z [source missing] Some Series: source not installed: MangaDex\n"
        );
        assert!(!report.is_clean());
        assert_eq!(report.errors_of(&ErrorKind::SourceMissing("MangaDex".to_string())).count(), 1);
    }
}
