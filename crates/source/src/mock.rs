//! In-memory source for testing.

use crate::error::{ErrorKind, Result};
use crate::source::Source;
use async_trait::async_trait;
use shelf_models::{Chapter, Entry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A scripted [`Source`] that never touches the network.
///
/// Without scripted details, [`fetch_details`](Source::fetch_details)
/// echoes the requested entry back. Call counters let tests assert whether
/// the network would have been used at all.
///
/// ```
/// use shelf_source::{MockSource, Source};
/// use shelf_models::{Chapter, Entry};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = MockSource::new(1, "Mock").with_chapters([Chapter::new("/c/1", "One")]);
/// let chapters = source.fetch_chapter_list(&Entry::new(1, "/m/1", "M")).await.unwrap();
/// assert_eq!(chapters.len(), 1);
/// assert_eq!(source.chapter_list_calls(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct MockSource {
    id: i64,
    name: String,
    throttle: Option<Duration>,
    details: Option<Entry>,
    chapters: Vec<Chapter>,
    fail_details: bool,
    fail_chapters: bool,
    details_calls: AtomicUsize,
    chapter_list_calls: AtomicUsize,
}

impl MockSource {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            throttle: None,
            details: None,
            chapters: Vec::new(),
            fail_details: false,
            fail_chapters: false,
            details_calls: AtomicUsize::new(0),
            chapter_list_calls: AtomicUsize::new(0),
        }
    }

    /// Answer every details request with these source-owned fields.
    pub fn with_details(mut self, details: Entry) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_chapters(mut self, chapters: impl IntoIterator<Item = Chapter>) -> Self {
        self.chapters = chapters.into_iter().collect();
        self
    }

    pub fn with_throttle(mut self, interval: Duration) -> Self {
        self.throttle = Some(interval);
        self
    }

    /// Fail every details request with a network error.
    pub fn failing_details(mut self) -> Self {
        self.fail_details = true;
        self
    }

    /// Fail every chapter list request with a network error.
    pub fn failing_chapters(mut self) -> Self {
        self.fail_chapters = true;
        self
    }

    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub fn chapter_list_calls(&self) -> usize {
        self.chapter_list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn throttle(&self) -> Option<Duration> {
        self.throttle
    }

    async fn fetch_details(&self, entry: &Entry) -> Result<Entry> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_details {
            exn::bail!(ErrorKind::Network(format!("{}: connection refused", self.name)));
        }
        let mut details = self.details.clone().unwrap_or_else(|| entry.clone());
        details.id = None;
        details.url = entry.url.clone();
        details.source = entry.source;
        Ok(details)
    }

    async fn fetch_chapter_list(&self, _entry: &Entry) -> Result<Vec<Chapter>> {
        self.chapter_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_chapters {
            exn::bail!(ErrorKind::Network(format!("{}: connection refused", self.name)));
        }
        Ok(self.chapters.clone())
    }
}
