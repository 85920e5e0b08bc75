use crate::error::Result;
use async_trait::async_trait;
use shelf_models::{Chapter, Entry};
use std::sync::Arc;
use std::time::Duration;

pub type SourceHandle = Arc<dyn Source>;

/// An installed content source.
///
/// Only the read side matters here: given an entry identified by its
/// `(url, source)` pair, a source can refresh its details and list its
/// chapters. Implementations are expected to be cheap to share.
#[async_trait]
pub trait Source: Send + Sync {
    /// Stable numeric id, the `source` half of an entry's identity.
    fn id(&self) -> i64;

    /// Human-readable name, used in backups to describe missing sources.
    fn name(&self) -> &str;

    /// Minimum delay between two requests, if the source asks for one.
    fn throttle(&self) -> Option<Duration> {
        None
    }

    /// Fetch up-to-date details for `entry`.
    ///
    /// The returned entry carries only source-owned fields (title, artist,
    /// author, description, genres, status, thumbnail); library state is
    /// left to the caller.
    async fn fetch_details(&self, entry: &Entry) -> Result<Entry>;

    /// Fetch the current chapter list of `entry`, newest first or in the
    /// source's own order, with `source_order` filled in.
    async fn fetch_chapter_list(&self, entry: &Entry) -> Result<Vec<Chapter>>;
}
