//! Backup and restore for the reading library.
//!
//! A backup is a [`Snapshot`] of the user's library (favorited entries, the
//! constituents of favorited merged entries, categories, saved searches and
//! per-entry chapters, history and tracking state) written with a versioned,
//! checksummed header by [`codec::encode`].
//!
//! Restoring merges a snapshot into a live database that may already hold
//! some or all of the same records:
//!
//! - records are matched by their natural identity, never by numeric id,
//!   so existing rows keep their ids and nothing is duplicated;
//! - reading progress only ever moves forward;
//! - nothing local is deleted;
//! - missing sources, offline runs and per-entry failures degrade to an
//!   offline restore of that entry and an entry in the [`RestoreReport`].
//!
//! Running the same restore twice leaves the database unchanged the second
//! time.

mod builder;
pub mod codec;
mod context;
pub mod error;
mod flags;
mod notify;
mod report;
mod restore;
pub mod snapshot;
mod validate;

pub use crate::builder::{SnapshotBuilder, create_backup};
pub use crate::context::Context;
pub use crate::flags::BackupFlags;
pub use crate::notify::{Notifier, NoopNotifier};
pub use crate::report::{Outcome, RestoreError, RestoreReport, RestoreSummary, Tally};
pub use crate::restore::{RestoreCoordinator, RestoreOptions};
pub use crate::snapshot::Snapshot;
pub use crate::validate::{SnapshotValidation, validate};
