//! Domain types for the reading library.
//!
//! These are plain data types shared by the persistence layer, the source
//! contracts and the backup engine. They carry no behaviour beyond identity
//! helpers; storage rows and snapshot records convert to and from them.

mod models;
pub mod timestamp;

pub use crate::models::*;

/// Source id reserved for synthetic merge-root entries.
///
/// A merge-root aggregates several constituent entries from real sources;
/// no installed source ever answers for this id.
pub const MERGED_SOURCE_ID: i64 = 6969;
