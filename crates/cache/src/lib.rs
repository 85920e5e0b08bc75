//! SQLite persistence for the reading library.
//!
//! This crate owns the local library database: entries, their chapters,
//! categories, reading history, tracker state, merged-entry references and
//! saved searches. The backup engine reads and writes exclusively through
//! [`Transaction`], so every multi-row change can be committed or abandoned
//! as a unit.
//!
//! Timestamps are stored as milliseconds since the Unix epoch and list-like
//! fields (genres) as JSON text.

mod db;
pub mod error;
mod models;
mod repo;

pub use crate::db::Database;
pub use crate::repo::{Repository, Transaction};
