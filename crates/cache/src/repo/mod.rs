//! Transactional access to the library database.
//!
//! [`Repository`] is a cheap handle onto the pool; all reads and writes go
//! through a [`Transaction`] obtained from [`Repository::begin`]. Dropping a
//! transaction without committing it rolls every change back, which is what
//! lets a restore discard one entry's extras without touching the rest.

mod category;
mod chapter;
mod entry;
mod history;
mod merged;
mod saved_search;
mod track;

use crate::Database;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Sqlite, SqlitePool};

#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a unit of work.
    pub async fn begin(&self) -> Result<Transaction> {
        let tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        Ok(Transaction { tx })
    }
}

/// An open database transaction.
///
/// Reads see the transaction's own uncommitted writes.
pub struct Transaction {
    tx: sqlx::Transaction<'static, Sqlite>,
}
impl Transaction {
    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.or_raise(|| ErrorKind::Database)
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.or_raise(|| ErrorKind::Database)
    }
}

/// Fail an update that matched nothing.
fn expect_one(result: SqliteQueryResult, what: &'static str) -> Result<()> {
    if result.rows_affected() == 0 {
        exn::bail!(ErrorKind::NotFound(what));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use shelf_models::Entry;

    pub(crate) async fn repository() -> Repository {
        let db = Database::connect_in_memory().await.unwrap();
        Repository::from(&db)
    }

    pub(crate) async fn persisted_entry(tx: &mut Transaction, url: &str) -> Entry {
        let mut entry = Entry::new(1, url, url.trim_start_matches('/'));
        entry.favorite = true;
        entry.id = Some(tx.insert_entry(&entry).await.unwrap());
        entry
    }

    #[tokio::test]
    async fn test_commit_persists() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        persisted_entry(&mut tx, "/a").await;
        tx.commit().await.unwrap();

        let mut tx = repo.begin().await.unwrap();
        assert!(tx.find_entry("/a", 1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let repo = repository().await;
        {
            let mut tx = repo.begin().await.unwrap();
            persisted_entry(&mut tx, "/a").await;
            assert!(tx.find_entry("/a", 1).await.unwrap().is_some());
        }
        let mut tx = repo.begin().await.unwrap();
        assert!(tx.find_entry("/a", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let repo = repository().await;
        let mut tx = repo.begin().await.unwrap();
        persisted_entry(&mut tx, "/a").await;
        tx.rollback().await.unwrap();

        let mut tx = repo.begin().await.unwrap();
        assert!(tx.list_favorite_entries().await.unwrap().is_empty());
    }
}
