//! Opening the library database.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use sqlx::SqliteConnection;
use sqlx::pool::PoolConnectionMetadata;
use sqlx::sqlite::{
    SqliteAutoVacuum, SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

// A restore is the only writer; the rest serve concurrent backup reads.
const FILE_CONNECTIONS: u32 = 4;
// Every connection to ":memory:" opens a separate, empty database.
const MEMORY_CONNECTIONS: u32 = 1;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Settings SqliteConnectOptions has no builder for. Run on every new
// connection, not only the first one the pool hands out.
const CONNECTION_PRAGMAS: &str = "
    PRAGMA wal_autocheckpoint = 1000;
    PRAGMA cache_size = -4096;
    PRAGMA temp_store = MEMORY;
    PRAGMA analysis_limit = 400;
";

/// Connection pool for the library database, migrated on open.
///
/// Reads and writes go through a [`Repository`](crate::Repository) built
/// from it.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database file at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let options = options().filename(path.as_ref()).create_if_missing(true);
        Self::open(options, FILE_CONNECTIONS).await
    }

    /// Open a private in-memory database.
    ///
    /// Not test-gated, so other crates can use it in their own tests. The
    /// data lives as long as the pool's single connection does.
    pub async fn connect_in_memory() -> Result<Self> {
        Self::open(options().filename(":memory:"), MEMORY_CONNECTIONS).await
    }

    async fn open(options: SqliteConnectOptions, connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(connections)
            .after_connect(|conn, meta| Box::pin(configure(conn, meta)))
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    #[instrument("migrating library database", skip(self))]
    async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.or_raise(|| ErrorKind::Migration)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Refresh planner statistics, then close every connection.
    pub async fn close(&self) {
        _ = sqlx::query("PRAGMA optimize").execute(&self.pool).await;
        self.pool.close().await;
    }
}

fn options() -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        // A restore holds the write lock for one entry at a time while the
        // app may be reading the same file.
        .busy_timeout(BUSY_TIMEOUT)
        // Restores never delete, so there is nothing to reclaim.
        .auto_vacuum(SqliteAutoVacuum::None)
}

async fn configure(conn: &mut SqliteConnection, _meta: PoolConnectionMetadata) -> sqlx::Result<()> {
    sqlx::query(CONNECTION_PRAGMAS).execute(conn).await?;
    Ok(())
}
