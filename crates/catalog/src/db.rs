//! Database connection and pool management.

use exn::ResultExt;
use sqlx::SqliteConnection;
use sqlx::pool::PoolConnectionMetadata;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Embedded migrations that are run automatically on connect.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
// One upload is one bulk read and one batch write; requests rarely overlap.
const MAX_CONNECTIONS: u32 = 5;
const SCHEME: &str = "sqlite:";

/// Database connection pool for the catalog.
///
/// Constructed once at process start and shared; hand out [`Repository`]
/// instances with [`Repository::from`].
///
/// [`Repository`]: crate::Repository
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn new(options: SqliteConnectOptions, max: Option<u32>) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            // Apply the query-based PRAGMAs to EVERY connection in the pool,
            // not only the first one handed out.
            .after_connect(|conn, meta| Box::pin(async move { Self::apply_pragmas(conn, meta).await }))
            .max_connections(max.unwrap_or(MAX_CONNECTIONS))
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Connect using an SQLite connection string (`sqlite://books.db`,
    /// `sqlite:books.db?mode=rwc`, ...).
    ///
    /// Creates the database file if it doesn't exist and runs migrations.
    #[instrument(skip_all)]
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        // sqlx treats anything without a scheme as a filename.
        if !url.starts_with(SCHEME) {
            exn::bail!(ErrorKind::ConnectionString);
        }
        let options = SqliteConnectOptions::from_str(url).or_raise(|| ErrorKind::ConnectionString)?;
        let db = Self::new(Self::configure(options).create_if_missing(true), None).await?;
        tracing::info!("Connected to catalog database");
        Ok(db)
    }

    /// Connect to an in-memory database (useful for testing).
    ///
    /// Note:
    /// - In-memory databases are destroyed when the connection closes.
    /// - Do NOT apply `#[cfg(test)]` so that other crates can also use this in their tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = Self::configure(SqliteConnectOptions::new().filename(":memory:"));
        // Parallel connections to ":memory:" would each see their own empty
        // database, so the pool is limited to one.
        Self::new(options, Some(1)).await
    }

    /// Connection options shared between file and in-memory databases.
    fn configure(options: SqliteConnectOptions) -> SqliteConnectOptions {
        options
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true)
            // PRAGMA synchronous = NORMAL (balance between safety and speed)
            .synchronous(SqliteSynchronous::Normal)
            // Concurrent uploads serialize on the single WAL writer.
            .busy_timeout(std::time::Duration::from_millis(1500))
    }

    /// Apply additional PRAGMA settings that aren't exposed via SqliteConnectOptions.
    async fn apply_pragmas(conn: &mut SqliteConnection, _meta: PoolConnectionMetadata) -> sqlx::Result<()> {
        sqlx::query(
            r#"
                PRAGMA cache_size = -8192;
                PRAGMA temp_store = MEMORY;
            "#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Run database migrations.
    ///
    /// This is called automatically by `connect` and `connect_in_memory`.
    #[instrument("performing database migrations", skip(self))]
    async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.or_raise(|| ErrorKind::Migration)
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    ///
    /// Waits for all connections to be returned to the pool and then closes
    /// them. The Database instance should not be used afterwards.
    pub async fn close(&self) {
        // Let SQLite update query planner statistics
        _ = sqlx::query("PRAGMA optimize").execute(&self.pool).await;
        self.pool.close().await;
    }
}
