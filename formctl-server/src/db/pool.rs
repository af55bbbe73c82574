//! Database connection pool management
//!
//! Uses a sqlx `SqlitePool` with explicit connection limits. Opening a pool
//! through [`open`] also runs the schema migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::{migrations, DbError};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a SQLite connection pool from a URL such as
/// `sqlite://forms.db` or `sqlite::memory:`.
///
/// The database file is created if missing and foreign keys are enforced.
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://formctl.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if is_in_memory(database_url) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        return Ok(pool);
    }

    create_pool_with_options(options, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a pool with custom connect options.
///
/// # Arguments
///
/// * `options` - SQLite connect options
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    options: SqliteConnectOptions,
    max_connections: u32,
) -> Result<SqlitePool, DbError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create a pool and bring the schema up to date.
pub async fn open(database_url: &str) -> Result<SqlitePool, DbError> {
    let pool = create_pool(database_url).await?;
    migrations::run(&pool).await?;
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Migrated pool on a fresh database file. Keep the `TempDir` alive for as
/// long as the pool is used.
#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("forms.db"))
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = create_pool_with_options(options, DEFAULT_MAX_CONNECTIONS)
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    (dir, pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pool_acquires_connection() {
        let (_dir, pool) = test_pool().await;

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn in_memory_url_keeps_schema_across_acquires() {
        let pool = open("sqlite::memory:").await.expect("open failed");

        for _ in 0..3 {
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Forms")
                .fetch_one(&pool)
                .await
                .expect("Forms table should persist");
            assert_eq!(count, 0);
        }
    }

    #[tokio::test]
    async fn concurrent_pool_access() {
        let (_dir, pool) = test_pool().await;

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i64,) = sqlx::query_as("SELECT $1")
                        .bind(i as i64)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i64);
        }
    }

    #[test]
    fn detects_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:forms?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://formctl.db"));
    }
}
