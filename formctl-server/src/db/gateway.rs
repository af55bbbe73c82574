//! Connection/command gateway
//!
//! `DbSession` is the only place SQL is executed. It acquires one pooled
//! connection on first use and keeps it for the rest of the logical
//! operation, so everything issued through one session (including a
//! transaction) runs on the same connection. Dropping the session gives the
//! connection back to the pool; an open transaction is rolled back.

use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite, SqliteConnection, SqlitePool, Transaction};

use super::statement::{Params, Prepared};
use super::DbError;

enum Handle {
    Connection(PoolConnection<Sqlite>),
    Transaction(Transaction<'static, Sqlite>),
}

/// One logical unit of database access
pub struct DbSession {
    pool: SqlitePool,
    handle: Option<Handle>,
}

impl DbSession {
    /// Create a session. No connection is taken until the first statement.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, handle: None }
    }

    /// Whether a connection (plain or transactional) is currently held
    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub fn in_transaction(&self) -> bool {
        matches!(self.handle, Some(Handle::Transaction(_)))
    }

    async fn connection(&mut self) -> Result<&mut SqliteConnection, DbError> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => {
                tracing::debug!("acquiring pooled connection");
                Handle::Connection(self.pool.acquire().await?)
            }
        };

        Ok(match self.handle.insert(handle) {
            Handle::Connection(conn) => &mut **conn,
            Handle::Transaction(tx) => &mut **tx,
        })
    }

    /// Run a statement that yields no rows; returns the affected-row count.
    pub async fn execute(&mut self, template: &str, params: &Params) -> Result<u64, DbError> {
        let prepared = Prepared::new(template, params)?;
        let args = prepared.arguments(params)?;
        tracing::debug!(sql = %prepared.sql, params = ?params.names().collect::<Vec<_>>(), "execute");

        let conn = self.connection().await?;
        let result = sqlx::query_with(&prepared.sql, args).execute(conn).await?;
        Ok(result.rows_affected())
    }

    /// Run a statement and return the first column of its first row.
    ///
    /// Used for generated ids (`INSERT .. RETURNING Id`).
    pub async fn scalar<T>(&mut self, template: &str, params: &Params) -> Result<T, DbError>
    where
        T: Send + Unpin,
        (T,): for<'r> FromRow<'r, SqliteRow>,
    {
        let prepared = Prepared::new(template, params)?;
        let args = prepared.arguments(params)?;
        tracing::debug!(sql = %prepared.sql, params = ?params.names().collect::<Vec<_>>(), "scalar");

        let conn = self.connection().await?;
        sqlx::query_scalar_with::<_, T, _>(&prepared.sql, args)
            .fetch_optional(conn)
            .await?
            .ok_or(DbError::NoRows)
    }

    /// Run a query and return every row.
    pub async fn query(&mut self, template: &str, params: &Params) -> Result<Vec<SqliteRow>, DbError> {
        let prepared = Prepared::new(template, params)?;
        let args = prepared.arguments(params)?;
        tracing::debug!(sql = %prepared.sql, params = ?params.names().collect::<Vec<_>>(), "query");

        let conn = self.connection().await?;
        let rows = sqlx::query_with(&prepared.sql, args).fetch_all(conn).await?;
        Ok(rows)
    }

    /// Start a transaction. Any plain connection held so far is returned to
    /// the pool first.
    pub async fn begin(&mut self) -> Result<(), DbError> {
        if self.in_transaction() {
            return Err(DbError::TransactionAlreadyActive);
        }
        self.handle = None;

        let tx = self.pool.begin().await?;
        tracing::debug!("transaction started");
        self.handle = Some(Handle::Transaction(tx));
        Ok(())
    }

    pub async fn commit(&mut self) -> Result<(), DbError> {
        let Some(Handle::Transaction(tx)) = self.handle.take() else {
            return Err(DbError::NoActiveTransaction);
        };
        tx.commit().await?;
        tracing::debug!("transaction committed");
        Ok(())
    }

    pub async fn rollback(&mut self) -> Result<(), DbError> {
        let Some(Handle::Transaction(tx)) = self.handle.take() else {
            return Err(DbError::NoActiveTransaction);
        };
        tx.rollback().await?;
        tracing::debug!("transaction rolled back");
        Ok(())
    }

    /// Give back whatever the session holds. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(Handle::Transaction(_)) = self.handle {
            tracing::warn!("releasing session with an open transaction, rolling back");
        }
        self.handle = None;
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        self.release();
    }
}
