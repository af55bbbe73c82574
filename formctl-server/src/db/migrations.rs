//! Schema migrations for the form store
//!
//! Idempotent; run every time a pool is opened.

use sqlx::SqlitePool;
use tracing::info;

use super::DbError;

/// Create the `Forms` and `FormFields` tables if they do not exist.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    info!("Running form store migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS Forms (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Title TEXT NOT NULL CHECK (length(Title) <= 255),
            CreatedAt TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS FormFields (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            FormId INTEGER NOT NULL REFERENCES Forms(Id) ON DELETE CASCADE,
            Label TEXT NOT NULL CHECK (length(Label) <= 100),
            Options TEXT NOT NULL,
            SelectedOption TEXT NOT NULL,
            IsRequired BOOLEAN NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS IX_FormFields_FormId ON FormFields (FormId)")
        .execute(pool)
        .await?;

    info!("form store migrations complete");
    Ok(())
}
