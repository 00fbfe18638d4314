//! One-time schema bootstrap for the `todos` table.

use anyhow::Result;
use sqlx::AnyPool;

/// Create the table and its indexes if they do not exist yet
pub async fn ensure(pool: &AnyPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_todos_title
        ON todos(title);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Drop and recreate the table, discarding every row
pub async fn reset(pool: &AnyPool) -> Result<()> {
    sqlx::query("DROP TABLE IF EXISTS todos;").execute(pool).await?;
    ensure(pool).await
}
