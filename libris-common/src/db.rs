//! Database access for libris
//!
//! One shared SQLite database holds the catalog (`books`) and the folder
//! tree (`folders`). Schema creation is idempotent and runs at startup.

use crate::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the books and folders tables if they don't exist
///
/// Public so tests can initialize an in-memory pool with the same schema
/// the service runs against.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS folders (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            color TEXT NOT NULL,
            icon TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            isbn TEXT NOT NULL,
            title TEXT NOT NULL,
            authors TEXT NOT NULL DEFAULT '[]',
            publisher TEXT,
            published_date TEXT,
            description TEXT,
            page_count INTEGER,
            cover_image TEXT,
            language TEXT,
            categories TEXT NOT NULL DEFAULT '[]',
            source TEXT NOT NULL,
            raw_data TEXT NOT NULL DEFAULT '{}',
            folder_id TEXT,
            quantity INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Existence checks run per scan; uniqueness itself is enforced by the
    // reconciler's check-before-insert, so this stays a plain index.
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_books_user_isbn ON books (user_id, isbn)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_folders_user ON folders (user_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database tables initialized (books, folders)");

    Ok(())
}
