//! Folder persistence

use chrono::{DateTime, Utc};
use libris_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::Folder;

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| Error::Internal(format!("Invalid UUID in database: {}", e)))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid timestamp in database: {}", e)))
}

fn row_to_folder(row: &sqlx::sqlite::SqliteRow) -> Result<Folder> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Folder {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        name: row.get("name"),
        description: row.get("description"),
        color: row.get("color"),
        icon: row.get("icon"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Insert a new folder
pub async fn insert(pool: &SqlitePool, folder: &Folder) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO folders (id, user_id, name, description, color, icon, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(folder.id.to_string())
    .bind(folder.user_id.to_string())
    .bind(&folder.name)
    .bind(&folder.description)
    .bind(&folder.color)
    .bind(&folder.icon)
    .bind(folder.created_at.to_rfc3339())
    .bind(folder.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load one folder by id
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Folder>> {
    let row = sqlx::query("SELECT * FROM folders WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(row_to_folder).transpose()
}

/// All folders for a user, sorted by name
pub async fn load_all(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Folder>> {
    let rows = sqlx::query("SELECT * FROM folders WHERE user_id = ? ORDER BY name")
        .bind(user_id.to_string())
        .fetch_all(pool)
        .await?;

    rows.iter().map(row_to_folder).collect()
}

/// Delete a folder and unfile its entries in one transaction.
///
/// Returns the number of folder rows removed (0 = no such folder; nothing
/// was unfiled either, the transaction never commits a half-done state).
pub async fn delete_and_unfile(pool: &SqlitePool, id: Uuid) -> Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE books SET folder_id = NULL, updated_at = ? WHERE folder_id = ?")
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM folders WHERE id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected())
}
