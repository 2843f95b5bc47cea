//! Catalog entry persistence

use chrono::{DateTime, Utc};
use libris_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::{CatalogEntry, Source};

const ENTRY_COLUMNS: &str = "id, user_id, isbn, title, authors, publisher, published_date, \
     description, page_count, cover_image, language, categories, source, raw_data, \
     folder_id, quantity, created_at, updated_at";

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| Error::Internal(format!("Invalid UUID in database: {}", e)))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid timestamp in database: {}", e)))
}

fn parse_source(raw: &str) -> Result<Source> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| Error::Internal(format!("Invalid source tag in database: {}", e)))
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<CatalogEntry> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let authors: String = row.get("authors");
    let categories: String = row.get("categories");
    let source: String = row.get("source");
    let raw_data: String = row.get("raw_data");
    let folder_id: Option<String> = row.get("folder_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let page_count: Option<i64> = row.get("page_count");

    Ok(CatalogEntry {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        isbn: row.get("isbn"),
        title: row.get("title"),
        authors: serde_json::from_str(&authors)
            .map_err(|e| Error::Internal(format!("Invalid authors column: {}", e)))?,
        publisher: row.get("publisher"),
        published_date: row.get("published_date"),
        description: row.get("description"),
        page_count: page_count.map(|n| n as u32),
        cover_image: row.get("cover_image"),
        language: row.get("language"),
        categories: serde_json::from_str(&categories)
            .map_err(|e| Error::Internal(format!("Invalid categories column: {}", e)))?,
        source: parse_source(&source)?,
        raw_data: serde_json::from_str(&raw_data)
            .map_err(|e| Error::Internal(format!("Invalid raw_data column: {}", e)))?,
        folder_id: folder_id.as_deref().map(parse_uuid).transpose()?,
        quantity: row.get("quantity"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn source_tag(source: Source) -> String {
    source.to_string()
}

/// Insert a new catalog entry
pub async fn insert(pool: &SqlitePool, entry: &CatalogEntry) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO books (id, user_id, isbn, title, authors, publisher, published_date,
            description, page_count, cover_image, language, categories, source, raw_data,
            folder_id, quantity, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.id.to_string())
    .bind(entry.user_id.to_string())
    .bind(&entry.isbn)
    .bind(&entry.title)
    .bind(serde_json::to_string(&entry.authors).map_err(|e| Error::Internal(e.to_string()))?)
    .bind(&entry.publisher)
    .bind(&entry.published_date)
    .bind(&entry.description)
    .bind(entry.page_count.map(|n| n as i64))
    .bind(&entry.cover_image)
    .bind(&entry.language)
    .bind(serde_json::to_string(&entry.categories).map_err(|e| Error::Internal(e.to_string()))?)
    .bind(source_tag(entry.source))
    .bind(entry.raw_data.to_string())
    .bind(entry.folder_id.map(|id| id.to_string()))
    .bind(entry.quantity)
    .bind(entry.created_at.to_rfc3339())
    .bind(entry.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load one entry by id
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<CatalogEntry>> {
    let row = sqlx::query(&format!("SELECT {} FROM books WHERE id = ?", ENTRY_COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(row_to_entry).transpose()
}

/// Existence check for the find-or-create path.
///
/// `isbn` must already be normalized; this is an exact match.
pub async fn find_by_isbn(
    pool: &SqlitePool,
    user_id: Uuid,
    isbn: &str,
) -> Result<Option<CatalogEntry>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM books WHERE user_id = ? AND isbn = ? LIMIT 1",
        ENTRY_COLUMNS
    ))
    .bind(user_id.to_string())
    .bind(isbn)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_entry).transpose()
}

/// All entries for a user, newest first
pub async fn load_all(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<CatalogEntry>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM books WHERE user_id = ? ORDER BY created_at DESC",
        ENTRY_COLUMNS
    ))
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_entry).collect()
}

/// Set an entry's quantity (callers enforce the >= 1 floor)
pub async fn update_quantity(pool: &SqlitePool, id: Uuid, quantity: i64) -> Result<()> {
    sqlx::query("UPDATE books SET quantity = ?, updated_at = ? WHERE id = ?")
        .bind(quantity)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

/// Move an entry between folders (None = unfiled)
pub async fn update_folder(pool: &SqlitePool, id: Uuid, folder_id: Option<Uuid>) -> Result<()> {
    sqlx::query("UPDATE books SET folder_id = ?, updated_at = ? WHERE id = ?")
        .bind(folder_id.map(|f| f.to_string()))
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete an entry; returns the number of rows removed
pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Count a user's entries
pub async fn count(pool: &SqlitePool, user_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE user_id = ?")
        .bind(user_id.to_string())
        .fetch_one(pool)
        .await?;
    Ok(count)
}
