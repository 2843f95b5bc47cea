//! Catalog reconciliation
//!
//! Owns the find-or-create policy for scans: a scanned ISBN either
//! increments an existing entry's quantity or resolves metadata through the
//! lookup chain and inserts a fresh entry. All quantity, folder, and
//! deletion operations exposed to the UI layer live here.

use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::lookup::{LookupError, LookupService};
use crate::db;
use crate::models::{CatalogEntry, Folder};

/// Catalog operation failures, distinct per user-facing condition
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Lookup exhausted every provider
    #[error("Book not found in any database")]
    BookNotFound { isbn: String },

    /// Entry id does not exist (or belongs to nobody)
    #[error("Catalog entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Folder id does not exist
    #[error("Folder not found: {0}")]
    FolderNotFound(Uuid),

    /// Persistence failure; no partial mutation was committed
    #[error(transparent)]
    Store(#[from] libris_common::Error),
}

/// Catalog service over the record store and the lookup chain
#[derive(Clone)]
pub struct CatalogService {
    db: SqlitePool,
    lookup: Arc<LookupService>,
}

impl CatalogService {
    pub fn new(db: SqlitePool, lookup: Arc<LookupService>) -> Self {
        Self { db, lookup }
    }

    /// Handle a submitted scan: find-or-create for (user, ISBN).
    ///
    /// The ISBN is normalized here so the existence check and the stored
    /// value always agree. An existing entry gets its quantity bumped by
    /// exactly one and its metadata left untouched; a new ISBN goes through
    /// the lookup chain and is inserted with quantity 1.
    pub async fn scan(
        &self,
        user_id: Uuid,
        isbn: &str,
        folder_id: Option<Uuid>,
    ) -> Result<CatalogEntry, CatalogError> {
        let isbn = libris_common::isbn::normalize(isbn);

        if let Some(existing) = db::books::find_by_isbn(&self.db, user_id, &isbn).await? {
            tracing::info!(user_id = %user_id, isbn = %isbn, quantity = existing.quantity + 1,
                "Known ISBN scanned, incrementing quantity");
            return self.set_quantity(existing.id, existing.quantity + 1).await;
        }

        let metadata = match self.lookup.fetch(&isbn).await {
            Ok(metadata) => metadata,
            Err(LookupError::NotFound) => {
                return Err(CatalogError::BookNotFound { isbn });
            }
        };

        let entry = CatalogEntry::from_metadata(user_id, metadata, folder_id);
        db::books::insert(&self.db, &entry).await?;
        tracing::info!(user_id = %user_id, isbn = %entry.isbn, title = %entry.title,
            source = %entry.source, "New catalog entry created");

        Ok(entry)
    }

    /// Increase an entry's quantity by one
    pub async fn increment_quantity(&self, entry_id: Uuid) -> Result<CatalogEntry, CatalogError> {
        let entry = self.require_entry(entry_id).await?;
        self.set_quantity(entry_id, entry.quantity + 1).await
    }

    /// Decrease an entry's quantity by one, clamped at 1.
    ///
    /// At quantity 1 this is a no-op: the entry is returned unchanged and no
    /// store write happens.
    pub async fn decrement_quantity(&self, entry_id: Uuid) -> Result<CatalogEntry, CatalogError> {
        let entry = self.require_entry(entry_id).await?;
        if entry.quantity <= 1 {
            tracing::debug!(entry_id = %entry_id, "Decrement at quantity 1 ignored");
            return Ok(entry);
        }
        self.set_quantity(entry_id, entry.quantity - 1).await
    }

    /// Move an entry into a folder, or unfile it with `None`
    pub async fn move_to_folder(
        &self,
        entry_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> Result<CatalogEntry, CatalogError> {
        if let Some(folder_id) = folder_id {
            if db::folders::find_by_id(&self.db, folder_id).await?.is_none() {
                return Err(CatalogError::FolderNotFound(folder_id));
            }
        }

        self.require_entry(entry_id).await?;
        db::books::update_folder(&self.db, entry_id, folder_id).await?;
        self.require_entry(entry_id).await
    }

    /// Delete a catalog entry outright
    pub async fn delete_entry(&self, entry_id: Uuid) -> Result<(), CatalogError> {
        let deleted = db::books::delete(&self.db, entry_id).await?;
        if deleted == 0 {
            return Err(CatalogError::EntryNotFound(entry_id));
        }
        tracing::info!(entry_id = %entry_id, "Catalog entry deleted");
        Ok(())
    }

    /// All of a user's entries, newest first
    pub async fn list_entries(&self, user_id: Uuid) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(db::books::load_all(&self.db, user_id).await?)
    }

    /// Create a folder, defaulting color and icon when not given
    pub async fn create_folder(
        &self,
        user_id: Uuid,
        name: String,
        description: Option<String>,
        color: Option<String>,
        icon: Option<String>,
    ) -> Result<Folder, CatalogError> {
        let folder = Folder::new(user_id, name, description, color, icon);
        db::folders::insert(&self.db, &folder).await?;
        tracing::info!(user_id = %user_id, folder_id = %folder.id, name = %folder.name,
            "Folder created");
        Ok(folder)
    }

    /// Delete a folder; its entries become unfiled in the same transaction.
    ///
    /// The unfiling and the folder row deletion commit together, so callers
    /// never observe entries pointing at a folder that no longer exists.
    pub async fn delete_folder(&self, folder_id: Uuid) -> Result<(), CatalogError> {
        let deleted = db::folders::delete_and_unfile(&self.db, folder_id).await?;
        if deleted == 0 {
            return Err(CatalogError::FolderNotFound(folder_id));
        }
        tracing::info!(folder_id = %folder_id, "Folder deleted, entries unfiled");
        Ok(())
    }

    /// All of a user's folders, sorted by name
    pub async fn list_folders(&self, user_id: Uuid) -> Result<Vec<Folder>, CatalogError> {
        Ok(db::folders::load_all(&self.db, user_id).await?)
    }

    async fn require_entry(&self, entry_id: Uuid) -> Result<CatalogEntry, CatalogError> {
        db::books::find_by_id(&self.db, entry_id)
            .await?
            .ok_or(CatalogError::EntryNotFound(entry_id))
    }

    async fn set_quantity(&self, entry_id: Uuid, quantity: i64) -> Result<CatalogEntry, CatalogError> {
        db::books::update_quantity(&self.db, entry_id, quantity).await?;
        self.require_entry(entry_id).await
    }
}
