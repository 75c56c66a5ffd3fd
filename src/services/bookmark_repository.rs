//! src/services/bookmark_repository.rs
//!
//! BookmarkRepository — the data-access seam for bookmark rows, and its
//! SQLite implementation. No business rules live here: validation and
//! sanitization belong to the handlers.

use crate::models::bookmark::{Bookmark, BookmarkPatch, NewBookmark};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("bookmark `{0}` not found")]
    NotFound(i64),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// CRUD over the `bookmarks` table.
///
/// Every backend fault is returned as-is; nothing is retried.
#[async_trait]
pub trait BookmarkRepository: Send + Sync + 'static {
    /// Every stored bookmark. Order is backend-defined.
    async fn list_all(&self) -> RepositoryResult<Vec<Bookmark>>;

    /// `Ok(None)` when no row has `id`.
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Bookmark>>;

    /// Stores a new row and returns it with its generated id.
    async fn insert(&self, new: NewBookmark) -> RepositoryResult<Bookmark>;

    /// Merges `patch` over the stored row.
    /// Returns `NotFound` if `id` does not exist.
    async fn update(&self, id: i64, patch: BookmarkPatch) -> RepositoryResult<Bookmark>;

    /// Removes the row and returns the number of rows affected (0 or 1).
    async fn delete(&self, id: i64) -> RepositoryResult<u64>;

    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

const BOOKMARK_COLUMNS: &str = "id, title, url, description, rating";

/// Persistent repository backed by a shared SQLite pool.
#[derive(Clone)]
pub struct SqliteBookmarkRepository {
    db: Arc<SqlitePool>,
}

impl SqliteBookmarkRepository {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkRepository for SqliteBookmarkRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Bookmark>> {
        let rows = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {} FROM bookmarks ORDER BY id ASC",
            BOOKMARK_COLUMNS
        ))
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Bookmark>> {
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {} FROM bookmarks WHERE id = ?",
            BOOKMARK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewBookmark) -> RepositoryResult<Bookmark> {
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            "INSERT INTO bookmarks (title, url, description, rating)
             VALUES (?, ?, ?, ?)
             RETURNING {}",
            BOOKMARK_COLUMNS
        ))
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.description)
        .bind(&new.rating)
        .fetch_one(&*self.db)
        .await?;

        debug!("inserted bookmark row {}", row.id);
        Ok(row)
    }

    /// Single statement, so the merge is atomic per row.
    async fn update(&self, id: i64, patch: BookmarkPatch) -> RepositoryResult<Bookmark> {
        sqlx::query_as::<_, Bookmark>(&format!(
            "UPDATE bookmarks SET
                title = COALESCE(?, title),
                url = COALESCE(?, url),
                description = COALESCE(?, description),
                rating = COALESCE(?, rating)
             WHERE id = ?
             RETURNING {}",
            BOOKMARK_COLUMNS
        ))
        .bind(patch.title)
        .bind(patch.url)
        .bind(patch.description)
        .bind(patch.rating)
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(RepositoryError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;

        debug!("delete of bookmark {} affected {} rows", id, result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&*self.db)
            .await?;
        Ok(())
    }
}
