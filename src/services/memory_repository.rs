//! Process-local [`BookmarkRepository`], used where a database is unwanted.

use crate::{
    models::bookmark::{Bookmark, BookmarkPatch, NewBookmark},
    services::bookmark_repository::{BookmarkRepository, RepositoryError, RepositoryResult},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Bookmark>,
    last_id: i64,
}

/// Bookmarks held in a map keyed by id. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryBookmarkRepository {
    table: RwLock<Table>,
}

impl InMemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing rows, keeping their ids.
    pub fn with_rows(rows: impl IntoIterator<Item = Bookmark>) -> Self {
        let mut table = Table::default();
        for row in rows {
            table.last_id = table.last_id.max(row.id);
            table.rows.insert(row.id, row);
        }
        Self {
            table: RwLock::new(table),
        }
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBookmarkRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Bookmark>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Bookmark>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, new: NewBookmark) -> RepositoryResult<Bookmark> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let bookmark = Bookmark {
            id: table.last_id,
            title: new.title,
            url: new.url,
            description: new.description,
            rating: new.rating,
        };
        table.rows.insert(bookmark.id, bookmark.clone());
        Ok(bookmark)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> RepositoryResult<Bookmark> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        *row = patch.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let removed = self.table.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bookmark(title: &str) -> NewBookmark {
        NewBookmark {
            title: title.into(),
            url: "some-url".into(),
            description: "desc".into(),
            rating: "3.14".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryBookmarkRepository::new();
        let first = repo.insert(new_bookmark("a")).await.unwrap();
        assert_eq!(repo.delete(first.id).await.unwrap(), 1);

        let second = repo.insert(new_bookmark("b")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn seeded_rows_keep_their_ids() {
        let seeded = Bookmark {
            id: 7,
            title: "Seven".into(),
            url: "u".into(),
            description: "d".into(),
            rating: "5".into(),
        };
        let repo = InMemoryBookmarkRepository::with_rows([seeded.clone()]);

        assert_eq!(repo.get_by_id(7).await.unwrap(), Some(seeded));
        assert_eq!(repo.insert(new_bookmark("next")).await.unwrap().id, 8);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_rows() {
        let repo = InMemoryBookmarkRepository::new();
        let err = repo
            .update(3, BookmarkPatch {
                rating: Some("1".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(3)));
        assert_eq!(repo.delete(3).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_leaves_unsupplied_fields() {
        let repo = InMemoryBookmarkRepository::new();
        let stored = repo.insert(new_bookmark("before")).await.unwrap();
        let updated = repo
            .update(stored.id, BookmarkPatch {
                title: Some("after".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.rating, "3.14");
        assert_eq!(repo.list_all().await.unwrap(), vec![updated]);
    }
}
