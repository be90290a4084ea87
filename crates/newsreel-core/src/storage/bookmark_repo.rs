use super::{Database, KvStore};
use crate::Result;

/// Storage key holding the JSON array of bookmarked article ids
pub const BOOKMARK_KEY: &str = "bookmark";

/// Repository for the ordered list of bookmarked article ids
pub struct BookmarkRepository<'a> {
    store: KvStore<'a>,
}

impl<'a> BookmarkRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            store: KvStore::new(db),
        }
    }

    /// All bookmarked ids, oldest first
    pub async fn list(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .get_json::<Vec<String>>(BOOKMARK_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Replace the bookmark list (duplicates dropped, first occurrence wins)
    pub async fn save(&self, ids: &[String]) -> Result<()> {
        let mut unique: Vec<&String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        self.store.set_json(BOOKMARK_KEY, &unique).await
    }

    /// Check whether an article is bookmarked
    pub async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.list().await?.iter().any(|b| b == id))
    }

    /// Bookmark an article; returns false if it was already bookmarked
    pub async fn add(&self, id: &str) -> Result<bool> {
        let mut ids = self.list().await?;
        if ids.iter().any(|b| b == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.save(&ids).await?;
        tracing::debug!(id, "Bookmark added");
        Ok(true)
    }

    /// Remove a bookmark; returns false if it was not bookmarked
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut ids = self.list().await?;
        let before = ids.len();
        ids.retain(|b| b != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.save(&ids).await?;
        tracing::debug!(id, "Bookmark removed");
        Ok(true)
    }

    /// Toggle a bookmark, returning the new bookmarked state
    pub async fn toggle(&self, id: &str) -> Result<bool> {
        if self.remove(id).await? {
            Ok(false)
        } else {
            self.add(id).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_list() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = BookmarkRepository::new(&db);
        assert!(repo.list().await.unwrap().is_empty());
        assert!(!repo.contains("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_remove_keeps_order() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = BookmarkRepository::new(&db);

        assert!(repo.add("a").await.unwrap());
        assert!(repo.add("b").await.unwrap());
        assert!(!repo.add("a").await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec!["a", "b"]);

        assert!(repo.remove("a").await.unwrap());
        assert!(!repo.remove("a").await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_toggle() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = BookmarkRepository::new(&db);

        assert!(repo.toggle("x").await.unwrap());
        assert!(repo.contains("x").await.unwrap());
        assert!(!repo.toggle("x").await.unwrap());
        assert!(!repo.contains("x").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_dedups() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = BookmarkRepository::new(&db);

        let ids: Vec<String> = ["c", "a", "c", "b"].iter().map(|s| s.to_string()).collect();
        repo.save(&ids).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec!["c", "a", "b"]);
    }
}
