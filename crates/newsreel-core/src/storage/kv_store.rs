use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Database;
use crate::Result;

/// String-keyed JSON value store, the local equivalent of a mobile
/// app's async key-value storage
pub struct KvStore<'a> {
    db: &'a Database,
}

impl<'a> KvStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read the raw value stored under `key`
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Store a raw value under `key`, replacing any previous value
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Remove `key`; returns whether a value existed
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Read and decode a JSON value
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and store a JSON value
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let db = Database::new_in_memory().await.unwrap();
        let store = KvStore::new(&db);

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("greeting", "hello").await.unwrap();
        store.set("greeting", "hi").await.unwrap();
        assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("hi"));

        assert!(store.remove("greeting").await.unwrap());
        assert!(!store.remove("greeting").await.unwrap());
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let db = Database::new_in_memory().await.unwrap();
        let store = KvStore::new(&db);

        store.set_json("list", &["a", "b"]).await.unwrap();
        let list: Option<Vec<String>> = store.get_json("list").await.unwrap();
        assert_eq!(list, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_corrupt_json_is_an_error() {
        let db = Database::new_in_memory().await.unwrap();
        let store = KvStore::new(&db);

        store.set("list", "not json").await.unwrap();
        let result: Result<Option<Vec<String>>> = store.get_json("list").await;
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }
}
