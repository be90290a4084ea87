mod bookmark_repo;
mod database;
mod kv_store;

pub use bookmark_repo::{BookmarkRepository, BOOKMARK_KEY};
pub use database::Database;
pub use kv_store::KvStore;
