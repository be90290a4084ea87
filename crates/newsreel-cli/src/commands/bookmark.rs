use anyhow::Result;

use newsreel_core::storage::{BookmarkRepository, Database};

pub async fn run(db: &Database, id: &str) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("Article id must not be empty");
    }

    let repo = BookmarkRepository::new(db);
    if repo.toggle(id).await? {
        println!("Saved {}", id);
    } else {
        println!("Removed {}", id);
    }

    Ok(())
}
