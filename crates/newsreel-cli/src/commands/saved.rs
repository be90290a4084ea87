use anyhow::Result;

use newsreel_core::{
    news::{lookup_ids, NewsClient},
    storage::{BookmarkRepository, Database},
    AppConfig,
};

use super::headlines::print_article;

pub async fn run(db: &Database, config: &AppConfig) -> Result<()> {
    let ids = BookmarkRepository::new(db).list().await?;

    if ids.is_empty() {
        println!("No saved articles yet.");
        println!("\nTo save one, run:");
        println!("  newsreel bookmark <article-id>");
        return Ok(());
    }

    let client = NewsClient::new(config)?;
    let articles = lookup_ids(&client, &ids).await?;

    println!("Saved articles ({}):\n", ids.len());
    for article in &articles {
        print_article(article, true);
    }

    let missing: Vec<&String> = ids
        .iter()
        .filter(|id| !articles.iter().any(|a| &a.id == *id))
        .collect();
    for id in missing {
        println!("  {} (no longer available)", id);
    }

    Ok(())
}
