use std::collections::HashSet;

use anyhow::Result;

use newsreel_core::{
    news::{retain_with_images, Article, ArticleSource, NewsClient, NewsQuery},
    storage::{BookmarkRepository, Database},
    AppConfig,
};

/// Filters accepted by `newsreel headlines`
pub struct Filters {
    pub categories: Vec<String>,
    pub countries: Vec<String>,
    pub query: Option<String>,
    pub size: Option<u32>,
}

impl Filters {
    fn into_query(self, default_size: u32) -> NewsQuery {
        let mut query = NewsQuery::new().with_size(self.size.unwrap_or(default_size));
        for category in self.categories {
            query = query.with_category(category);
        }
        for country in self.countries {
            query = query.with_country(country);
        }
        if let Some(q) = self.query {
            query = query.with_query(q);
        }
        query
    }
}

pub async fn run(db: &Database, config: &AppConfig, filters: Filters) -> Result<()> {
    let client = NewsClient::new(config)?;
    let query = filters.into_query(config.api.headline_size);

    let articles = retain_with_images(client.fetch(&query).await?);
    if articles.is_empty() {
        println!("No headlines found.");
        return Ok(());
    }

    let saved: HashSet<String> = BookmarkRepository::new(db).list().await?.into_iter().collect();

    println!("Headlines ({}):\n", articles.len());
    for article in &articles {
        print_article(article, saved.contains(&article.id));
    }

    Ok(())
}

pub(crate) fn print_article(article: &Article, saved: bool) {
    let marker = if saved { "★ " } else { "" };
    println!("  {}{}", marker, article.title);

    let source = article.source_label();
    match (source.is_empty(), article.pub_date.as_deref()) {
        (false, Some(date)) => println!("    {} · {}", source, date),
        (false, None) => println!("    {}", source),
        (true, Some(date)) => println!("    {}", date),
        (true, None) => {}
    }

    let preview = article.description_preview(160);
    if !preview.is_empty() {
        println!("    {}", preview);
    }
    if let Some(link) = &article.link {
        println!("    {}", link);
    }
    println!("    id: {}", article.id);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_into_query() {
        let filters = Filters {
            categories: vec!["sports".into(), "science".into()],
            countries: vec!["in".into()],
            query: Some("monsoon".into()),
            size: None,
        };
        let query = filters.into_query(10);
        assert_eq!(query.categories.len(), 2);
        assert_eq!(query.countries, vec!["in".to_string()]);
        assert_eq!(query.query.as_deref(), Some("monsoon"));
        assert_eq!(query.size, Some(10));
        assert!(!query.is_id_lookup());
    }
}
