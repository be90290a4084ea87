mod client;
mod models;

pub use client::{ArticleSource, NewsClient};
pub use models::{retain_with_images, Article, NewsQuery};

use crate::config::ApiConfig;
use crate::Result;

/// Fetch the articles for the breaking news carousel (image-bearing only)
pub async fn breaking_news(source: &dyn ArticleSource, api: &ApiConfig) -> Result<Vec<Article>> {
    let query = NewsQuery::new().with_size(api.breaking_size);
    let articles = source.fetch(&query).await?;
    Ok(retain_with_images(articles))
}

/// Fetch the headline list, optionally narrowed to one category
pub async fn headlines(
    source: &dyn ArticleSource,
    api: &ApiConfig,
    category: Option<&str>,
) -> Result<Vec<Article>> {
    let mut query = NewsQuery::new().with_size(api.headline_size);
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        query = query.with_category(category);
    }
    let articles = source.fetch(&query).await?;
    Ok(retain_with_images(articles))
}

/// Resolve bookmarked ids to articles, keeping the bookmark order
pub async fn lookup_ids(source: &dyn ArticleSource, ids: &[String]) -> Result<Vec<Article>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut articles = retain_with_images(source.fetch(&NewsQuery::by_ids(ids.iter())).await?);
    articles.sort_by_key(|a| ids.iter().position(|id| *id == a.id).unwrap_or(usize::MAX));
    Ok(articles)
}


#[cfg(test)]
mod tests {
    use super::testing::{article, FakeSource};
    use super::*;

    #[tokio::test]
    async fn test_breaking_news_filters_images() {
        let mut no_image = article("c");
        no_image.image_url = None;
        let source = FakeSource {
            articles: vec![article("a"), no_image, article("b")],
            ..Default::default()
        };

        let articles = breaking_news(&source, &ApiConfig::default()).await.unwrap();
        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let queries = source.queries.lock().unwrap();
        assert_eq!(queries[0].size, Some(5));
    }

    #[tokio::test]
    async fn test_headlines_category() {
        let source = FakeSource::default();
        headlines(&source, &ApiConfig::default(), Some("sports")).await.unwrap();
        headlines(&source, &ApiConfig::default(), Some("")).await.unwrap();

        let queries = source.queries.lock().unwrap();
        assert_eq!(queries[0].categories, vec!["sports".to_string()]);
        assert!(queries[1].categories.is_empty());
        assert_eq!(queries[1].size, Some(10));
    }

    #[tokio::test]
    async fn test_lookup_ids_keeps_bookmark_order() {
        let source = FakeSource {
            articles: vec![article("a"), article("b"), article("c")],
            ..Default::default()
        };
        let ids = vec!["c".to_string(), "a".to_string()];

        let articles = lookup_ids(&source, &ids).await.unwrap();
        let got: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(got, vec!["c", "a"]);

        assert!(lookup_ids(&source, &[]).await.unwrap().is_empty());
        assert_eq!(source.queries.lock().unwrap().len(), 1);
    }
}
