use serde::{Deserialize, Deserializer, Serialize};

/// A news article as returned by the newsdata.io API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "article_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub source_name: String,
    #[serde(default, rename = "source_icon")]
    pub source_icon_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
    #[serde(default, rename = "category", deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,
    #[serde(default, rename = "country", deserialize_with = "null_as_empty")]
    pub countries: Vec<String>,
}

impl Article {
    /// Whether the article carries a usable image
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    /// Display name of the publisher, falling back to the source id
    pub fn source_label(&self) -> &str {
        if !self.source_name.trim().is_empty() {
            return &self.source_name;
        }
        self.source_id.as_deref().unwrap_or("")
    }

    /// Description as plain text, truncated to `max_len` characters
    pub fn description_preview(&self, max_len: usize) -> String {
        let raw = self.description.as_deref().unwrap_or("");
        if raw.is_empty() || max_len == 0 {
            return String::new();
        }

        let text = html2text::from_read(raw.as_bytes(), 1000)
            .unwrap_or_else(|_| raw.to_string());
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if text.chars().count() <= max_len {
            text
        } else {
            let truncated: String = text.chars().take(max_len).collect();
            format!("{}...", truncated.trim_end())
        }
    }
}

/// Filters accepted by an article source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsQuery {
    pub categories: Vec<String>,
    pub countries: Vec<String>,
    pub query: Option<String>,
    pub ids: Vec<String>,
    pub size: Option<u32>,
}

impl NewsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup of specific articles by id (bookmarks)
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.countries.push(country.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// True when the query only looks up articles by id
    pub fn is_id_lookup(&self) -> bool {
        !self.ids.is_empty()
    }
}

/// Response envelope of the `/news` endpoint
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NewsResponse {
    pub status: String,
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<Article>,
    #[serde(default, rename = "nextPage")]
    pub next_page: Option<String>,
}

/// Drop articles without an image; the carousel requires one for every slide
pub fn retain_with_images(articles: Vec<Article>) -> Vec<Article> {
    articles.into_iter().filter(Article::has_image).collect()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": "success",
        "totalResults": 2,
        "results": [
            {
                "article_id": "a1",
                "title": "Monsoon arrives early",
                "link": "https://example.com/a1",
                "description": "<p>Rains hit the <b>coast</b> today.</p>",
                "pubDate": "2024-06-01 10:00:00",
                "image_url": "https://example.com/a1.jpg",
                "source_id": "example",
                "source_icon": null,
                "category": ["top"],
                "country": ["india"]
            },
            {
                "article_id": "a2",
                "title": "No picture here",
                "image_url": null,
                "source_name": "Wire",
                "category": null,
                "country": null
            }
        ],
        "nextPage": "abc"
    }"#;

    #[test]
    fn test_parse_response() {
        let response: NewsResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.status, "success");
        assert_eq!(response.total_results, Some(2));
        assert_eq!(response.next_page.as_deref(), Some("abc"));
        assert_eq!(response.results.len(), 2);

        let first = &response.results[0];
        assert_eq!(first.id, "a1");
        assert_eq!(first.source_label(), "example");
        assert_eq!(first.categories, vec!["top".to_string()]);

        let second = &response.results[1];
        assert_eq!(second.source_label(), "Wire");
        assert!(second.categories.is_empty());
        assert!(!second.has_image());
    }

    #[test]
    fn test_retain_with_images() {
        let response: NewsResponse = serde_json::from_str(SAMPLE).unwrap();
        let kept = retain_with_images(response.results);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a1");
    }

    #[test]
    fn test_description_preview_strips_html() {
        let response: NewsResponse = serde_json::from_str(SAMPLE).unwrap();
        let preview = response.results[0].description_preview(200);
        assert!(!preview.contains('<'));
        assert!(preview.contains("coast"));

        let short = response.results[0].description_preview(5);
        assert!(short.ends_with("..."));
        assert_eq!(response.results[1].description_preview(10), "");
    }

    #[test]
    fn test_query_builders() {
        let query = NewsQuery::new()
            .with_category("sports")
            .with_country("in")
            .with_query("cricket")
            .with_size(10);
        assert!(!query.is_id_lookup());
        assert_eq!(query.categories, vec!["sports".to_string()]);

        let lookup = NewsQuery::by_ids(["x", "y"]);
        assert!(lookup.is_id_lookup());
        assert_eq!(lookup.ids.len(), 2);
    }
}
