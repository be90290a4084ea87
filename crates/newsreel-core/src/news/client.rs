use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Proxy, StatusCode};
use url::Url;

use super::models::{Article, NewsQuery, NewsResponse};
use crate::config::{ApiConfig, AppConfig};
use crate::{Error, Result};

const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;
const MAX_RETRIES: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 500;
const CLIENT_USER_AGENT: &str = concat!("newsreel/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce an ordered list of articles for a query
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>>;
}

/// HTTP client for the newsdata.io `/news` endpoint
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    languages: Vec<String>,
}

impl NewsClient {
    /// Create a new news client with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(&config.api)?;

        Ok(Self {
            client,
            base_url: config.api.base_url.clone(),
            api_key: config.api.api_key.clone(),
            languages: config.api.languages.clone(),
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(api: &ApiConfig) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .default_headers(headers)
            .gzip(true)
            .deflate(true)
            .brotli(true);

        if let Some(ref proxy) = api.proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for news requests");
        }

        builder.build().map_err(Error::Http)
    }

    /// Build the request URL for a query
    ///
    /// Id lookups only carry the `id` filter; listings also pin language,
    /// image-only results, de-duplication and page size.
    pub fn build_url(&self, query: &NewsQuery) -> Result<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "No API key configured. Set [api] api_key in {} or the {} environment variable.",
                    AppConfig::config_path().display(),
                    crate::config::API_KEY_ENV
                ))
            })?;

        let endpoint = format!("{}/news", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint)?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", api_key);

            if query.is_id_lookup() {
                pairs.append_pair("id", &query.ids.join(","));
            } else {
                if !self.languages.is_empty() {
                    pairs.append_pair("language", &self.languages.join(","));
                }
                pairs.append_pair("image", "1");
                pairs.append_pair("removeduplicate", "1");
                if let Some(size) = query.size {
                    pairs.append_pair("size", &size.to_string());
                }
                if !query.categories.is_empty() {
                    pairs.append_pair("category", &query.categories.join(","));
                }
                if !query.countries.is_empty() {
                    pairs.append_pair("country", &query.countries.join(","));
                }
                if let Some(q) = query.query.as_deref().filter(|q| !q.is_empty()) {
                    pairs.append_pair("q", q);
                }
            }
        }

        Ok(url)
    }

    /// Fetch with retry and exponential backoff on 429 / 503
    async fn fetch_with_retry(&self, url: &Url) -> Result<(StatusCode, Bytes)> {
        let mut last_error = None;
        let mut delay_ms = INITIAL_RETRY_DELAY_MS;

        for attempt in 0..MAX_RETRIES {
            tracing::debug!("News request attempt {} for {}", attempt + 1, url.path());

            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS
                        || status == StatusCode::SERVICE_UNAVAILABLE
                    {
                        tracing::warn!("Received {}, retrying after {}ms...", status, delay_ms);
                        last_error = Some(Error::Api(format!("HTTP {}", status)));
                    } else {
                        match response.bytes().await {
                            Ok(bytes) => return Ok((status, bytes)),
                            Err(e) => {
                                tracing::warn!("Failed to read response body: {}", e);
                                last_error = Some(Error::Http(e));
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("News request failed (attempt {}): {}", attempt + 1, e);
                    last_error = Some(Error::Http(e));
                }
            }

            if attempt < MAX_RETRIES - 1 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                delay_ms *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Api(format!("Request failed after {} retries", MAX_RETRIES))
        }))
    }
}

/// Decode a `/news` response body into articles
pub(crate) fn parse_response(status: StatusCode, body: &[u8]) -> Result<Vec<Article>> {
    if body.len() > MAX_RESPONSE_BYTES {
        return Err(Error::Api(format!("Response too large ({} bytes)", body.len())));
    }

    if !status.is_success() {
        let detail = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .pointer("/results/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| status.to_string());
        return Err(Error::Api(format!("HTTP {}: {}", status.as_u16(), detail)));
    }

    let response: NewsResponse = serde_json::from_slice(body)?;
    if response.status != "success" {
        return Err(Error::Api(format!("Unexpected status: {}", response.status)));
    }

    tracing::debug!(
        total = response.total_results.unwrap_or_default(),
        returned = response.results.len(),
        "Decoded news response"
    );

    Ok(response.results)
}

#[async_trait]
impl ArticleSource for NewsClient {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>> {
        let url = self.build_url(query)?;
        tracing::info!(
            categories = ?query.categories,
            countries = ?query.countries,
            ids = query.ids.len(),
            "Fetching news"
        );

        let (status, body) = self.fetch_with_retry(&url).await?;
        parse_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_key() -> NewsClient {
        let mut config = AppConfig::default();
        config.api.api_key = Some("test-key".to_string());
        NewsClient::new(&config).unwrap()
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_listing_url() {
        let client = client_with_key();
        let query = NewsQuery::new()
            .with_category("sports")
            .with_category("science")
            .with_country("in")
            .with_query("monsoon rain")
            .with_size(5);
        let url = client.build_url(&query).unwrap();

        assert_eq!(url.path(), "/api/1/news");
        assert_eq!(param(&url, "apikey").as_deref(), Some("test-key"));
        assert_eq!(param(&url, "language").as_deref(), Some("en,hi"));
        assert_eq!(param(&url, "image").as_deref(), Some("1"));
        assert_eq!(param(&url, "removeduplicate").as_deref(), Some("1"));
        assert_eq!(param(&url, "size").as_deref(), Some("5"));
        assert_eq!(param(&url, "category").as_deref(), Some("sports,science"));
        assert_eq!(param(&url, "country").as_deref(), Some("in"));
        assert_eq!(param(&url, "q").as_deref(), Some("monsoon rain"));
        assert_eq!(param(&url, "id"), None);
    }

    #[test]
    fn test_id_lookup_url() {
        let client = client_with_key();
        let url = client.build_url(&NewsQuery::by_ids(["a1", "b2"])).unwrap();

        assert_eq!(param(&url, "id").as_deref(), Some("a1,b2"));
        assert_eq!(param(&url, "language"), None);
        assert_eq!(param(&url, "size"), None);
    }

    #[test]
    fn test_missing_api_key() {
        let client = NewsClient::new(&AppConfig::default()).unwrap();
        let err = client.build_url(&NewsQuery::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_error_status() {
        let body = br#"{"status":"error","results":{"message":"API key invalid","code":"Unauthorized"}}"#;
        let err = parse_response(StatusCode::UNAUTHORIZED, body).unwrap_err();
        match err {
            Error::Api(msg) => assert!(msg.contains("API key invalid")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_success() {
        let body = br#"{"status":"success","totalResults":1,"results":[{"article_id":"a1","title":"T","image_url":"https://x/y.jpg","source_name":"S"}]}"#;
        let articles = parse_response(StatusCode::OK, body).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id, "a1");
    }
}
