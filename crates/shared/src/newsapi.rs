use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{DigestError, Result};
use crate::models::ArticleRecord;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const PAGE_SIZE: u32 = 10;
const CONCURRENT_QUERIES: usize = 4;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    title: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    description: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

impl From<NewsApiArticle> for ArticleRecord {
    fn from(article: NewsApiArticle) -> Self {
        Self {
            title: article.title,
            url: article.url.unwrap_or_default(),
            source: article.source.and_then(|s| s.name),
            published_at: article.published_at,
            description: article.description,
            content: article.content,
        }
    }
}

pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Run every query over `[from, to]` and concatenate the results in query order.
    /// A failing query is logged and skipped.
    pub async fn search(
        &self,
        queries: &[String],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<ArticleRecord> {
        let results: Vec<(String, Result<Vec<ArticleRecord>>)> = stream::iter(queries)
            .map(|query| async move { (query.clone(), self.search_query(query, from, to).await) })
            .buffered(CONCURRENT_QUERIES)
            .collect()
            .await;

        let mut articles = Vec::new();
        for (query, result) in results {
            match result {
                Ok(found) => {
                    info!(query = %query, count = found.len(), "NewsAPI query finished");
                    articles.extend(found);
                }
                Err(e) => warn!(query = %query, error = %e, "NewsAPI query failed"),
            }
        }

        articles
    }

    async fn search_query(
        &self,
        query: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ArticleRecord>> {
        let url = format!(
            "{}/v2/everything?q={}&from={}&to={}&language=en&sortBy=publishedAt&pageSize={}&apiKey={}",
            self.base_url,
            urlencoding::encode(query),
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
            PAGE_SIZE,
            urlencoding::encode(&self.api_key)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(DigestError::Api {
                service: "NewsAPI",
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<EverythingResponse>().await?;
        if parsed.status != "ok" {
            return Err(DigestError::Api {
                service: "NewsAPI",
                status: status.as_u16(),
                body: parsed.message.unwrap_or(parsed.status),
            });
        }

        Ok(parsed.articles.into_iter().map(ArticleRecord::from).collect())
    }
}

/// Stand-in article used when no NewsAPI key is configured, so the digest
/// explains the missing setup instead of arriving empty.
pub fn fallback_articles(now: DateTime<Utc>) -> Vec<ArticleRecord> {
    vec![ArticleRecord {
        title: Some("NewsAPI Configuration Required".to_string()),
        url: "https://newsapi.org".to_string(),
        source: Some("System".to_string()),
        published_at: Some(now.to_rfc3339()),
        description: Some(
            "To receive real-time OpenAI Frontier news, please configure NewsAPI by setting NEWSAPI_KEY."
                .to_string(),
        ),
        content: Some(
            "Get your free API key at https://newsapi.org and add it to your environment or .env file as NEWSAPI_KEY."
                .to_string(),
        ),
    }]
}
