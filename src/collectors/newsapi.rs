//! Polling-API collector backed by the NewsAPI `everything` endpoint.
//!
//! One search request is issued per configured query string against a
//! 24-hour recency window. Queries are independent: a failing query is
//! reported and skipped while the remaining queries still run. Results are
//! merged in query-iteration order and deduplicated by link across the whole
//! collector output, first occurrence wins.

use crate::collectors::{CollectorOutput, SourceError, SourceReport};
use crate::models::Article;
use crate::utils::clean_description;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

const ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// One page of search results.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<RawItem>,
}

/// A raw search result before normalization. Every field is optional on the
/// wire; normalization decides what is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawItem {
    title: Option<String>,
    url: Option<String>,
    source: RawSource,
    description: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Collect articles for every configured query.
///
/// Returns the merged, link-deduplicated articles plus one report per query.
/// Never fails as a whole: partial failure shows up in the reports.
#[instrument(level = "info", skip_all, fields(queries = queries.len()))]
pub async fn collect_articles(
    client: &Client,
    api_key: &str,
    queries: &[String],
    language: &str,
    page_size: u32,
) -> CollectorOutput {
    let window_end = Utc::now();
    let window_start = window_end - Duration::hours(24);

    let mut output = CollectorOutput::default();
    let mut seen: HashSet<String> = HashSet::new();

    for query in queries {
        let label = format!("newsapi:{query}");
        match search(
            client,
            api_key,
            query,
            language,
            page_size,
            window_start,
            window_end,
        )
        .await
        {
            Ok(items) => {
                let before = output.articles.len();
                normalize_items(items, &mut seen, &mut output.articles);
                let added = output.articles.len() - before;
                debug!(%query, added, "Merged query results");
                output.reports.push(SourceReport::collected(label, added));
            }
            Err(e) => {
                warn!(%query, error = %e, "NewsAPI query failed; skipping");
                output.reports.push(SourceReport::failed(label, &e));
            }
        }
    }

    info!(count = output.articles.len(), "Collected NewsAPI articles");
    output
}

async fn search(
    client: &Client,
    api_key: &str,
    query: &str,
    language: &str,
    page_size: u32,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Vec<RawItem>, SourceError> {
    let url = format!(
        "{ENDPOINT}?q={}&language={}&from={}&to={}&sortBy=relevancy&pageSize={}",
        urlencoding::encode(query),
        language,
        window_start.to_rfc3339_opts(SecondsFormat::Secs, true),
        window_end.to_rfc3339_opts(SecondsFormat::Secs, true),
        page_size,
    );

    let response = client
        .get(&url)
        .header("X-Api-Key", api_key)
        .send()
        .await?
        .error_for_status()?;
    let parsed: SearchResponse = response.json().await?;
    Ok(parsed.articles)
}

/// Map raw items onto [`Article`], skipping items without a usable link or
/// title and links already seen by this collector.
fn normalize_items(items: Vec<RawItem>, seen: &mut HashSet<String>, articles: &mut Vec<Article>) {
    for item in items {
        let Some(link) = item.url.filter(|u| !u.trim().is_empty()) else {
            continue;
        };
        let Some(title) = item.title.filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        if !seen.insert(link.clone()) {
            continue;
        }

        let source = item
            .source
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let mut article = Article::new(title, link, source);
        article.description = item
            .description
            .map(|d| clean_description(&d))
            .unwrap_or_default();
        article.published = item.published_at;
        articles.push(article);
    }
}
