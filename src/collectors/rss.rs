//! Feed-polling collector for RSS and Atom sources.
//!
//! Feeds are fetched through an order-preserving buffered stream and parsed
//! independently; a feed that fails to fetch or parse yields zero entries
//! without touching the others. Entries are kept when their publication
//! timestamp is unknown or at most 24 hours old; absence of a timestamp
//! never excludes an item.
//!
//! Deduplication across feeds is deliberately not done here; that is the
//! aggregator's job.

use crate::collectors::{CollectorOutput, SourceError, SourceReport};
use crate::config::FeedSpec;
use crate::models::Article;
use crate::utils::clean_description;
use chrono::{DateTime, Duration, Utc};
use feed_rs::model::{Feed, Link};
use feed_rs::parser;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Feeds fetched concurrently. `buffered` yields results in input order, so
/// the merge stays deterministic regardless of response timing.
const FEED_FETCH_CONCURRENCY: usize = 4;

/// Collect recent entries from every configured feed.
///
/// Returns the normalized articles in feed-declaration order plus one report
/// per feed. Never fails as a whole.
#[instrument(level = "info", skip_all, fields(feeds = feeds.len()))]
pub async fn collect_articles(client: &Client, feeds: &[FeedSpec]) -> CollectorOutput {
    let cutoff = Utc::now() - Duration::hours(24);

    let fetched: Vec<(&FeedSpec, Result<Feed, SourceError>)> = stream::iter(feeds)
        .map(|spec| async move { (spec, fetch_feed(client, &spec.url).await) })
        .buffered(FEED_FETCH_CONCURRENCY)
        .collect()
        .await;

    let mut output = CollectorOutput::default();
    for (spec, result) in fetched {
        match result {
            Ok(feed) => {
                let articles = entries_to_articles(feed, spec, cutoff);
                debug!(feed = %spec.name, kept = articles.len(), "Feed entries kept");
                output
                    .reports
                    .push(SourceReport::collected(spec.name.clone(), articles.len()));
                output.articles.extend(articles);
            }
            Err(e) => {
                warn!(feed = %spec.name, url = %spec.url, error = %e, "Feed failed; skipping");
                output.reports.push(SourceReport::failed(spec.name.clone(), &e));
            }
        }
    }

    info!(count = output.articles.len(), "Collected feed articles");
    output
}

async fn fetch_feed(client: &Client, url: &str) -> Result<Feed, SourceError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    parser::parse(body.as_ref()).map_err(|e| SourceError::Parse(e.to_string()))
}

/// `true` when the entry should be kept under the 24-hour recency rule.
/// Unknown timestamps are biased toward inclusion.
fn is_recent(published: Option<DateTime<Utc>>, cutoff: DateTime<Utc>) -> bool {
    match published {
        Some(published) => published >= cutoff,
        None => true,
    }
}

/// Normalize the entries of one parsed feed, applying the recency rule and
/// description sanitization. Entries without a usable title or link are
/// skipped.
fn entries_to_articles(feed: Feed, spec: &FeedSpec, cutoff: DateTime<Utc>) -> Vec<Article> {
    let base = Url::parse(&spec.url).ok();
    let mut articles = Vec::new();

    for entry in feed.entries {
        let Some(title) = entry
            .title
            .map(|t| t.content)
            .filter(|t| !t.trim().is_empty())
        else {
            continue;
        };
        let Some(link) = resolve_link(&entry.links, base.as_ref()) else {
            continue;
        };
        if !is_recent(entry.published, cutoff) {
            continue;
        }

        let mut article = Article::new(title, link, spec.name.clone());
        article.description = entry
            .summary
            .map(|s| clean_description(&s.content))
            .unwrap_or_default();
        article.published = entry.published;
        articles.push(article);
    }

    articles
}

/// First entry link, with relative hrefs resolved against the feed URL.
/// Absolute links are passed through untouched; the pipeline does not
/// normalize or validate source URLs.
fn resolve_link(links: &[Link], base: Option<&Url>) -> Option<String> {
    let href = links.first().map(|l| l.href.trim())?;
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.and_then(|b| b.join(href).ok()).map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn spec() -> FeedSpec {
        FeedSpec {
            name: "TestFeed".to_string(),
            url: "https://example.com/rss".to_string(),
        }
    }

    fn parse(xml: &str) -> Feed {
        parser::parse(xml.as_bytes()).unwrap()
    }

    const RSS_TWO_ITEMS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Test</title>
  <item>
    <title>AI Breakthrough</title>
    <link>https://example.com/ai-breakthrough</link>
    <description>Test source description</description>
    <pubDate>Wed, 18 Feb 2026 08:00:00 GMT</pubDate>
  </item>
  <item>
    <title>New Chip Released</title>
    <link>https://example.com/new-chip</link>
    <description>Points: 50
Comments: 3
Chip details here</description>
    <pubDate>Wed, 18 Feb 2026 09:00:00 GMT</pubDate>
  </item>
</channel></rss>"#;

    #[test]
    fn test_entries_map_to_articles() {
        let cutoff = Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0).unwrap();
        let articles = entries_to_articles(parse(RSS_TWO_ITEMS), &spec(), cutoff);

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "AI Breakthrough");
        assert_eq!(articles[0].link, "https://example.com/ai-breakthrough");
        assert_eq!(articles[0].source, "TestFeed");
        assert_eq!(articles[0].description, "Test source description");
        assert!(articles[0].published.is_some());
        // Aggregator metadata lines are stripped from the description.
        assert_eq!(articles[1].description, "Chip details here");
    }

    #[test]
    fn test_old_entries_are_dropped() {
        // Cutoff after both pubDates: nothing survives.
        let cutoff = Utc.with_ymd_and_hms(2026, 2, 19, 0, 0, 0).unwrap();
        let articles = entries_to_articles(parse(RSS_TWO_ITEMS), &spec(), cutoff);
        assert!(articles.is_empty());
    }

    #[test]
    fn test_entry_without_timestamp_is_kept() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item>
    <title>Undated entry</title>
    <link>https://example.com/undated</link>
  </item>
</channel></rss>"#;
        let cutoff = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let articles = entries_to_articles(parse(xml), &spec(), cutoff);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Undated entry");
        assert_eq!(articles[0].published, None);
        assert_eq!(articles[0].description, "");
    }

    #[test]
    fn test_is_recent_boundaries() {
        let now = Utc.with_ymd_and_hms(2026, 2, 18, 12, 0, 0).unwrap();
        let cutoff = now - Duration::hours(24);

        assert!(is_recent(None, cutoff));
        assert!(is_recent(Some(now - Duration::hours(24) + Duration::seconds(1)), cutoff));
        assert!(!is_recent(Some(now - Duration::hours(24) - Duration::seconds(1)), cutoff));
        // Exact boundary is inclusive.
        assert!(is_recent(Some(cutoff), cutoff));
    }

    #[test]
    fn test_relative_links_resolve_against_feed_url() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item>
    <title>Relative</title>
    <link>/2026/02/story</link>
  </item>
</channel></rss>"#;
        let spec = FeedSpec {
            name: "TestFeed".to_string(),
            url: "https://example.com/section/rss".to_string(),
        };
        let cutoff = Utc.with_ymd_and_hms(2026, 2, 17, 0, 0, 0).unwrap();
        let articles = entries_to_articles(parse(xml), &spec, cutoff);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].link, "https://example.com/2026/02/story");
    }

    #[test]
    fn test_absolute_links_pass_through_untouched() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item>
    <title>Absolute</title>
    <link>https://other.example.org/story?id=1</link>
  </item>
</channel></rss>"#;
        let cutoff = Utc.with_ymd_and_hms(2026, 2, 17, 0, 0, 0).unwrap();
        let articles = entries_to_articles(parse(xml), &spec(), cutoff);

        assert_eq!(articles[0].link, "https://other.example.org/story?id=1");
    }

    #[test]
    fn test_missing_link_skips_entry() {
        assert_eq!(resolve_link(&[], None), None);
    }

    #[test]
    fn test_empty_feed_yields_nothing() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Empty</title></channel></rss>"#;
        let cutoff = Utc.with_ymd_and_hms(2026, 2, 17, 0, 0, 0).unwrap();
        assert!(entries_to_articles(parse(xml), &spec(), cutoff).is_empty());
    }
}
