//! Run configuration loaded from an optional YAML file.
//!
//! Every field has a built-in default, so the pipeline runs with nothing but
//! credentials. A YAML file passed via `--config` overrides any subset of
//! fields; unknown keys are ignored. Credentials never live here; they come
//! from the CLI with env-var fallbacks (see [`crate::cli::Cli`]).

use serde::Deserialize;
use std::error::Error;
use std::fs;
use tracing::info;

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Polling-API collector settings.
    pub newsapi: NewsApiConfig,
    /// Feed descriptors for the feed-polling collector.
    pub feeds: Vec<FeedSpec>,
    /// Relevance keywords for the aggregator filter. An empty list disables
    /// the filter entirely.
    pub keywords: Vec<String>,
    /// Articles surviving aggregation are truncated to this many before
    /// enrichment.
    pub max_articles: usize,
    /// Model identifier passed to the enrichment request.
    pub model: String,
    /// Display name used in the email `From` header.
    pub sender_name: String,
}

/// Settings for the NewsAPI `everything` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsApiConfig {
    /// One search request is issued per query string.
    pub queries: Vec<String>,
    /// Two-letter language code for the search.
    pub language: String,
    /// Maximum results requested per query.
    pub page_size: u32,
}

/// A named feed to poll.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedSpec {
    /// Human-readable source name carried onto collected articles.
    pub name: String,
    /// Feed URL (RSS or Atom).
    pub url: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            newsapi: NewsApiConfig::default(),
            feeds: vec![
                FeedSpec {
                    name: "Hacker News".to_string(),
                    url: "https://hnrss.org/newest?points=50".to_string(),
                },
                FeedSpec {
                    name: "TechCrunch AI".to_string(),
                    url: "https://techcrunch.com/category/artificial-intelligence/feed/"
                        .to_string(),
                },
                FeedSpec {
                    name: "The Verge".to_string(),
                    url: "https://www.theverge.com/rss/index.xml".to_string(),
                },
            ],
            keywords: [
                "ai",
                "artificial intelligence",
                "machine learning",
                "deep learning",
                "neural",
                "llm",
                "gpt",
                "openai",
                "anthropic",
                "claude",
                "gemini",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_articles: 15,
            model: "claude-haiku-4-5-20251001".to_string(),
            sender_name: "Daily AI News".to_string(),
        }
    }
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            queries: vec![
                "artificial intelligence".to_string(),
                "AI technology".to_string(),
                "machine learning".to_string(),
            ],
            language: "en".to_string(),
            page_size: 20,
        }
    }
}

/// Load the run configuration.
///
/// With no path, returns the built-in defaults. With a path, parses the YAML
/// file; fields missing from the file keep their defaults.
pub fn load_config(path: Option<&str>) -> Result<DigestConfig, Box<dyn Error>> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(p)?;
            let config: DigestConfig = serde_yaml::from_str(&raw)?;
            info!(path = %p, feeds = config.feeds.len(), queries = config.newsapi.queries.len(), "Loaded configuration file");
            Ok(config)
        }
        None => {
            info!("No configuration file given; using built-in defaults");
            Ok(DigestConfig::default())
        }
    }
}
