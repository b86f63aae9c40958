//! # AI News Digest
//!
//! A daily news-digest pipeline: collects technology and AI articles from
//! NewsAPI and a set of RSS/Atom feeds, deduplicates and filters them,
//! enriches them with Brazilian Portuguese titles and summaries through the
//! Anthropic Messages API, renders an HTML digest, and emails it via Resend.
//!
//! ## Usage
//!
//! ```sh
//! NEWSAPI_KEY=... ANTHROPIC_API_KEY=... RESEND_API_KEY=... \
//! EMAIL_TO=reader@example.com ai_news_digest --config digest.yaml
//! ```
//!
//! ## Architecture
//!
//! A single sequential pass, no loops back:
//! 1. **Collection**: each collector fetches and normalizes its sources,
//!    tolerating per-source failure
//! 2. **Aggregation**: stable merge, link dedup, keyword filter, truncation
//!    to the batch limit
//! 3. **Enrichment**: one model call; structured JSON reconciled back onto
//!    the batch by position, degrading gracefully on malformed output
//! 4. **Output**: HTML rendering and email delivery
//!
//! An external scheduler triggers one run; nothing is persisted between runs.

use chrono::Local;
use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod aggregator;
mod cli;
mod collectors;
mod config;
mod delivery;
mod models;
mod outputs;
mod summarizer;
mod utils;

use cli::Cli;
use collectors::SourceOutcome;
use summarizer::Summarizer;
use utils::format_date_pt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ai_news_digest starting up");

    let args = Cli::parse();
    let config = config::load_config(args.config.as_deref())?;

    let client = Client::builder()
        .user_agent(concat!("ai_news_digest/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;

    // ---- Collect ----
    let rss = collectors::rss::collect_articles(&client, &config.feeds).await;
    let newsapi = collectors::newsapi::collect_articles(
        &client,
        &args.newsapi_key,
        &config.newsapi.queries,
        &config.newsapi.language,
        config.newsapi.page_size,
    )
    .await;

    for report in rss.reports.iter().chain(newsapi.reports.iter()) {
        match &report.outcome {
            SourceOutcome::Collected(count) => {
                debug!(source = %report.source, count, "Source collected")
            }
            SourceOutcome::Failed(reason) => {
                warn!(source = %report.source, %reason, "Source contributed no items")
            }
        }
    }
    info!(
        rss = rss.articles.len(),
        newsapi = newsapi.articles.len(),
        "Collection finished"
    );

    // ---- Aggregate ----
    let batch = aggregator::aggregate(
        vec![rss.articles, newsapi.articles],
        &config.keywords,
        config.max_articles,
    );

    // ---- Enrich ----
    let summarizer = Summarizer::new(client.clone(), &args.anthropic_api_key, &config.model);
    let digest = summarizer.enrich(batch).await?;

    // ---- Render & deliver ----
    let date_str = format_date_pt(Local::now().date_naive());
    let subject = format!("Novidades de IA no mundo — {date_str}");
    let html = outputs::html::render_digest(&digest, &date_str);

    let from = format!("{} <{}>", config.sender_name, args.email_from);
    let delivery_id = delivery::send_digest(
        &client,
        &args.resend_api_key,
        &from,
        &args.email_to,
        &subject,
        &html,
    )
    .await?;

    let elapsed = start_time.elapsed();
    info!(
        %delivery_id,
        articles = digest.articles.len(),
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Digest delivered"
    );

    Ok(())
}
