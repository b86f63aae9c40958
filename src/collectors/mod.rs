//! Source collectors for gathering articles from external services.
//!
//! Each collector normalizes a source-specific schema into the common
//! [`Article`](crate::models::Article) shape and reports per-source outcomes
//! instead of raising:
//!
//! | Source kind | Module | Transport |
//! |-------------|--------|-----------|
//! | Polling API | [`newsapi`] | NewsAPI `everything` search, one request per query |
//! | Feeds | [`rss`] | RSS/Atom fetch + parse, one request per feed |
//!
//! # Fault tolerance
//!
//! A failing query or feed contributes zero items and a
//! [`SourceOutcome::Failed`] report; it never aborts the rest of the
//! collection. The run-level report list is what makes partial failure
//! observable.

pub mod newsapi;
pub mod rss;

use crate::models::Article;
use thiserror::Error;

/// Why a single source (one query, one feed) produced nothing.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure, non-success status, or undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The fetched body was not a parseable feed.
    #[error("feed parse error: {0}")]
    Parse(String),
}

/// Outcome of collecting one source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    /// The source was collected; carries the number of items it contributed
    /// to the collector's merged output.
    Collected(usize),
    /// The source was skipped; carries the failure description.
    Failed(String),
}

/// Per-source collection result, aggregated into a run-level report.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    /// Source label (feed name, or `newsapi:<query>`).
    pub source: String,
    pub outcome: SourceOutcome,
}

impl SourceReport {
    pub fn collected(source: impl Into<String>, count: usize) -> Self {
        Self {
            source: source.into(),
            outcome: SourceOutcome::Collected(count),
        }
    }

    pub fn failed(source: impl Into<String>, error: &SourceError) -> Self {
        Self {
            source: source.into(),
            outcome: SourceOutcome::Failed(error.to_string()),
        }
    }
}

/// A collector's merged article output plus its per-source reports.
#[derive(Debug, Default)]
pub struct CollectorOutput {
    /// Normalized articles in deterministic source order.
    pub articles: Vec<Article>,
    /// One report per query or feed, in iteration order.
    pub reports: Vec<SourceReport>,
}
