//! Data models for collected articles and their enriched representations.
//!
//! This module defines the core data structures flowing through the pipeline:
//! - [`Article`]: A normalized article record produced by a collector
//! - [`EnrichedArticle`]: An article plus the localized fields supplied by the LLM
//! - [`Digest`]: The final enrichment output handed to the renderer
//!
//! Articles are value records: constructed fresh each run from network
//! responses, never persisted, and never mutated after collection. The
//! article `link` is the identity key used for deduplication and is never
//! altered by enrichment.

use chrono::{DateTime, Utc};

/// A normalized news article as produced by a collector.
///
/// Every collector maps its source-specific schema onto this shape. Required
/// fields (`title`, `link`, `source`) are always non-empty by construction;
/// collectors skip source items that cannot satisfy them. Optional data gets
/// its default from [`Article::new`] so call sites never invent their own.
///
/// # Recency semantics
///
/// `published` is `None` when the source did not expose a timestamp. Absence
/// is treated as "assume recent" everywhere downstream; it never excludes an
/// article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// The canonical article URL. Deduplication identity key.
    pub link: String,
    /// Human-readable origin name (feed name or API source name).
    pub source: String,
    /// Sanitized one-line description; may be empty.
    pub description: String,
    /// Publication timestamp in UTC, when the source exposed one.
    pub published: Option<DateTime<Utc>>,
}

impl Article {
    /// Create an article with the required fields and defaulted optionals
    /// (empty description, unknown publication time).
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source: source.into(),
            description: String::new(),
            published: None,
        }
    }
}

/// An article plus the localized fields supplied by the enrichment step.
///
/// The localized fields are always present: when the LLM supplied no
/// enrichment for an article's position, they default to the original title
/// and description. The renderer can therefore rely on every field being
/// available without re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedArticle {
    /// The original collected article; identity (`link`) is never altered.
    pub article: Article,
    /// Title translated to pt-BR, or the original title.
    pub localized_title: String,
    /// Summary in pt-BR, or the original description.
    pub localized_summary: String,
}

impl EnrichedArticle {
    /// Wrap an article with no enrichment applied: localized fields fall
    /// back to the original title and description.
    pub fn passthrough(article: Article) -> Self {
        let localized_title = article.title.clone();
        let localized_summary = article.description.clone();
        Self {
            article,
            localized_title,
            localized_summary,
        }
    }

    /// Wrap an article with the enrichment supplied for its position.
    pub fn localized(
        article: Article,
        localized_title: impl Into<String>,
        localized_summary: impl Into<String>,
    ) -> Self {
        Self {
            article,
            localized_title: localized_title.into(),
            localized_summary: localized_summary.into(),
        }
    }
}

/// The enrichment output handed to the renderer: an optional day-level
/// summary plus every input article, enriched or passed through, in input
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    /// Day-level summary in pt-BR. Present on the empty-batch and fallback
    /// paths; absent only when the model omitted the field.
    pub day_summary: Option<String>,
    /// One entry per input article, original order preserved.
    pub articles: Vec<EnrichedArticle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_constructor_defaults() {
        let article = Article::new("Title", "https://example.com/a", "Feed");
        assert_eq!(article.title, "Title");
        assert_eq!(article.link, "https://example.com/a");
        assert_eq!(article.source, "Feed");
        assert_eq!(article.description, "");
        assert_eq!(article.published, None);
    }

    #[test]
    fn test_passthrough_defaults_localized_fields() {
        let mut article = Article::new("Original title", "https://example.com/a", "Feed");
        article.description = "Original description".to_string();

        let enriched = EnrichedArticle::passthrough(article.clone());
        assert_eq!(enriched.localized_title, "Original title");
        assert_eq!(enriched.localized_summary, "Original description");
        assert_eq!(enriched.article, article);
    }

    #[test]
    fn test_localized_keeps_article_identity() {
        let article = Article::new("Original", "https://example.com/a", "Feed");
        let enriched =
            EnrichedArticle::localized(article, "Título traduzido", "Resumo em português");
        assert_eq!(enriched.article.link, "https://example.com/a");
        assert_eq!(enriched.localized_title, "Título traduzido");
        assert_eq!(enriched.localized_summary, "Resumo em português");
    }
}
