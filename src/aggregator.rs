//! Batch aggregation: stable merge, dedup, relevance filter, truncation.
//!
//! Collector outputs are concatenated in collector order (input order within
//! each collector), deduplicated by link with first occurrence winning, then
//! optionally filtered by relevance keywords and truncated to the batch
//! limit. No re-sorting happens at any step; upstream ordering is the
//! presentation order.

use crate::models::Article;
use itertools::Itertools;
use tracing::info;

/// Merge collector outputs into the final article batch handed to
/// enrichment.
///
/// An empty `keywords` slice disables the relevance filter (pass-through).
/// The positions of the returned batch are the reconciliation indices used
/// by the summarization step.
pub fn aggregate(batches: Vec<Vec<Article>>, keywords: &[String], limit: usize) -> Vec<Article> {
    let merged: Vec<Article> = batches.into_iter().flatten().collect();
    let total = merged.len();

    let deduped: Vec<Article> = merged
        .into_iter()
        .unique_by(|a| a.link.clone())
        .collect();
    let unique = deduped.len();

    let filtered: Vec<Article> = if keywords.is_empty() {
        deduped
    } else {
        let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        deduped
            .into_iter()
            .filter(|a| {
                let haystack = format!("{} {}", a.title, a.description).to_lowercase();
                needles.iter().any(|k| haystack.contains(k.as_str()))
            })
            .collect()
    };
    let relevant = filtered.len();

    let batch: Vec<Article> = filtered.into_iter().take(limit).collect();
    info!(
        total,
        unique,
        relevant,
        batch = batch.len(),
        "Aggregated article batch"
    );
    batch
}
