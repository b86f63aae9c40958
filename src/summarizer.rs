//! LLM enrichment client and response reconciliation.
//!
//! One request per run carries every aggregated article tagged with its
//! zero-based position; the model is instructed to answer with a single JSON
//! object holding a day-level summary and per-article translations keyed by
//! that position (`indice`).
//!
//! Reconciliation is deliberately a sparse mapping, not positional array
//! alignment: the model may omit indices, and malformed responses may
//! duplicate them (last writer wins). Every input article appears exactly
//! once in the output, in input order, with passthrough defaults wherever
//! enrichment is missing.
//!
//! Malformed output never raises. A response that fails to parse degrades to
//! the original articles unmodified, with the raw trimmed response text kept
//! as the day summary so a human still sees what the model said.

use crate::models::{Article, Digest, EnrichedArticle};
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::fmt::Write as _;
use thiserror::Error;
use tracing::{info, instrument, warn};

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Fixed day summary used when the aggregated batch is empty.
pub const NO_NEWS_SUMMARY: &str = "Nenhuma notícia relevante encontrada hoje.";

const SYSTEM_PROMPT: &str = "\
Você é um curador de notícias de tecnologia e IA. Dada uma lista de notícias \
numeradas, responda com um único objeto JSON, sem nenhum texto fora dele, no formato:\n\
{\"resumo_do_dia\": \"um parágrafo de 3-5 frases com os destaques e tendências do dia\",\n\
 \"noticias\": [{\"titulo_pt\": \"título traduzido para português do Brasil\",\n\
                \"resumo_pt\": \"resumo de 1-2 frases em português do Brasil\",\n\
                \"indice\": 0}]}\n\
O campo \"indice\" é o número entre colchetes de cada notícia. \
Seja conciso, informativo e objetivo.";

/// Why the single enrichment request could not produce any response text.
///
/// These are infrastructure failures of the one round-trip. A response that
/// arrives but does not parse is handled by the fallback policy instead and
/// is never an error.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response contained no text content")]
    EmptyResponse,
}

/// Anthropic Messages API response envelope, reduced to what the pipeline
/// reads.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// The JSON object the model is asked to produce.
#[derive(Debug, Deserialize)]
struct EnrichmentResponse {
    #[serde(default)]
    resumo_do_dia: Option<String>,
    noticias: Vec<EnrichmentItem>,
}

#[derive(Debug, Deserialize)]
struct EnrichmentItem {
    titulo_pt: String,
    resumo_pt: String,
    indice: usize,
}

/// Client for the enrichment step.
pub struct Summarizer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Summarizer {
    pub fn new(client: Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API base URL (gateway deployments,
    /// tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Enrich the aggregated batch with localized titles and summaries.
    ///
    /// An empty batch short-circuits to a fixed "no relevant news" digest
    /// without any network call. Otherwise one request is made; its response
    /// is reconciled back onto the input by position, degrading to
    /// passthrough data when the model output does not conform.
    ///
    /// # Errors
    ///
    /// Only transport-level failures of the single request. Malformed model
    /// output is not an error.
    #[instrument(level = "info", skip_all, fields(count = articles.len(), model = %self.model))]
    pub async fn enrich(&self, articles: Vec<Article>) -> Result<Digest, SummarizeError> {
        if articles.is_empty() {
            info!("Empty article batch; skipping the model call");
            return Ok(Digest {
                day_summary: Some(NO_NEWS_SUMMARY.to_string()),
                articles: Vec::new(),
            });
        }

        let prompt = build_user_prompt(&articles);
        let raw = self.request(&prompt).await?;
        Ok(digest_from_response(&raw, articles))
    }

    async fn request(&self, prompt: &str) -> Result<String, SummarizeError> {
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": SYSTEM_PROMPT,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status,
                body: truncate_for_log(&body, 300),
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        let text: String = parsed
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect();
        if text.is_empty() {
            return Err(SummarizeError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Build the user message listing every article tagged with its position.
fn build_user_prompt(articles: &[Article]) -> String {
    let mut prompt = String::from("Resuma estas notícias de hoje:\n");
    for (i, article) in articles.iter().enumerate() {
        let _ = write!(
            prompt,
            "\n[{i}] **{}** ({})\n{}\n",
            article.title, article.source, article.description
        );
    }
    prompt
}

/// Strip a wrapping fenced code block, if present, and trim.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the remainder of the fence line (a language tag, usually "json").
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Turn the raw response text into a digest, falling back to passthrough
/// articles (with the raw text as day summary) when it does not parse as the
/// expected JSON object.
fn digest_from_response(raw: &str, articles: Vec<Article>) -> Digest {
    let text = strip_code_fence(raw);
    match serde_json::from_str::<EnrichmentResponse>(text) {
        Ok(parsed) => {
            info!(enriched = parsed.noticias.len(), "Model returned conforming enrichment");
            reconcile(articles, parsed)
        }
        Err(e) => {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(text, 300),
                "Model returned non-conforming JSON; passing articles through"
            );
            Digest {
                day_summary: Some(text.to_string()),
                articles: articles
                    .into_iter()
                    .map(EnrichedArticle::passthrough)
                    .collect(),
            }
        }
    }
}

/// Map enrichment records back onto the articles by position.
fn reconcile(articles: Vec<Article>, parsed: EnrichmentResponse) -> Digest {
    let mut by_index: HashMap<usize, EnrichmentItem> = HashMap::new();
    for item in parsed.noticias {
        // Last writer wins on duplicate indices.
        by_index.insert(item.indice, item);
    }

    let articles = articles
        .into_iter()
        .enumerate()
        .map(|(i, article)| match by_index.remove(&i) {
            Some(item) => EnrichedArticle::localized(article, item.titulo_pt, item.resumo_pt),
            None => EnrichedArticle::passthrough(article),
        })
        .collect();

    Digest {
        day_summary: parsed.resumo_do_dia,
        articles,
    }
}
