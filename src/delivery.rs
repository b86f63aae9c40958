//! Digest delivery via the Resend transactional-email API.
//!
//! One request per run. The core does not interpret the result beyond
//! requiring an opaque delivery identifier in the response; transmission
//! failures surface to the caller.

use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument};

const ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response carried no delivery id")]
    MissingId,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: String,
}

/// Send the rendered digest and return the delivery identifier.
#[instrument(level = "info", skip_all, fields(%to, %subject))]
pub async fn send_digest(
    client: &Client,
    api_key: &str,
    from: &str,
    to: &str,
    subject: &str,
    html: &str,
) -> Result<String, DeliveryError> {
    let body = json!({
        "from": from,
        "to": [to],
        "subject": subject,
        "html": html,
    });

    let response = client
        .post(ENDPOINT)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DeliveryError::Api {
            status,
            body: truncate_for_log(&body, 300),
        });
    }

    let parsed: SendResponse = response.json().await?;
    if parsed.id.is_empty() {
        return Err(DeliveryError::MissingId);
    }

    info!(id = %parsed.id, "Digest accepted for delivery");
    Ok(parsed.id)
}
