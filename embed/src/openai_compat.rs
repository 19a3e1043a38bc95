use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EmbedError, Result};

/// Base delay before the first retry; doubled on each further attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// OpenAI-compatible embedding request body.
#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
    encoding_format: &'a str,
}

/// OpenAI-compatible embedding response.
#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f64>,
}

/// A single resolved target for `POST {base_url}/embeddings`.
pub(crate) struct EmbeddingCall<'a> {
    pub client: &'a Client,
    pub base_url: &'a str,
    pub api_key: Option<&'a str>,
    pub model: &'a str,
    pub dimensions: usize,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl EmbeddingCall<'_> {
    /// Embed one chunk, retrying transient failures with exponential backoff.
    pub(crate) async fn send(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(texts).await {
                Ok(vecs) => return Ok(vecs),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let backoff = RETRY_BASE_DELAY * (1u32 << attempt.min(16));
                    attempt += 1;
                    warn!(
                        error = %e,
                        attempt,
                        max_retries = self.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        "embedding request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.base_url.trim_end_matches('/'));
        let body = EmbeddingRequest {
            model: self.model,
            input: texts,
            dimensions: (self.dimensions > 0).then_some(self.dimensions),
            encoding_format: "float",
        };

        debug!(%url, model = self.model, batch = texts.len(), "sending embedding request");

        let mut req = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json")
            .json(&body);
        if let Some(key) = self.api_key {
            req = req.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(EmbedError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let data: EmbeddingResponse =
            serde_json::from_slice(&bytes).map_err(|e| EmbedError::Decode(e.to_string()))?;

        collect_by_index(data.data, texts.len())
    }
}

/// Fill results by index (API may return out of order).
fn collect_by_index(items: Vec<EmbeddingData>, batch_size: usize) -> Result<Vec<Vec<f32>>> {
    let mut vecs: Vec<Option<Vec<f32>>> = vec![None; batch_size];
    for item in items {
        if item.index >= batch_size {
            return Err(EmbedError::UnexpectedIndex {
                index: item.index,
                batch_size,
            });
        }
        vecs[item.index] = Some(item.embedding.iter().map(|&v| v as f32).collect());
    }

    vecs.into_iter()
        .enumerate()
        .map(|(i, v)| v.ok_or(EmbedError::MissingIndex(i)))
        .collect()
}
