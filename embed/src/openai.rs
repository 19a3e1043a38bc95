use std::time::Duration;

use reqwest::Client;

use crate::config::{DEFAULT_CHUNK_SIZE, EmbedConfig};
use crate::embed::Embedder;
use crate::env::EmbedEnv;
use crate::error::EmbedError;
use crate::openai_compat::EmbeddingCall;

/// OpenAI embedding models.
pub const MODEL_OPENAI_3_SMALL: &str = "text-embedding-3-small";
pub const MODEL_OPENAI_3_LARGE: &str = "text-embedding-3-large";
pub const MODEL_OPENAI_ADA_002: &str = "text-embedding-ada-002";

/// Hosted OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Native output dimension of the known OpenAI models.
pub fn model_dimension(model: &str) -> Option<usize> {
    match model {
        MODEL_OPENAI_3_SMALL | MODEL_OPENAI_ADA_002 => Some(1536),
        MODEL_OPENAI_3_LARGE => Some(3072),
        _ => None,
    }
}

/// OpenAI embedder using the OpenAI embeddings API.
///
/// Also works with any OpenAI-compatible provider (vLLM, Ollama, LM Studio,
/// text-embeddings-inference, ...) via `EmbedConfig::with_base_url`.
///
/// A base URL or API key left unset in the config is resolved once, at
/// construction, from an [`EmbedEnv`]: `base_url` falling back to
/// [`OPENAI_BASE_URL`], and `api_key`. With no key at all requests go out
/// without an `Authorization` header and the provider decides.
#[derive(Debug, Clone)]
pub struct OpenAI {
    client: Client,
    model: String,
    dim: usize,
    chunk_size: usize,
    base_url: Option<String>,
    api_key: Option<String>,
    endpoint: String,
    auth_key: Option<String>,
    max_retries: u32,
    timeout: Duration,
}

impl OpenAI {
    pub fn new(api_key: &str) -> Self {
        Self::with_config(EmbedConfig::default().with_api_key(api_key))
    }

    /// Build from `cfg`, filling unset base URL and key from the process
    /// environment.
    pub fn with_config(cfg: EmbedConfig) -> Self {
        Self::with_env(cfg, &EmbedEnv::from_env())
    }

    /// Build from `cfg`, filling unset base URL and key from `env`.
    pub fn with_env(cfg: EmbedConfig, env: &EmbedEnv) -> Self {
        let base_url = cfg.base_url.filter(|u| !u.is_empty());
        let api_key = cfg.api_key.filter(|k| !k.is_empty());
        let endpoint = resolve_base_url(base_url.as_deref(), env);
        let auth_key = resolve_api_key(api_key.as_deref(), env);
        Self {
            client: Client::new(),
            model: if cfg.model.is_empty() {
                MODEL_OPENAI_3_SMALL.to_string()
            } else {
                cfg.model
            },
            dim: cfg.dimension,
            chunk_size: if cfg.chunk_size == 0 {
                DEFAULT_CHUNK_SIZE
            } else {
                cfg.chunk_size
            },
            base_url,
            api_key,
            endpoint,
            auth_key,
            max_retries: cfg.max_retries,
            timeout: cfg.timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Maximum number of texts sent in one API request.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured base URL override, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Base URL requests are sent to.
    pub fn resolved_base_url(&self) -> &str {
        &self.endpoint
    }

    /// API key sent with requests, if any.
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.auth_key.as_deref()
    }

    async fn call_api(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        EmbeddingCall {
            client: &self.client,
            base_url: &self.endpoint,
            api_key: self.auth_key.as_deref(),
            model: &self.model,
            dimensions: self.dim,
            timeout: self.timeout,
            max_retries: self.max_retries,
        }
        .send(texts)
        .await
    }
}

#[async_trait::async_trait]
impl Embedder for OpenAI {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if text.is_empty() {
            return Err(EmbedError::EmptyInput);
        }
        let vecs = self.embed_batch(&[text]).await?;
        vecs.into_iter().next().ok_or(EmbedError::MissingIndex(0))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Err(EmbedError::EmptyInput);
        }

        let mut result = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.chunk_size) {
            let vecs = self.call_api(chunk).await?;
            result.extend(vecs);
        }
        Ok(result)
    }

    fn dimension(&self) -> usize {
        if self.dim > 0 {
            self.dim
        } else {
            model_dimension(&self.model).unwrap_or(0)
        }
    }
}

fn resolve_base_url(configured: Option<&str>, env: &EmbedEnv) -> String {
    configured
        .or(env.base_url.as_deref())
        .unwrap_or(OPENAI_BASE_URL)
        .to_string()
}

fn resolve_api_key(configured: Option<&str>, env: &EmbedEnv) -> Option<String> {
    configured.or(env.api_key.as_deref()).map(str::to_string)
}
