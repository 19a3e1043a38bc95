use std::time::Duration;

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Default number of texts sent per API request.
pub const DEFAULT_CHUNK_SIZE: usize = 200;

/// Default number of extra attempts for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder-style configuration for the OpenAI-compatible embedder.
///
/// `None` for `base_url` or `api_key` leaves resolution to the client at
/// request time (see [`crate::OpenAI`]). A `dimension` of 0 keeps the
/// model's native output size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedConfig {
    pub model: String,
    pub dimension: usize,
    pub chunk_size: usize,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub max_retries: u32,
    pub timeout: Duration,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            dimension: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            base_url: None,
            api_key: None,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl EmbedConfig {
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_dimension(mut self, dim: usize) -> Self {
        self.dimension = dim;
        self
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
