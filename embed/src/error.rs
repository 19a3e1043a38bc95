use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbedError>;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("embed: empty input")]
    EmptyInput,

    #[error("embed: http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embed: API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("embed: decode response: {0}")]
    Decode(String),

    #[error("embed: missing embedding for index {0}")]
    MissingIndex(usize),

    #[error("embed: unexpected embedding index {index} for batch size {batch_size}")]
    UnexpectedIndex { index: usize, batch_size: usize },
}

impl EmbedError {
    /// Reports whether the failed request is worth another attempt.
    ///
    /// Transport failures, rate limiting (429) and server errors (5xx) are
    /// transient; everything else is returned to the caller as-is.
    pub fn is_retryable(&self) -> bool {
        match self {
            EmbedError::Http(e) => !e.is_builder() && !e.is_decode(),
            EmbedError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_retryable_statuses() {
        let api = |status| EmbedError::Api {
            status,
            body: String::new(),
        };
        assert!(api(429).is_retryable());
        assert!(api(500).is_retryable());
        assert!(api(503).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!api(401).is_retryable());
        assert!(!api(404).is_retryable());
    }

    #[test]
    fn local_errors_are_not_retryable() {
        assert!(!EmbedError::EmptyInput.is_retryable());
        assert!(!EmbedError::MissingIndex(3).is_retryable());
        assert!(!EmbedError::Decode("bad json".into()).is_retryable());
        assert!(
            !EmbedError::UnexpectedIndex {
                index: 5,
                batch_size: 2
            }
            .is_retryable()
        );
    }

    #[test]
    fn display_messages() {
        let err = EmbedError::Api {
            status: 401,
            body: "invalid key".into(),
        };
        assert_eq!(err.to_string(), "embed: API error: HTTP 401: invalid key");
        assert_eq!(
            EmbedError::MissingIndex(2).to_string(),
            "embed: missing embedding for index 2"
        );
    }
}
