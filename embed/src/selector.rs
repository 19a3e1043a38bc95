//! Embeddings provider selection.
//!
//! Picks between the hosted OpenAI endpoint and an OpenAI-compatible
//! alternative based on [`EmbedEnv`]. Selection never fails and performs no
//! I/O; bad URLs or keys surface on the first request.

use tracing::debug;

use crate::config::{DEFAULT_CHUNK_SIZE, EmbedConfig};
use crate::env::EmbedEnv;
use crate::openai::{MODEL_OPENAI_3_SMALL, OpenAI};

/// Model used by every client the selector builds.
pub const SELECTED_MODEL: &str = MODEL_OPENAI_3_SMALL;

/// Batch size used by every client the selector builds.
pub const SELECTED_CHUNK_SIZE: usize = DEFAULT_CHUNK_SIZE;

/// Build the client configuration for `env`.
///
/// With `api_base` set, the client targets that URL with `api_key` (which may
/// be `None`). Otherwise base URL and key stay unset so the client resolves
/// them itself.
pub fn select_config(env: &EmbedEnv) -> EmbedConfig {
    let cfg = EmbedConfig::default()
        .with_model(SELECTED_MODEL)
        .with_chunk_size(SELECTED_CHUNK_SIZE);

    match env.api_base.as_deref() {
        Some(base) => {
            debug!(
                base_url = base,
                has_api_key = env.api_key.is_some(),
                "using OpenAI-compatible embeddings endpoint"
            );
            EmbedConfig {
                base_url: Some(base.to_string()),
                api_key: env.api_key.clone(),
                ..cfg
            }
        }
        None => {
            debug!("using default OpenAI embeddings endpoint");
            cfg
        }
    }
}

/// Return a fresh embeddings client for `env`.
///
/// `env` is the only source consulted: in the default branch the client's
/// fallback base URL and key come from it, not from the process.
pub fn embeddings_client(env: &EmbedEnv) -> OpenAI {
    OpenAI::with_env(select_config(env), env)
}

/// Return a fresh embeddings client for the current process environment.
pub fn embeddings_client_from_env() -> OpenAI {
    embeddings_client(&EmbedEnv::from_env())
}
