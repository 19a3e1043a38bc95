//! Text embedding client for OpenAI and OpenAI-compatible endpoints, plus
//! the environment-driven selector that decides which one to talk to.

pub mod config;
pub mod embed;
pub mod env;
pub mod error;
pub mod openai;
pub(crate) mod openai_compat;
pub mod selector;

pub use config::EmbedConfig;
pub use embed::Embedder;
pub use env::EmbedEnv;
pub use error::{EmbedError, Result};
pub use openai::OpenAI;
pub use selector::{embeddings_client, embeddings_client_from_env, select_config};
