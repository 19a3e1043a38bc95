//! Snapshot of the environment variables that drive provider selection.

/// Base-URL override; switches the client to an OpenAI-compatible endpoint.
pub const ENV_API_BASE: &str = "OPENAI_API_BASE";

/// API key; paired with [`ENV_API_BASE`] by the selector and used as the
/// client's fallback key otherwise.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Fallback base URL for a client with no base URL configured.
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";

/// Embedding-related environment configuration, read once at startup.
///
/// Empty values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedEnv {
    pub api_base: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl EmbedEnv {
    /// Read the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v: &String| !v.is_empty());
        Self {
            api_base: read(ENV_API_BASE),
            api_key: read(ENV_API_KEY),
            base_url: read(ENV_BASE_URL),
        }
    }

    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = Some(base.to_string()).filter(|v| !v.is_empty());
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string()).filter(|v| !v.is_empty());
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string()).filter(|v| !v.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_variables() {
        let env = EmbedEnv::from_lookup(|name| match name {
            "OPENAI_API_BASE" => Some("https://example.com/v1".into()),
            "OPENAI_API_KEY" => Some("sk-x".into()),
            _ => None,
        });
        assert_eq!(env.api_base.as_deref(), Some("https://example.com/v1"));
        assert_eq!(env.api_key.as_deref(), Some("sk-x"));
    }

    #[test]
    fn empty_values_are_unset() {
        let env = EmbedEnv::from_lookup(|_| Some(String::new()));
        assert_eq!(env, EmbedEnv::default());

        let env = EmbedEnv::default()
            .with_api_base("")
            .with_api_key("")
            .with_base_url("");
        assert_eq!(env, EmbedEnv::default());
    }

    #[test]
    fn reads_fallback_base_url() {
        let env = EmbedEnv::from_lookup(|name| match name {
            "OPENAI_BASE_URL" => Some("https://other/v1".into()),
            _ => None,
        });
        assert_eq!(env.base_url.as_deref(), Some("https://other/v1"));
        assert_eq!(env.api_base, None);
        assert_eq!(env.api_key, None);
    }

    #[test]
    fn ignores_unrelated_variables() {
        let env = EmbedEnv::from_lookup(|name| match name {
            "OPENAI_ORGANIZATION" => Some("org-1".into()),
            _ => None,
        });
        assert_eq!(env, EmbedEnv::default());
    }
}
