use std::env;
use std::fmt::Debug;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

/// Builder for [`OpenAIConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OpenAIConfigBuilder {
    api_key: String,
    model: Option<String>,
    base_url: Option<String>,
    max_retries: u32,
    retry_interval: Option<Duration>,
}

impl OpenAIConfigBuilder {
    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            model: None,
            base_url: None,
            max_retries: 0,
            retry_interval: None,
        }
    }

    /// Creates a builder from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and
    /// `OPENAI_MODEL`.
    ///
    /// Unset or empty variables leave the defaults in place. A missing API
    /// key results in an empty key, which some local endpoints accept.
    #[inline]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env), but reads variables through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key = var("OPENAI_API_KEY").unwrap_or_else(|| {
            warn!("OPENAI_API_KEY is not set, requests are unauthenticated");
            String::new()
        });
        let mut builder = Self::with_api_key(api_key);
        builder.base_url = var("OPENAI_BASE_URL");
        builder.model = var("OPENAI_MODEL");
        builder
    }

    /// Sets the model to use when a request doesn't name one.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets a custom base URL, including the version segment (e.g.
    /// `http://localhost:8080/v1`).
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets how many times a transient failure is retried. Defaults to 0.
    #[inline]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the initial delay between retries.
    #[inline]
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = Some(interval);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> OpenAIConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        OpenAIConfig {
            api_key: self.api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries: self.max_retries,
            retry_interval: self.retry_interval.unwrap_or(DEFAULT_RETRY_INTERVAL),
        }
    }
}

impl Debug for OpenAIConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfigBuilder")
            .field("api_key", &"<deducted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

/// Configuration for the OpenAI-compatible provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OpenAIConfig {
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
    pub(crate) retry_interval: Duration,
}

impl OpenAIConfig {
    /// Returns the default model.
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the base URL without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<deducted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = OpenAIConfigBuilder::with_api_key("xxx").build();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, 0);
        assert_eq!(
            config.endpoint("/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_from_lookup() {
        let vars = HashMap::from([
            ("OPENAI_BASE_URL", "http://env-url.com/v1/"),
            ("OPENAI_API_KEY", "env-key"),
            ("OPENAI_MODEL", ""),
        ]);
        let config = OpenAIConfigBuilder::from_lookup(|name| {
            vars.get(name).map(|v| v.to_string())
        })
        .build();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url(), "http://env-url.com/v1");
        // Empty variables are treated as unset.
        assert_eq!(config.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = OpenAIConfigBuilder::with_api_key("secret").build();
        let output = format!("{config:?}");
        assert!(!output.contains("secret"));
    }
}
