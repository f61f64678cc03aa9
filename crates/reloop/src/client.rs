use reloop_core::{Completion, CompletionRequestPayload, Error, ReactLoop};
use reloop_openai_model::{
    EmbeddingRequest, Error as OpenAIError, OpenAIConfig, OpenAIConfigBuilder,
    OpenAIProvider,
};

/// The iteration ceiling used unless configured otherwise.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// A ready-to-use client for OpenAI-compatible endpoints.
///
/// The client pairs an [`OpenAIProvider`] with a [`ReactLoop`], so that a
/// single call runs tool calls to completion.
#[derive(Clone)]
pub struct Client {
    provider: OpenAIProvider,
    react_loop: ReactLoop,
    max_iterations: usize,
}

impl Client {
    /// Creates a client with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let provider = OpenAIProvider::new(config);
        let react_loop = ReactLoop::new(provider.clone());
        Self {
            provider,
            react_loop,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Creates a client configured from the `OPENAI_*` environment
    /// variables.
    #[inline]
    pub fn from_env() -> Self {
        Self::new(OpenAIConfigBuilder::from_env().build())
    }

    /// Sets the iteration ceiling of [`get_completion`](Self::get_completion)
    /// and [`run`](Self::run).
    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns the configured model.
    #[inline]
    pub fn model(&self) -> &str {
        self.provider.config().model()
    }

    /// Runs the loop and returns the content of the final message.
    ///
    /// The payload keeps every appended message, so the conversation can be
    /// continued by adding messages and calling this again.
    pub async fn get_completion(
        &self,
        payload: &mut CompletionRequestPayload,
    ) -> Result<String, Error> {
        let completion = self.run(payload).await?;
        Ok(completion.message.content)
    }

    /// Runs the loop and returns the whole outcome, including usage.
    #[inline]
    pub async fn run(
        &self,
        payload: &mut CompletionRequestPayload,
    ) -> Result<Completion, Error> {
        self.react_loop.run(payload, self.max_iterations).await
    }

    /// Fetches the embedding vector of `input`.
    ///
    /// An empty `model` means the configured model.
    pub async fn get_embedding(
        &self,
        model: &str,
        input: &str,
    ) -> Result<Vec<f64>, OpenAIError> {
        self.provider
            .get_embedding(&EmbeddingRequest::new(model, input))
            .await
    }
}
